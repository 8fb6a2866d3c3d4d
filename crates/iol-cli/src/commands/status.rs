//! Status command implementation.

use anyhow::Result;
use clap::Args;

use iol::SessionState;

use crate::cli::GlobalArgs;
use crate::{context, output};

#[derive(Args, Debug)]
pub struct StatusArgs {}

pub async fn run(_args: StatusArgs, global: &GlobalArgs) -> Result<()> {
    let client = context::open(global)?;
    let session = client.session();

    output::field("User", session.credentials().username());
    output::field("API", &session.credentials().api_url().to_string());

    let state = match session.state() {
        SessionState::Unauthenticated => "not logged in",
        SessionState::Authenticated => "authenticated",
        SessionState::Expired => "expired",
    };
    output::field("State", state);

    if let Some(token) = session.token() {
        output::field("Expires", &token.expires_at.to_rfc3339());
        if session.state() == SessionState::Authenticated {
            let remaining = token.time_until_expiry();
            output::field(
                "Remaining",
                &format!("{}m {}s", remaining.num_minutes(), remaining.num_seconds() % 60),
            );
        }
    }

    context::finish(client);
    Ok(())
}
