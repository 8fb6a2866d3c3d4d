use std::path::Path;
use std::process::{Command, Output};

/// Run the CLI against `api_url` with isolated configuration.
///
/// The working directory is `home`, so no stray `.env` file is picked up and
/// the default `tokens.json` lands inside the temporary directory.
pub fn run_cli_with_env(args: &[&str], home: &Path, api_url: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_iol"));
    cmd.args(args);
    cmd.current_dir(home);
    cmd.env("IOL_API_URL", api_url);
    cmd.env("IOL_USERNAME", "inversor");
    cmd.env("IOL_PASSWORD", "clave");
    cmd.env_remove("IOL_TOKEN_FILE");
    cmd.env_remove("IOL_TIMEOUT_SECS");
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI with isolated configuration and expect success.
pub fn run_cli_with_env_success(args: &[&str], home: &Path, api_url: &str) -> String {
    let output = run_cli_with_env(args, home, api_url);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}
