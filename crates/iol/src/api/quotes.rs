//! Quote panel listing (`/api/v2/Cotizaciones/{instrument}/{country}/{panel}`).

use serde::{Deserialize, Serialize};

/// Response of a quote panel request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuotePanel {
    #[serde(rename = "titulos", default)]
    pub quotes: Vec<Quote>,
}

/// One instrument row of a quote panel.
///
/// Every field is optional: the panel omits or nulls what does not apply to
/// the instrument type (strike price for stocks, for instance).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Quote {
    #[serde(rename = "simbolo")]
    pub symbol: Option<String>,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    #[serde(rename = "ultimoPrecio")]
    pub last_price: Option<f64>,
    #[serde(rename = "variacionPorcentual")]
    pub change_percent: Option<f64>,
    #[serde(rename = "apertura")]
    pub open: Option<f64>,
    #[serde(rename = "maximo")]
    pub high: Option<f64>,
    #[serde(rename = "minimo")]
    pub low: Option<f64>,
    #[serde(rename = "ultimoCierre")]
    pub previous_close: Option<f64>,
    #[serde(rename = "volumen")]
    pub volume: Option<f64>,
    #[serde(rename = "cantidadOperaciones")]
    pub trades: Option<u64>,
    #[serde(rename = "tipoOpcion")]
    pub option_type: Option<String>,
    #[serde(rename = "precioEjercicio")]
    pub strike_price: Option<f64>,
    #[serde(rename = "fechaVencimiento")]
    pub expiry_date: Option<String>,
    #[serde(rename = "mercado")]
    pub market: Option<String>,
    #[serde(rename = "moneda")]
    pub currency: Option<String>,
    #[serde(rename = "puntas")]
    pub best: Option<BestQuotes>,
}

/// Best bid and ask (`puntas`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BestQuotes {
    #[serde(rename = "precioCompra")]
    pub bid_price: Option<f64>,
    #[serde(rename = "cantidadCompra")]
    pub bid_size: Option<f64>,
    #[serde(rename = "precioVenta")]
    pub ask_price: Option<f64>,
    #[serde(rename = "cantidadVenta")]
    pub ask_size: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_panel_with_partial_rows() {
        let panel: QuotePanel = serde_json::from_str(
            r#"{
                "titulos": [
                    {
                        "simbolo": "GGAL",
                        "descripcion": "Grupo Financiero Galicia",
                        "ultimoPrecio": 4520.5,
                        "variacionPorcentual": -1.25,
                        "apertura": 4600,
                        "maximo": 4610,
                        "minimo": 4480,
                        "ultimoCierre": 4577.75,
                        "volumen": 1250000,
                        "cantidadOperaciones": 3120,
                        "tipoOpcion": null,
                        "precioEjercicio": null,
                        "fechaVencimiento": null,
                        "mercado": "BCBA",
                        "moneda": "AR$",
                        "puntas": {
                            "precioCompra": 4515,
                            "cantidadCompra": 200,
                            "precioVenta": 4525,
                            "cantidadVenta": 150
                        }
                    },
                    { "simbolo": "YPFD" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(panel.quotes.len(), 2);
        let ggal = &panel.quotes[0];
        assert_eq!(ggal.symbol.as_deref(), Some("GGAL"));
        assert_eq!(ggal.trades, Some(3120));
        assert_eq!(ggal.best.as_ref().unwrap().ask_price, Some(4525.0));
        assert!(panel.quotes[1].last_price.is_none());
        assert!(panel.quotes[1].best.is_none());
    }

    #[test]
    fn missing_titles_is_empty_panel() {
        let panel: QuotePanel = serde_json::from_str("{}").unwrap();
        assert!(panel.quotes.is_empty());
    }
}
