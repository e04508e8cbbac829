// --- File: crates/dpd_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Shipment Defaults ---
// Applied every time a new order is started.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ShipmentDefaults {
    #[serde(default = "default_paper_format")]
    pub paper_format: String, // A4 | A6 | A7
    #[serde(default = "default_printer_language")]
    pub printer_language: String, // PDF | ZPL
    #[serde(default = "default_start_position")]
    pub start_position: String, // UpperLeft | UpperRight | LowerLeft | LowerRight
    #[serde(default)]
    pub saturday_delivery: bool,
}

impl Default for ShipmentDefaults {
    fn default() -> Self {
        Self {
            paper_format: default_paper_format(),
            printer_language: default_printer_language(),
            start_position: default_start_position(),
            saturday_delivery: false,
        }
    }
}

// --- DPD Config ---
// Credentials are usually "secret_from_env" in the config file and injected at load time.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DpdConfig {
    /// Use the DPD staging environment instead of the live one.
    #[serde(default)]
    pub staging: bool,
    /// Overrides the environment base URL (proxies, mock servers).
    #[serde(default)]
    pub base_url: Option<String>,
    pub delis_id: String, // Loaded via DPD_SECRET_DPD_DELIS_ID or DPD_DELIS_ID
    pub password: String, // Loaded via DPD_SECRET_DPD_PASSWORD or DPD_PASSWORD
    #[serde(default = "default_message_language")]
    pub message_language: String,
    #[serde(default)]
    pub customer_number: Option<String>,
    /// Log raw SOAP requests and responses at DEBUG level.
    #[serde(default)]
    pub tracing: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub shipment: ShipmentDefaults,
}

impl Default for DpdConfig {
    fn default() -> Self {
        Self {
            staging: false,
            base_url: None,
            delis_id: String::new(),
            password: String::new(),
            message_language: default_message_language(),
            customer_number: None,
            tracing: false,
            timeout_secs: default_timeout_secs(),
            shipment: ShipmentDefaults::default(),
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub dpd: DpdConfig,
}

fn default_message_language() -> String {
    "en_EN".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_paper_format() -> String {
    "A4".to_string()
}

fn default_printer_language() -> String {
    "PDF".to_string()
}

fn default_start_position() -> String {
    "UpperLeft".to_string()
}
