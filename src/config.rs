use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Riskdesk";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default address of the external prediction backend.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Default listen address for the dashboard server.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:7420";

/// Request timeout for calls to the prediction backend, in seconds.
pub const BACKEND_TIMEOUT_SECS: u64 = 30;

/// Get the application data directory
/// ~/Riskdesk/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Riskdesk")
}

/// Directory where generated prescription PDFs are written.
pub fn exports_dir() -> PathBuf {
    app_data_dir().join("exports")
}

/// Base URL of the prediction backend. `RISKDESK_BACKEND_URL` overrides.
pub fn backend_url() -> String {
    std::env::var("RISKDESK_BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string())
}

/// Listen address for the dashboard server. `RISKDESK_BIND_ADDR` overrides.
pub fn bind_addr() -> SocketAddr {
    let raw = std::env::var("RISKDESK_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    raw.parse()
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.parse().expect("default bind addr parses"))
}

/// Directory holding the built dashboard assets. `RISKDESK_UI_DIR` overrides.
pub fn ui_assets_dir() -> PathBuf {
    std::env::var("RISKDESK_UI_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("ui"))
}

/// Path to the bundled drug reference data. `RISKDESK_DRUG_DATA` overrides.
pub fn drug_data_path() -> PathBuf {
    std::env::var("RISKDESK_DRUG_DATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("resources").join("drug_reference.json"))
}

/// Default tracing filter when `RUST_LOG` is not set.
pub fn default_log_filter() -> String {
    "info,riskdesk=debug".to_string()
}
