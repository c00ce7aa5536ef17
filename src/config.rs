use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_vs_currency")]
    pub vs_currency: String,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default = "default_report_path")]
    pub report_path: String,
    #[serde(default = "default_check_interval_seconds")]
    pub check_interval_seconds: u64,
    #[serde(default = "default_http_timeout_seconds")]
    pub http_timeout_seconds: u64,
}

fn default_api_base_url() -> String {
    "https://api.coingecko.com/api/v3".to_string()
}

fn default_vs_currency() -> String {
    "usd".to_string()
}

fn default_per_page() -> u32 {
    50
}

fn default_report_path() -> String {
    "Live_Crypto_Report.xlsx".to_string()
}

fn default_check_interval_seconds() -> u64 {
    300
}

fn default_http_timeout_seconds() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            vs_currency: default_vs_currency(),
            per_page: default_per_page(),
            report_path: default_report_path(),
            check_interval_seconds: default_check_interval_seconds(),
            http_timeout_seconds: default_http_timeout_seconds(),
        }
    }
}

pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}
