use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Statement-layout and output configuration, persisted as JSON.
/// Column names are fixed identifiers for a session; the defaults match the
/// card company's export layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_merchant_column")]
    pub merchant_column: String,
    #[serde(default = "default_amount_column")]
    pub amount_column: String,
    /// A column whose name contains any of these is a date candidate.
    #[serde(default = "default_date_markers")]
    pub date_markers: Vec<String>,
    /// Merchant values that mark a non-transaction row (leaked header text,
    /// fee-waiver line items).
    #[serde(default = "default_skip_merchants")]
    pub skip_merchants: Vec<String>,
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
}

fn default_merchant_column() -> String {
    "이용하신 가맹점".to_string()
}

fn default_amount_column() -> String {
    "이용금액".to_string()
}

fn default_date_markers() -> Vec<String> {
    vec!["일자".to_string(), "승인일".to_string(), "거래일".to_string()]
}

fn default_skip_merchants() -> Vec<String> {
    vec!["이용하신 가맹점".to_string(), "연회비 할인".to_string()]
}

fn default_export_dir() -> String {
    data_dir().join("exports").to_string_lossy().to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            merchant_column: default_merchant_column(),
            amount_column: default_amount_column(),
            date_markers: default_date_markers(),
            skip_merchants: default_skip_merchants(),
            export_dir: default_export_dir(),
        }
    }
}

/// Root override for tests and sandboxed runs. When MYEONGSE_HOME is set,
/// config and data both live under it.
fn home_override() -> Option<PathBuf> {
    std::env::var_os("MYEONGSE_HOME").map(PathBuf::from)
}

pub fn config_dir() -> PathBuf {
    if let Some(root) = home_override() {
        return root.join("config");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("myeongse")
}

pub fn data_dir() -> PathBuf {
    if let Some(root) = home_override() {
        return root.join("data");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("myeongse")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn categories_path() -> PathBuf {
    config_dir().join("categories.json")
}

pub fn recent_path() -> PathBuf {
    config_dir().join("recent.json")
}

pub fn log_path() -> PathBuf {
    data_dir().join("myeongse.log")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| AppError::Config(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}
