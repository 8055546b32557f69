use crate::report::ReportOptions;
use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const OUT_DIR_VAR: &str = "SPNOTES_OUT_DIR";
pub const TIMEOUT_VAR: &str = "SPNOTES_TIMEOUT_SECS";
pub const STAT_LABELS_VAR: &str = "SPNOTES_STAT_LABELS";
pub const LOG_VAR: &str = "SPNOTES_LOG";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    /// Where generated files are written.
    pub out_dir: PathBuf,
    /// Per-request timeout for every remote call.
    pub timeout: Duration,
    pub report: ReportOptions,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            out_dir: PathBuf::from("."),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            report: ReportOptions::default(),
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from a variable lookup. Unset, blank or unparsable
    /// values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let mut settings = Self::default();

        if let Some(dir) = get(OUT_DIR_VAR) {
            settings.out_dir = PathBuf::from(dir);
        }
        if let Some(secs) = get(TIMEOUT_VAR).and_then(|v| v.parse::<u64>().ok())
            && secs > 0
        {
            settings.timeout = Duration::from_secs(secs);
        }
        if let Some(flag) = get(STAT_LABELS_VAR) {
            settings.report.stat_labels = parse_flag(&flag);
        }
        settings.log_level = get(LOG_VAR).and_then(|v| LevelFilter::from_str(&v).ok());

        settings
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
