//! Page configuration loaded from the environment.
//!
//! | Env | Default | Description |
//! |-----|---------|-------------|
//! | PEOPLE_API_URL | mate-academy people.json | People API endpoint. |
//! | PEOPLE_FILE | unset | Read people from this JSON file instead of the API. |
//! | PEOPLE_TIMEOUT_SECS | 10 | HTTP timeout. |
//! | PEOPLE_LOG_LEVEL | info | error \| warn \| info \| debug \| trace |
//! | PEOPLE_OUTPUT | table | table \| json |

use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

use genealogy::source::DEFAULT_API_URL;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageConfig {
    pub api_url: String,
    pub file: Option<PathBuf>,
    pub timeout_secs: u64,
    pub log_level: String,
    pub output: OutputFormat,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            file: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: "info".to_string(),
            output: OutputFormat::Table,
        }
    }
}

impl PageConfig {
    /// Unset or invalid => defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            api_url: get("PEOPLE_API_URL").unwrap_or(defaults.api_url),
            file: get("PEOPLE_FILE").map(PathBuf::from),
            timeout_secs: get("PEOPLE_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.timeout_secs),
            log_level: get("PEOPLE_LOG_LEVEL")
                .map(|v| v.to_lowercase())
                .filter(|v| v.parse::<Level>().is_ok())
                .unwrap_or(defaults.log_level),
            output: match get("PEOPLE_OUTPUT").map(|v| v.to_lowercase()).as_deref() {
                Some("json") => OutputFormat::Json,
                _ => defaults.output,
            },
        }
    }

    pub fn level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
