//! Configuration struct definitions.

use serde::Deserialize;

/// Settings that apply to the facade as a whole, not to any one backend.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Backend identifier to try before auto-detection (`log`, `journal`, `local`, `json`, `null`).
    pub backend: Option<String>,
    /// Process-wide override level; unset means the backend alone decides.
    pub global_level: Option<String>,
}

/// Guaranteed fallback backend: stderr or a plain file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocalConfig {
    /// Threshold for loggers without a matching pattern.
    pub level: String,
    /// Log file; stderr when unset.
    pub file: Option<String>,
    /// Timestamp format (strftime).
    pub timestamp_format: String,
    /// Per-logger thresholds, first match wins.
    pub levels: Vec<LevelPattern>,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            timestamp_format: "%Y-%m-%d %H:%M:%S%.3f".to_string(),
            levels: Vec::new(),
        }
    }
}

/// Regex on the logger name paired with the threshold to use when it matches.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LevelPattern {
    pub pattern: String,
    pub level: String,
}

/// Systemd journal backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    /// `SYSLOG_IDENTIFIER` attached to every entry.
    pub identifier: String,
    /// Native protocol socket.
    pub socket: String,
    /// Threshold below which entries are not sent.
    pub level: String,
    /// Calls between re-checks of the socket.
    pub refresh_every: u32,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            identifier: "relaylog".to_string(),
            socket: "/run/systemd/journal/socket".to_string(),
            level: "info".to_string(),
            refresh_every: crate::backend::DEFAULT_REFRESH_EVERY,
        }
    }
}

/// JSONL backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JsonConfig {
    /// JSONL file path.
    pub path: String,
    /// Threshold for all loggers.
    pub level: String,
}

impl Default for JsonConfig {
    fn default() -> Self {
        let path = directories::ProjectDirs::from("", "", "relaylog").map_or_else(
            || "relaylog.jsonl".to_string(),
            |dirs| {
                dirs.state_dir()
                    .unwrap_or_else(|| dirs.data_dir())
                    .join("relaylog.jsonl")
                    .to_string_lossy()
                    .into_owned()
            },
        );

        Self {
            path,
            level: "info".to_string(),
        }
    }
}
