//! TOML configuration loading and environment overrides.
//!
//! Separated from struct definitions so that file I/O and env handling stay
//! independent of the serde schema.

mod structs;

pub use structs::{GeneralConfig, JournalConfig, JsonConfig, LevelPattern, LocalConfig};

use crate::internal;
use crate::level::Level;
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Names a backend identifier to try before auto-detection.
pub const ENV_BACKEND: &str = "RELAYLOG_BACKEND";
/// Threshold of the local backend.
pub const ENV_LEVEL: &str = "RELAYLOG_LEVEL";
/// File the local backend writes to.
pub const ENV_FILE: &str = "RELAYLOG_FILE";
/// Process-wide override level.
pub const ENV_GLOBAL_LEVEL: &str = "RELAYLOG_GLOBAL_LEVEL";
/// Explicit config file location.
pub const ENV_CONFIG: &str = "RELAYLOG_CONFIG";

/// A completely empty config file must still produce a working facade: `#[serde(default)]`
/// on every field ensures zero-config works out of the box.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Backend choice and the global override apply to every logger.
    pub general: GeneralConfig,
    /// The guaranteed fallback backend.
    pub local: LocalConfig,
    /// Systemd journal backend.
    pub journal: JournalConfig,
    /// JSONL backend, only used when named.
    pub json: JsonConfig,
}

impl Config {
    /// Loads the config from `RELAYLOG_CONFIG` or the default location, then
    /// applies environment overrides.
    ///
    /// # Errors
    /// Fails on unreadable or malformed files, or an explicit
    /// `RELAYLOG_CONFIG` pointing at a missing file.
    pub fn load() -> Result<Self, crate::Error> {
        let mut config = match std::env::var_os(ENV_CONFIG) {
            Some(path) => {
                let path = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).as_ref());
                if !path.exists() {
                    return Err(crate::Error::MissingFile(path));
                }
                Self::load_from(&path)?
            }
            None => Self::load_from(&Self::get_config_path()?)?,
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Loads configuration from an explicit path; a missing file yields defaults.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Environment values take precedence over the file. `lookup` is injected
    /// so tests don't have to mutate the process environment.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = lookup(ENV_BACKEND).filter(|v| !v.trim().is_empty()) {
            self.general.backend = Some(backend.trim().to_string());
        }
        if let Some(level) = lookup(ENV_GLOBAL_LEVEL).filter(|v| !v.trim().is_empty()) {
            self.general.global_level = Some(level);
        }
        if let Some(level) = lookup(ENV_LEVEL).filter(|v| !v.trim().is_empty()) {
            self.local.level = level;
        }
        if let Some(file) = lookup(ENV_FILE).filter(|v| !v.trim().is_empty()) {
            self.local.file = Some(file);
        }
    }

    /// XDG-compliant path `<config_dir>/relaylog/relaylog.toml`.
    ///
    /// # Errors
    /// Fails when the platform has no concept of a config directory.
    pub fn get_config_path() -> Result<PathBuf, crate::Error> {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("relaylog").join("relaylog.toml"))
            .ok_or(crate::Error::ConfigDirNotFound)
    }

    /// Requested backend identifier, normalized to lowercase.
    #[must_use]
    pub fn backend_name(&self) -> Option<String> {
        self.general
            .backend
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_lowercase)
    }

    /// Global override; an unparsable value is reported and ignored.
    #[must_use]
    pub fn parse_global_level(&self) -> Option<Level> {
        let raw = self.general.global_level.as_deref()?;
        parse_or_warn(raw, "general.global_level")
    }

    /// Local backend threshold, `Info` when unparsable.
    #[must_use]
    pub fn parse_local_level(&self) -> Level {
        parse_or_warn(&self.local.level, "local.level").unwrap_or(Level::Info)
    }

    /// Journal backend threshold, `Info` when unparsable.
    #[must_use]
    pub fn parse_journal_level(&self) -> Level {
        parse_or_warn(&self.journal.level, "journal.level").unwrap_or(Level::Info)
    }

    /// JSON backend threshold, `Info` when unparsable.
    #[must_use]
    pub fn parse_json_level(&self) -> Level {
        parse_or_warn(&self.json.level, "json.level").unwrap_or(Level::Info)
    }

    /// Compiles `local.levels`; entries with a bad regex or level are reported and skipped.
    #[must_use]
    pub fn parse_level_patterns(&self) -> Vec<(Regex, Level)> {
        self.local
            .levels
            .iter()
            .filter_map(|entry| {
                let regex = match Regex::new(&entry.pattern) {
                    Ok(regex) => regex,
                    Err(e) => {
                        internal::warn(&format!(
                            "ignoring logger pattern '{}': {}",
                            entry.pattern,
                            crate::Error::from(e)
                        ));
                        return None;
                    }
                };
                let level = parse_or_warn(&entry.level, &entry.pattern)?;
                Some((regex, level))
            })
            .collect()
    }
}

fn parse_or_warn(raw: &str, key: &str) -> Option<Level> {
    match raw.parse::<Level>() {
        Ok(level) => Some(level),
        Err(e) => {
            internal::warn(&format!("{}: {key}", crate::Error::InvalidLevel(e.to_string())));
            None
        }
    }
}
