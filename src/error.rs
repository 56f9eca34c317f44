//! Unified error type for relaylog operations.
//!
//! Logging calls never return these: they surface only from configuration
//! loading and backend construction, and the selector turns the latter into
//! warnings.

use std::path::PathBuf;

/// Error type for relaylog operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error.
    Io(std::io::Error),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// Config directory not found.
    ConfigDirNotFound,
    /// Format/serialization error.
    Format(String),
    /// Invalid log level string.
    InvalidLevel(String),
    /// Invalid per-logger level pattern.
    InvalidPattern(regex::Error),
    /// A backend exists but cannot be used in this process.
    Unavailable(String),
    /// No backend is registered under this identifier.
    UnknownBackend(String),
    /// Backend construction or probing panicked.
    ProbePanicked(String),
    /// File that was expected to exist is missing.
    MissingFile(PathBuf),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::ConfigDirNotFound => write!(f, "config directory not found"),
            Self::Format(s) => write!(f, "format error: {s}"),
            Self::InvalidLevel(level) => write!(f, "invalid level: {level}"),
            Self::InvalidPattern(e) => write!(f, "invalid logger pattern: {e}"),
            Self::Unavailable(why) => write!(f, "backend unavailable: {why}"),
            Self::UnknownBackend(name) => write!(f, "unknown backend: {name}"),
            Self::ProbePanicked(why) => write!(f, "backend probe panicked: {why}"),
            Self::MissingFile(p) => write!(f, "file not found: {}", p.display()),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::ConfigParse(e) => Some(e),
            Self::InvalidPattern(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}

impl From<regex::Error> for Error {
    fn from(e: regex::Error) -> Self {
        Self::InvalidPattern(e)
    }
}
