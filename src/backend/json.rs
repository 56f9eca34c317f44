//! Append-only JSONL backend, one object per line so the log can be queried
//! with `jq` or loaded line by line. Only used when selected by name.

use super::{Backend, BackendFactory, CauseChain};
use crate::config::Config;
use crate::level::Level;
use chrono::Local;
use serde::Serialize;
use std::error::Error as StdError;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use ulid::Ulid;

/// Flat structure optimized for JSONL.
#[derive(Debug, Serialize)]
struct JsonEntry<'a> {
    /// ULID is time-sortable and unique even with concurrent writers.
    id: String,
    /// RFC 3339 timestamp.
    ts: String,
    level: &'static str,
    logger: &'a str,
    msg: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    cause: Option<String>,
}

/// Opened JSONL file shared by every logger.
#[derive(Debug, Clone)]
pub struct JsonFactory {
    path: PathBuf,
    file: Arc<Mutex<File>>,
    threshold: Level,
}

impl JsonFactory {
    /// # Errors
    /// I/O errors creating the parent directory or opening the file.
    pub fn from_config(config: &Config) -> Result<Self, crate::Error> {
        let expanded = shellexpand::tilde(&config.json.path);
        Self::open(Path::new(expanded.as_ref()), config.parse_json_level())
    }

    /// # Errors
    /// I/O errors creating the parent directory or opening the file.
    pub fn open(path: &Path, threshold: Level) -> Result<Self, crate::Error> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file: Arc::new(Mutex::new(file)),
            threshold,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BackendFactory for JsonFactory {
    fn create_backend(&self, identity: &str) -> Result<Arc<dyn Backend>, crate::Error> {
        Ok(Arc::new(JsonBackend {
            logger: identity.to_string(),
            file: Arc::clone(&self.file),
            threshold: self.threshold,
        }))
    }
}

/// One logger's JSONL writer.
#[derive(Debug)]
pub struct JsonBackend {
    logger: String,
    file: Arc<Mutex<File>>,
    threshold: Level,
}

impl JsonBackend {
    fn append(&self, level: Level, msg: &str, cause: Option<String>) -> Result<(), crate::Error> {
        let entry = JsonEntry {
            id: Ulid::new().to_string(),
            ts: Local::now().to_rfc3339(),
            level: level.as_str(),
            logger: &self.logger,
            msg,
            cause,
        };
        let mut line = serde_json::to_string(&entry)
            .map_err(|e| crate::Error::Format(format!("JSON serialization failed: {e}")))?;
        line.push('\n');
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

impl Backend for JsonBackend {
    fn is_level_enabled(&self, level: Level) -> bool {
        self.threshold.is_enabled(level)
    }

    fn write(&self, level: Level, msg: &str) {
        if self.is_level_enabled(level) {
            let _ = self.append(level, msg, None);
        }
    }

    fn write_with_cause(&self, level: Level, msg: &str, cause: &dyn StdError) {
        if self.is_level_enabled(level) {
            let _ = self.append(level, msg, Some(CauseChain(cause).to_string()));
        }
    }

    fn flush(&self) -> Result<(), crate::Error> {
        self.file
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()?;
        Ok(())
    }
}
