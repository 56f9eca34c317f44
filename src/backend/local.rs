//! Plain-text backend that needs nothing from the environment, which makes it
//! the guaranteed fallback of backend selection.

use super::{Backend, BackendFactory, CauseChain};
use crate::config::Config;
use crate::internal;
use crate::level::Level;
use chrono::Local;
use regex::Regex;
use std::error::Error as StdError;
use std::fmt::Write as _;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Where local lines end up.
#[derive(Debug)]
pub enum LocalSink {
    Stderr,
    File { path: PathBuf, file: Mutex<File> },
}

impl LocalSink {
    /// Opens `path` for appending, creating parent directories.
    ///
    /// # Errors
    /// I/O errors from directory creation or opening the file.
    pub fn open(path: &Path) -> Result<Self, crate::Error> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::File {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    fn write_line(&self, line: &str) {
        match self {
            Self::Stderr => {
                let _ = writeln!(io::stderr(), "{line}");
            }
            Self::File { file, .. } => {
                let mut content = String::with_capacity(line.len() + 1);
                content.push_str(line);
                content.push('\n');
                let mut file = file.lock().unwrap_or_else(PoisonError::into_inner);
                let _ = file.write_all(content.as_bytes());
            }
        }
    }

    fn flush(&self) -> Result<(), crate::Error> {
        match self {
            Self::Stderr => io::stderr().flush()?,
            Self::File { file, .. } => file.lock().unwrap_or_else(PoisonError::into_inner).flush()?,
        }
        Ok(())
    }

    /// File being written, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Stderr => None,
            Self::File { path, .. } => Some(path),
        }
    }
}

/// Creates local backends that share one sink.
#[derive(Debug, Clone)]
pub struct LocalFactory {
    default_level: Level,
    patterns: Arc<[(Regex, Level)]>,
    timestamp_format: Arc<str>,
    sink: Arc<LocalSink>,
}

impl Default for LocalFactory {
    fn default() -> Self {
        Self::stderr(Level::Info)
    }
}

impl LocalFactory {
    /// Stderr sink with a single threshold.
    #[must_use]
    pub fn stderr(level: Level) -> Self {
        Self {
            default_level: level,
            patterns: Arc::from(Vec::new()),
            timestamp_format: Arc::from(crate::config::LocalConfig::default().timestamp_format),
            sink: Arc::new(LocalSink::Stderr),
        }
    }

    /// Never fails: an unusable file degrades to stderr with a warning.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let sink = config
            .local
            .file
            .as_deref()
            .map_or(LocalSink::Stderr, |raw| {
                let path = PathBuf::from(shellexpand::tilde(raw).as_ref());
                LocalSink::open(&path).unwrap_or_else(|e| {
                    internal::warn(&format!(
                        "cannot open log file {}, using stderr: {e}",
                        path.display()
                    ));
                    LocalSink::Stderr
                })
            });

        Self {
            default_level: config.parse_local_level(),
            patterns: Arc::from(config.parse_level_patterns()),
            timestamp_format: Arc::from(config.local.timestamp_format.as_str()),
            sink: Arc::new(sink),
        }
    }

    /// Redirects output to an already-opened sink.
    #[must_use]
    pub fn sink(mut self, sink: LocalSink) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    #[must_use]
    pub fn level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    #[must_use]
    pub fn timestamp_format(mut self, format: &str) -> Self {
        self.timestamp_format = Arc::from(format);
        self
    }

    /// Adds a per-logger threshold after the existing ones.
    #[must_use]
    pub fn pattern(mut self, pattern: Regex, level: Level) -> Self {
        let mut patterns = self.patterns.to_vec();
        patterns.push((pattern, level));
        self.patterns = Arc::from(patterns);
        self
    }

    /// Threshold for `identity`: first matching pattern, else the default.
    #[must_use]
    pub fn level_for(&self, identity: &str) -> Level {
        self.patterns
            .iter()
            .find(|(regex, _)| regex.is_match(identity))
            .map_or(self.default_level, |(_, level)| *level)
    }

    /// Infallible twin of [`BackendFactory::create_backend`].
    #[must_use]
    pub fn create(&self, identity: &str) -> LocalBackend {
        LocalBackend {
            identity: identity.to_string(),
            level: self.level_for(identity),
            timestamp_format: Arc::clone(&self.timestamp_format),
            sink: Arc::clone(&self.sink),
        }
    }
}

impl BackendFactory for LocalFactory {
    fn create_backend(&self, identity: &str) -> Result<Arc<dyn Backend>, crate::Error> {
        Ok(Arc::new(self.create(identity)))
    }
}

/// One logger's view of the local sink.
#[derive(Debug)]
pub struct LocalBackend {
    identity: String,
    level: Level,
    timestamp_format: Arc<str>,
    sink: Arc<LocalSink>,
}

impl LocalBackend {
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    fn format_line(&self, level: Level, msg: &str) -> String {
        let mut line = String::with_capacity(msg.len() + self.identity.len() + 40);
        let _ = write!(
            line,
            "{} [{}] {} {}",
            Local::now().format(&self.timestamp_format),
            level.label(),
            self.identity,
            msg
        );
        line
    }
}

impl Backend for LocalBackend {
    fn is_level_enabled(&self, level: Level) -> bool {
        self.level.is_enabled(level)
    }

    fn write(&self, level: Level, msg: &str) {
        if !self.is_level_enabled(level) {
            return;
        }
        self.sink.write_line(&self.format_line(level, msg));
    }

    fn write_with_cause(&self, level: Level, msg: &str, cause: &dyn StdError) {
        if !self.is_level_enabled(level) {
            return;
        }
        let mut line = self.format_line(level, msg);
        let _ = write!(line, "\n{}", CauseChain(cause));
        self.sink.write_line(&line);
    }

    fn flush(&self) -> Result<(), crate::Error> {
        self.sink.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_pattern_wins() {
        let factory = LocalFactory::stderr(Level::Warning)
            .pattern(Regex::new(r"^net\.").unwrap(), Level::Trace)
            .pattern(Regex::new(r"^net\.http").unwrap(), Level::Error);
        assert_eq!(factory.level_for("net.http.client"), Level::Trace);
        assert_eq!(factory.level_for("db.pool"), Level::Warning);
    }

    #[test]
    fn line_layout() {
        let backend = LocalFactory::stderr(Level::Info)
            .timestamp_format("T")
            .create("svc");
        assert_eq!(backend.format_line(Level::Warning, "hi"), "T [WARNING] svc hi");
    }
}
