//! Severity levels that gate which messages reach the backend.

use std::fmt;
use std::str::FromStr;

/// Derives `Ord` so enablement is a plain rank comparison.
///
/// `Off` sorts last and is never enabled, neither as the level of a message
/// nor as a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Level {
    /// High-volume instrumentation that would be too noisy outside of development.
    Trace = 0,
    /// Startup, teardown, and state-change details useful for diagnosing issues.
    Debug = 1,
    /// Normal operational milestones.
    #[default]
    Info = 2,
    /// Non-fatal anomalies that may need attention.
    Warning = 3,
    /// Failures that prevent an operation from completing.
    Error = 4,
    /// Failures the process is not expected to survive.
    Fatal = 5,
    /// Sentinel that disables everything.
    Off = 6,
}

impl Level {
    /// Number of levels including `Off`; adapters size their severity tables with it.
    pub const COUNT: usize = 7;

    /// Lowercase because config files and environment values use lowercase level strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal",
            Self::Off => "off",
        }
    }

    /// Uppercase label used by line-oriented backends.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
            Self::Off => "OFF",
        }
    }

    /// Position in the severity order, usable as an index into per-level tables.
    #[must_use]
    pub const fn rank(self) -> usize {
        self as usize
    }

    /// Inverse of [`Level::rank`].
    #[must_use]
    pub const fn from_rank(rank: usize) -> Option<Self> {
        match rank {
            0 => Some(Self::Trace),
            1 => Some(Self::Debug),
            2 => Some(Self::Info),
            3 => Some(Self::Warning),
            4 => Some(Self::Error),
            5 => Some(Self::Fatal),
            6 => Some(Self::Off),
            _ => None,
        }
    }

    /// True when `self`, used as a threshold, lets a message at `requested` through.
    #[must_use]
    pub fn is_enabled(self, requested: Self) -> bool {
        self != Self::Off && requested != Self::Off && self <= requested
    }

    /// True when `self` is at least as severe as `threshold` and neither is `Off`.
    #[must_use]
    pub fn is_at_least(self, threshold: Self) -> bool {
        threshold.is_enabled(self)
    }

    /// Every level in rank order, including `Off`.
    #[must_use]
    pub const fn all() -> [Self; Self::COUNT] {
        [
            Self::Trace,
            Self::Debug,
            Self::Info,
            Self::Warning,
            Self::Error,
            Self::Fatal,
            Self::Off,
        ]
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by `FromStr` so callers can distinguish "unknown level" from other parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: '{}'", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warning),
            "error" | "err" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            "off" | "none" => Ok(Self::Off),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_round_trips() {
        for level in Level::all() {
            assert_eq!(Level::from_rank(level.rank()), Some(level));
        }
        assert_eq!(Level::from_rank(Level::COUNT), None);
    }
}
