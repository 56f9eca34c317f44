//! Bridge to the `log` crate, for applications that already installed a
//! `log` implementation and want relaylog output to join it.

use super::{Backend, BackendFactory, CauseChain};
use crate::level::Level;
use std::error::Error as StdError;
use std::sync::Arc;

/// `log` severity per level rank. `log` has no fatal level.
const LOG_LEVELS: [Option<log::Level>; Level::COUNT] = [
    Some(log::Level::Trace),
    Some(log::Level::Debug),
    Some(log::Level::Info),
    Some(log::Level::Warn),
    Some(log::Level::Error),
    Some(log::Level::Error),
    None,
];

/// Creates one bridge backend per target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogBridgeFactory;

impl LogBridgeFactory {
    /// Succeeds only when a `log` implementation has raised the max level above `Off`;
    /// without one every record would vanish into `log`'s no-op logger.
    ///
    /// # Errors
    /// [`crate::Error::Unavailable`] when no `log` logger is installed.
    pub fn detect() -> Result<Self, crate::Error> {
        if log::max_level() == log::LevelFilter::Off {
            return Err(crate::Error::Unavailable(
                "no `log` logger installed (max level is off)".to_string(),
            ));
        }
        Ok(Self)
    }
}

impl BackendFactory for LogBridgeFactory {
    fn create_backend(&self, identity: &str) -> Result<Arc<dyn Backend>, crate::Error> {
        Ok(Arc::new(LogBridgeBackend {
            target: identity.to_string(),
        }))
    }
}

/// Forwards to `log::logger()` with the logger identity as the target.
#[derive(Debug)]
pub struct LogBridgeBackend {
    target: String,
}

impl LogBridgeBackend {
    fn forward(&self, level: log::Level, args: std::fmt::Arguments<'_>) {
        log::logger().log(
            &log::Record::builder()
                .args(args)
                .level(level)
                .target(&self.target)
                .build(),
        );
    }
}

impl Backend for LogBridgeBackend {
    fn is_level_enabled(&self, level: Level) -> bool {
        let Some(level) = LOG_LEVELS[level.rank()] else {
            return false;
        };
        level <= log::max_level()
            && log::logger().enabled(
                &log::Metadata::builder()
                    .level(level)
                    .target(&self.target)
                    .build(),
            )
    }

    fn write(&self, level: Level, msg: &str) {
        if let Some(level) = LOG_LEVELS[level.rank()] {
            self.forward(level, format_args!("{msg}"));
        }
    }

    fn write_with_cause(&self, level: Level, msg: &str, cause: &dyn StdError) {
        if let Some(level) = LOG_LEVELS[level.rank()] {
            self.forward(level, format_args!("{msg}\n{}", CauseChain(cause)));
        }
    }

    fn flush(&self) -> Result<(), crate::Error> {
        log::logger().flush();
        Ok(())
    }
}
