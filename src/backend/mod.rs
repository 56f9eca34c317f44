//! The capability boundary between the facade and whatever finally receives
//! the text. The built-in adapters cover the common sinks; applications add
//! their own by implementing [`BackendFactory`] and registering it.

#[cfg(unix)]
mod journal;
mod json;
mod level_cache;
mod local;
mod log_bridge;
mod null;
mod registry;

#[cfg(unix)]
pub use journal::{JournalBackend, JournalFactory};
pub use json::{JsonBackend, JsonFactory};
pub use level_cache::{DEFAULT_REFRESH_EVERY, LevelCache};
pub use local::{LocalBackend, LocalFactory, LocalSink};
pub use log_bridge::{LogBridgeBackend, LogBridgeFactory};
pub use null::{NullBackend, NullFactory};
pub use registry::{
    BackendDescriptor, BackendRegistry, Constructor, FallbackDescriptor, Probe, Selection,
    default_probe,
};

use crate::level::Level;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Identity used when a backend is created only to check that it works.
pub const PROBE_IDENTITY: &str = "relaylog.probe";

/// What the core needs from a sink. `Send + Sync` so one instance can serve
/// every thread holding the logger.
///
/// Writes do not report failure: adapters deal with their own I/O errors.
pub trait Backend: Send + Sync {
    /// Cheap gate consulted before any formatting happens.
    fn is_level_enabled(&self, level: Level) -> bool;

    fn write(&self, level: Level, msg: &str);

    fn write_with_cause(&self, level: Level, msg: &str, cause: &dyn StdError);

    /// Buffered sinks may lose tail data on abrupt exit without an explicit flush.
    ///
    /// # Errors
    /// I/O errors from the underlying sink.
    fn flush(&self) -> Result<(), crate::Error> {
        Ok(())
    }
}

/// Produces a backend for one logger identity (usually a module path).
pub trait BackendFactory: Send + Sync {
    /// # Errors
    /// Construction failures; the selector turns them into warnings.
    fn create_backend(&self, identity: &str) -> Result<Arc<dyn Backend>, crate::Error>;
}

impl<F> BackendFactory for F
where
    F: Fn(&str) -> Result<Arc<dyn Backend>, crate::Error> + Send + Sync,
{
    fn create_backend(&self, identity: &str) -> Result<Arc<dyn Backend>, crate::Error> {
        self(identity)
    }
}

/// Renders an error and its `source()` chain, one `caused by:` line each.
pub struct CauseChain<'e>(pub &'e dyn StdError);

impl fmt::Display for CauseChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "caused by: {}", self.0)?;
        let mut next = self.0.source();
        while let Some(err) = next {
            write!(f, "\ncaused by: {err}")?;
            next = err.source();
        }
        Ok(())
    }
}
