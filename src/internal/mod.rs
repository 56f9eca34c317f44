//! Relaylog's own diagnostic output. Configuration problems and backend
//! selection warnings must be visible even when no backend works.
//!
//! Uses `OnceLock` so the stderr backend is created exactly once, even if
//! several entry points race to report something.

use crate::backend::{Backend, LocalFactory};
use crate::level::Level;
use std::sync::{Arc, OnceLock};

/// Logger name diagnostics are written under.
pub const DIAGNOSTICS_IDENTITY: &str = "relaylog";

static DIAGNOSTICS: OnceLock<Arc<dyn Backend>> = OnceLock::new();

/// Stderr backend at `Info`, independent of any configuration.
pub fn diagnostics() -> Arc<dyn Backend> {
    Arc::clone(DIAGNOSTICS.get_or_init(|| {
        Arc::new(LocalFactory::stderr(Level::Info).create(DIAGNOSTICS_IDENTITY)) as Arc<dyn Backend>
    }))
}

/// Non-fatal anomalies: bad config values, unopenable log files.
pub fn warn(msg: &str) {
    diagnostics().write(Level::Warning, msg);
}
