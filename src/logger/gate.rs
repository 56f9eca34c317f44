//! The cheap check in front of every log call.

use crate::backend::Backend;
use crate::level::Level;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

const UNSET: u8 = u8::MAX;

/// Optional process-wide level that every logger created by one factory shares.
///
/// It can only tighten what backends allow, never loosen it.
#[derive(Debug)]
pub struct GlobalLevel(AtomicU8);

impl Default for GlobalLevel {
    fn default() -> Self {
        Self::new(None)
    }
}

impl GlobalLevel {
    #[must_use]
    pub const fn new(level: Option<Level>) -> Self {
        Self(AtomicU8::new(encode(level)))
    }

    #[must_use]
    pub fn get(&self) -> Option<Level> {
        Level::from_rank(usize::from(self.0.load(Ordering::Relaxed)))
    }

    pub fn set(&self, level: Option<Level>) {
        self.0.store(encode(level), Ordering::Relaxed);
    }

    /// True when no override is set or the override lets `level` through.
    #[must_use]
    pub fn permits(&self, level: Level) -> bool {
        self.get().is_none_or(|global| global.is_enabled(level))
    }
}

const fn encode(level: Option<Level>) -> u8 {
    match level {
        Some(level) => level as u8,
        None => UNSET,
    }
}

/// Global override ANDed with the backend's own answer.
#[derive(Clone)]
pub struct LevelGate {
    global: Arc<GlobalLevel>,
    backend: Arc<dyn Backend>,
}

impl LevelGate {
    #[must_use]
    pub fn new(global: Arc<GlobalLevel>, backend: Arc<dyn Backend>) -> Self {
        Self { global, backend }
    }

    /// The backend is only asked when `Off` and the global override both allow the call.
    #[must_use]
    pub fn should_log(&self, level: Level) -> bool {
        level != Level::Off && self.global.permits(level) && self.backend.is_level_enabled(level)
    }

    #[must_use]
    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    #[must_use]
    pub fn global(&self) -> &Arc<GlobalLevel> {
        &self.global
    }
}

impl fmt::Debug for LevelGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelGate")
            .field("global", &self.global.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_round_trips() {
        let global = GlobalLevel::default();
        assert_eq!(global.get(), None);
        global.set(Some(Level::Off));
        assert_eq!(global.get(), Some(Level::Off));
        global.set(None);
        assert_eq!(global.get(), None);
    }

    #[test]
    fn off_override_blocks_everything() {
        let global = GlobalLevel::new(Some(Level::Off));
        assert!(Level::all().into_iter().all(|level| !global.permits(level)));
    }
}
