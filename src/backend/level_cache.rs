//! Approximate per-level enablement cache for backends whose own check is
//! expensive (it may do I/O on every call).
//!
//! The refresh counter is a relaxed atomic. Concurrent callers can race on it,
//! which at worst causes one extra or one late refresh; it never blocks.

use crate::level::Level;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Calls between re-probes when the backend does not configure its own interval.
pub const DEFAULT_REFRESH_EVERY: u32 = 200;

#[derive(Debug)]
pub struct LevelCache {
    enabled: [AtomicBool; Level::COUNT],
    calls: AtomicU32,
    refresh_every: u32,
}

impl LevelCache {
    /// Probes every level once up front.
    pub fn new(refresh_every: u32, probe: impl Fn(Level) -> bool) -> Self {
        let cache = Self {
            enabled: Default::default(),
            calls: AtomicU32::new(0),
            refresh_every: refresh_every.max(1),
        };
        cache.refresh(probe);
        cache
    }

    /// Cached answer for `level`, re-probing all levels every `refresh_every` calls.
    pub fn is_enabled(&self, level: Level, probe: impl Fn(Level) -> bool) -> bool {
        if level == Level::Off {
            return false;
        }
        let calls = self.calls.fetch_add(1, Ordering::Relaxed) + 1;
        if calls >= self.refresh_every {
            self.calls.store(0, Ordering::Relaxed);
            self.refresh(probe);
        }
        self.enabled[level.rank()].load(Ordering::Relaxed)
    }

    /// Re-probes every level. Once a level is enabled, more severe levels are
    /// assumed enabled without asking.
    pub fn refresh(&self, probe: impl Fn(Level) -> bool) {
        let mut lowest_enabled: Option<Level> = None;
        for level in Level::all() {
            let enabled = if level == Level::Off {
                false
            } else if lowest_enabled.is_some_and(|lowest| lowest.is_enabled(level)) {
                true
            } else {
                let enabled = probe(level);
                if enabled && lowest_enabled.is_none() {
                    lowest_enabled = Some(level);
                }
                enabled
            };
            self.enabled[level.rank()].store(enabled, Ordering::Relaxed);
        }
    }

    #[must_use]
    pub const fn refresh_every(&self) -> u32 {
        self.refresh_every
    }
}
