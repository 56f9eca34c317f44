//! Discards everything. Selecting it by name silences the facade.

use super::{Backend, BackendFactory};
use crate::level::Level;
use std::error::Error as StdError;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default)]
pub struct NullFactory;

impl BackendFactory for NullFactory {
    fn create_backend(&self, _identity: &str) -> Result<Arc<dyn Backend>, crate::Error> {
        Ok(Arc::new(NullBackend))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullBackend;

impl Backend for NullBackend {
    fn is_level_enabled(&self, _level: Level) -> bool {
        false
    }

    fn write(&self, _level: Level, _msg: &str) {}

    fn write_with_cause(&self, _level: Level, _msg: &str, _cause: &dyn StdError) {}
}
