//! The facade callers hold. A `Logger` is a name plus a gate in front of one
//! backend; it formats only after the gate says yes and writes exactly once
//! per call.

mod factory;
mod fluent;
mod gate;

pub use factory::{
    LoggerFactory, LoggerFactoryBuilder, get_logger, global, install, set_backend_factory,
    set_global_level,
};
pub use fluent::FluentContext;
pub use gate::{GlobalLevel, LevelGate};

use crate::backend::Backend;
use crate::fmt::{Arg, Record};
use crate::level::Level;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Cheap to clone; clones share the backend and the global override.
#[derive(Clone)]
pub struct Logger {
    name: Arc<str>,
    gate: LevelGate,
}

impl Logger {
    /// Wires a logger to an explicit backend. Most callers go through
    /// [`LoggerFactory::get_logger`] instead.
    #[must_use]
    pub fn new(name: &str, backend: Arc<dyn Backend>, global: Arc<GlobalLevel>) -> Self {
        Self {
            name: Arc::from(name),
            gate: LevelGate::new(global, backend),
        }
    }

    /// Logger with no global override, for tests and one-off tools.
    #[must_use]
    pub fn with_backend(name: &str, backend: Arc<dyn Backend>) -> Self {
        Self::new(name, backend, Arc::new(GlobalLevel::default()))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn backend(&self) -> &Arc<dyn Backend> {
        self.gate.backend()
    }

    /// Lets callers skip building expensive arguments.
    #[must_use]
    pub fn is_level_enabled(&self, level: Level) -> bool {
        self.gate.should_log(level)
    }

    pub fn log(&self, level: Level, template: &str, args: &[Arg<'_>]) {
        if self.is_level_enabled(level) {
            self.dispatch(&Record::new(level, Some(template), args));
        }
    }

    pub fn log_with_cause(
        &self,
        level: Level,
        cause: &dyn StdError,
        template: &str,
        args: &[Arg<'_>],
    ) {
        if self.is_level_enabled(level) {
            self.dispatch(&Record::new(level, Some(template), args).with_cause(cause));
        }
    }

    /// Logs only an error; the message text is `"cause"`.
    pub fn log_cause(&self, level: Level, cause: &dyn StdError) {
        if self.is_level_enabled(level) {
            self.dispatch(&Record::new(level, None, &[]).with_cause(cause));
        }
    }

    /// Gates and writes a prepared record.
    pub fn log_record(&self, record: &Record<'_, '_>) {
        if self.is_level_enabled(record.level) {
            self.dispatch(record);
        }
    }

    /// Writes without consulting the gate; callers have already done so.
    pub(crate) fn dispatch(&self, record: &Record<'_, '_>) {
        let Some(msg) = record.message() else {
            return;
        };
        let backend = self.gate.backend();
        match record.cause {
            Some(cause) => backend.write_with_cause(record.level, &msg, cause),
            None => backend.write(record.level, &msg),
        }
    }

    pub fn trace(&self, template: &str, args: &[Arg<'_>]) {
        self.log(Level::Trace, template, args);
    }

    pub fn debug(&self, template: &str, args: &[Arg<'_>]) {
        self.log(Level::Debug, template, args);
    }

    pub fn info(&self, template: &str, args: &[Arg<'_>]) {
        self.log(Level::Info, template, args);
    }

    pub fn warn(&self, template: &str, args: &[Arg<'_>]) {
        self.log(Level::Warning, template, args);
    }

    pub fn error(&self, template: &str, args: &[Arg<'_>]) {
        self.log(Level::Error, template, args);
    }

    pub fn fatal(&self, template: &str, args: &[Arg<'_>]) {
        self.log(Level::Fatal, template, args);
    }

    pub fn warn_with_cause(&self, cause: &dyn StdError, template: &str, args: &[Arg<'_>]) {
        self.log_with_cause(Level::Warning, cause, template, args);
    }

    pub fn error_with_cause(&self, cause: &dyn StdError, template: &str, args: &[Arg<'_>]) {
        self.log_with_cause(Level::Error, cause, template, args);
    }

    pub fn fatal_with_cause(&self, cause: &dyn StdError, template: &str, args: &[Arg<'_>]) {
        self.log_with_cause(Level::Fatal, cause, template, args);
    }

    /// Starts a fluent chain. Enablement is decided here, once.
    pub fn at_level(&self, level: Level) -> FluentContext<'_> {
        FluentContext::start(self, level)
    }

    pub fn at_trace(&self) -> FluentContext<'_> {
        self.at_level(Level::Trace)
    }

    pub fn at_debug(&self) -> FluentContext<'_> {
        self.at_level(Level::Debug)
    }

    pub fn at_info(&self) -> FluentContext<'_> {
        self.at_level(Level::Info)
    }

    pub fn at_warn(&self) -> FluentContext<'_> {
        self.at_level(Level::Warning)
    }

    pub fn at_error(&self) -> FluentContext<'_> {
        self.at_level(Level::Error)
    }

    pub fn at_fatal(&self) -> FluentContext<'_> {
        self.at_level(Level::Fatal)
    }

    /// Buffered backends may lose tail data on abrupt exit without an explicit flush.
    ///
    /// # Errors
    /// Whatever the backend reports.
    pub fn flush(&self) -> Result<(), crate::Error> {
        self.gate.backend().flush()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("gate", &self.gate)
            .finish()
    }
}
