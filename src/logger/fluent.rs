//! Fluent chains: `logger.at_level(level).msg(..).arg(..).log()`.
//!
//! Enablement is decided once, when the chain starts. A disabled chain holds
//! no data and every call on it returns immediately, so arguments are never
//! converted and lazy producers never run.

use super::Logger;
use crate::fmt::{Arg, ArgumentBuffer, Record, count_placeholders};
use crate::level::Level;
use std::error::Error as StdError;

/// One log record under construction.
///
/// `log` consumes the chain, so a chain flushes at most once and its template,
/// cause, and arguments are released right after the write.
#[must_use = "a fluent chain does nothing until `.log()` is called"]
pub struct FluentContext<'a> {
    state: ChainState<'a>,
}

enum ChainState<'a> {
    Disabled,
    Building(Building<'a>),
}

struct Building<'a> {
    logger: &'a Logger,
    level: Level,
    template: Option<&'a str>,
    cause: Option<&'a (dyn StdError + 'a)>,
    args: ArgumentBuffer<'a>,
}

impl<'a> FluentContext<'a> {
    pub(super) fn start(logger: &'a Logger, level: Level) -> Self {
        let state = if logger.is_level_enabled(level) {
            ChainState::Building(Building {
                logger,
                level,
                template: None,
                cause: None,
                args: ArgumentBuffer::new(),
            })
        } else {
            ChainState::Disabled
        };
        Self { state }
    }

    /// A chain that never writes, for callers that need a placeholder.
    pub const fn disabled() -> Self {
        Self {
            state: ChainState::Disabled,
        }
    }

    /// Whether this chain will write when flushed.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        matches!(self.state, ChainState::Building(_))
    }

    /// Sets the template. Only the first call counts; later ones are ignored
    /// so helpers that partially configure a chain cannot overwrite it.
    pub fn msg(mut self, template: &'a str) -> Self {
        if let ChainState::Building(building) = &mut self.state
            && building.template.is_none()
        {
            building.template = Some(template);
            building.args.reserve_for(count_placeholders(template));
        }
        self
    }

    /// Attaches the error that caused this record.
    pub fn cause(mut self, cause: &'a (dyn StdError + 'a)) -> Self {
        if let ChainState::Building(building) = &mut self.state {
            building.cause = Some(cause);
        }
        self
    }

    /// Appends one positional argument.
    pub fn arg(mut self, value: impl Into<Arg<'a>>) -> Self {
        if let ChainState::Building(building) = &mut self.state {
            building.args.append(value.into());
        }
        self
    }

    /// Appends a batch of positional arguments.
    pub fn args<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Arg<'a>>,
    {
        if let ChainState::Building(building) = &mut self.state {
            building.args.append_all(values.into_iter().map(Into::into));
        }
        self
    }

    /// Formats and writes the record, then drops everything the chain held.
    pub fn log(self) {
        let ChainState::Building(building) = self.state else {
            return;
        };
        let mut record = Record::new(building.level, building.template, building.args.as_slice());
        if let Some(cause) = building.cause {
            record = record.with_cause(cause);
        }
        building.logger.dispatch(&record);
    }
}

impl std::fmt::Debug for FluentContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.state {
            ChainState::Disabled => f.write_str("FluentContext::Disabled"),
            ChainState::Building(building) => f
                .debug_struct("FluentContext::Building")
                .field("level", &building.level)
                .field("template", &building.template)
                .field("args", &building.args.len())
                .finish_non_exhaustive(),
        }
    }
}
