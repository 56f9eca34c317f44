//! `{}` template expansion.
//!
//! Mismatched argument counts are not errors: markers without an argument stay
//! in the output literally, and arguments without a marker are ignored.

use super::Arg;
use crate::level::Level;
use std::borrow::Cow;
use std::error::Error as StdError;

/// Positional placeholder marker.
pub const ARG_MARKER: &str = "{}";
/// Emitted instead of an empty message.
pub const NO_MESSAGE: &str = "no log message";
/// Emitted when only a cause was supplied.
pub const JUST_CAUSE_MESSAGE: &str = "cause";

const DEFAULT_MESSAGE_LENGTH: usize = 128;

/// Number of `{}` markers in `template`.
#[must_use]
pub fn count_placeholders(template: &str) -> usize {
    template.matches(ARG_MARKER).count()
}

/// Builds the final text for a template and its arguments.
///
/// Borrows the template when nothing needs substituting.
#[must_use]
pub fn format_message<'t>(template: Option<&'t str>, args: &[Arg<'_>]) -> Cow<'t, str> {
    let message = match template {
        None if args.is_empty() => Cow::Borrowed(""),
        None => Cow::Owned(quoted_list(args)),
        Some(template) if args.is_empty() => Cow::Borrowed(template),
        Some(template) => expand(template, args),
    };
    if message.is_empty() {
        Cow::Borrowed(NO_MESSAGE)
    } else {
        message
    }
}

fn expand<'t>(template: &'t str, args: &[Arg<'_>]) -> Cow<'t, str> {
    let mut pieces = template.split(ARG_MARKER);
    let Some(first) = pieces.next() else {
        return Cow::Borrowed(template);
    };
    // No marker at all: nothing to allocate.
    if first.len() == template.len() {
        return Cow::Borrowed(template);
    }

    let mut out = String::with_capacity(DEFAULT_MESSAGE_LENGTH.max(template.len()));
    out.push_str(first);
    let mut remaining = args.iter();
    for piece in pieces {
        match remaining.next() {
            Some(arg) => arg.render_into(&mut out),
            None => out.push_str(ARG_MARKER),
        }
        out.push_str(piece);
    }
    Cow::Owned(out)
}

fn quoted_list(args: &[Arg<'_>]) -> String {
    let mut out = String::with_capacity(DEFAULT_MESSAGE_LENGTH);
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push('\'');
        arg.render_into(&mut out);
        out.push('\'');
    }
    out
}

/// One log call's inputs, alive only until its text is produced.
#[derive(Clone, Copy)]
pub struct Record<'r, 'a> {
    pub level: Level,
    pub template: Option<&'r str>,
    pub cause: Option<&'r (dyn StdError + 'r)>,
    pub args: &'r [Arg<'a>],
}

impl<'r, 'a> Record<'r, 'a> {
    #[must_use]
    pub const fn new(level: Level, template: Option<&'r str>, args: &'r [Arg<'a>]) -> Self {
        Self {
            level,
            template,
            cause: None,
            args,
        }
    }

    #[must_use]
    pub fn with_cause(mut self, cause: &'r (dyn StdError + 'r)) -> Self {
        self.cause = Some(cause);
        self
    }

    /// Text to hand to the backend, or `None` when the call carries nothing at all.
    #[must_use]
    pub fn message(&self) -> Option<Cow<'r, str>> {
        if self.template.is_none() && self.args.is_empty() {
            return self.cause.map(|_| Cow::Borrowed(JUST_CAUSE_MESSAGE));
        }
        Some(format_message(self.template, self.args))
    }
}
