//! Message materialization: argument slots, the buffer that collects them,
//! and the `{}` expander. Shared by the call-style logger and fluent chains.

mod arg;
mod buffer;
mod message;

pub use arg::{Arg, LazyArg};
pub use buffer::{ArgumentBuffer, DEFAULT_CAPACITY};
pub use message::{
    ARG_MARKER, JUST_CAUSE_MESSAGE, NO_MESSAGE, Record, count_placeholders, format_message,
};
