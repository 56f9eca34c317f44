//! `relaylog` - A logging facade that formats lazily and relays to whichever
//! backend the process actually has.
//!
//! - `{}` template expansion with scalar, array, and lazily produced arguments
//! - Fluent chains that cost nothing when their level is disabled
//! - A process-wide override level that can only tighten filtering
//! - Backend selection by probing an ordered registry, ending in a local
//!   fallback that cannot fail
//!
//! # Example
//!
//! ```
//! use relaylog::{Arg, Level, LoggerFactory};
//! use relaylog::backend::NullFactory;
//! use std::sync::Arc;
//!
//! let factory = LoggerFactory::builder()
//!     .backend_factory(Arc::new(NullFactory))
//!     .build();
//! let log = factory.get_logger(module_path!());
//!
//! log.info("listening on {}:{}", &[Arg::from("0.0.0.0"), Arg::from(8080)]);
//! log.at_debug()
//!     .msg("peers {}")
//!     .arg(vec![1, 2, 3])
//!     .log();
//! assert!(!log.is_level_enabled(Level::Error));
//! ```
//!
//! # Features
//!
//! - `cli` (default): the `relaylog` command-line tool

pub mod backend;
pub mod config;
mod error;
pub mod fmt;
pub mod internal;
pub mod level;
pub mod logger;

#[cfg(feature = "cli")]
pub mod cli;

pub use backend::{Backend, BackendFactory, BackendRegistry};
pub use config::Config;
pub use error::Error;
pub use fmt::{Arg, ArgumentBuffer, LazyArg, Record, format_message};
pub use level::{Level, ParseLevelError};
pub use logger::{
    FluentContext, GlobalLevel, LevelGate, Logger, LoggerFactory, LoggerFactoryBuilder,
    get_logger, global, install, set_backend_factory, set_global_level,
};
