//! Command-line front end: see which backend this machine resolves to, or
//! push one message through the facade from a shell script.

mod commands;

pub use commands::{build_factory, cmd_log, cmd_probe};

use crate::level::Level;
use clap::{Parser, Subcommand};

/// relaylog - Log through whichever backend this process can reach.
#[derive(Debug, Parser)]
#[command(name = "relaylog", version, about = "Log through whichever backend is available")]
pub struct Cli {
    /// Backend to try before auto-detection (overrides RELAYLOG_BACKEND)
    #[arg(long, global = true, value_name = "NAME")]
    pub backend: Option<String>,

    /// Process-wide level override; may only tighten filtering
    #[arg(long, global = true, value_name = "LEVEL")]
    pub global_level: Option<Level>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the selected backend and every registered candidate.
    Probe,
    /// Format and log one message.
    Log {
        /// trace, debug, info, warn, error, or fatal
        level: Level,
        /// Message template; each `{}` takes the next argument
        template: String,
        /// Positional arguments
        args: Vec<String>,
        /// Logger name
        #[arg(long, default_value = "relaylog.cli")]
        name: String,
    },
}
