//! `relaylog probe` shows which backend this environment resolves to;
//! `relaylog log <level> <template> [args...]` sends one message through it.

use clap::Parser;
use relaylog::cli::{Cli, Command, build_factory, cmd_log, cmd_probe};
use relaylog::config::Config;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // An explicit but broken config is a user error here, unlike in library use
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            return ExitCode::FAILURE;
        }
    };

    let factory = build_factory(config, cli.backend.as_deref(), cli.global_level);

    match cli.command {
        Command::Probe => cmd_probe(&factory),
        Command::Log {
            level,
            template,
            args,
            name,
        } => cmd_log(&factory, &name, level, &template, &args),
    }
}
