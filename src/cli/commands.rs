use crate::config::Config;
use crate::fmt::Arg;
use crate::level::Level;
use crate::logger::LoggerFactory;
use std::process::ExitCode;

/// Command-line options override both the config file and the environment.
#[must_use]
pub fn build_factory(
    mut config: Config,
    backend: Option<&str>,
    global_level: Option<Level>,
) -> LoggerFactory {
    if let Some(name) = backend {
        config.general.backend = Some(name.to_string());
    }
    let builder = LoggerFactory::builder().config(config);
    match global_level {
        Some(level) => builder.global_level(level).build(),
        None => builder.build(),
    }
}

/// Resolves the backend and reports the result on stdout.
#[must_use]
pub fn cmd_probe(factory: &LoggerFactory) -> ExitCode {
    let selection = factory.selection();
    println!("selected:  {}", selection.name);
    if selection.fell_back {
        println!("fallback:  yes (no preferred backend was usable)");
    }
    println!("available: {}", factory.registry().names().join(", "));
    if let Some(level) = factory.global_level() {
        println!("global:    {level}");
    }
    ExitCode::SUCCESS
}

/// Logs one message. Exits with failure when the level is `off` or filtered
/// out, so scripts can tell the message went nowhere.
#[must_use]
pub fn cmd_log(
    factory: &LoggerFactory,
    name: &str,
    level: Level,
    template: &str,
    args: &[String],
) -> ExitCode {
    let logger = factory.get_logger(name);
    if !logger.is_level_enabled(level) {
        return ExitCode::FAILURE;
    }
    let args: Vec<Arg<'_>> = args.iter().map(Arg::from).collect();
    logger.log(level, template, &args);
    if let Err(e) = logger.flush() {
        eprintln!("relaylog: flush failed: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
