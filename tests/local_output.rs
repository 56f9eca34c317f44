use relaylog::backend::{LocalFactory, LocalSink};
use relaylog::{Arg, Backend, Config, Level, Logger};
use regex::Regex;
use std::fs;
use std::io;
use std::sync::Arc;
use tempfile::TempDir;

fn file_factory(dir: &TempDir, level: Level) -> (LocalFactory, std::path::PathBuf) {
    let path = dir.path().join("logs").join("app.log");
    let factory = LocalFactory::stderr(level)
        .timestamp_format("TS")
        .sink(LocalSink::open(&path).unwrap());
    (factory, path)
}

#[test]
fn writes_formatted_lines_to_file() {
    let tmp_dir = TempDir::new().unwrap();
    let (factory, path) = file_factory(&tmp_dir, Level::Info);
    let logger = Logger::with_backend("svc.api", Arc::new(factory.create("svc.api")));

    logger.info("request {} took {}ms", &[Arg::from("/health"), Arg::from(3)]);
    logger.debug("filtered", &[]);
    logger.flush().unwrap();

    let content = fs::read_to_string(path).unwrap();
    assert_eq!(content, "TS [INFO] svc.api request /health took 3ms\n");
}

#[test]
fn cause_chain_follows_the_message() {
    let tmp_dir = TempDir::new().unwrap();
    let (factory, path) = file_factory(&tmp_dir, Level::Info);
    let backend = factory.create("svc");

    let err = io::Error::other("refused");
    backend.write_with_cause(Level::Error, "connect failed", &err);

    let content = fs::read_to_string(path).unwrap();
    assert_eq!(content, "TS [ERROR] svc connect failed\ncaused by: refused\n");
}

#[test]
fn loggers_share_one_file() {
    let tmp_dir = TempDir::new().unwrap();
    let (factory, path) = file_factory(&tmp_dir, Level::Trace);
    factory.create("a").write(Level::Info, "one");
    factory.create("b").write(Level::Warning, "two");

    let content = fs::read_to_string(path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines, vec!["TS [INFO] a one", "TS [WARNING] b two"]);
}

#[test]
fn patterns_pick_per_logger_levels() {
    let factory = LocalFactory::stderr(Level::Warning)
        .pattern(Regex::new(r"^db\.").unwrap(), Level::Debug);
    assert!(factory.create("db.pool").is_level_enabled(Level::Debug));
    assert!(!factory.create("web").is_level_enabled(Level::Info));
}

#[test]
fn from_config_reads_file_and_patterns() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("out.log");
    let mut config = Config::default();
    config.local.file = Some(path.to_string_lossy().into_owned());
    config.local.level = "error".to_string();
    config.local.levels.push(relaylog::config::LevelPattern {
        pattern: "^chatty".to_string(),
        level: "trace".to_string(),
    });

    let factory = LocalFactory::from_config(&config);
    assert_eq!(factory.level_for("quiet"), Level::Error);
    assert_eq!(factory.level_for("chatty.module"), Level::Trace);

    factory.create("quiet").write(Level::Error, "boom");
    assert!(fs::read_to_string(path).unwrap().contains("[ERROR] quiet boom"));
}

#[test]
fn unopenable_file_falls_back_to_stderr() {
    let tmp_dir = TempDir::new().unwrap();
    let blocker = tmp_dir.path().join("not-a-dir");
    fs::write(&blocker, "").unwrap();

    let mut config = Config::default();
    config.local.file = Some(blocker.join("app.log").to_string_lossy().into_owned());

    let factory = LocalFactory::from_config(&config);
    assert!(factory.create("x").is_level_enabled(Level::Info));
}
