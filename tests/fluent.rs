//! Tests for fluent chains.

mod common;

use common::Capture;
use relaylog::{Arg, FluentContext, Level, Logger};
use std::cell::Cell;
use std::io;
use std::sync::Arc;

fn logger(threshold: Level) -> (Logger, Arc<Capture>) {
    let capture = Capture::new(threshold);
    let logger = Logger::with_backend("test.fluent", capture.clone());
    (logger, capture)
}

#[test]
fn chain_formats_and_writes_once() {
    let (logger, capture) = logger(Level::Info);
    logger
        .at_info()
        .msg("{} -> {}")
        .arg("a")
        .arg(42)
        .log();
    assert_eq!(capture.lines(), vec![(Level::Info, "a -> 42".to_string())]);
}

#[test]
fn disabled_chain_never_runs_producers() {
    let (logger, capture) = logger(Level::Warning);
    let calls = Cell::new(0);
    let producer = || {
        calls.set(calls.get() + 1);
        Some("expensive".to_string())
    };
    let chain = logger.at_debug();
    assert!(!chain.is_enabled());
    chain.msg("value {}").arg(Arg::lazy(&producer)).log();
    assert_eq!(calls.get(), 0);
    assert!(capture.lines().is_empty());
}

#[test]
fn enabled_chain_runs_producers_once() {
    let (logger, capture) = logger(Level::Debug);
    let calls = Cell::new(0);
    let producer = || {
        calls.set(calls.get() + 1);
        Some("expensive".to_string())
    };
    logger
        .at_debug()
        .msg("value {}")
        .arg(Arg::lazy(&producer))
        .log();
    assert_eq!(calls.get(), 1);
    assert_eq!(capture.messages(), vec!["value expensive"]);
}

#[test]
fn first_msg_wins() {
    let (logger, capture) = logger(Level::Info);
    logger.at_info().msg("first {}").msg("second {}").arg(1).log();
    assert_eq!(capture.messages(), vec!["first 1"]);
}

#[test]
fn later_cause_replaces_earlier() {
    let (logger, capture) = logger(Level::Info);
    let a = io::Error::other("a");
    let b = io::Error::other("b");
    logger.at_error().msg("failed").cause(&a).cause(&b).log();
    assert_eq!(capture.messages(), vec!["failed | b"]);
}

#[test]
fn cause_only_chain() {
    let (logger, capture) = logger(Level::Info);
    let err = io::Error::other("lost");
    logger.at_warn().cause(&err).log();
    assert_eq!(capture.lines(), vec![(Level::Warning, "cause | lost".to_string())]);
}

#[test]
fn empty_chain_writes_nothing() {
    let (logger, capture) = logger(Level::Info);
    logger.at_info().log();
    assert!(capture.lines().is_empty());
}

#[test]
fn args_without_msg_are_quoted() {
    let (logger, capture) = logger(Level::Info);
    logger.at_info().arg("abc").arg(42).log();
    assert_eq!(capture.messages(), vec!["'abc', '42'"]);
}

#[test]
fn batch_args_and_arrays() {
    let (logger, capture) = logger(Level::Info);
    logger
        .at_info()
        .msg("{} {} {}")
        .args([1, 2])
        .arg(vec![3, 4])
        .log();
    assert_eq!(capture.messages(), vec!["1 2 [3, 4]"]);
}

#[test]
fn many_args_grow_past_initial_capacity() {
    let (logger, capture) = logger(Level::Info);
    let template = "{}".repeat(10);
    let mut chain = logger.at_info().msg(&template);
    for i in 0..10 {
        chain = chain.arg(i);
    }
    chain.log();
    assert_eq!(capture.messages(), vec!["0123456789"]);
}

#[test]
fn enablement_is_fixed_at_chain_start() {
    let capture = Capture::new(Level::Trace);
    let global = Arc::new(relaylog::GlobalLevel::default());
    let logger = Logger::new("svc", capture.clone(), Arc::clone(&global));
    let chain = logger.at_info().msg("started before override");
    global.set(Some(Level::Error));
    chain.log();
    assert_eq!(capture.messages(), vec!["started before override"]);
}

#[test]
fn off_chain_is_disabled() {
    let (logger, _capture) = logger(Level::Trace);
    assert!(!logger.at_level(Level::Off).is_enabled());
    assert!(!FluentContext::disabled().is_enabled());
}
