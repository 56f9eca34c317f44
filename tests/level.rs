//! Tests for Level.

use relaylog::Level;

#[test]
fn ordering_follows_severity() {
    assert!(Level::Trace < Level::Debug);
    assert!(Level::Debug < Level::Info);
    assert!(Level::Info < Level::Warning);
    assert!(Level::Warning < Level::Error);
    assert!(Level::Error < Level::Fatal);
    assert!(Level::Fatal < Level::Off);
}

#[test]
fn threshold_lets_equal_and_higher_through() {
    assert!(Level::Info.is_enabled(Level::Info));
    assert!(Level::Info.is_enabled(Level::Fatal));
    assert!(!Level::Info.is_enabled(Level::Debug));
}

#[test]
fn off_is_never_enabled() {
    for level in Level::all() {
        assert!(!Level::Off.is_enabled(level));
        assert!(!level.is_enabled(Level::Off));
    }
}

#[test]
fn is_at_least_mirrors_is_enabled() {
    assert!(Level::Error.is_at_least(Level::Warning));
    assert!(!Level::Debug.is_at_least(Level::Info));
    assert!(!Level::Off.is_at_least(Level::Trace));
}

#[test]
fn parses_names_and_aliases() {
    assert_eq!("TRACE".parse::<Level>().unwrap(), Level::Trace);
    assert_eq!("warn".parse::<Level>().unwrap(), Level::Warning);
    assert_eq!("warning".parse::<Level>().unwrap(), Level::Warning);
    assert_eq!(" err ".parse::<Level>().unwrap(), Level::Error);
    assert_eq!("fatal".parse::<Level>().unwrap(), Level::Fatal);
    assert_eq!("none".parse::<Level>().unwrap(), Level::Off);
    assert!("verbose".parse::<Level>().is_err());
}

#[test]
fn display_round_trips_through_parse() {
    for level in Level::all() {
        assert_eq!(level.to_string().parse::<Level>().unwrap(), level);
    }
}

#[test]
fn labels_are_uppercase() {
    assert_eq!(Level::Warning.label(), "WARNING");
    assert_eq!(Level::Info.as_str(), "info");
}

#[test]
fn default_is_info() {
    assert_eq!(Level::default(), Level::Info);
}
