//! Tests for `{}` template expansion.

use relaylog::fmt::{Arg, NO_MESSAGE, Record, count_placeholders, format_message};
use relaylog::Level;
use std::cell::Cell;
use std::fmt;

#[test]
fn substitutes_markers_in_order() {
    let args = [Arg::from("a"), Arg::from(2), Arg::from(true)];
    assert_eq!(format_message(Some("{} {} {}"), &args), "a 2 true");
}

#[test]
fn missing_args_leave_markers() {
    let args = [Arg::from("x")];
    assert_eq!(format_message(Some("hello {} {}"), &args), "hello x {}");
}

#[test]
fn extra_args_are_dropped() {
    let args = [Arg::from(1), Arg::from(2), Arg::from(3)];
    assert_eq!(format_message(Some("only {}"), &args), "only 1");
}

#[test]
fn template_without_args_is_unchanged() {
    assert_eq!(format_message(Some("hello {}"), &[]), "hello {}");
}

#[test]
fn no_template_no_args() {
    assert_eq!(format_message(None, &[]), NO_MESSAGE);
}

#[test]
fn empty_template_becomes_no_message() {
    assert_eq!(format_message(Some(""), &[]), NO_MESSAGE);
}

#[test]
fn no_template_quotes_args() {
    let args = [Arg::from("abc"), Arg::from(42)];
    assert_eq!(format_message(None, &args), "'abc', '42'");
}

#[test]
fn nested_arrays() {
    let args = [Arg::array([Arg::array([1, 2]), Arg::from(3)])];
    assert_eq!(format_message(Some("v={}"), &args), "v=[[1, 2], 3]");
}

#[test]
fn vec_and_fixed_arrays() {
    let names = vec!["a", "b"];
    let args = [Arg::from(names), Arg::from([1.5, 2.0])];
    assert_eq!(format_message(Some("{} {}"), &args), "[a, b] [1.5, 2]");
}

#[test]
fn null_renders_as_word() {
    let none: Option<i32> = None;
    let args = [Arg::from(none), Arg::from(Some(7)), Arg::Null];
    assert_eq!(format_message(Some("{} {} {}"), &args), "null 7 null");
}

#[test]
fn lazy_args_render_at_format_time() {
    let calls = Cell::new(0);
    let producer = || {
        calls.set(calls.get() + 1);
        Some("computed".to_string())
    };
    let empty = || None::<String>;
    let args = [Arg::lazy(&producer), Arg::lazy(&empty)];
    assert_eq!(calls.get(), 0);
    assert_eq!(format_message(Some("{} {}"), &args), "computed null");
    assert_eq!(calls.get(), 1);
}

#[test]
fn display_values() {
    struct Port(u16);
    impl fmt::Display for Port {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, ":{}", self.0)
        }
    }
    let port = Port(8080);
    let args = [Arg::display(&port), Arg::from('!')];
    assert_eq!(format_message(Some("bound{}{}"), &args), "bound:8080!");
}

#[test]
fn markers_inside_arguments_are_not_expanded() {
    let args = [Arg::from("{}"), Arg::from("z")];
    assert_eq!(format_message(Some("{} {}"), &args), "{} z");
}

#[test]
fn counts_markers() {
    assert_eq!(count_placeholders("{} and {} and {x}"), 2);
    assert_eq!(count_placeholders("none"), 0);
}

#[test]
fn record_without_content_has_no_message() {
    let record = Record::new(Level::Info, None, &[]);
    assert!(record.message().is_none());
}

#[test]
fn record_with_only_cause_says_cause() {
    let err = std::io::Error::other("disk gone");
    let record = Record::new(Level::Error, None, &[]).with_cause(&err);
    assert_eq!(record.message().as_deref(), Some("cause"));
}
