//! Positional argument values and their textual rendering.

use std::fmt::{self, Display, Write};

/// Produces an argument's text only when the message is actually emitted.
///
/// Returning `None` renders as `null`.
pub trait LazyArg {
    fn create_arg(&self) -> Option<String>;
}

impl<F> LazyArg for F
where
    F: Fn() -> Option<String>,
{
    fn create_arg(&self) -> Option<String> {
        self()
    }
}

/// One positional argument slot.
///
/// Arguments are borrowed from the caller for one call or one fluent chain;
/// primitives are stored by value so common calls never allocate.
#[derive(Clone)]
pub enum Arg<'a> {
    Null,
    Bool(bool),
    Char(char),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(&'a str),
    Display(&'a dyn Display),
    Array(Vec<Arg<'a>>),
    Lazy(&'a dyn LazyArg),
}

impl<'a> Arg<'a> {
    /// Wraps any `Display` value without rendering it yet.
    #[must_use]
    pub fn display(value: &'a dyn Display) -> Self {
        Self::Display(value)
    }

    /// Wraps a producer that is invoked only at format time.
    #[must_use]
    pub fn lazy(producer: &'a dyn LazyArg) -> Self {
        Self::Lazy(producer)
    }

    /// Builds an array slot from anything convertible into arguments.
    #[must_use]
    pub fn array<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        Self::Array(values.into_iter().map(Into::into).collect())
    }

    /// Appends this argument's rendering to `out`.
    ///
    /// Lazy producers come first, then arrays (recursively), then null, then
    /// the value's own textual form.
    pub fn render_into(&self, out: &mut String) {
        match self {
            Self::Lazy(producer) => match producer.create_arg() {
                Some(text) => out.push_str(&text),
                None => out.push_str("null"),
            },
            Self::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.render_into(out);
                }
                out.push(']');
            }
            Self::Null => out.push_str("null"),
            Self::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Self::Char(c) => out.push(*c),
            Self::Int(n) => {
                let _ = write!(out, "{n}");
            }
            Self::UInt(n) => {
                let _ = write!(out, "{n}");
            }
            Self::Float(n) => {
                let _ = write!(out, "{n}");
            }
            Self::Str(s) => out.push_str(s),
            Self::Display(value) => {
                let _ = write!(out, "{value}");
            }
        }
    }
}

impl Display for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rendered = String::new();
        self.render_into(&mut rendered);
        f.write_str(&rendered)
    }
}

impl fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Char(c) => f.debug_tuple("Char").field(c).finish(),
            Self::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Self::UInt(n) => f.debug_tuple("UInt").field(n).finish(),
            Self::Float(n) => f.debug_tuple("Float").field(n).finish(),
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::Display(_) => f.write_str("Display(..)"),
            Self::Array(items) => f.debug_tuple("Array").field(items).finish(),
            // Debug must not run the producer.
            Self::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $wide:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Arg<'_> {
                fn from(value: $t) -> Self {
                    Self::$variant(<$wide>::from(value))
                }
            }
        )*
    };
}

impl_from_int!(Int, i64: i8, i16, i32, i64);
impl_from_int!(UInt, u64: u8, u16, u32, u64);

impl From<isize> for Arg<'_> {
    fn from(value: isize) -> Self {
        i64::try_from(value).map_or(Self::Null, Self::Int)
    }
}

impl From<usize> for Arg<'_> {
    fn from(value: usize) -> Self {
        u64::try_from(value).map_or(Self::Null, Self::UInt)
    }
}

impl From<f32> for Arg<'_> {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Arg<'_> {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Arg<'_> {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<char> for Arg<'_> {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(value: &'a str) -> Self {
        Self::Str(value)
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    fn from(value: &'a String) -> Self {
        Self::Str(value.as_str())
    }
}

impl<'a, T> From<Option<T>> for Arg<'a>
where
    T: Into<Self>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<'a, T> From<Vec<T>> for Arg<'a>
where
    T: Into<Self>,
{
    fn from(values: Vec<T>) -> Self {
        Self::array(values)
    }
}

impl<'a, T, const N: usize> From<[T; N]> for Arg<'a>
where
    T: Into<Self>,
{
    fn from(values: [T; N]) -> Self {
        Self::array(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(arg: &Arg<'_>) -> String {
        let mut out = String::new();
        arg.render_into(&mut out);
        out
    }

    #[test]
    fn primitives_render_like_display() {
        assert_eq!(render(&Arg::from(-7_i32)), "-7");
        assert_eq!(render(&Arg::from(7_u8)), "7");
        assert_eq!(render(&Arg::from(1.5_f64)), "1.5");
        assert_eq!(render(&Arg::from(true)), "true");
        assert_eq!(render(&Arg::from('x')), "x");
    }

    #[test]
    fn pointer_sized_ints_keep_every_digit() {
        assert_eq!(render(&Arg::from(usize::MAX)), usize::MAX.to_string());
        assert_eq!(render(&Arg::from(isize::MIN)), isize::MIN.to_string());
        assert!(matches!(Arg::from(usize::MAX), Arg::UInt(_)));
    }

    #[test]
    fn none_renders_null() {
        assert_eq!(render(&Arg::from(None::<i32>)), "null");
        assert_eq!(render(&Arg::from(Some("v"))), "v");
    }

    #[test]
    fn nested_arrays_render_recursively() {
        let arg = Arg::from(vec![Arg::from(vec![1, 2]), Arg::from(3)]);
        assert_eq!(render(&arg), "[[1, 2], 3]");
        assert_eq!(render(&Arg::array(Vec::<i32>::new())), "[]");
    }

    #[test]
    fn lazy_returning_none_renders_null() {
        let producer = || None::<String>;
        assert_eq!(render(&Arg::lazy(&producer)), "null");
    }
}
