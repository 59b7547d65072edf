//! Default-on-failure string parsing.
//!
//! These helpers never return an error: if the string does not parse as the
//! requested type, the caller's default comes back instead. Integer input is
//! not trimmed, so `" 42"` is a parse failure. Float input is trimmed and may
//! carry one trailing `f`, `F`, `d` or `D` suffix, so `" 2.5f "` parses.

use std::str::FromStr;

/// Parsing helpers on `str` that fall back to a default value.
///
/// # Examples
///
/// ```
/// # use fileops::parse::ParseSafely;
/// assert_eq!("42".to_i32_safely(0), 42);
/// assert_eq!("forty-two".to_i32_safely(-1), -1);
/// assert_eq!("300".parse_or(7u8), 7);
/// ```
pub trait ParseSafely {
    /// Parse as `T`, or return `default`.
    fn parse_or<T: FromStr>(&self, default: T) -> T;

    /// Parse as `T`, or return `T::default()`.
    fn parse_or_default<T: FromStr + Default>(&self) -> T {
        self.parse_or(T::default())
    }

    /// Parse as `i8`, or return `default`.
    fn to_i8_safely(&self, default: i8) -> i8 {
        self.parse_or(default)
    }

    /// Parse as `i16`, or return `default`.
    fn to_i16_safely(&self, default: i16) -> i16 {
        self.parse_or(default)
    }

    /// Parse as `i32`, or return `default`.
    fn to_i32_safely(&self, default: i32) -> i32 {
        self.parse_or(default)
    }

    /// Parse as `i64`, or return `default`.
    fn to_i64_safely(&self, default: i64) -> i64 {
        self.parse_or(default)
    }

    /// Parse as `f32`, or return `default`.
    ///
    /// Surrounding whitespace and a trailing type suffix are ignored.
    fn to_f32_safely(&self, default: f32) -> f32;

    /// Parse as `f64`, or return `default`.
    ///
    /// Surrounding whitespace and a trailing type suffix are ignored.
    fn to_f64_safely(&self, default: f64) -> f64;
}

impl ParseSafely for str {
    fn parse_or<T: FromStr>(&self, default: T) -> T {
        self.parse().unwrap_or(default)
    }

    fn to_f32_safely(&self, default: f32) -> f32 {
        float_literal(self).parse_or(default)
    }

    fn to_f64_safely(&self, default: f64) -> f64 {
        float_literal(self).parse_or(default)
    }
}

/// Trim `s` and drop one trailing `f`/`F`/`d`/`D` suffix.
fn float_literal(s: &str) -> &str {
    let trimmed = s.trim();
    trimmed.strip_suffix(['f', 'F', 'd', 'D']).unwrap_or(trimmed)
}
