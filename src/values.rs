//! String conversions behind the typed accessors.
//!
//! Values are always stored as strings; these helpers only convert on the
//! way in or out.

use std::fmt::Display;
use std::str::FromStr;

/// Literal stored for `true`; any other string reads back as `false`
pub const TRUE_LITERAL: &str = "true";
pub const FALSE_LITERAL: &str = "false";

pub fn format_bool(value: bool) -> &'static str {
    if value { TRUE_LITERAL } else { FALSE_LITERAL }
}

pub fn parse_bool(raw: &str) -> bool {
    raw == TRUE_LITERAL
}

/// Best-effort number parse; falls back to the type's default
pub fn parse_or_default<T: FromStr + Default>(raw: &str) -> T {
    raw.trim().parse().unwrap_or_default()
}

/// Join elements with `separator`, leaving no trailing separator
pub fn join_array<I>(items: I, separator: &str) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    let mut joined = String::new();
    for item in items {
        joined.push_str(&item.to_string());
        joined.push_str(separator);
    }
    if !separator.is_empty() && joined.ends_with(separator) {
        joined.truncate(joined.len() - separator.len());
    }
    joined
}

/// Split `raw` on `separator` into a dynamically sized list.
///
/// An empty string yields an empty list.
pub fn split_array<T: FromStr + Default>(raw: &str, separator: &str) -> Vec<T> {
    if raw.is_empty() {
        return Vec::new();
    }
    if separator.is_empty() {
        return vec![parse_or_default(raw)];
    }
    raw.split(separator).map(parse_or_default).collect()
}

/// Split `raw` into exactly `N` elements.
///
/// Missing elements are filled with the default value and extra elements are
/// dropped.
pub fn split_fixed<T: FromStr + Default, const N: usize>(raw: &str, separator: &str) -> [T; N] {
    let mut parsed = split_array::<T>(raw, separator).into_iter();
    std::array::from_fn(|_| parsed.next().unwrap_or_default())
}
