//! String emptiness checks.

/// `true` when none of `values` is empty.
///
/// An empty list is vacuously non-empty.
///
/// # Examples
///
/// ```
/// # use fileops::text::not_empty;
/// assert!(not_empty(&["a", "b"]));
/// assert!(!not_empty(&["a", ""]));
/// ```
#[must_use]
pub fn not_empty<S: AsRef<str>>(values: &[S]) -> bool {
    values.iter().all(|value| !value.as_ref().is_empty())
}
