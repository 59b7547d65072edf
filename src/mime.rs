//! MIME type lookup by file extension.
//!
//! The extension table is the one shipped with `mime_guess`. Lookups never
//! fail: an unknown or missing extension simply has no MIME type.

use std::path::Path;

/// MIME type for the extension of `path`.
///
/// The extension is everything after the last `.` in the path, lowercased.
/// Paths without a dot have no MIME type.
///
/// # Examples
///
/// ```
/// # use std::path::Path;
/// # use fileops::mime::mime_type_for_path;
/// assert_eq!(mime_type_for_path(Path::new("photo.JPG")), Some("image/jpeg"));
/// assert_eq!(mime_type_for_path(Path::new("README")), None);
/// ```
#[must_use]
pub fn mime_type_for_path(path: &Path) -> Option<&'static str> {
    let path = path.to_string_lossy();
    let dot = path.rfind('.')?;
    mime_type_for_extension(&path[dot + 1..])
}

/// MIME type registered for `extension` (without the leading dot).
///
/// Matching is case-insensitive.
#[must_use]
pub fn mime_type_for_extension(extension: &str) -> Option<&'static str> {
    if extension.is_empty() {
        return None;
    }
    mime_guess::from_ext(&extension.to_lowercase()).first_raw()
}
