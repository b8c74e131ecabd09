// SPDX-License-Identifier: MPL-2.0
//! Removal of filesystem paths from diagnostic messages.
//!
//! Decoder errors and I/O failures often embed the scratch file location,
//! which says nothing useful about the failure and leaks local layout.

use std::sync::LazyLock;

use regex::Regex;

/// Absolute Unix, home-relative and Windows drive paths with at least one
/// directory component, preceded by the start of the message or a delimiter.
/// MIME types such as `image/jpeg` are not absolute and stay untouched.
static PATH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(^|[\s"'(\[=])"#,
        r#"((?:~|[A-Za-z]:)?[/\\](?:[^\s"'()\[\]/\\]+[/\\])+[^\s"'()\[\],;:]*)"#,
    ))
    .expect("path regex should compile")
});

/// Replaces every path in `message` with `<path>`.
///
/// # Examples
///
/// ```
/// use geolens::diagnostics::sanitize_message;
///
/// let msg = "Failed to open /tmp/geolens/.tmpA1b2C3";
/// assert_eq!(sanitize_message(msg), "Failed to open <path>");
///
/// let msg = "File type image/jpeg accepted";
/// assert_eq!(sanitize_message(msg), msg);
/// ```
#[must_use]
pub fn sanitize_message(message: &str) -> String {
    PATH_PATTERN.replace_all(message, "${1}<path>").into_owned()
}
