use std::path::PathBuf;
use std::time::Duration;
use unicode_segmentation::UnicodeSegmentation;

/// Truncates a given string to a specified maximum width, appending an ellipsis (`…`)
/// if the string exceeds the specified width. Handles Unicode grapheme clusters properly.
///
/// # Panics
/// Panics if `max_width` is less than 2.
///
/// # Examples
/// ```rust
/// use sitegrab::utils::truncate_message;
///
/// let message = "Hello World";
/// let truncated = truncate_message(message, 6);
/// assert_eq!(truncated, "Hello…");
///
/// let short_message = "Hi";
/// let truncated = truncate_message(short_message, 5);
/// assert_eq!(truncated, "Hi");
/// ```
pub fn truncate_message(message: &str, max_width: usize) -> String {
    assert!(
        max_width >= 2,
        "max_width must be at least 2 to accommodate the ellipsis"
    );

    let ellipsis = "…";
    let graphemes: Vec<&str> = message.graphemes(true).collect();

    if graphemes.len() > max_width {
        // Leave space for the ellipsis
        let truncated: String = graphemes[..max_width - 1].concat();
        format!("{}{}", truncated, ellipsis)
    } else {
        message.to_string()
    }
}

/// Expands a leading `~` and environment variables in a user supplied path.
/// Unresolvable variables leave the path as written.
///
/// ```rust
/// use sitegrab::utils::expand_path;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_path("products"), PathBuf::from("products"));
/// ```
pub fn expand_path(raw: &str) -> PathBuf {
    match shellexpand::full(raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => PathBuf::from(raw),
    }
}

pub fn kb(bytes: usize) -> String {
    let kilobytes = bytes as f64 / 1024.0;
    format!("{kilobytes:.2}kb")
}

pub fn ms(duration: Duration) -> String {
    let milliseconds = duration.as_millis() as f64;
    format!("{milliseconds:.2}ms")
}
