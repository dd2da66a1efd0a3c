//! Shared formatting helpers for tree walking

use std::time::SystemTime;

use chrono::{DateTime, Utc};
use glob::Pattern;

const KB: u64 = 1024;
const MB: u64 = KB * 1024;

/// Size above which a file gets the `largeFile` class.
pub const LARGE_FILE_THRESHOLD: u64 = MB;

/// Format a size in bytes.
///
/// Human-readable sizes stop at MB, so very large sizes show a large MB figure.
/// The single decimal is rounded half up (1280 B is "1.3 KB").
pub fn format_size(bytes: u64, human_readable: bool) -> String {
    if !human_readable || bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{} KB", tenths(bytes, KB))
    } else {
        format!("{} MB", tenths(bytes, MB))
    }
}

/// `bytes / unit` with one decimal, ties rounded up.
fn tenths(bytes: u64, unit: u64) -> String {
    let unit = u128::from(unit);
    let scaled = (u128::from(bytes) * 10 + unit / 2) / unit;
    format!("{}.{}", scaled / 10, scaled % 10)
}

/// Calendar date (UTC) of a modification time, as `YYYY-MM-DD`.
pub fn format_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format("%Y-%m-%d").to_string()
}

/// Replace every character outside `[A-Za-z0-9]` with `_`.
pub fn safe_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Make a name safe to place inside a quoted node label.
pub fn escape_label(name: &str) -> String {
    name.replace('"', "#quot;")
}

/// Case-insensitive substring match against any keyword.
pub fn matches_keyword(name: &str, keywords: &[String]) -> bool {
    let name = name.to_lowercase();
    keywords
        .iter()
        .any(|kw| name.contains(&kw.to_lowercase()))
}

/// Match a glob pattern against a name.
pub fn glob_match(pattern: &str, name: &str) -> bool {
    Pattern::new(pattern)
        .map(|p| p.matches(name))
        .unwrap_or(false)
}
