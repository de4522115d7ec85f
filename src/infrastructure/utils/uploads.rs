use once_cell::sync::Lazy;
use regex::Regex;

static UNSAFE_FILENAME_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_-]").unwrap());

/// Replaces every character outside `[a-zA-Z0-9_-]` with `_`.
pub fn sanitize_for_filename(value: &str) -> String {
    UNSAFE_FILENAME_CHARS.replace_all(value, "_").into_owned()
}

pub fn cv_filename(email: &str, timestamp_millis: i64) -> String {
    format!("cv-{}-{}.pdf", timestamp_millis, sanitize_for_filename(email))
}

/// Joins the public prefix and file name with exactly one slash.
pub fn public_url(prefix: &str, filename: &str) -> String {
    format!("{}/{}", prefix.trim_end_matches('/'), filename)
}

/// Renders a byte limit in the largest unit that divides it exactly.
pub fn describe_size(bytes: usize) -> String {
    const KIB: usize = 1024;
    const MIB: usize = 1024 * KIB;

    if bytes >= MIB && bytes % MIB == 0 {
        format!("{} MB", bytes / MIB)
    } else if bytes >= KIB && bytes % KIB == 0 {
        format!("{} KB", bytes / KIB)
    } else {
        format!("{} bytes", bytes)
    }
}
