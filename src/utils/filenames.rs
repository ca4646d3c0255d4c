// Filename helpers

use once_cell::sync::Lazy;
use regex::Regex;

static UNSAFE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^-a-zA-Z0-9_]+").expect("valid unsafe-chars regex"));
static REPEATED_UNDERSCORES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_+").expect("valid underscore regex"));

/// Turn an arbitrary title into a filename safe on every platform.
///
/// Runs of characters outside `[-a-zA-Z0-9_]` become a single `_`, repeated
/// underscores collapse, and leading/trailing `_` or `-` are removed. A name
/// that ends up empty becomes `_`.
pub fn sanitize_filename(name: &str) -> String {
    let replaced = UNSAFE_CHARS.replace_all(name, "_");
    let collapsed = REPEATED_UNDERSCORES.replace_all(&replaced, "_");
    let trimmed = collapsed.trim_matches(|c| c == '_' || c == '-');
    if trimmed.is_empty() {
        "_".to_string()
    } else {
        trimmed.to_string()
    }
}
