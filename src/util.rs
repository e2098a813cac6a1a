//! Shared utility functions.

use std::path::Path;

/// Render a relative path with `/` separators, as used in published URLs.
///
/// "home\\card.png" -> "home/card.png"
pub fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Last `-`-separated token of a string.
///
/// "card-lg" -> "lg"
/// "small" -> "small"
pub fn last_token(s: &str) -> &str {
    s.rsplit('-').next().unwrap_or(s)
}
