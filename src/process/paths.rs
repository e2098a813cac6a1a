//! Path conversion utilities for processed output.
//!
//! This module handles conversions between:
//! - Source image paths and their hashed, cache-busting names
//! - Images and their high-res siblings
//! - Card document paths and JSON output paths

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Number of digest hex characters embedded in hashed file names.
pub const SHORT_HASH_LEN: usize = 12;

const HIGHRES_SUFFIX: &str = "-high-res";

fn stem_and_extension(path: &Path) -> (String, String) {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    (stem, ext)
}

/// Insert the first 12 characters of `hash` before the extension.
///
/// # Examples
/// ```ignore
/// hashed_file_name("home/photo.jpg", "0123456789abcdef...") => "home/photo.0123456789ab.jpg"
/// ```
pub fn hashed_file_name(path: &Path, hash: &str) -> PathBuf {
    let (stem, ext) = stem_and_extension(path);
    let short = &hash[..hash.len().min(SHORT_HASH_LEN)];
    path.with_file_name(format!("{stem}.{short}{ext}"))
}

/// The high-res sibling of an image: `photo.jpg` -> `photo-high-res.jpg`.
pub fn highres_file_name(path: &Path) -> PathBuf {
    let (stem, ext) = stem_and_extension(path);
    path.with_file_name(format!("{stem}{HIGHRES_SUFFIX}{ext}"))
}

/// Map a card document (relative to the content root) to its JSON path
/// (relative to the JSON output root).
///
/// The first directory, the content type, is kept; everything below it is
/// flattened into a dotted file name.
///
/// # Examples
/// ```ignore
/// json_relative_path("home/card_1/en-US.md") => "home/card_1.en-US.json"
/// json_relative_path("home/card_1.en-US.md") => "home/card_1.en-US.json"
/// json_relative_path("about.md")             => "about.json"
/// ```
pub fn json_relative_path(relative: &Path) -> PathBuf {
    let parts: Vec<&OsStr> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect();

    let flattened = match parts.as_slice() {
        [] => PathBuf::new(),
        [file] => PathBuf::from(file),
        [content_type, rest @ ..] => {
            let name = rest
                .iter()
                .map(|p| p.to_string_lossy())
                .collect::<Vec<_>>()
                .join(".");
            Path::new(content_type).join(name)
        }
    };

    flattened.with_extension("json")
}
