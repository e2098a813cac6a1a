//! Configuration type definitions.
//!
//! This module contains all the data structures used in cardsmith configuration files.
//! These types are pure data - no I/O or complex logic.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// =============================================================================
// Root config
// =============================================================================

/// Complete configuration for both build phases.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub extract: ExtractConfig,
    pub process: ProcessConfig,
    pub markdown: MarkdownConfig,
}

impl Settings {
    /// Resolve every relative path against `base_path` (typically the config file's directory).
    pub fn resolve_paths(mut self, base_path: &Path) -> Self {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base_path.join(&*path);
            }
        };

        resolve(&mut self.extract.template);
        resolve(&mut self.extract.content_dir);
        resolve(&mut self.process.content_dir);
        resolve(&mut self.process.images_dir);
        resolve(&mut self.process.output_dir);
        self
    }
}

// =============================================================================
// Extractor configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// HTML template containing the card blocks
    pub template: PathBuf,
    /// Root of the generated content tree
    pub content_dir: PathBuf,
    /// Content type directory the cards are written into (e.g. "home")
    pub section: String,
    /// Directory, relative to the images root, that card images are re-rooted under
    pub assets_prefix: String,
    /// Locale used as the card file stem
    pub locale: String,
    /// How card files are laid out on disk
    pub layout: CardLayout,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            template: PathBuf::from("../bedrock/bedrock/mozorg/templates/mozorg/home/home-en.html"),
            content_dir: PathBuf::from("content"),
            section: "home".to_string(),
            assets_prefix: "home".to_string(),
            locale: "en-US".to_string(),
            layout: CardLayout::Nested,
        }
    }
}

/// On-disk layout of extracted card documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardLayout {
    /// `card_<id>/<locale>.md`, description stored as the markdown body
    #[default]
    Nested,
    /// `card_<id>.<locale>.md`, description kept in the front matter
    Flat,
}

// =============================================================================
// Processor configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessConfig {
    /// Root of the markdown card tree
    pub content_dir: PathBuf,
    /// Root that `image` fields are resolved against
    pub images_dir: PathBuf,
    /// Output root; cleared at the start of every run
    pub output_dir: PathBuf,
    /// Hashed image tree, relative to `output_dir`
    pub static_subdir: PathBuf,
    /// JSON document tree, relative to `output_dir`
    pub content_subdir: PathBuf,
}

impl ProcessConfig {
    /// Where hashed image copies are written.
    pub fn hashed_images_dir(&self) -> PathBuf {
        self.output_dir.join(&self.static_subdir)
    }

    /// Where JSON card documents are written.
    pub fn json_dir(&self) -> PathBuf {
        self.output_dir.join(&self.content_subdir)
    }
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            images_dir: PathBuf::from("static/img"),
            output_dir: PathBuf::from("output"),
            static_subdir: PathBuf::from("static/img"),
            content_subdir: PathBuf::from("content"),
        }
    }
}

// =============================================================================
// Markdown configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarkdownConfig {
    /// pulldown-cmark extensions to enable (e.g. "tables", "footnotes")
    #[serde(default)]
    pub extensions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fixed_layout() {
        let settings = Settings::default();
        assert_eq!(settings.extract.content_dir, PathBuf::from("content"));
        assert_eq!(settings.extract.layout, CardLayout::Nested);
        assert_eq!(
            settings.process.hashed_images_dir(),
            PathBuf::from("output/static/img")
        );
        assert_eq!(settings.process.json_dir(), PathBuf::from("output/content"));
        assert!(settings.markdown.extensions.is_empty());
    }

    #[test]
    fn test_resolve_paths_keeps_absolute() {
        let mut settings = Settings::default();
        settings.process.images_dir = PathBuf::from("/srv/img");

        let resolved = settings.resolve_paths(Path::new("/project"));
        assert_eq!(resolved.process.images_dir, PathBuf::from("/srv/img"));
        assert_eq!(resolved.process.output_dir, PathBuf::from("/project/output"));
        assert_eq!(
            resolved.extract.template,
            PathBuf::from("/project/../bedrock/bedrock/mozorg/templates/mozorg/home/home-en.html")
        );
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "process:\n  output_dir: build\nextract:\n  layout: flat\n";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.process.output_dir, PathBuf::from("build"));
        assert_eq!(settings.process.images_dir, PathBuf::from("static/img"));
        assert_eq!(settings.extract.layout, CardLayout::Flat);
        assert_eq!(settings.extract.locale, "en-US");
    }
}
