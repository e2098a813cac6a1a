//! Processor error types.

use std::path::PathBuf;

use super::assets::AssetError;
use super::front_matter::FrontMatterMissing;
use super::markdown::MarkdownError;

/// Errors that abort a processor run.
#[derive(thiserror::Error, Debug)]
pub enum ProcessError {
    #[error("{}: {source}", path.display())]
    FrontMatter {
        path: PathBuf,
        source: FrontMatterMissing,
    },

    #[error("invalid front matter in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("front matter in {} is not a mapping", path.display())]
    NotAMapping { path: PathBuf },

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("markdown rendering error: {0}")]
    Markdown(#[from] MarkdownError),

    #[error("failed to serialize {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to clear output directory {}: {source}", path.display())]
    Clean {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to discover cards in {}: {source}", path.display())]
    Discover {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
