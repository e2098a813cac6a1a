//! Card processing: markdown card documents -> JSON documents with hashed images.
//!
//! For every card document under the content root, in discovery order:
//! 1. Split front matter and body, decode the YAML, render the body
//! 2. Publish referenced images under content-hashed names
//! 3. Map the card path to a flattened JSON path
//! 4. Write the fields as pretty, key-sorted JSON
//!
//! The output root is cleared before the first card is read. The first
//! error aborts the run.

mod assets;
mod document;
mod error;
mod front_matter;
mod markdown;
mod paths;

use std::path::{Path, PathBuf};

use pulldown_cmark::Options;

pub use assets::AssetError;
pub use error::ProcessError;

use assets::AssetPublisher;
use document::{parse_card, rewrite_images};
use markdown::markdown_options;
use paths::json_relative_path;

use crate::config::{MarkdownConfig, ProcessConfig};
use crate::storage::Storage;

/// Summary of a processor run.
#[derive(Debug)]
pub struct ProcessResult {
    pub output_dir: PathBuf,
    /// JSON documents written
    pub cards: usize,
    /// Distinct images copied
    pub images: usize,
}

pub struct Processor<'a, S: Storage> {
    config: &'a ProcessConfig,
    markdown_config: &'a MarkdownConfig,
    storage: &'a S,
}

impl<'a, S: Storage> Processor<'a, S> {
    pub fn new(config: &'a ProcessConfig, markdown_config: &'a MarkdownConfig, storage: &'a S) -> Self {
        Self {
            config,
            markdown_config,
            storage,
        }
    }

    pub fn run(&self) -> Result<ProcessResult, ProcessError> {
        let options = markdown_options(self.markdown_config)?;

        let output_dir = &self.config.output_dir;
        self.storage
            .remove_dir_all(output_dir)
            .map_err(|source| ProcessError::Clean {
                path: output_dir.clone(),
                source,
            })?;

        let content_dir = &self.config.content_dir;
        let cards = self
            .storage
            .list_files(content_dir, "md")
            .map_err(|source| ProcessError::Discover {
                path: content_dir.clone(),
                source,
            })?;

        let mut publisher = AssetPublisher::new(
            self.storage,
            self.config.images_dir.clone(),
            self.config.hashed_images_dir(),
        );
        let json_dir = self.config.json_dir();

        for card in &cards {
            self.process_card(card, &json_dir, options, &mut publisher)?;
        }

        Ok(ProcessResult {
            output_dir: output_dir.clone(),
            cards: cards.len(),
            images: publisher.count(),
        })
    }

    /// Process a single card document and return the JSON path written.
    fn process_card(
        &self,
        card: &Path,
        json_dir: &Path,
        options: Options,
        publisher: &mut AssetPublisher<'_, S>,
    ) -> Result<PathBuf, ProcessError> {
        println!("Processing {}", card.display());

        let text = self
            .storage
            .read_to_string(card)
            .map_err(|source| ProcessError::Read {
                path: card.to_path_buf(),
                source,
            })?;

        let mut fields = parse_card(card, &text, options)?;
        rewrite_images(&mut fields, publisher)?;

        let relative = card.strip_prefix(&self.config.content_dir).unwrap_or(card);
        let json_path = json_dir.join(json_relative_path(relative));

        let json = serde_json::to_string_pretty(&fields).map_err(|source| ProcessError::Json {
            path: json_path.clone(),
            source,
        })?;

        self.storage
            .write(&json_path, json.as_bytes())
            .map_err(|source| ProcessError::Write {
                path: json_path.clone(),
                source,
            })?;

        Ok(json_path)
    }
}
