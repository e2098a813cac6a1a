//! Card extraction: HTML template -> markdown card documents.
//!
//! The extractor runs in three steps:
//! 1. Scan the template for card blocks (`blocks`)
//! 2. Normalize each block into a [`Card`] (`normalize`, `card`)
//! 3. Render and write one markdown document per card (`document`)

mod blocks;
mod card;
mod document;
mod normalize;

use std::path::PathBuf;

pub use blocks::CardBlocks;
pub use card::Card;
pub use document::{card_path, render_card};

use crate::config::ExtractConfig;
use crate::storage::Storage;

#[derive(thiserror::Error, Debug)]
pub enum ExtractError {
    #[error("card {id} is missing required field '{field}'")]
    MissingField { id: String, field: String },

    #[error("failed to read template {}: {source}", path.display())]
    ReadTemplate {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize card {id}: {source}")]
    Serialize {
        id: String,
        source: serde_yaml::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Summary of an extraction run.
#[derive(Debug)]
pub struct ExtractResult {
    /// Card documents written, in template order
    pub written: Vec<PathBuf>,
}

/// Extract every card in `template` into normalized [`Card`]s, in source order.
pub fn extract_cards(template: &str, assets_prefix: &str) -> Result<Vec<Card>, ExtractError> {
    CardBlocks::new(template.lines())
        .map(|raw| Card::from_raw(raw, assets_prefix))
        .collect()
}

pub struct Extractor<'a, S: Storage> {
    config: &'a ExtractConfig,
    storage: &'a S,
}

impl<'a, S: Storage> Extractor<'a, S> {
    pub fn new(config: &'a ExtractConfig, storage: &'a S) -> Self {
        Self { config, storage }
    }

    /// Read the template and write one card document per well-formed block.
    pub fn run(&self) -> Result<ExtractResult, ExtractError> {
        let template_path = &self.config.template;
        let template = self
            .storage
            .read_to_string(template_path)
            .map_err(|source| ExtractError::ReadTemplate {
                path: template_path.clone(),
                source,
            })?;

        let cards = extract_cards(&template, &self.config.assets_prefix)?;

        let mut written = Vec::with_capacity(cards.len());
        for card in &cards {
            println!("card: {}", card.id);
            written.push(self.write_card(card)?);
        }

        Ok(ExtractResult { written })
    }

    fn write_card(&self, card: &Card) -> Result<PathBuf, ExtractError> {
        let content = render_card(card, self.config.layout).map_err(|source| {
            ExtractError::Serialize {
                id: card.id.clone(),
                source,
            }
        })?;

        let path = card_path(
            &self.config.content_dir,
            &self.config.section,
            &self.config.locale,
            self.config.layout,
            &card.id,
        );

        self.storage
            .write(&path, content.as_bytes())
            .map_err(|source| ExtractError::Write {
                path: path.clone(),
                source,
            })?;

        Ok(path)
    }
}
