//! Card documents as field mappings, and their image rewriting.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use pulldown_cmark::Options;
use serde_json::Value;

use crate::storage::Storage;
use crate::util::to_slash;

use super::ProcessError;
use super::assets::{AssetError, AssetPublisher};
use super::front_matter::split_front_matter;
use super::markdown::render_markdown;
use super::paths::highres_file_name;

/// Front matter fields of a card. Ordered, so JSON output has sorted keys.
pub type Fields = BTreeMap<String, Value>;

/// Key holding the rendered markdown body.
pub const HTML_CONTENT: &str = "html_content";
const IMAGE: &str = "image";
const HIGHRES_IMAGE: &str = "highres_image";
const INCLUDE_HIGHRES_IMAGE: &str = "include_highres_image";

/// Parse a card document into its fields.
///
/// A non-blank markdown body is rendered and stored under `html_content`.
/// `path` is only used for error messages.
pub fn parse_card(path: &Path, text: &str, options: Options) -> Result<Fields, ProcessError> {
    let split = split_front_matter(text).map_err(|source| ProcessError::FrontMatter {
        path: path.to_path_buf(),
        source,
    })?;

    let yaml_err = |source| ProcessError::Yaml {
        path: path.to_path_buf(),
        source,
    };

    let value: serde_yaml::Value = if is_blank_yaml(&split.yaml) {
        serde_yaml::Value::Null
    } else {
        serde_yaml::from_str(&split.yaml).map_err(yaml_err)?
    };
    let mut fields: Fields = match value {
        serde_yaml::Value::Null => Fields::new(),
        value @ serde_yaml::Value::Mapping(_) => serde_yaml::from_value(value).map_err(yaml_err)?,
        _ => {
            return Err(ProcessError::NotAMapping {
                path: path.to_path_buf(),
            });
        }
    };

    if !split.markdown.trim().is_empty() {
        fields.insert(
            HTML_CONTENT.to_string(),
            Value::String(render_markdown(&split.markdown, options)),
        );
    }

    Ok(fields)
}

/// Only blank lines and comments, such as a bare `# card 1` block.
fn is_blank_yaml(yaml: &str) -> bool {
    yaml.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}

fn is_true(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Publish the card's images and point its fields at the hashed copies.
///
/// `image` is replaced by its hashed path. When `include_highres_image` is
/// true the `-high-res` sibling is published too and stored as
/// `highres_image`. `include_highres_image` never survives this step.
pub fn rewrite_images<S: Storage>(
    fields: &mut Fields,
    publisher: &mut AssetPublisher<'_, S>,
) -> Result<(), AssetError> {
    let include_highres = fields
        .remove(INCLUDE_HIGHRES_IMAGE)
        .is_some_and(|v| is_true(&v));

    let Some(image) = fields.get(IMAGE).and_then(Value::as_str).map(PathBuf::from) else {
        return Ok(());
    };

    let asset = publisher.publish(&image)?;
    fields.insert(IMAGE.to_string(), Value::String(to_slash(&asset.public_path)));

    if include_highres {
        let highres = publisher.publish(&highres_file_name(&image))?;
        fields.insert(
            HIGHRES_IMAGE.to_string(),
            Value::String(to_slash(&highres.public_path)),
        );
    }

    Ok(())
}
