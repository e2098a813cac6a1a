//! Card records and their field normalization.

use std::collections::BTreeMap;

use crate::util::last_token;

use super::ExtractError;

/// Card size used when the block has no `class` argument.
pub const DEFAULT_CARD_SIZE: &str = "small";

/// Fields every finalized card must carry.
const REQUIRED_FIELDS: [&str; 6] = ["title", "image", "link_url", "tag_label", "aspect_ratio", "desc"];

/// A card block as read from the template: its id plus raw `key=value` arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCard {
    pub id: String,
    pub fields: BTreeMap<String, String>,
}

impl RawCard {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }
}

/// A normalized card, ready to be written as a card document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: String,
    pub title: String,
    /// Image path relative to the images root (`<assets prefix>/<file name>`)
    pub image: String,
    pub link_url: String,
    pub tag_label: String,
    pub card_size: String,
    /// Reduced to `W-H`
    pub aspect_ratio: String,
    /// Lower-cased; `"false"` when the template omits it
    pub include_highres_image: String,
    pub desc: String,
    pub youtube_id: Option<String>,
    pub media_icon: Option<String>,
}

impl Card {
    /// Apply field normalization to a finalized block.
    ///
    /// The template's `image_url` argument is accepted as `image`.
    pub fn from_raw(raw: RawCard, assets_prefix: &str) -> Result<Self, ExtractError> {
        let RawCard { id, mut fields } = raw;

        if !fields.contains_key("image")
            && let Some(image_url) = fields.remove("image_url")
        {
            fields.insert("image".to_string(), image_url);
        }

        if let Some(field) = REQUIRED_FIELDS.iter().find(|f| !fields.contains_key(**f)) {
            return Err(ExtractError::MissingField {
                id,
                field: field.to_string(),
            });
        }

        let mut take = |key: &str| fields.remove(key).unwrap_or_default();

        let image = rebase_image(&take("image"), assets_prefix);
        let aspect_ratio = reduce_aspect_ratio(&take("aspect_ratio"));

        let title = take("title");
        let link_url = take("link_url");
        let tag_label = take("tag_label");
        let desc = take("desc");

        let card_size = fields
            .remove("class")
            .map(|class| last_token(&class).to_string())
            .unwrap_or_else(|| DEFAULT_CARD_SIZE.to_string());

        let include_highres_image = fields
            .remove("include_highres_image")
            .map(|flag| flag.to_lowercase())
            .unwrap_or_else(|| "false".to_string());

        let media_icon = fields
            .remove("media_icon")
            .map(|icon| last_token(&icon).to_string());

        Ok(Self {
            id,
            title,
            image,
            link_url,
            tag_label,
            card_size,
            aspect_ratio,
            include_highres_image,
            desc,
            youtube_id: fields.remove("youtube_id"),
            media_icon,
        })
    }
}

/// Keep only the image's file name, re-rooted under `assets_prefix`.
fn rebase_image(image: &str, assets_prefix: &str) -> String {
    let file_name = image.rsplit('/').next().unwrap_or(image);
    let prefix = assets_prefix.trim_end_matches('/');
    if prefix.is_empty() {
        file_name.to_string()
    } else {
        format!("{prefix}/{file_name}")
    }
}

/// Keep the last two `-`-separated tokens: "mzp-has-aspect-16-9" -> "16-9".
fn reduce_aspect_ratio(ratio: &str) -> String {
    let parts: Vec<&str> = ratio.split('-').collect();
    match parts.as_slice() {
        [.., w, h] => format!("{w}-{h}"),
        _ => ratio.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_card(pairs: &[(&str, &str)]) -> RawCard {
        let mut raw = RawCard::new("7");
        for (k, v) in pairs {
            raw.fields.insert(k.to_string(), v.to_string());
        }
        raw
    }

    fn required() -> Vec<(&'static str, &'static str)> {
        vec![
            ("title", "Firefox"),
            ("image_url", "img/home/2018/cards/firefox.png"),
            ("link_url", "https://example.com/firefox/"),
            ("tag_label", "Browser"),
            ("aspect_ratio", "mzp-has-aspect-16-9"),
            ("desc", "Fast and private."),
        ]
    }

    #[test]
    fn test_reduce_aspect_ratio() {
        assert_eq!(reduce_aspect_ratio("foo-16-9"), "16-9");
        assert_eq!(reduce_aspect_ratio("16-9"), "16-9");
        assert_eq!(reduce_aspect_ratio("mzp-has-aspect-1-1"), "1-1");
        assert_eq!(reduce_aspect_ratio("square"), "square");
    }

    #[test]
    fn test_rebase_image() {
        assert_eq!(rebase_image("img/home/2018/cards/a.png", "home"), "home/a.png");
        assert_eq!(rebase_image("a.png", "home/"), "home/a.png");
        assert_eq!(rebase_image("x/a.png", ""), "a.png");
    }

    #[test]
    fn test_defaults() {
        let card = Card::from_raw(raw_card(&required()), "home").unwrap();
        assert_eq!(card.id, "7");
        assert_eq!(card.image, "home/firefox.png");
        assert_eq!(card.aspect_ratio, "16-9");
        assert_eq!(card.card_size, DEFAULT_CARD_SIZE);
        assert_eq!(card.include_highres_image, "false");
        assert_eq!(card.youtube_id, None);
        assert_eq!(card.media_icon, None);
    }

    #[test]
    fn test_optional_fields() {
        let mut pairs = required();
        pairs.push(("class", "card-lg"));
        pairs.push(("include_highres_image", "True"));
        pairs.push(("media_icon", "mzp-t-video"));
        pairs.push(("youtube_id", "abc123"));

        let card = Card::from_raw(raw_card(&pairs), "home").unwrap();
        assert_eq!(card.card_size, "lg");
        assert_eq!(card.include_highres_image, "true");
        assert_eq!(card.media_icon.as_deref(), Some("video"));
        assert_eq!(card.youtube_id.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_explicit_image_wins_over_image_url() {
        let mut pairs = required();
        pairs.push(("image", "other/b.jpg"));
        let card = Card::from_raw(raw_card(&pairs), "home").unwrap();
        assert_eq!(card.image, "home/b.jpg");
    }

    #[test]
    fn test_missing_required_field() {
        let pairs: Vec<_> = required().into_iter().filter(|(k, _)| *k != "tag_label").collect();
        let err = Card::from_raw(raw_card(&pairs), "home").unwrap_err();
        assert!(matches!(
            err,
            ExtractError::MissingField { ref id, ref field } if id == "7" && field == "tag_label"
        ));
    }
}
