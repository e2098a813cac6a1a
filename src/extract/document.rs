//! Rendering of cards as markdown documents with YAML front matter.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::CardLayout;

use super::card::Card;

/// Front matter keys, in the order they are written.
#[derive(Serialize)]
struct CardFrontMatter<'a> {
    title: &'a str,
    image: &'a str,
    link_url: &'a str,
    tag_label: &'a str,
    size: &'a str,
    aspect_ratio: &'a str,
    include_highres_image: serde_yaml::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    desc: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    youtube_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    media_icon: Option<&'a str>,
}

/// `"true"`/`"false"` become YAML booleans, anything else stays a string.
fn highres_flag(flag: &str) -> serde_yaml::Value {
    match flag {
        "true" => serde_yaml::Value::Bool(true),
        "false" => serde_yaml::Value::Bool(false),
        other => serde_yaml::Value::String(other.to_string()),
    }
}

/// Render a card as a markdown document.
///
/// The front matter opens with a `# card <id>` comment. The description is
/// always the markdown body; the flat layout also keeps it in the front
/// matter.
pub fn render_card(card: &Card, layout: CardLayout) -> Result<String, serde_yaml::Error> {
    let desc_in_front_matter = layout == CardLayout::Flat;

    let front_matter = CardFrontMatter {
        title: &card.title,
        image: &card.image,
        link_url: &card.link_url,
        tag_label: &card.tag_label,
        size: &card.card_size,
        aspect_ratio: &card.aspect_ratio,
        include_highres_image: highres_flag(&card.include_highres_image),
        desc: desc_in_front_matter.then_some(card.desc.as_str()),
        youtube_id: card.youtube_id.as_deref(),
        media_icon: card.media_icon.as_deref(),
    };

    let mut out = String::from("---\n");
    out.push_str(&format!("# card {}\n", card.id));
    out.push_str(&serde_yaml::to_string(&front_matter)?);
    out.push_str("---\n");

    if !card.desc.trim().is_empty() {
        out.push_str(&card.desc);
        out.push('\n');
    }

    Ok(out)
}

/// Where a card document is written.
///
/// ```ignore
/// card_path("content", "home", "en-US", CardLayout::Nested, "3") => content/home/card_3/en-US.md
/// card_path("content", "home", "en-US", CardLayout::Flat, "3")   => content/home/card_3.en-US.md
/// ```
pub fn card_path(
    content_dir: &Path,
    section: &str,
    locale: &str,
    layout: CardLayout,
    id: &str,
) -> PathBuf {
    let section_dir = content_dir.join(section);
    match layout {
        CardLayout::Nested => section_dir.join(format!("card_{id}")).join(format!("{locale}.md")),
        CardLayout::Flat => section_dir.join(format!("card_{id}.{locale}.md")),
    }
}
