//! Splitting card documents into YAML front matter and markdown body.

/// Line that opens and closes the front matter block.
const DELIMITER: &str = "---";

/// Fewer than two `---` lines were found.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("front matter not found")]
pub struct FrontMatterMissing;

/// Raw sections of a card document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitDocument {
    /// YAML text between the two delimiters
    pub yaml: String,
    /// Everything after the closing delimiter
    pub markdown: String,
}

/// Split a document at its first two `---` lines.
///
/// Lines before the opening delimiter are ignored. Once the block is closed,
/// any later `---` line belongs to the markdown body.
///
/// ```markdown
/// ---
/// title: Firefox
/// ---
///
/// Body text
/// ```
pub fn split_front_matter(text: &str) -> Result<SplitDocument, FrontMatterMissing> {
    let mut delimiters = 0;
    let mut yaml = String::new();
    let mut markdown = String::new();

    for line in text.split_inclusive('\n') {
        if delimiters < 2 && line.trim() == DELIMITER {
            delimiters += 1;
            continue;
        }

        match delimiters {
            1 => yaml.push_str(line),
            2 => markdown.push_str(line),
            _ => {}
        }
    }

    if delimiters < 2 {
        return Err(FrontMatterMissing);
    }

    Ok(SplitDocument { yaml, markdown })
}
