//! Cleanup of raw template argument values.
//!
//! Template arguments look like `title=_('Firefox Browser'),` or
//! `image_url=url('img/home/card.jpg'),`. Each wrapper piece is stripped
//! independently, so partially wrapped values still come out clean.

const TRANSLATION_CALL: &str = "_('";
const URL_CALL: &str = "url('";

/// Strip call wrappers, quotes and the trailing comma from an argument value.
pub fn normalize_value(value: &str) -> &str {
    let mut value = value;

    value = value.strip_prefix(TRANSLATION_CALL).unwrap_or(value);
    value = value.strip_prefix(URL_CALL).unwrap_or(value);
    value = value.strip_prefix('\'').unwrap_or(value);
    value = value.strip_prefix('"').unwrap_or(value);

    value = value.strip_suffix(',').unwrap_or(value);
    value = value.strip_suffix("')").unwrap_or(value);
    value = value.strip_suffix('\'').unwrap_or(value);
    value = value.strip_suffix('"').unwrap_or(value);

    value
}
