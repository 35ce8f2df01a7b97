//! Text and URL normalization for result fields.

use regex::Regex;
use std::sync::LazyLock;

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<.*?>").expect("tag pattern is valid"));

/// Strips markup tags and decodes HTML entities.
///
/// Tags are removed textually, never parsed, so malformed markup degrades
/// to whatever text survives the strip.
#[must_use]
pub fn normalize_text(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let stripped = TAG_PATTERN.replace_all(raw, "");
    html_escape::decode_html_entities(&stripped).into_owned()
}

/// Percent-decodes a URL and replaces spaces with `+`.
///
/// Input that does not decode to UTF-8 is kept as-is before the space
/// replacement.
#[must_use]
pub fn normalize_url(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let decoded = urlencoding::decode(raw).map_or_else(|_| raw.to_string(), |d| d.into_owned());
    decoded.replace(' ', "+")
}
