use regex::Regex;
use std::sync::LazyLock;

static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)https?://\S+").unwrap());

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strips URLs and collapses whitespace. Hashtag markers are left in place.
pub fn normalize(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };

    let without_urls = URL_REGEX.replace_all(raw, " ");
    WHITESPACE_REGEX
        .replace_all(&without_urls, " ")
        .trim()
        .to_string()
}
