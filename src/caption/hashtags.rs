use regex::Regex;
use std::sync::LazyLock;

// `\w` is unicode-aware, so `#Überraschung` and dotted tags match as one token.
static HASHTAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#([\w.]+)").unwrap());

static NON_SLUG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

const EMPTY_SLUG: &str = "post";

/// Lowercases and reduces `value` to `[a-z0-9-]`. Never returns an empty string.
pub fn slugify(value: &str) -> String {
    let lower = value.trim().to_lowercase();
    let slug = NON_SLUG_REGEX.replace_all(&lower, "-");
    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// Hashtags of the raw caption as slugs, in first-seen order without duplicates.
pub fn extract_hashtags(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let mut tags: Vec<String> = Vec::new();
    for caps in HASHTAG_REGEX.captures_iter(raw) {
        let slug = slugify(&caps[1].replace('.', "-"));
        if !tags.contains(&slug) {
            tags.push(slug);
        }
    }
    tags
}
