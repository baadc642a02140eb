use regex::Regex;
use std::sync::LazyLock;

use crate::caption::model::{MediaKind, TagSet};

/// Tone injected when no rule family assigned one.
pub const FALLBACK_TONE: &str = "dark-humor";

/// Keyword families in evaluation order. Families are independent; every
/// matching family contributes its tag. German and English keywords share a
/// family, umlauts included both with and without diacritics.
const RULES: &[(&str, &str)] = &[
    ("live", r"\b(?:live|show|tour|bühne|buhne|stage|crowd)\b"),
    (
        "on-tour",
        r"\b(?:berlin|hamburg|köln|koln|münchen|munchen|wien|zürich|zurich)\b",
    ),
    ("dark-humor", r"\b(?:dark|dunkel|morbid|black\s+humor|schwarz)\b"),
    (
        "relationships",
        r"\b(?:date|dating|beziehung|toxic|single|paar)\b",
    ),
    (
        "daily-chaos",
        r"\b(?:alltag|chaos|job|arbeit|bahn|u-bahn|ubahn|montag)\b",
    ),
    (
        "self-own",
        r"\b(?:selbst|self|awkward|peinlich|therapy|therapie)\b",
    ),
    (
        "social-commentary",
        r"\b(?:politik|news|gesellschaft|internet|algorithm(?:us)?)\b",
    ),
];

struct Rule {
    tag: &'static str,
    pattern: Regex,
}

static COMPILED_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    RULES
        .iter()
        .map(|&(tag, pattern)| Rule {
            tag,
            pattern: Regex::new(pattern).unwrap(),
        })
        .collect()
});

/// Derives the structural tag, rule-based topic tags and a guaranteed tone
/// tag from a normalized caption. Hashtags are merged in separately.
pub fn classify(normalized_caption: &str, media_kind: MediaKind) -> TagSet {
    let text = normalized_caption.to_lowercase();

    let mut tags = TagSet::new();
    tags.push(media_kind.tag());

    for rule in COMPILED_RULES.iter() {
        if rule.pattern.is_match(&text) {
            tags.push(rule.tag);
        }
    }

    if !tags.has_tone() {
        tags.push(FALLBACK_TONE);
    }

    tags
}
