use crate::caption::model::{MediaKind, Rewrite, STRUCTURAL_TAGS, TagSet};

/// Rule tags describing the setting rather than subject matter. Together with
/// the structural tags they are skipped when picking the dominant topic. New
/// modifier rules must be added here explicitly to stay out of the rewrite.
pub const MODIFIER_TAGS: [&str; 2] = ["live", "on-tour"];

/// Topic used when every tag is excluded.
pub const DEFAULT_TOPIC: &str = "dark-humor";

#[derive(Debug, Clone, Copy)]
struct Phrase {
    de: &'static str,
    en: &'static str,
}

const TOPIC_PHRASES: &[(&str, Phrase)] = &[
    (
        "dark-humor",
        Phrase {
            de: "dunkle Alltagskanten",
            en: "dark everyday edges",
        },
    ),
    (
        "relationships",
        Phrase {
            de: "Beziehungsdynamik",
            en: "relationship dynamics",
        },
    ),
    (
        "daily-chaos",
        Phrase {
            de: "Alltagschaos",
            en: "daily chaos",
        },
    ),
    (
        "self-own",
        Phrase {
            de: "Selbstironie",
            en: "self-own humor",
        },
    ),
    (
        "social-commentary",
        Phrase {
            de: "gesellschaftliche Reibung",
            en: "social friction",
        },
    ),
];

const FALLBACK_TOPIC_PHRASE: Phrase = Phrase {
    de: "dunkle Pointen",
    en: "dark punchlines",
};

const TYPE_LABELS: &[(MediaKind, Phrase)] = &[
    (
        MediaKind::Reel,
        Phrase {
            de: "Reel",
            en: "Reel",
        },
    ),
    (
        MediaKind::Video,
        Phrase {
            de: "Video-Clip",
            en: "Video clip",
        },
    ),
    (
        MediaKind::Post,
        Phrase {
            de: "Post",
            en: "Post",
        },
    ),
];

const FALLBACK_TYPE_LABEL: Phrase = Phrase {
    de: "Post",
    en: "Post",
};

const LIVE_CLAUSE: Phrase = Phrase {
    de: " Live-Vibe, direkt ins Timing.",
    en: " Live vibe, straight into timing.",
};

fn topic_phrase(topic: &str) -> Phrase {
    TOPIC_PHRASES
        .iter()
        .find(|(tag, _)| *tag == topic)
        .map_or(FALLBACK_TOPIC_PHRASE, |(_, phrase)| *phrase)
}

fn type_label(kind: MediaKind) -> Phrase {
    TYPE_LABELS
        .iter()
        .find(|(k, _)| *k == kind)
        .map_or(FALLBACK_TYPE_LABEL, |(_, phrase)| *phrase)
}

/// First tag that is neither structural nor a modifier.
pub fn dominant_topic(tags: &TagSet) -> &str {
    tags.iter()
        .find(|tag| !STRUCTURAL_TAGS.contains(tag) && !MODIFIER_TAGS.contains(tag))
        .unwrap_or(DEFAULT_TOPIC)
}

/// Builds the German and English description for a post. The caption itself
/// never reaches the output; only tags and media kind do.
pub fn rewrite(tags: &TagSet, media_kind: MediaKind) -> Rewrite {
    let topic = topic_phrase(dominant_topic(tags));
    let label = type_label(media_kind);
    let live = if tags.contains("live") {
        LIVE_CLAUSE
    } else {
        Phrase { de: "", en: "" }
    };

    Rewrite {
        de: format!(
            "{} mit Fokus auf {}: trocken, scharf und ohne Sicherheitsnetz.{}",
            label.de, topic.de, live.de
        ),
        en: format!(
            "{} focused on {}: dry, sharp, and without a safety rail.{}",
            label.en, topic.en, live.en
        ),
    }
}
