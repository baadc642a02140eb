use serde::{Deserialize, Serialize};

/// Tags mirroring the media kind. Exactly one of them leads every tag set.
pub const STRUCTURAL_TAGS: [&str; 3] = ["reel", "video", "post"];

/// Mood categories; every classified post carries at least one.
pub const TONE_TAGS: [&str; 5] = [
    "dark-humor",
    "relationships",
    "daily-chaos",
    "self-own",
    "social-commentary",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Post,
    Video,
    Reel,
}

impl MediaKind {
    /// Reel only when the post is a video and the reel heuristic agrees.
    pub fn from_flags(is_video: bool, looks_like_reel: bool) -> Self {
        match (is_video, looks_like_reel) {
            (true, true) => Self::Reel,
            (true, false) => Self::Video,
            (false, _) => Self::Post,
        }
    }

    /// The structural tag for this kind.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Reel => "reel",
            Self::Video => "video",
            Self::Post => "post",
        }
    }

    /// Value of the `type` field in the published feed.
    pub fn feed_type(self) -> &'static str {
        match self {
            Self::Reel => "reel",
            Self::Video => "video",
            Self::Post => "image",
        }
    }
}

/// Ordered slugs, unique by first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(Vec<String>);

impl TagSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends `tag` unless already present. Returns whether it was added.
    pub fn push(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.contains(&tag) {
            return false;
        }
        self.0.push(tag);
        true
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn has_tone(&self) -> bool {
        TONE_TAGS.iter().any(|tone| self.contains(tone))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tags = TagSet::new();
        tags.extend(iter);
        tags
    }
}

impl<S: Into<String>> Extend<S> for TagSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for tag in iter {
            self.push(tag);
        }
    }
}

/// Topic tags first, then hashtag tags; an identical hashtag never displaces a topic tag.
pub fn merge<S: AsRef<str>>(topic_tags: TagSet, hashtag_tags: &[S]) -> TagSet {
    let mut merged = topic_tags;
    merged.extend(hashtag_tags.iter().map(|t| t.as_ref().to_string()));
    merged
}

/// Rewritten description keyed by output language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewrite {
    pub de: String,
    pub en: String,
}

/// Everything the caption core derives for one post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionAnalysis {
    /// Normalized caption; analysis input only, never part of the rewrite.
    pub caption: String,
    pub tags: TagSet,
    pub rewritten: Rewrite,
}
