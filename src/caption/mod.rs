pub mod classify;
pub mod hashtags;
pub mod model;
pub mod normalize;
pub mod rewrite;

#[cfg(test)]
mod tests;

pub use classify::classify;
pub use hashtags::{extract_hashtags, slugify};
pub use model::{CaptionAnalysis, MediaKind, Rewrite, TagSet, merge};
pub use normalize::normalize;
pub use rewrite::{dominant_topic, rewrite};

pub fn analyze(caption: Option<&str>, media_kind: MediaKind) -> CaptionAnalysis {
    // 1. Clean the caption for keyword matching
    let normalized = normalize(caption);

    // 2. Structural, topic and tone tags
    let topic_tags = classify(&normalized, media_kind);

    // 3. Hashtags come from the raw caption so URL stripping cannot eat them
    let hashtags = extract_hashtags(caption);

    // 4. Merge, topic tags first
    let tags = merge(topic_tags, &hashtags);

    // 5. Bilingual description
    let rewritten = rewrite(&tags, media_kind);

    CaptionAnalysis {
        caption: normalized,
        tags,
        rewritten,
    }
}
