use serde::{Deserialize, Serialize};

use crate::caption::{Rewrite, TagSet};
use crate::instagram::ProfileInfo;

pub const SOURCE_LABEL: &str = "instagram web endpoints (reelfeed)";

/// Top-level document consumed by the static site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedDocument {
    pub meta: FeedMeta,
    pub profile: FeedProfile,
    pub posts: Vec<FeedPost>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedMeta {
    pub source: String,
    pub profile_url: String,
    pub fetched_at: String,
    pub post_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedProfile {
    pub username: String,
    pub display_name: String,
    pub bio: String,
    pub followers: Option<u64>,
    pub following: Option<u64>,
    pub post_count: Option<u64>,
    pub profile_image: Option<String>,
    pub external_url: Option<String>,
}

impl From<&ProfileInfo> for FeedProfile {
    fn from(profile: &ProfileInfo) -> Self {
        Self {
            username: profile.username.clone(),
            display_name: profile.display_name().to_string(),
            bio: profile.biography.clone().unwrap_or_default(),
            followers: profile.followers,
            following: profile.following,
            post_count: profile.media_count,
            profile_image: profile.profile_pic_url.clone(),
            external_url: profile.external_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPost {
    pub id: String,
    pub shortcode: String,
    #[serde(rename = "type")]
    pub media_type: String,
    pub timestamp: Option<String>,
    pub caption_source: String,
    pub permalink: String,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub duration: Option<f64>,
    pub stats: PostStats,
    pub rewritten: Rewrite,
    pub tags: TagSet,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostStats {
    pub likes: Option<u64>,
    pub comments: Option<u64>,
    pub views: Option<u64>,
}

impl PostStats {
    /// Hidden or unavailable counters come back as zero or negative sentinels.
    pub fn from_raw(likes: Option<i64>, comments: Option<i64>, views: Option<i64>) -> Self {
        Self {
            likes: positive(likes),
            comments: positive(comments),
            views: positive(views),
        }
    }
}

fn positive(value: Option<i64>) -> Option<u64> {
    value.filter(|v| *v > 0).map(|v| v as u64)
}
