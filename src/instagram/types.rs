use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::caption::MediaKind;

/// Product type Instagram assigns to reels.
const REEL_PRODUCT_TYPE: &str = "clips";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileInfo {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub biography: Option<String>,
    pub followers: Option<u64>,
    pub following: Option<u64>,
    pub media_count: Option<u64>,
    pub profile_pic_url: Option<String>,
    pub external_url: Option<String>,
}

impl ProfileInfo {
    /// Full name, or the username when the profile has none.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(self.username.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    pub shortcode: String,
    pub caption: Option<String>,
    pub is_video: bool,
    pub product_type: Option<String>,
    pub display_url: Option<String>,
    pub video_url: Option<String>,
    pub video_duration: Option<f64>,
    /// Raw counters; hidden counts can arrive as zero or negative.
    pub likes: Option<i64>,
    pub comments: Option<i64>,
    pub video_views: Option<i64>,
    pub taken_at: Option<DateTime<Utc>>,
}

impl PostRecord {
    /// A video counts as a reel unless Instagram reports a different product type.
    pub fn looks_like_reel(&self) -> bool {
        self.is_video
            && self
                .product_type
                .as_deref()
                .is_none_or(|kind| kind == REEL_PRODUCT_TYPE)
    }

    pub fn media_kind(&self) -> MediaKind {
        MediaKind::from_flags(self.is_video, self.looks_like_reel())
    }

    pub fn permalink(&self) -> String {
        format!("https://www.instagram.com/p/{}/", self.shortcode)
    }
}

/// One page of a profile's timeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostPage {
    pub posts: Vec<PostRecord>,
    /// Cursor for the next page, `None` on the last one.
    pub next_cursor: Option<String>,
}
