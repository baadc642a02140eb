#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use reelfeed::fetcher::{AssetDownloader, DownloadOutcome, FetchError};
use reelfeed::instagram::{PostPage, PostRecord, ProfileInfo, ProfileSource, SourceError};

/// Serves canned pages keyed by cursor: page `i` is returned for cursor `"p{i}"`.
/// With `loop_back` set, the last page points back at that page index.
pub struct FakeSource {
    pub profile: ProfileInfo,
    pub pages: Vec<Vec<PostRecord>>,
    pub loop_back: Option<usize>,
    pub requested: Mutex<Vec<Option<String>>>,
}

impl FakeSource {
    pub fn new(pages: Vec<Vec<PostRecord>>) -> Self {
        Self {
            profile: profile("daphnigg"),
            pages,
            loop_back: None,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn cycling(pages: Vec<Vec<PostRecord>>, loop_back: usize) -> Self {
        Self {
            loop_back: Some(loop_back),
            ..Self::new(pages)
        }
    }

    pub fn requested_cursors(&self) -> Vec<Option<String>> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileSource for FakeSource {
    async fn profile(&self, username: &str) -> Result<ProfileInfo, SourceError> {
        if username != self.profile.username {
            return Err(SourceError::ProfileNotFound(username.to_string()));
        }
        Ok(self.profile.clone())
    }

    async fn posts_page(
        &self,
        _profile: &ProfileInfo,
        cursor: Option<&str>,
    ) -> Result<PostPage, SourceError> {
        self.requested
            .lock()
            .unwrap()
            .push(cursor.map(str::to_string));

        let index = match cursor {
            None => 0,
            Some(c) => c
                .trim_start_matches('p')
                .parse::<usize>()
                .map_err(|_| SourceError::Malformed(format!("bad cursor {c}")))?,
        };
        let posts = self.pages.get(index).cloned().unwrap_or_default();
        let next_cursor = if index + 1 < self.pages.len() {
            Some(format!("p{}", index + 1))
        } else {
            self.loop_back.map(|i| format!("p{i}"))
        };
        Ok(PostPage { posts, next_cursor })
    }
}

/// Records requested downloads and fails for URLs containing `fail`.
#[derive(Default)]
pub struct FakeDownloader {
    pub calls: Mutex<Vec<(String, PathBuf)>>,
}

impl FakeDownloader {
    pub fn calls(&self) -> Vec<(String, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssetDownloader for FakeDownloader {
    async fn ensure(&self, url: &str, dest: &Path) -> Result<DownloadOutcome, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), dest.to_path_buf()));
        if url.contains("fail") {
            return Err(FetchError::ConnectTimeout);
        }
        Ok(DownloadOutcome::Downloaded {
            bytes: 1,
            attempts: 1,
        })
    }
}

pub fn profile(username: &str) -> ProfileInfo {
    ProfileInfo {
        id: "4242".to_string(),
        username: username.to_string(),
        full_name: None,
        biography: Some("Comedy".to_string()),
        followers: Some(1000),
        following: Some(12),
        media_count: Some(3),
        profile_pic_url: Some("https://cdn.example.com/pic.jpg".to_string()),
        external_url: None,
    }
}

pub fn image_post(shortcode: &str, caption: Option<&str>) -> PostRecord {
    PostRecord {
        shortcode: shortcode.to_string(),
        caption: caption.map(str::to_string),
        is_video: false,
        product_type: None,
        display_url: Some(format!("https://cdn.example.com/{shortcode}.jpg?x=1")),
        video_url: None,
        video_duration: None,
        likes: Some(5),
        comments: Some(-1),
        video_views: None,
        taken_at: DateTime::<Utc>::from_timestamp(1_700_000_000, 0),
    }
}

pub fn reel_post(shortcode: &str, caption: Option<&str>) -> PostRecord {
    PostRecord {
        is_video: true,
        product_type: Some("clips".to_string()),
        video_url: Some(format!("https://cdn.example.com/{shortcode}.mp4")),
        video_duration: Some(12.5),
        video_views: Some(300),
        ..image_post(shortcode, caption)
    }
}
