//! Runtime configuration for a fetch run.
//!
//! Everything comes from environment variables so the binary can run
//! unchanged in CI and locally. `Config::from_env` applies the defaults; the
//! `with_*` setters exist for tests and embedding.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable names.
pub const ENV_PROFILE: &str = "IG_PROFILE";
pub const ENV_SESSION_ID: &str = "IG_SESSIONID";
pub const ENV_DOWNLOAD_VIDEOS: &str = "IG_DOWNLOAD_VIDEOS";
pub const ENV_MAX_VIDEO_DOWNLOADS: &str = "IG_MAX_VIDEO_DOWNLOADS";
pub const ENV_MAX_POSTS: &str = "IG_MAX_POSTS";
pub const ENV_OUTPUT_JSON: &str = "IG_OUTPUT_JSON";
pub const ENV_MEDIA_DIR: &str = "IG_MEDIA_DIR";
pub const ENV_MEDIA_URL_PREFIX: &str = "IG_MEDIA_URL_PREFIX";
pub const ENV_THROTTLE_MS: &str = "IG_THROTTLE_MS";

const DEFAULT_PROFILE: &str = "daphnigg";
const DEFAULT_OUTPUT_JSON: &str = "data/instagram.json";
const DEFAULT_MEDIA_DIR: &str = "public/instagram";
const DEFAULT_MEDIA_URL_PREFIX: &str = "/instagram";
const DEFAULT_THROTTLE_MS: u64 = 220;
/// Video cap applied when video caching is on but no explicit cap was given.
const DEFAULT_VIDEO_BUDGET: usize = 8;

const TRUTHY: [&str; 5] = ["1", "true", "TRUE", "yes", "YES"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    profile: String,
    session_id: Option<String>,
    download_videos: bool,
    max_video_downloads: Option<usize>,
    max_posts: Option<usize>,
    output_json: PathBuf,
    media_dir: PathBuf,
    media_url_prefix: String,
    throttle: Duration,
}

impl Config {
    /// Config for `profile` with every other setting at its default.
    pub fn new(profile: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            profile: parse_profile(profile)?,
            session_id: None,
            download_videos: false,
            max_video_downloads: Some(0),
            max_posts: None,
            output_json: PathBuf::from(DEFAULT_OUTPUT_JSON),
            media_dir: PathBuf::from(DEFAULT_MEDIA_DIR),
            media_url_prefix: DEFAULT_MEDIA_URL_PREFIX.to_string(),
            throttle: Duration::from_millis(DEFAULT_THROTTLE_MS),
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string());

        let profile = get(ENV_PROFILE).unwrap_or_else(|| DEFAULT_PROFILE.to_string());
        let session_id = get(ENV_SESSION_ID).filter(|v| !v.is_empty());
        let download_videos = get(ENV_DOWNLOAD_VIDEOS).is_some_and(|v| TRUTHY.contains(&v.as_str()));
        let max_video_downloads =
            parse_video_budget(get(ENV_MAX_VIDEO_DOWNLOADS).as_deref(), download_videos);
        let max_posts = get(ENV_MAX_POSTS).and_then(|v| parse_digits(&v));
        let throttle = match get(ENV_THROTTLE_MS).filter(|v| !v.is_empty()) {
            None => Duration::from_millis(DEFAULT_THROTTLE_MS),
            Some(v) => Duration::from_millis(parse_digits(&v).ok_or_else(|| {
                ConfigError::InvalidValue {
                    field: ENV_THROTTLE_MS,
                    reason: format!("expected milliseconds, got '{v}'"),
                }
            })? as u64),
        };

        let mut config = Self::new(&profile)?;
        config.session_id = session_id;
        config.download_videos = download_videos;
        config.max_video_downloads = max_video_downloads;
        config.max_posts = max_posts;
        config.throttle = throttle;
        if let Some(path) = get(ENV_OUTPUT_JSON).filter(|v| !v.is_empty()) {
            config.output_json = PathBuf::from(path);
        }
        if let Some(path) = get(ENV_MEDIA_DIR).filter(|v| !v.is_empty()) {
            config.media_dir = PathBuf::from(path);
        }
        if let Some(prefix) = get(ENV_MEDIA_URL_PREFIX).filter(|v| !v.is_empty()) {
            config.media_url_prefix = prefix;
        }
        Ok(config)
    }

    /// Target username without the leading `@`.
    pub fn profile(&self) -> &str {
        &self.profile
    }
    pub fn profile_url(&self) -> String {
        format!("https://www.instagram.com/{}/", self.profile)
    }
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }
    pub fn download_videos(&self) -> bool {
        self.download_videos
    }
    /// `None` means no cap.
    pub fn max_video_downloads(&self) -> Option<usize> {
        self.max_video_downloads
    }
    /// `None` means the whole timeline.
    pub fn max_posts(&self) -> Option<usize> {
        self.max_posts
    }
    pub fn output_json(&self) -> &Path {
        &self.output_json
    }
    pub fn media_dir(&self) -> &Path {
        &self.media_dir
    }
    /// Public URL prefix under which `media_dir` is served.
    pub fn media_url_prefix(&self) -> &str {
        self.media_url_prefix.trim_end_matches('/')
    }
    pub fn throttle(&self) -> Duration {
        self.throttle
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
    pub fn with_videos(mut self, enabled: bool, max_downloads: Option<usize>) -> Self {
        self.download_videos = enabled;
        self.max_video_downloads = max_downloads;
        self
    }
    pub fn with_max_posts(mut self, max_posts: Option<usize>) -> Self {
        self.max_posts = max_posts;
        self
    }
    pub fn with_output_json(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_json = path.into();
        self
    }
    pub fn with_media_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.media_dir = path.into();
        self
    }
    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

fn parse_profile(raw: &str) -> Result<String, ConfigError> {
    let profile = raw.trim().trim_start_matches('@').trim();
    if profile.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: ENV_PROFILE,
            reason: "profile name is empty".to_string(),
        });
    }
    Ok(profile.to_string())
}

/// Only plain digit strings count; anything else is treated as unset.
fn parse_digits(value: &str) -> Option<usize> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

// Unset: default cap when videos are on, else none. Digits: that cap.
// Anything else: unlimited.
fn parse_video_budget(raw: Option<&str>, download_videos: bool) -> Option<usize> {
    match raw.filter(|v| !v.is_empty()) {
        None if download_videos => Some(DEFAULT_VIDEO_BUDGET),
        None => Some(0),
        Some(v) => parse_digits(v),
    }
}
