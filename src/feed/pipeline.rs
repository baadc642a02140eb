use chrono::{SecondsFormat, Utc};
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

use crate::caption;
use crate::config::Config;
use crate::feed::model::{FeedDocument, FeedMeta, FeedPost, FeedProfile, PostStats, SOURCE_LABEL};
use crate::fetcher::{AssetDownloader, DownloadOutcome, ext_from_url};
use crate::instagram::{PostRecord, ProfileSource, SourceError};

/// Drives one fetch run: profile, timeline, captions, media, document.
pub struct FeedPipeline<S, D> {
    config: Config,
    source: S,
    downloader: D,
}

impl<S: ProfileSource, D: AssetDownloader> FeedPipeline<S, D> {
    pub fn new(config: Config, source: S, downloader: D) -> Self {
        Self {
            config,
            source,
            downloader,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn downloader(&self) -> &D {
        &self.downloader
    }

    /// Builds the feed document. Only source failures abort the run; a
    /// media file that cannot be mirrored keeps its remote URL.
    #[instrument(skip(self), fields(profile = %self.config.profile()))]
    pub async fn run(&self) -> Result<FeedDocument, SourceError> {
        info!("Fetching profile @{}", self.config.profile());
        let profile = self.source.profile(self.config.profile()).await?;

        let mut posts: Vec<FeedPost> = Vec::new();
        let mut videos_downloaded = 0usize;
        let mut cursor: Option<String> = None;
        let mut seen_cursors: HashSet<String> = HashSet::new();

        'pages: loop {
            if self.limit_reached(posts.len()) {
                break;
            }

            let page = self.source.posts_page(&profile, cursor.as_deref()).await?;
            if page.posts.is_empty() {
                break;
            }

            for record in page.posts {
                if self.limit_reached(posts.len()) {
                    break 'pages;
                }
                posts.push(self.build_post(record, &mut videos_downloaded).await);

                if !self.config.throttle().is_zero() {
                    tokio::time::sleep(self.config.throttle()).await;
                }
            }

            match page.next_cursor {
                Some(next) if seen_cursors.contains(&next) => {
                    warn!("Source returned cursor {} twice, stopping pagination", next);
                    break;
                }
                Some(next) => {
                    seen_cursors.insert(next.clone());
                    cursor = Some(next);
                }
                None => break,
            }
        }

        info!(
            "Collected {} posts ({} videos mirrored)",
            posts.len(),
            videos_downloaded
        );

        Ok(FeedDocument {
            meta: FeedMeta {
                source: SOURCE_LABEL.to_string(),
                profile_url: self.config.profile_url(),
                fetched_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
                post_count: posts.len(),
            },
            profile: FeedProfile::from(&profile),
            posts,
        })
    }

    fn limit_reached(&self, collected: usize) -> bool {
        self.config.max_posts().is_some_and(|max| collected >= max)
    }

    fn video_allowed(&self, downloaded: usize) -> bool {
        self.config.download_videos()
            && self
                .config
                .max_video_downloads()
                .is_none_or(|max| downloaded < max)
    }

    async fn build_post(&self, record: PostRecord, videos_downloaded: &mut usize) -> FeedPost {
        let kind = record.media_kind();
        let analysis = caption::analyze(record.caption.as_deref(), kind);

        let thumbnail_url = match record.display_url.as_deref() {
            Some(url) => Some(
                self.mirror(url, &record.shortcode, "poster", "jpg")
                    .await
                    .unwrap_or_else(|| url.to_string()),
            ),
            None => None,
        };

        // Remote video URLs expire, but are kept unless caching was asked for.
        let video_url = match record.video_url.as_deref() {
            Some(url) if self.video_allowed(*videos_downloaded) => {
                match self.mirror(url, &record.shortcode, "video", "mp4").await {
                    Some(local) => {
                        *videos_downloaded += 1;
                        Some(local)
                    }
                    None => Some(url.to_string()),
                }
            }
            other => other.map(str::to_string),
        };

        debug!(
            shortcode = %record.shortcode,
            tags = ?analysis.tags.as_slice(),
            "Classified post"
        );

        FeedPost {
            id: record.shortcode.clone(),
            shortcode: record.shortcode.clone(),
            media_type: kind.feed_type().to_string(),
            timestamp: record
                .taken_at
                .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
            caption_source: analysis.caption,
            permalink: record.permalink(),
            thumbnail_url,
            video_url,
            duration: record.video_duration,
            stats: PostStats::from_raw(record.likes, record.comments, record.video_views),
            rewritten: analysis.rewritten,
            tags: analysis.tags,
        }
    }

    /// Downloads `url` into the media dir; returns its public path on success.
    async fn mirror(&self, url: &str, shortcode: &str, role: &str, fallback_ext: &str) -> Option<String> {
        let file_name = format!("{}-{}.{}", shortcode, role, ext_from_url(url, fallback_ext));
        let dest = self.config.media_dir().join(&file_name);

        match self.downloader.ensure(url, &dest).await {
            Ok(outcome) => {
                if let DownloadOutcome::Downloaded { bytes, attempts } = outcome {
                    debug!("Saved {} ({} bytes, {} attempts)", file_name, bytes, attempts);
                }
                Some(format!("{}/{}", self.config.media_url_prefix(), file_name))
            }
            Err(err) => {
                warn!("Keeping remote URL for {}: {}", file_name, err);
                None
            }
        }
    }
}
