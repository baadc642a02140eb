use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, instrument, warn};

use crate::fetcher::{
    backoff::calculate_backoff_delay, client::fetch_asset, errors::FetchError,
    types::DownloadOutcome,
};

const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1300);

const KNOWN_EXTENSIONS: [&str; 6] = ["mp4", "jpg", "jpeg", "png", "webp", "avif"];

/// Makes sure a remote asset exists at a local path.
#[async_trait]
pub trait AssetDownloader: Send + Sync {
    /// Idempotent: a non-empty file at `dest` counts as done.
    async fn ensure(&self, url: &str, dest: &Path) -> Result<DownloadOutcome, FetchError>;
}

#[derive(Debug, Clone)]
pub struct HttpDownloader {
    max_attempts: u32,
    base_delay: Duration,
}

impl HttpDownloader {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl Default for HttpDownloader {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_BASE_DELAY)
    }
}

#[async_trait]
impl AssetDownloader for HttpDownloader {
    #[instrument(skip(self, dest), fields(dest = %dest.display()))]
    async fn ensure(&self, url: &str, dest: &Path) -> Result<DownloadOutcome, FetchError> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).await?;
        }

        if let Ok(meta) = fs::metadata(dest).await
            && meta.len() > 0
        {
            debug!("Asset already present, skipping download");
            return Ok(DownloadOutcome::AlreadyPresent);
        }

        let mut attempt = 0;
        loop {
            attempt += 1;
            match fetch_asset(url).await {
                Ok(response) => {
                    debug!(
                        "Fetched {} ({})",
                        response.url_final,
                        response.content_type.as_deref().unwrap_or("unknown type")
                    );
                    write_atomically(dest, &response.body).await?;
                    return Ok(DownloadOutcome::Downloaded {
                        bytes: response.body.len() as u64,
                        attempts: attempt,
                    });
                }
                Err(err) if err.should_retry() && attempt < self.max_attempts => {
                    let delay = calculate_backoff_delay(attempt - 1, self.base_delay);
                    warn!(
                        "Download attempt {}/{} failed: {}; retrying in {}ms",
                        attempt,
                        self.max_attempts,
                        err,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

async fn write_atomically(dest: &Path, body: &[u8]) -> Result<(), FetchError> {
    let tmp = partial_path(dest);
    fs::write(&tmp, body).await?;
    if let Err(err) = fs::rename(&tmp, dest).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(err.into());
    }
    Ok(())
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    dest.with_file_name(name)
}

/// File extension taken from the URL path when it is a known media type.
pub fn ext_from_url(url: &str, fallback: &str) -> String {
    let lower = url.to_lowercase();
    let path = lower.split(['?', '#']).next().unwrap_or_default();

    KNOWN_EXTENSIONS
        .iter()
        .find(|ext| path.ends_with(&format!(".{ext}")))
        .map_or_else(|| fallback.to_string(), |ext| ext.to_string())
}
