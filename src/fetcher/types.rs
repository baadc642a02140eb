use bytes::Bytes;
use url::Url;

/// A fully buffered media response.
#[derive(Debug)]
pub struct AssetResponse {
    /// URL after redirects.
    pub url_final: Url,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// What `ensure` did to make the file present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    AlreadyPresent,
    Downloaded { bytes: u64, attempts: u32 },
}
