pub mod backoff;
pub mod client;
pub mod download;
pub mod errors;
pub mod types;

pub use backoff::calculate_backoff_delay;
pub use client::{USER_AGENT, fetch_asset};
pub use download::{AssetDownloader, HttpDownloader, ext_from_url};
pub use errors::FetchError;
pub use types::{AssetResponse, DownloadOutcome};
