use async_trait::async_trait;

use crate::instagram::{
    errors::SourceError,
    types::{PostPage, ProfileInfo},
};

/// Where profiles and their timelines come from.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn profile(&self, username: &str) -> Result<ProfileInfo, SourceError>;

    /// Timeline page after `cursor`; `None` asks for the newest posts.
    async fn posts_page(
        &self,
        profile: &ProfileInfo,
        cursor: Option<&str>,
    ) -> Result<PostPage, SourceError>;
}
