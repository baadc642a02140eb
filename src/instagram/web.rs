use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{
    Client, ClientBuilder, StatusCode,
    header::{self, HeaderMap, HeaderValue},
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::fetcher::{FetchError, USER_AGENT};
use crate::instagram::{
    errors::SourceError,
    source::ProfileSource,
    types::{PostPage, PostRecord, ProfileInfo},
};

const DEFAULT_BASE_URL: &str = "https://www.instagram.com/";

// App id of the instagram.com web client; the JSON endpoints reject requests without it.
const WEB_APP_ID: &str = "936619743392459";

// Persisted GraphQL query for a user's timeline media.
const TIMELINE_QUERY_HASH: &str = "69cba40317214236af40e7efa697781d";

const PAGE_SIZE: u32 = 12;

/// Reads profiles through the JSON endpoints behind instagram.com.
#[derive(Debug)]
pub struct WebProfileSource {
    client: Client,
    base_url: Url,
    /// Newest timeline page embedded in the last profile response, by username.
    first_page: Mutex<Option<(String, PostPage)>>,
}

impl WebProfileSource {
    pub fn new(session_id: Option<&str>) -> Result<Self, SourceError> {
        let base_url = Url::parse(DEFAULT_BASE_URL).map_err(FetchError::from)?;
        Self::with_base_url(base_url, session_id)
    }

    /// Points the source at another host, e.g. a mock server.
    pub fn with_base_url(base_url: Url, session_id: Option<&str>) -> Result<Self, SourceError> {
        let mut headers = HeaderMap::new();
        headers.insert("x-ig-app-id", HeaderValue::from_static(WEB_APP_ID));
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(session_id) = session_id {
            let mut cookie = HeaderValue::from_str(&format!("sessionid={session_id}"))
                .map_err(|_| SourceError::InvalidSession)?;
            cookie.set_sensitive(true);
            headers.insert(header::COOKIE, cookie);
        }

        let client = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(FetchError::from_reqwest_error)?;

        Ok(Self {
            client,
            base_url,
            first_page: Mutex::new(None),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, SourceError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        let status = response.status();
        // Anonymous requests are often bounced to the login page instead of failing
        if response.url().path().starts_with("/accounts/login") {
            return Err(SourceError::AuthRequired {
                status: status.as_u16(),
            });
        }

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(SourceError::AuthRequired {
                    status: status.as_u16(),
                });
            }
            s if !s.is_success() => return Err(FetchError::from_status(s).into()),
            _ => {}
        }

        let body = response
            .bytes()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        serde_json::from_slice(&body).map_err(|e| SourceError::Malformed(e.to_string()))
    }

    fn profile_url(&self, username: &str) -> Result<Url, SourceError> {
        let mut url = self
            .base_url
            .join("api/v1/users/web_profile_info/")
            .map_err(FetchError::from)?;
        url.query_pairs_mut().append_pair("username", username);
        Ok(url)
    }

    fn timeline_url(&self, user_id: &str, cursor: &str) -> Result<Url, SourceError> {
        let variables = serde_json::json!({
            "id": user_id,
            "first": PAGE_SIZE,
            "after": cursor,
        });
        let mut url = self
            .base_url
            .join("graphql/query/")
            .map_err(FetchError::from)?;
        url.query_pairs_mut()
            .append_pair("query_hash", TIMELINE_QUERY_HASH)
            .append_pair("variables", &variables.to_string());
        Ok(url)
    }

    async fn fetch_user(&self, username: &str) -> Result<UserNode, SourceError> {
        let envelope: Envelope = self.get_json(self.profile_url(username)?).await?;
        envelope
            .data
            .user
            .ok_or_else(|| SourceError::ProfileNotFound(username.to_string()))
    }

    fn take_first_page(&self, username: &str) -> Option<PostPage> {
        let mut cached = self.first_page.lock().ok()?;
        match cached.take() {
            Some((owner, page)) if owner == username => Some(page),
            other => {
                *cached = other;
                None
            }
        }
    }
}

#[async_trait]
impl ProfileSource for WebProfileSource {
    #[instrument(skip(self))]
    async fn profile(&self, username: &str) -> Result<ProfileInfo, SourceError> {
        let user = self.fetch_user(username).await.map_err(|err| match err {
            SourceError::Fetch(FetchError::Http { status, .. })
                if status == StatusCode::NOT_FOUND =>
            {
                SourceError::ProfileNotFound(username.to_string())
            }
            other => other,
        })?;
        let (profile, page) = user.into_parts();
        if let Ok(mut cached) = self.first_page.lock() {
            *cached = Some((profile.username.clone(), page));
        }
        Ok(profile)
    }

    #[instrument(skip(self, profile), fields(username = %profile.username))]
    async fn posts_page(
        &self,
        profile: &ProfileInfo,
        cursor: Option<&str>,
    ) -> Result<PostPage, SourceError> {
        let media = match cursor {
            None => {
                if let Some(page) = self.take_first_page(&profile.username) {
                    debug!("Serving first page from the profile response");
                    return Ok(page);
                }
                // The profile endpoint embeds the newest page
                self.fetch_user(&profile.username).await?.timeline
            }
            Some(cursor) => {
                let envelope: Envelope = self
                    .get_json(self.timeline_url(&profile.id, cursor)?)
                    .await?;
                envelope
                    .data
                    .user
                    .ok_or_else(|| SourceError::Malformed("timeline without user".to_string()))?
                    .timeline
            }
        };

        let page = media.map(TimelineMedia::into_page).unwrap_or_default();
        debug!(
            "Fetched {} posts (more: {})",
            page.posts.len(),
            page.next_cursor.is_some()
        );
        Ok(page)
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    data: EnvelopeData,
}

#[derive(Debug, Deserialize)]
struct EnvelopeData {
    user: Option<UserNode>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Count {
    count: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct UserNode {
    #[serde(default)]
    id: String,
    #[serde(default)]
    username: String,
    full_name: Option<String>,
    biography: Option<String>,
    external_url: Option<String>,
    profile_pic_url: Option<String>,
    profile_pic_url_hd: Option<String>,
    #[serde(default)]
    edge_followed_by: Count,
    #[serde(default)]
    edge_follow: Count,
    #[serde(rename = "edge_owner_to_timeline_media")]
    timeline: Option<TimelineMedia>,
}

impl UserNode {
    fn into_parts(self) -> (ProfileInfo, PostPage) {
        let media_count = self.timeline.as_ref().and_then(|t| t.count);
        let page = self
            .timeline
            .map(TimelineMedia::into_page)
            .unwrap_or_default();
        let profile = ProfileInfo {
            id: self.id,
            username: self.username,
            full_name: self.full_name,
            biography: self.biography,
            followers: non_negative(self.edge_followed_by.count),
            following: non_negative(self.edge_follow.count),
            media_count: non_negative(media_count),
            profile_pic_url: self.profile_pic_url_hd.or(self.profile_pic_url),
            external_url: self.external_url.filter(|u| !u.is_empty()),
        };
        (profile, page)
    }
}

#[derive(Debug, Deserialize)]
struct TimelineMedia {
    count: Option<i64>,
    #[serde(default)]
    page_info: PageInfo,
    #[serde(default)]
    edges: Vec<Edge<MediaNode>>,
}

impl TimelineMedia {
    fn into_page(self) -> PostPage {
        let next_cursor = if self.page_info.has_next_page {
            self.page_info.end_cursor.filter(|c| !c.is_empty())
        } else {
            None
        };
        PostPage {
            posts: self.edges.into_iter().map(|e| e.node.into_record()).collect(),
            next_cursor,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Edge<T> {
    node: T,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CaptionEdges {
    edges: Vec<Edge<CaptionNode>>,
}

#[derive(Debug, Deserialize)]
struct CaptionNode {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MediaNode {
    shortcode: String,
    #[serde(default)]
    is_video: bool,
    product_type: Option<String>,
    display_url: Option<String>,
    video_url: Option<String>,
    video_duration: Option<f64>,
    video_view_count: Option<i64>,
    taken_at_timestamp: Option<i64>,
    #[serde(default)]
    edge_media_to_caption: CaptionEdges,
    edge_liked_by: Option<Count>,
    edge_media_preview_like: Option<Count>,
    edge_media_to_comment: Option<Count>,
}

impl MediaNode {
    fn into_record(self) -> PostRecord {
        let caption = self
            .edge_media_to_caption
            .edges
            .into_iter()
            .find_map(|e| e.node.text);
        let likes = self
            .edge_liked_by
            .and_then(|c| c.count)
            .or_else(|| self.edge_media_preview_like.and_then(|c| c.count));

        PostRecord {
            shortcode: self.shortcode,
            caption,
            is_video: self.is_video,
            product_type: self.product_type,
            display_url: self.display_url,
            video_url: self.video_url,
            video_duration: self.video_duration,
            likes,
            comments: self.edge_media_to_comment.and_then(|c| c.count),
            video_views: self.video_view_count,
            taken_at: self
                .taken_at_timestamp
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
        }
    }
}

fn non_negative(value: Option<i64>) -> Option<u64> {
    value.and_then(|v| u64::try_from(v).ok())
}
