use thiserror::Error;

use crate::fetcher::FetchError;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("profile @{0} not found")]
    ProfileNotFound(String),

    #[error("instagram refused the request without a valid session (http {status})")]
    AuthRequired { status: u16 },

    #[error("session cookie contains characters not allowed in a header")]
    InvalidSession,

    #[error("unexpected response payload: {0}")]
    Malformed(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl SourceError {
    pub fn needs_auth(&self) -> bool {
        matches!(self, Self::AuthRequired { .. } | Self::InvalidSession)
    }
}

/// Instructions printed when Instagram blocks anonymous access.
pub fn auth_help(target: &str) -> String {
    format!(
        "Instagram blocked unauthenticated access (often HTTP 401/403).\n\
         Fix: pass the `sessionid` cookie of a logged-in browser session and rerun.\n\n\
         1) Log in on instagram.com and copy the value of the `sessionid` cookie.\n\
         2) Run the fetch with env vars:\n   \
         IG_PROFILE={target} IG_SESSIONID=<cookie value> reelfeed\n\n\
         Notes:\n\
         - Do NOT commit the cookie value.\n\
         - Sessions expire; refresh the cookie when this message comes back.\n"
    )
}
