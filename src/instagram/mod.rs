pub mod errors;
pub mod source;
pub mod types;
pub mod web;

pub use errors::{SourceError, auth_help};
pub use source::ProfileSource;
pub use types::{PostPage, PostRecord, ProfileInfo};
pub use web::WebProfileSource;
