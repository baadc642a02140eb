pub mod model;
pub mod pipeline;
pub mod writer;

pub use model::{FeedDocument, FeedMeta, FeedPost, FeedProfile, PostStats};
pub use pipeline::FeedPipeline;
pub use writer::write_document;
