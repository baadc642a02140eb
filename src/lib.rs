pub mod caption;
pub mod config;
pub mod feed;
pub mod fetcher;
pub mod instagram;
