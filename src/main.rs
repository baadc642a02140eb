use anyhow::Result;
use reelfeed::{
    config::Config,
    feed::{FeedPipeline, write_document},
    fetcher::HttpDownloader,
    instagram::{WebProfileSource, auth_help},
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    if std::env::var("LOG_FORMAT").is_ok_and(|v| v == "json") {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let config = Config::from_env()?;
    let source = WebProfileSource::new(config.session_id())?;
    let pipeline = FeedPipeline::new(config.clone(), source, HttpDownloader::default());

    let document = match pipeline.run().await {
        Ok(document) => document,
        Err(err) => {
            if err.needs_auth() {
                eprintln!("{}", auth_help(config.profile()));
            }
            return Err(err.into());
        }
    };

    write_document(&document, config.output_json()).await?;
    info!("Wrote {}", config.output_json().display());
    println!(
        "Wrote {} with {} posts.",
        config.output_json().display(),
        document.posts.len()
    );
    Ok(())
}
