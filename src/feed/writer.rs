use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

use crate::feed::model::FeedDocument;

/// Writes the document as pretty JSON, creating parent directories.
pub async fn write_document(document: &FeedDocument, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let mut json = serde_json::to_string_pretty(document)?;
    json.push('\n');
    fs::write(path, json)
        .await
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
