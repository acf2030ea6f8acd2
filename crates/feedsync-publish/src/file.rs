//! Feed file output.

use std::path::{Path, PathBuf};

use crate::error::PublishError;

/// Writes `xml` to `path`, creating parent directories as needed.
///
/// The content goes to a hidden sibling file first and is then renamed over
/// `path`, so readers never see a half-written feed.
///
/// # Errors
///
/// Returns [`PublishError::Write`] if any filesystem step fails.
pub async fn write_feed(path: &Path, xml: &str) -> Result<(), PublishError> {
    let write_err = |source| PublishError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    let tmp = temp_path(path);
    tokio::fs::write(&tmp, xml.as_bytes())
        .await
        .map_err(write_err)?;
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        // Best effort: the temp file is useless once the rename failed.
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(write_err(e));
    }

    tracing::info!(path = %path.display(), bytes = xml.len(), "wrote feed file");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map_or_else(|| "feed".into(), |n| n.to_string_lossy().into_owned());
    path.with_file_name(format!(".{file_name}.tmp"))
}
