//! Environment/runtime helpers
//!
//! Sanity checks run once at startup.

use tracing::{info, warn};

/// Warn when the static images directory is missing; requests under the
/// images route will 404 until it exists.
pub async fn ensure_env(images_dir: &str) -> anyhow::Result<()> {
    match tokio::fs::metadata(images_dir).await {
        Ok(meta) if meta.is_dir() => {
            info!(%images_dir, "serving static images");
        }
        Ok(_) => {
            return Err(anyhow::anyhow!("{images_dir} exists but is not a directory"));
        }
        Err(_) => {
            warn!(%images_dir, "images directory not found; static images will 404");
        }
    }
    Ok(())
}
