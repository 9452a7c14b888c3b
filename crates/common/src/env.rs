//! Environment/runtime helpers
//!
//! Sanity checks run once at startup.

use tracing::warn;

/// Warn when the presentation assets directory is missing.
///
/// The API keeps working without it; only static pages will 404.
pub async fn ensure_env(frontend_dir: &str) -> anyhow::Result<bool> {
    match tokio::fs::metadata(frontend_dir).await {
        Ok(meta) if meta.is_dir() => Ok(true),
        Ok(_) => Err(anyhow::anyhow!("{frontend_dir} exists but is not a directory")),
        Err(_) => {
            warn!(%frontend_dir, "frontend assets directory not found; static pages will 404");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_dir_is_not_fatal() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("no_such_{}", uuid::Uuid::new_v4()));
        assert!(!ensure_env(&dir.to_string_lossy()).await?);
        Ok(())
    }

    #[tokio::test]
    async fn file_in_place_of_dir_is_an_error() -> anyhow::Result<()> {
        let file = std::env::temp_dir().join(format!("frontend_{}.txt", uuid::Uuid::new_v4()));
        tokio::fs::write(&file, b"x").await?;
        assert!(ensure_env(&file.to_string_lossy()).await.is_err());
        let _ = tokio::fs::remove_file(&file).await;
        Ok(())
    }
}
