// src/core/file_sink.rs
//! Saving downloaded resumes to a local directory

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use crate::core::collaborators::FileSink;

pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Ensure directory exists
    async fn ensure_dir_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)
                .await
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
            info!("Created directory: {}", path.display());
        }
        Ok(())
    }
}

#[async_trait]
impl FileSink for DirectorySink {
    async fn save_file(&self, file_name: &str, contents: &[u8]) -> Result<PathBuf> {
        // Only the final component is honoured so a resume name cannot escape the directory
        let file_name = Path::new(file_name)
            .file_name()
            .with_context(|| format!("Invalid file name: {}", file_name))?;

        Self::ensure_dir_exists(&self.dir).await?;

        let path = self.dir.join(file_name);
        fs::write(&path, contents)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        info!("Written file: {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_file_creates_directory() {
        let tmp = TempDir::new().unwrap();
        let sink = DirectorySink::new(tmp.path().join("downloads"));

        let path = sink.save_file("John_Doe_resume.pdf", b"%PDF").await.unwrap();

        assert_eq!(path, tmp.path().join("downloads").join("John_Doe_resume.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF");
    }

    #[tokio::test]
    async fn test_save_file_strips_directories() {
        let tmp = TempDir::new().unwrap();
        let sink = DirectorySink::new(tmp.path());

        let path = sink.save_file("../../evil_resume.json", b"{}").await.unwrap();
        assert_eq!(path, tmp.path().join("evil_resume.json"));
    }

    #[tokio::test]
    async fn test_save_file_rejects_empty_name() {
        let tmp = TempDir::new().unwrap();
        let sink = DirectorySink::new(tmp.path());
        assert!(sink.save_file("..", b"").await.is_err());
    }
}
