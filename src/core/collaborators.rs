// src/core/collaborators.rs
//! Seams between the editor and the outside world

use anyhow::Result;
use async_trait::async_trait;
use std::path::PathBuf;

use crate::types::{ExportFormat, ResumeDocument, SectionKey};

/// Remote resume service: persistence, AI enhancement and export
#[async_trait]
pub trait ResumeApi: Send + Sync {
    /// Previously saved resume, or `None` when nothing was saved yet
    async fn fetch_resume(&self) -> Result<Option<ResumeDocument>>;

    /// Persist the resume, returning the service's status message
    async fn save_resume(&self, resume: &ResumeDocument) -> Result<String>;

    /// Enhance the flattened content of one section
    async fn enhance(&self, section: SectionKey, content: &str) -> Result<String>;

    /// Raw export payload in the requested format
    async fn export_resume(&self, resume: &ResumeDocument, format: ExportFormat)
        -> Result<Vec<u8>>;
}

/// Destination for downloaded files
#[async_trait]
pub trait FileSink: Send + Sync {
    async fn save_file(&self, file_name: &str, contents: &[u8]) -> Result<PathBuf>;
}
