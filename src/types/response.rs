use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::resume::ResumeDocument;

// ===== Service Request/Response Types =====

#[derive(Debug, Serialize, Deserialize)]
pub struct EnhanceRequest {
    pub section: String,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EnhanceResponse {
    pub enhanced: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveResponse {
    pub status: String,
}

/// Interpret the body of `GET /get-resume`. The service answers `{}` when
/// nothing was saved yet; any body without a non-empty `name` means "no resume".
pub fn stored_resume(body: serde_json::Value) -> Result<Option<ResumeDocument>> {
    let has_name = body
        .get("name")
        .and_then(|name| name.as_str())
        .is_some_and(|name| !name.is_empty());

    if !has_name {
        return Ok(None);
    }

    let document = serde_json::from_value(body).context("Failed to parse stored resume")?;
    Ok(Some(document))
}

// ===== Export =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ExportFormat {
    Json,
    Docx,
    Pdf,
}

impl ExportFormat {
    /// Path segment and file extension
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Docx => "docx",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_body_means_no_resume() {
        assert_eq!(stored_resume(json!({})).unwrap(), None);
        assert_eq!(stored_resume(json!({"name": ""})).unwrap(), None);
        assert_eq!(stored_resume(json!({"summary": "orphan"})).unwrap(), None);
    }

    #[test]
    fn test_stored_resume_is_parsed() {
        let doc = stored_resume(json!({
            "name": "Ada Lovelace",
            "summary": "Analyst",
            "experience": [],
            "education": [],
            "skills": ["Maths"]
        }))
        .unwrap()
        .unwrap();

        assert_eq!(doc.name, "Ada Lovelace");
        assert_eq!(doc.skills, vec!["Maths".to_string()]);
    }

    #[test]
    fn test_stored_resume_with_bad_shape_is_an_error() {
        assert!(stored_resume(json!({"name": "Ada", "skills": "Maths"})).is_err());
    }

    #[test]
    fn test_enhance_request_shape() {
        let request = EnhanceRequest {
            section: "skills".to_string(),
            content: "Go, Rust".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"section": "skills", "content": "Go, Rust"})
        );
    }
}
