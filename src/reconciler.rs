// src/reconciler.rs
//! Conversion between a section's native value and the flat text exchanged
//! with the enhancement service.
//!
//! Text sections travel as-is, skills as a comma separated line and record
//! lists as compact JSON.

use thiserror::Error;
use tracing::warn;

use crate::types::{EducationEntry, ExperienceEntry, Record, SectionKey, SectionValue};

const SKILL_SEPARATOR: &str = ", ";

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("Failed to encode {section}: {source}")]
    Encode {
        section: SectionKey,
        source: serde_json::Error,
    },

    #[error("Enhanced {section} is not a valid record list: {source}")]
    MalformedRecords {
        section: SectionKey,
        source: serde_json::Error,
    },
}

/// Flatten a section value into the text sent for enhancement
pub fn to_enhancement_payload(
    section: SectionKey,
    value: &SectionValue,
) -> Result<String, ReconcileError> {
    let encoded = match value {
        SectionValue::Text(text) => Ok(text.clone()),
        SectionValue::StringList(items) => Ok(items.join(SKILL_SEPARATOR)),
        SectionValue::RecordList(records) => serde_json::to_string(records),
    };

    encoded.map_err(|source| ReconcileError::Encode { section, source })
}

/// Rebuild a section value from enhanced text, in the shape of `original`
pub fn try_from_enhancement_response(
    section: SectionKey,
    original: &SectionValue,
    response: &str,
) -> Result<SectionValue, ReconcileError> {
    match original {
        SectionValue::Text(_) => Ok(SectionValue::Text(response.to_string())),
        SectionValue::StringList(_) => Ok(SectionValue::StringList(split_skills(response))),
        SectionValue::RecordList(_) => parse_records(section, response),
    }
}

/// Like [`try_from_enhancement_response`], but a response that cannot be
/// parsed leaves the section at its original value.
pub fn from_enhancement_response(
    section: SectionKey,
    original: &SectionValue,
    response: &str,
) -> SectionValue {
    try_from_enhancement_response(section, original, response).unwrap_or_else(|e| {
        warn!("Discarding enhancement response: {}", e);
        original.clone()
    })
}

/// Split on commas and trim each piece. Empty pieces are kept, except that a
/// blank response means no skills at all.
fn split_skills(response: &str) -> Vec<String> {
    if response.trim().is_empty() {
        return Vec::new();
    }
    response
        .split(',')
        .map(|skill| skill.trim().to_string())
        .collect()
}

fn parse_records(section: SectionKey, response: &str) -> Result<SectionValue, ReconcileError> {
    let malformed =
        |source: serde_json::Error| ReconcileError::MalformedRecords { section, source };

    let records = match section {
        SectionKey::Education => serde_json::from_str::<Vec<EducationEntry>>(response)
            .map_err(malformed)?
            .into_iter()
            .map(Record::Education)
            .collect(),
        _ => serde_json::from_str::<Vec<ExperienceEntry>>(response)
            .map_err(malformed)?
            .into_iter()
            .map(Record::Experience)
            .collect(),
    };

    Ok(SectionValue::RecordList(records))
}
