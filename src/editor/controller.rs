// src/editor/controller.rs
//! Turns user actions into document edits and drives the enhancement,
//! save and download round trips.

use anyhow::Context;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::state::{AppPhase, EditorState};
use crate::core::{FileSink, ResumeApi};
use crate::document::DocumentError;
use crate::reconciler::{to_enhancement_payload, try_from_enhancement_response};
use crate::types::{ExportFormat, ResumeDocument, SectionKey, SectionShape, SectionValue};
use crate::utils::download_file_name;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("No resume loaded yet")]
    NoDocument,

    #[error("{0} is already being enhanced")]
    SectionBusy(SectionKey),

    #[error("A download is already in progress")]
    DownloadInProgress,

    #[error("Failed to enhance {section}: {source:#}")]
    Enhance {
        section: SectionKey,
        source: anyhow::Error,
    },

    #[error("Failed to save resume: {0:#}")]
    Save(anyhow::Error),

    #[error("Failed to download resume as {}: {source:#}", .format.extension().to_uppercase())]
    Download {
        format: ExportFormat,
        source: anyhow::Error,
    },
}

/// Result of an enhancement round trip that reached the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnhanceOutcome {
    /// The enhanced value replaced the section
    Applied,
    /// The response could not be read back; the section was left as it was
    Reverted { reason: String },
}

/// Owns the editing session state. Clones share the same state.
#[derive(Clone)]
pub struct EditorController {
    api: Arc<dyn ResumeApi>,
    sink: Arc<dyn FileSink>,
    state: Arc<Mutex<EditorState>>,
}

impl EditorController {
    pub fn new(api: Arc<dyn ResumeApi>, sink: Arc<dyn FileSink>) -> Self {
        Self {
            api,
            sink,
            state: Arc::new(Mutex::new(EditorState::new())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EditorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ===== Read access for the presentation layer =====

    pub fn phase(&self) -> AppPhase {
        self.lock().phase
    }

    /// Snapshot of the current document
    pub fn document(&self) -> Option<ResumeDocument> {
        self.lock().document.clone()
    }

    pub fn is_busy(&self, section: SectionKey) -> bool {
        self.lock().busy.contains(&section)
    }

    pub fn is_downloading(&self) -> bool {
        self.lock().downloading
    }

    pub fn pending_removals(&self) -> usize {
        self.lock().pending_removals()
    }

    // ===== Document lifecycle =====

    /// Fetch the saved resume. Without one (or if the fetch fails) the
    /// session waits for an upload.
    pub async fn load(&self) -> AppPhase {
        match self.api.fetch_resume().await {
            Ok(Some(document)) => {
                info!("Loaded saved resume for {}", document.name);
                self.lock().replace_document(document);
            }
            Ok(None) => {
                info!("No saved resume, waiting for upload");
                self.lock().phase = AppPhase::Uploading;
            }
            Err(e) => {
                warn!("Failed to fetch saved resume: {:#}", e);
                self.lock().phase = AppPhase::Uploading;
            }
        }
        self.phase()
    }

    pub fn use_sample(&self) {
        info!("Starting from sample resume");
        self.lock().replace_document(ResumeDocument::sample());
    }

    /// Stand-in for parsing an uploaded file; only the file name is used
    pub fn parse_upload(&self, file_name: Option<&str>) {
        info!("Creating resume from upload {:?}", file_name);
        self.lock()
            .replace_document(ResumeDocument::from_upload(file_name));
    }

    // ===== Section edits =====

    /// Apply an edit to the current document. Edits that do not fit the
    /// section are ignored; returns whether the document changed.
    fn apply<F>(&self, action: &str, edit: F) -> Result<bool, EditorError>
    where
        F: FnOnce(&ResumeDocument) -> Result<ResumeDocument, DocumentError>,
    {
        let mut state = self.lock();
        let document = state.document.as_ref().ok_or(EditorError::NoDocument)?;

        match edit(document) {
            Ok(updated) => {
                state.document = Some(updated);
                Ok(true)
            }
            Err(e) => {
                debug!("Ignoring {}: {}", action, e);
                Ok(false)
            }
        }
    }

    /// Replace a whole section. Removals staged in it no longer point at
    /// anything and are dropped.
    pub fn update_section(
        &self,
        section: SectionKey,
        value: SectionValue,
    ) -> Result<bool, EditorError> {
        let mut state = self.lock();
        let document = state.document.as_ref().ok_or(EditorError::NoDocument)?;

        match document.set_field(section, value) {
            Ok(updated) => {
                state.document = Some(updated);
                state.drop_removals(section);
                Ok(true)
            }
            Err(e) => {
                debug!("Ignoring section update: {}", e);
                Ok(false)
            }
        }
    }

    /// Edit one entry of a list section. Record lists need `field`; the skills
    /// list replaces the whole entry.
    pub fn update_list_field(
        &self,
        section: SectionKey,
        index: usize,
        field: Option<&str>,
        value: &str,
    ) -> Result<bool, EditorError> {
        match (section.shape(), field) {
            (SectionShape::RecordList, Some(field)) => self.apply("entry field update", |doc| {
                doc.set_list_entry_field(section, index, field, value)
            }),
            (SectionShape::StringList, _) => self.apply("entry update", |doc| {
                doc.set_list_entry_value(section, index, value)
            }),
            _ => {
                if self.lock().document.is_none() {
                    return Err(EditorError::NoDocument);
                }
                debug!("Ignoring entry update on {} without a usable field", section);
                Ok(false)
            }
        }
    }

    pub fn add_entry(&self, section: SectionKey) -> Result<bool, EditorError> {
        self.apply("append", |doc| doc.append_entry(section))
    }

    pub fn remove_entry(&self, section: SectionKey, index: usize) -> Result<bool, EditorError> {
        let mut state = self.lock();
        let document = state.document.as_ref().ok_or(EditorError::NoDocument)?;

        match document.remove_entry(section, index) {
            Ok(updated) => {
                state.document = Some(updated);
                state.shift_after_removal(section, index);
                Ok(true)
            }
            Err(e) => {
                debug!("Ignoring removal: {}", e);
                Ok(false)
            }
        }
    }

    /// Remove an entry after `delay` (e.g. once an exit animation finished).
    /// Staging the same entry twice commits it once. Staged removals keep
    /// targeting the same entry when earlier ones commit first, and are
    /// dropped once their entry is gone or the section is replaced.
    pub fn stage_removal(
        &self,
        section: SectionKey,
        index: usize,
        delay: Duration,
    ) -> Option<JoinHandle<bool>> {
        let Some(ticket) = self.lock().stage_removal(section, index) else {
            debug!("Removal of {} #{} already staged", section, index);
            return None;
        };

        let controller = self.clone();
        Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let target = controller.lock().take_removal(ticket);
            match target {
                Some((section, index)) => controller
                    .remove_entry(section, index)
                    .unwrap_or_else(|e| {
                        warn!("Staged removal dropped: {}", e);
                        false
                    }),
                None => false,
            }
        }))
    }

    // ===== Remote round trips =====

    /// Send one section for enhancement and write the result back.
    /// Only one enhancement per section may be in flight.
    pub async fn enhance_section(
        &self,
        section: SectionKey,
    ) -> Result<EnhanceOutcome, EditorError> {
        let original = {
            let mut state = self.lock();
            let original = state
                .document
                .as_ref()
                .ok_or(EditorError::NoDocument)?
                .section(section);
            if !state.busy.insert(section) {
                return Err(EditorError::SectionBusy(section));
            }
            original
        };
        let _busy = BusyGuard {
            state: Arc::clone(&self.state),
            section,
        };

        let enhance_error = |source: anyhow::Error| EditorError::Enhance { section, source };

        let payload = to_enhancement_payload(section, &original)
            .map_err(|e| enhance_error(e.into()))?;

        info!("Enhancing {}", section);
        let enhanced = self
            .api
            .enhance(section, &payload)
            .await
            .map_err(enhance_error)?;

        match try_from_enhancement_response(section, &original, &enhanced) {
            Ok(value) => {
                self.update_section(section, value)?;
                Ok(EnhanceOutcome::Applied)
            }
            Err(e) => {
                warn!("Keeping {} unchanged: {}", section, e);
                Ok(EnhanceOutcome::Reverted {
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Persist the document as it is right now; returns the service's status text
    pub async fn save(&self) -> Result<String, EditorError> {
        let document = self.document().ok_or(EditorError::NoDocument)?;
        self.api
            .save_resume(&document)
            .await
            .map_err(EditorError::Save)
    }

    /// Export the document and save it as `<name>_resume.<format>`
    pub async fn download(&self, format: ExportFormat) -> Result<PathBuf, EditorError> {
        let document = {
            let mut state = self.lock();
            let document = state.document.clone().ok_or(EditorError::NoDocument)?;
            if state.downloading {
                return Err(EditorError::DownloadInProgress);
            }
            state.downloading = true;
            document
        };
        let _downloading = DownloadGuard {
            state: Arc::clone(&self.state),
        };

        let result = self.export_to_file(&document, format).await;

        result.map_err(|source| {
            warn!("Download as {} failed: {:#}", format, source);
            EditorError::Download { format, source }
        })
    }

    async fn export_to_file(
        &self,
        document: &ResumeDocument,
        format: ExportFormat,
    ) -> anyhow::Result<PathBuf> {
        let payload = self.api.export_resume(document, format).await?;

        let contents = match format {
            ExportFormat::Json => {
                let value: serde_json::Value = serde_json::from_slice(&payload)
                    .context("Export service returned invalid JSON")?;
                serde_json::to_vec_pretty(&value)?
            }
            ExportFormat::Docx | ExportFormat::Pdf => payload,
        };

        let file_name = download_file_name(&document.name, format);
        self.sink.save_file(&file_name, &contents).await
    }
}

/// Clears the downloading flag, also when the download future is dropped
struct DownloadGuard {
    state: Arc<Mutex<EditorState>>,
}

impl Drop for DownloadGuard {
    fn drop(&mut self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .downloading = false;
    }
}

/// Clears a section's busy flag on every exit path
struct BusyGuard {
    state: Arc<Mutex<EditorState>>,
    section: SectionKey,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .busy
            .remove(&self.section);
    }
}
