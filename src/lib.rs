//! Resume editor: an in-memory resume document, section-level edits, and
//! AI enhancement, persistence and export through a remote resume service.

pub mod cli;
pub mod core;
pub mod document;
pub mod editor;
pub mod reconciler;
pub mod session;
pub mod types;
pub mod utils;

pub use document::DocumentError;
pub use editor::{AppPhase, EditorController, EditorError, EnhanceOutcome};
pub use types::{
    EducationEntry, ExperienceEntry, ExportFormat, Record, ResumeDocument, SectionKey,
    SectionShape, SectionValue,
};
