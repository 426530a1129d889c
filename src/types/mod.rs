// src/types/mod.rs
pub mod resume;
pub mod response;
pub mod section;

pub use resume::{EducationEntry, ExperienceEntry, Record, ResumeDocument};
pub use response::ExportFormat;
pub use section::{SectionKey, SectionShape, SectionValue};
