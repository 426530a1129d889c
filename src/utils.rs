// src/utils.rs
use crate::types::ExportFormat;

const UPLOAD_EXTENSIONS: &[&str] = &["pdf", "docx"];

/// Replace every run of whitespace with a single underscore
pub fn underscore_whitespace(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut in_whitespace = false;

    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                result.push('_');
            }
            in_whitespace = true;
        } else {
            result.push(c);
            in_whitespace = false;
        }
    }

    result
}

/// File name used when saving an exported resume
pub fn download_file_name(resume_name: &str, format: ExportFormat) -> String {
    format!(
        "{}_resume.{}",
        underscore_whitespace(resume_name),
        format.extension()
    )
}

/// Drop a trailing `.pdf` / `.docx` from an uploaded file name. Matching is
/// case-sensitive, so `CV.PDF` keeps its extension.
pub fn strip_upload_extension(file_name: &str) -> String {
    UPLOAD_EXTENSIONS
        .iter()
        .find_map(|ext| file_name.strip_suffix(ext)?.strip_suffix('.'))
        .unwrap_or(file_name)
        .to_string()
}
