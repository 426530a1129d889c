// src/types/resume.rs
//! Resume document structures shared with the remote resume service

use serde::{Deserialize, Serialize};

use super::section::SectionKey;
use crate::utils::strip_upload_extension;

// ===== Resume Document =====

/// The whole resume as held by the editor and exchanged with the service.
/// Missing top-level fields deserialize to their empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeDocument {
    pub name: String,
    pub summary: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
}

/// Work experience entry. Absent fields are kept absent (sparse) and read as "".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Education entry. Same sparse semantics as [`ExperienceEntry`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
}

impl ExperienceEntry {
    pub const FIELDS: &'static [&'static str] = &["company", "role", "duration", "description"];

    pub fn new(company: &str, role: &str, duration: &str, description: &str) -> Self {
        Self {
            company: Some(company.to_string()),
            role: Some(role.to_string()),
            duration: Some(duration.to_string()),
            description: Some(description.to_string()),
        }
    }

    /// All-empty entry appended by "add entry"
    pub fn template() -> Self {
        Self::new("", "", "", "")
    }

    fn slot(&self, field: &str) -> Option<&Option<String>> {
        match field {
            "company" => Some(&self.company),
            "role" => Some(&self.role),
            "duration" => Some(&self.duration),
            "description" => Some(&self.description),
            _ => None,
        }
    }

    fn slot_mut(&mut self, field: &str) -> Option<&mut Option<String>> {
        match field {
            "company" => Some(&mut self.company),
            "role" => Some(&mut self.role),
            "duration" => Some(&mut self.duration),
            "description" => Some(&mut self.description),
            _ => None,
        }
    }
}

impl EducationEntry {
    pub const FIELDS: &'static [&'static str] = &["institution", "degree", "year", "gpa"];

    pub fn new(institution: &str, degree: &str, year: &str, gpa: &str) -> Self {
        Self {
            institution: Some(institution.to_string()),
            degree: Some(degree.to_string()),
            year: Some(year.to_string()),
            gpa: Some(gpa.to_string()),
        }
    }

    pub fn template() -> Self {
        Self::new("", "", "", "")
    }

    fn slot(&self, field: &str) -> Option<&Option<String>> {
        match field {
            "institution" => Some(&self.institution),
            "degree" => Some(&self.degree),
            "year" => Some(&self.year),
            "gpa" => Some(&self.gpa),
            _ => None,
        }
    }

    fn slot_mut(&mut self, field: &str) -> Option<&mut Option<String>> {
        match field {
            "institution" => Some(&mut self.institution),
            "degree" => Some(&mut self.degree),
            "year" => Some(&mut self.year),
            "gpa" => Some(&mut self.gpa),
            _ => None,
        }
    }
}

// ===== Record =====

/// One element of a record-list section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Experience(ExperienceEntry),
    Education(EducationEntry),
}

impl Record {
    /// The section this kind of record lives in
    pub fn section(&self) -> SectionKey {
        match self {
            Record::Experience(_) => SectionKey::Experience,
            Record::Education(_) => SectionKey::Education,
        }
    }

    /// Empty sparse record for a record-list section
    pub fn sparse(section: SectionKey) -> Option<Self> {
        match section {
            SectionKey::Experience => Some(Record::Experience(ExperienceEntry::default())),
            SectionKey::Education => Some(Record::Education(EducationEntry::default())),
            _ => None,
        }
    }

    /// All-empty record for a record-list section
    pub fn template(section: SectionKey) -> Option<Self> {
        match section {
            SectionKey::Experience => Some(Record::Experience(ExperienceEntry::template())),
            SectionKey::Education => Some(Record::Education(EducationEntry::template())),
            _ => None,
        }
    }

    pub fn fields(&self) -> &'static [&'static str] {
        self.section().record_fields()
    }

    /// Value of a present field; `None` when absent or not a field of this kind
    pub fn get(&self, field: &str) -> Option<&str> {
        let slot = match self {
            Record::Experience(entry) => entry.slot(field),
            Record::Education(entry) => entry.slot(field),
        };
        slot.and_then(|value| value.as_deref())
    }

    /// Field value coerced for display: absent reads as ""
    pub fn display(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }

    /// Sets one field, returning false if the field does not belong to this kind
    pub fn set(&mut self, field: &str, value: String) -> bool {
        let slot = match self {
            Record::Experience(entry) => entry.slot_mut(field),
            Record::Education(entry) => entry.slot_mut(field),
        };
        match slot {
            Some(slot) => {
                *slot = Some(value);
                true
            }
            None => false,
        }
    }
}

// ===== Canned Documents =====

impl ResumeDocument {
    /// Document produced by the "use sample" action
    pub fn sample() -> Self {
        Self {
            name: "John Doe".to_string(),
            summary: "Experienced developer with a passion for creating efficient solutions."
                .to_string(),
            experience: vec![ExperienceEntry::new(
                "ABC Corp",
                "Senior Developer",
                "2 years",
                "Led development teams...",
            )],
            education: vec![EducationEntry::new(
                "Tech University",
                "BSc Computer Science",
                "2020",
                "3.9",
            )],
            skills: ["JavaScript", "React", "Node.js", "Python", "FastAPI"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    /// Stub for parsing an uploaded resume: the file is never read, only its
    /// name is reused (minus a `.pdf`/`.docx` extension).
    pub fn from_upload(file_name: Option<&str>) -> Self {
        let name = file_name
            .map(strip_upload_extension)
            .unwrap_or_else(|| "John Doe".to_string());

        Self {
            name,
            summary: "Experienced professional with expertise in...".to_string(),
            experience: vec![ExperienceEntry::new(
                "Tech Corp",
                "Senior Developer",
                "2020 - Present",
                "Led development of key features...",
            )],
            education: vec![EducationEntry::new(
                "University of Technology",
                "BSc Computer Science",
                "2019",
                "3.8",
            )],
            skills: ["JavaScript", "React", "Python", "FastAPI", "SQL", "Git"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_deserialize_as_empty() {
        let doc: ResumeDocument =
            serde_json::from_str(r#"{"name": "Ada", "experience": [{"company": "Acme"}]}"#)
                .unwrap();

        assert_eq!(doc.name, "Ada");
        assert_eq!(doc.summary, "");
        assert!(doc.education.is_empty());
        assert!(doc.skills.is_empty());

        let record = Record::Experience(doc.experience[0].clone());
        assert_eq!(record.display("company"), "Acme");
        assert_eq!(record.display("role"), "");
        assert_eq!(record.get("role"), None);
    }

    #[test]
    fn test_sparse_entry_serializes_without_absent_fields() {
        let entry = ExperienceEntry {
            company: Some("Acme".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&entry).unwrap(), r#"{"company":"Acme"}"#);
    }

    #[test]
    fn test_null_field_reads_as_absent() {
        let entry: EducationEntry =
            serde_json::from_str(r#"{"institution": "MIT", "gpa": null}"#).unwrap();
        assert_eq!(entry.gpa, None);
    }

    #[test]
    fn test_record_set_rejects_foreign_field() {
        let mut record = Record::template(SectionKey::Education).unwrap();
        assert!(record.set("degree", "BSc".to_string()));
        assert!(!record.set("company", "Acme".to_string()));
        assert_eq!(record.display("degree"), "BSc");
    }

    #[test]
    fn test_from_upload_uses_file_name() {
        assert_eq!(ResumeDocument::from_upload(Some("Jane Smith.pdf")).name, "Jane Smith");
        assert_eq!(ResumeDocument::from_upload(Some("cv.docx")).name, "cv");
        assert_eq!(ResumeDocument::from_upload(Some("notes.txt")).name, "notes.txt");
        assert_eq!(ResumeDocument::from_upload(None).name, "John Doe");
    }

    #[test]
    fn test_sample_document() {
        let doc = ResumeDocument::sample();
        assert_eq!(doc.name, "John Doe");
        assert_eq!(doc.experience.len(), 1);
        assert_eq!(doc.education[0].gpa.as_deref(), Some("3.9"));
        assert_eq!(doc.skills.len(), 5);
    }
}
