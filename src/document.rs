// src/document.rs
//! Structural edits on a resume document. Every operation leaves the
//! receiver untouched and returns the edited copy.

use thiserror::Error;

use crate::types::{
    EducationEntry, ExperienceEntry, Record, ResumeDocument, SectionKey, SectionShape,
    SectionValue,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("{section} holds a {expected}, not a {found}")]
    ShapeMismatch {
        section: SectionKey,
        expected: SectionShape,
        found: SectionShape,
    },

    #[error("{section} cannot hold {found} records")]
    ForeignRecord {
        section: SectionKey,
        found: SectionKey,
    },

    #[error("cannot {operation} on {section}")]
    UnsupportedShape {
        section: SectionKey,
        operation: &'static str,
    },

    #[error("index {index} is out of range for {section} ({len} entries)")]
    IndexOutOfRange {
        section: SectionKey,
        index: usize,
        len: usize,
    },

    #[error("{section} entries have no field '{field}'")]
    UnknownField { section: SectionKey, field: String },
}

type EditResult = Result<ResumeDocument, DocumentError>;

impl ResumeDocument {
    /// Current value of a section in its tagged form
    pub fn section(&self, key: SectionKey) -> SectionValue {
        match key {
            SectionKey::Name => SectionValue::Text(self.name.clone()),
            SectionKey::Summary => SectionValue::Text(self.summary.clone()),
            SectionKey::Experience => self.experience.clone().into(),
            SectionKey::Education => self.education.clone().into(),
            SectionKey::Skills => SectionValue::StringList(self.skills.clone()),
        }
    }

    /// Replace a whole section. The value must have the section's shape.
    pub fn set_field(&self, key: SectionKey, value: SectionValue) -> EditResult {
        let mut doc = self.clone();

        match (key, value) {
            (SectionKey::Name, SectionValue::Text(text)) => doc.name = text,
            (SectionKey::Summary, SectionValue::Text(text)) => doc.summary = text,
            (SectionKey::Skills, SectionValue::StringList(items)) => doc.skills = items,
            (SectionKey::Experience, SectionValue::RecordList(records)) => {
                doc.experience = records
                    .into_iter()
                    .map(|record| match record {
                        Record::Experience(entry) => Ok(entry),
                        other => Err(DocumentError::ForeignRecord {
                            section: key,
                            found: other.section(),
                        }),
                    })
                    .collect::<Result<_, _>>()?;
            }
            (SectionKey::Education, SectionValue::RecordList(records)) => {
                doc.education = records
                    .into_iter()
                    .map(|record| match record {
                        Record::Education(entry) => Ok(entry),
                        other => Err(DocumentError::ForeignRecord {
                            section: key,
                            found: other.section(),
                        }),
                    })
                    .collect::<Result<_, _>>()?;
            }
            (key, value) => {
                return Err(DocumentError::ShapeMismatch {
                    section: key,
                    expected: key.shape(),
                    found: value.shape(),
                })
            }
        }

        Ok(doc)
    }

    /// Replace one field of the record at `index`, keeping its other fields.
    /// `index == len` creates a sparse record holding only that field.
    pub fn set_list_entry_field(
        &self,
        key: SectionKey,
        index: usize,
        field: &str,
        value: &str,
    ) -> EditResult {
        let (Some(blank), SectionValue::RecordList(mut records)) =
            (Record::sparse(key), self.section(key))
        else {
            return Err(DocumentError::UnsupportedShape {
                section: key,
                operation: "set an entry field",
            });
        };

        let len = records.len();
        if index > len {
            return Err(DocumentError::IndexOutOfRange {
                section: key,
                index,
                len,
            });
        }
        if index == len {
            records.push(blank);
        }

        if !records[index].set(field, value.to_string()) {
            return Err(DocumentError::UnknownField {
                section: key,
                field: field.to_string(),
            });
        }

        self.set_field(key, SectionValue::RecordList(records))
    }

    /// Replace the element at `index` of a string-list section.
    /// `index == len` appends.
    pub fn set_list_entry_value(&self, key: SectionKey, index: usize, value: &str) -> EditResult {
        let SectionValue::StringList(mut items) = self.section(key) else {
            return Err(DocumentError::UnsupportedShape {
                section: key,
                operation: "set an entry value",
            });
        };

        let len = items.len();
        match index.cmp(&len) {
            std::cmp::Ordering::Less => items[index] = value.to_string(),
            std::cmp::Ordering::Equal => items.push(value.to_string()),
            std::cmp::Ordering::Greater => {
                return Err(DocumentError::IndexOutOfRange {
                    section: key,
                    index,
                    len,
                })
            }
        }

        self.set_field(key, SectionValue::StringList(items))
    }

    /// Append the section's empty template entry
    pub fn append_entry(&self, key: SectionKey) -> EditResult {
        let mut doc = self.clone();

        match key {
            SectionKey::Experience => doc.experience.push(ExperienceEntry::template()),
            SectionKey::Education => doc.education.push(EducationEntry::template()),
            SectionKey::Skills => doc.skills.push(String::new()),
            SectionKey::Name | SectionKey::Summary => {
                return Err(DocumentError::UnsupportedShape {
                    section: key,
                    operation: "append an entry",
                })
            }
        }

        Ok(doc)
    }

    /// Remove the entry at `index`; later entries shift down by one
    pub fn remove_entry(&self, key: SectionKey, index: usize) -> EditResult {
        let mut doc = self.clone();

        match key {
            SectionKey::Experience => remove_at(&mut doc.experience, key, index)?,
            SectionKey::Education => remove_at(&mut doc.education, key, index)?,
            SectionKey::Skills => remove_at(&mut doc.skills, key, index)?,
            SectionKey::Name | SectionKey::Summary => {
                return Err(DocumentError::UnsupportedShape {
                    section: key,
                    operation: "remove an entry",
                })
            }
        }

        Ok(doc)
    }
}

fn remove_at<T>(items: &mut Vec<T>, section: SectionKey, index: usize) -> Result<(), DocumentError> {
    if index >= items.len() {
        return Err(DocumentError::IndexOutOfRange {
            section,
            index,
            len: items.len(),
        });
    }
    items.remove(index);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_set_scalar_field_is_isolated() {
        let doc = ResumeDocument::sample();
        let edited = doc
            .set_field(SectionKey::Summary, SectionValue::from("Rust engineer"))
            .unwrap();

        assert_eq!(edited.section(SectionKey::Summary), SectionValue::from("Rust engineer"));
        assert_eq!(edited.name, doc.name);
        assert_eq!(edited.experience, doc.experience);
        assert_eq!(edited.education, doc.education);
        assert_eq!(edited.skills, doc.skills);
        // receiver untouched
        assert_ne!(doc.summary, "Rust engineer");
    }

    #[test]
    fn test_set_field_rejects_wrong_shape() {
        let doc = ResumeDocument::default();

        let err = doc
            .set_field(SectionKey::Name, SectionValue::StringList(vec![]))
            .unwrap_err();
        assert_eq!(
            err,
            DocumentError::ShapeMismatch {
                section: SectionKey::Name,
                expected: SectionShape::Text,
                found: SectionShape::StringList,
            }
        );

        let err = doc
            .set_field(
                SectionKey::Experience,
                vec![EducationEntry::template()].into(),
            )
            .unwrap_err();
        assert!(matches!(err, DocumentError::ForeignRecord { .. }));
    }

    #[test]
    fn test_append_entry_uses_section_template() {
        let doc = ResumeDocument::default();

        let doc = doc.append_entry(SectionKey::Experience).unwrap();
        assert_eq!(doc.experience, vec![ExperienceEntry::template()]);

        let doc = doc.append_entry(SectionKey::Education).unwrap();
        assert_eq!(doc.education, vec![EducationEntry::template()]);

        let doc = doc.append_entry(SectionKey::Skills).unwrap();
        let doc = doc.append_entry(SectionKey::Skills).unwrap();
        assert_eq!(doc.skills, skills(&["", ""]));

        assert!(matches!(
            doc.append_entry(SectionKey::Summary),
            Err(DocumentError::UnsupportedShape { .. })
        ));
    }

    #[test]
    fn test_sequential_removes_use_updated_list() {
        let doc = ResumeDocument {
            skills: skills(&["a", "b", "c", "d"]),
            ..Default::default()
        };

        let doc = doc.remove_entry(SectionKey::Skills, 1).unwrap();
        assert_eq!(doc.skills, skills(&["a", "c", "d"]));

        // index 1 now refers to "c"
        let doc = doc.remove_entry(SectionKey::Skills, 1).unwrap();
        assert_eq!(doc.skills, skills(&["a", "d"]));
    }

    #[test]
    fn test_remove_out_of_range_or_scalar() {
        let doc = ResumeDocument::sample();
        assert_eq!(
            doc.remove_entry(SectionKey::Experience, 5).unwrap_err(),
            DocumentError::IndexOutOfRange {
                section: SectionKey::Experience,
                index: 5,
                len: 1,
            }
        );
        assert!(matches!(
            doc.remove_entry(SectionKey::Name, 0),
            Err(DocumentError::UnsupportedShape { .. })
        ));
    }

    #[test]
    fn test_add_then_edit_experience_company() {
        let doc = ResumeDocument::default()
            .append_entry(SectionKey::Experience)
            .unwrap()
            .set_list_entry_field(SectionKey::Experience, 0, "company", "Acme")
            .unwrap();

        assert_eq!(
            doc.experience,
            vec![ExperienceEntry::new("Acme", "", "", "")]
        );
    }

    #[test]
    fn test_set_entry_field_preserves_other_records() {
        let doc = ResumeDocument::sample()
            .append_entry(SectionKey::Education)
            .unwrap();
        let edited = doc
            .set_list_entry_field(SectionKey::Education, 1, "degree", "MSc")
            .unwrap();

        assert_eq!(edited.education[0], doc.education[0]);
        assert_eq!(edited.education[1].degree.as_deref(), Some("MSc"));
        assert_eq!(edited.education[1].institution.as_deref(), Some(""));
    }

    #[test]
    fn test_set_entry_field_at_end_creates_sparse_record() {
        let doc = ResumeDocument::default()
            .set_list_entry_field(SectionKey::Experience, 0, "role", "Lead")
            .unwrap();

        assert_eq!(
            doc.experience,
            vec![ExperienceEntry {
                role: Some("Lead".to_string()),
                ..Default::default()
            }]
        );

        assert!(matches!(
            doc.set_list_entry_field(SectionKey::Experience, 3, "role", "x"),
            Err(DocumentError::IndexOutOfRange { index: 3, len: 1, .. })
        ));
    }

    #[test]
    fn test_set_entry_field_rejects_unknown_field_and_scalar_lists() {
        let doc = ResumeDocument::sample();
        assert_eq!(
            doc.set_list_entry_field(SectionKey::Experience, 0, "gpa", "4.0")
                .unwrap_err(),
            DocumentError::UnknownField {
                section: SectionKey::Experience,
                field: "gpa".to_string(),
            }
        );
        assert!(matches!(
            doc.set_list_entry_field(SectionKey::Skills, 0, "name", "Go"),
            Err(DocumentError::UnsupportedShape { .. })
        ));
    }

    #[test]
    fn test_set_list_entry_value() {
        let doc = ResumeDocument {
            skills: skills(&["Go", "Rust"]),
            ..Default::default()
        };

        let doc = doc.set_list_entry_value(SectionKey::Skills, 0, "C").unwrap();
        assert_eq!(doc.skills, skills(&["C", "Rust"]));

        let doc = doc.set_list_entry_value(SectionKey::Skills, 2, "Zig").unwrap();
        assert_eq!(doc.skills, skills(&["C", "Rust", "Zig"]));

        assert!(doc.set_list_entry_value(SectionKey::Skills, 9, "x").is_err());
        assert!(doc
            .set_list_entry_value(SectionKey::Experience, 0, "x")
            .is_err());
    }
}
