// src/types/section.rs
//! Section keys, their fixed shapes and the tagged section value

use std::fmt;
use std::str::FromStr;

use super::resume::{EducationEntry, ExperienceEntry, Record};

/// One of the five named parts of a resume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum)]
pub enum SectionKey {
    Name,
    Summary,
    Experience,
    Education,
    Skills,
}

/// The shape a section's value always has
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionShape {
    Text,
    StringList,
    RecordList,
}

impl SectionKey {
    pub const ALL: [SectionKey; 5] = [
        SectionKey::Name,
        SectionKey::Summary,
        SectionKey::Experience,
        SectionKey::Education,
        SectionKey::Skills,
    ];

    pub fn shape(self) -> SectionShape {
        match self {
            SectionKey::Name | SectionKey::Summary => SectionShape::Text,
            SectionKey::Skills => SectionShape::StringList,
            SectionKey::Experience | SectionKey::Education => SectionShape::RecordList,
        }
    }

    /// Title-case label shown to the user
    pub fn label(self) -> &'static str {
        match self {
            SectionKey::Name => "Name",
            SectionKey::Summary => "Summary",
            SectionKey::Experience => "Experience",
            SectionKey::Education => "Education",
            SectionKey::Skills => "Skills",
        }
    }

    /// Lowercase form sent as the `section` of an enhancement request
    pub fn wire_name(self) -> &'static str {
        match self {
            SectionKey::Name => "name",
            SectionKey::Summary => "summary",
            SectionKey::Experience => "experience",
            SectionKey::Education => "education",
            SectionKey::Skills => "skills",
        }
    }

    /// Field names of the record kind held by this section, if any
    pub fn record_fields(self) -> &'static [&'static str] {
        match self {
            SectionKey::Experience => ExperienceEntry::FIELDS,
            SectionKey::Education => EducationEntry::FIELDS,
            _ => &[],
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SectionKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        SectionKey::ALL
            .into_iter()
            .find(|key| key.wire_name() == wanted)
            .ok_or_else(|| anyhow::anyhow!("Unknown section: {}", s))
    }
}

impl fmt::Display for SectionShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SectionShape::Text => "text",
            SectionShape::StringList => "list of strings",
            SectionShape::RecordList => "list of records",
        };
        f.write_str(name)
    }
}

/// A section's native value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionValue {
    Text(String),
    StringList(Vec<String>),
    RecordList(Vec<Record>),
}

impl SectionValue {
    pub fn shape(&self) -> SectionShape {
        match self {
            SectionValue::Text(_) => SectionShape::Text,
            SectionValue::StringList(_) => SectionShape::StringList,
            SectionValue::RecordList(_) => SectionShape::RecordList,
        }
    }
}

impl From<&str> for SectionValue {
    fn from(text: &str) -> Self {
        SectionValue::Text(text.to_string())
    }
}

impl From<String> for SectionValue {
    fn from(text: String) -> Self {
        SectionValue::Text(text)
    }
}

impl From<Vec<String>> for SectionValue {
    fn from(items: Vec<String>) -> Self {
        SectionValue::StringList(items)
    }
}

impl From<Vec<ExperienceEntry>> for SectionValue {
    fn from(entries: Vec<ExperienceEntry>) -> Self {
        SectionValue::RecordList(entries.into_iter().map(Record::Experience).collect())
    }
}

impl From<Vec<EducationEntry>> for SectionValue {
    fn from(entries: Vec<EducationEntry>) -> Self {
        SectionValue::RecordList(entries.into_iter().map(Record::Education).collect())
    }
}
