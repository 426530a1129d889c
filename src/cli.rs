// src/cli.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::{ExportFormat, SectionKey};

#[derive(Parser, Debug)]
#[command(name = "resume-editor")]
#[command(about = "Edit a resume stored by the remote resume service")]
pub struct Cli {
    /// Base URL of the resume service (overrides config and RESUME_API_URL)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Directory downloaded resumes are written to
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// One line typed into the editing session
#[derive(Parser, Debug)]
#[command(name = "resume-editor", no_binary_name = true)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    /// Print the resume
    Show,
    /// Start from the sample resume
    Sample,
    /// Create a resume from an uploaded PDF/DOCX (only the file name is used)
    Upload { file: Option<String> },
    /// Replace the text of the name or summary
    Set {
        #[arg(value_enum, ignore_case = true)]
        section: SectionKey,
        /// Free text, kept exactly as typed
        #[arg(trailing_var_arg = true, num_args = 0..)]
        text: Vec<String>,
    },
    /// Edit one entry of experience, education or skills
    Edit {
        #[arg(value_enum, ignore_case = true)]
        section: SectionKey,
        index: usize,
        /// Record field to change (experience and education)
        #[arg(long)]
        field: Option<String>,
        /// Free text, kept exactly as typed
        #[arg(trailing_var_arg = true, num_args = 0..)]
        text: Vec<String>,
    },
    /// Append an empty entry
    Add {
        #[arg(value_enum, ignore_case = true)]
        section: SectionKey,
    },
    /// Remove an entry
    Remove {
        #[arg(value_enum, ignore_case = true)]
        section: SectionKey,
        index: usize,
    },
    /// Ask the AI service to enhance a section (runs in the background)
    Enhance {
        #[arg(value_enum, ignore_case = true)]
        section: SectionKey,
    },
    /// Save the resume to the service
    Save,
    /// Export the resume to a file
    Download {
        #[arg(value_enum, ignore_case = true)]
        format: ExportFormat,
    },
    /// Show in-flight work
    Status,
    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

impl SessionLine {
    /// Parse a session line; `None` for a blank line. Free text comes back as
    /// one piece cut from the line, so its inner spacing survives.
    pub fn parse_line(line: &str) -> Option<Result<SessionCommand, clap::Error>> {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            return None;
        }

        let parsed = SessionLine::try_parse_from(words.iter().copied());
        Some(parsed.map(|parsed| {
            let mut command = parsed.command;
            if let SessionCommand::Set { text, .. } | SessionCommand::Edit { text, .. } =
                &mut command
            {
                // free text is always the tail of the line
                if !text.is_empty() {
                    let first = words[words.len() - text.len()];
                    let start = first.as_ptr() as usize - line.as_ptr() as usize;
                    *text = vec![line[start..].trim_end().to_string()];
                }
            }
            command
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> SessionCommand {
        SessionLine::parse_line(line).unwrap().unwrap()
    }

    #[test]
    fn test_blank_line() {
        assert!(SessionLine::parse_line("   ").is_none());
    }

    #[test]
    fn test_set_keeps_text_spacing() {
        assert_eq!(
            parse("set Summary Seasoned  Rust engineer  "),
            SessionCommand::Set {
                section: SectionKey::Summary,
                text: vec!["Seasoned  Rust engineer".into()],
            }
        );
    }

    #[test]
    fn test_edit_with_field() {
        assert_eq!(
            parse("edit experience 0 --field company Acme \t Inc"),
            SessionCommand::Edit {
                section: SectionKey::Experience,
                index: 0,
                field: Some("company".into()),
                text: vec!["Acme \t Inc".into()],
            }
        );
        assert_eq!(
            parse("edit skills 2 Go"),
            SessionCommand::Edit {
                section: SectionKey::Skills,
                index: 2,
                field: None,
                text: vec!["Go".into()],
            }
        );
    }

    #[test]
    fn test_download_format() {
        assert_eq!(
            parse("download PDF"),
            SessionCommand::Download {
                format: ExportFormat::Pdf
            }
        );
        assert!(SessionLine::parse_line("download txt").unwrap().is_err());
    }

    #[test]
    fn test_unknown_section_is_rejected() {
        assert!(SessionLine::parse_line("add projects").unwrap().is_err());
        assert!(SessionLine::parse_line("remove skills x").unwrap().is_err());
    }

    #[test]
    fn test_exit_alias() {
        assert_eq!(parse("exit"), SessionCommand::Quit);
    }
}
