// src/session.rs
//! Interactive terminal session: the presentation layer over the editor

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::cli::{SessionCommand, SessionLine};
use crate::editor::{AppPhase, EditorController, EditorError, EnhanceOutcome};
use crate::types::{Record, ResumeDocument, SectionKey, SectionValue};

/// Delay between asking for a removal and committing it
pub const REMOVAL_DELAY: Duration = Duration::from_millis(300);

enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    controller: EditorController,
}

impl Session {
    pub fn new(controller: EditorController) -> Self {
        Self { controller }
    }

    /// Load the saved resume and read commands from stdin until `quit` or EOF
    pub async fn run(&self) -> Result<()> {
        println!("Loading resume...");
        match self.controller.load().await {
            AppPhase::Editing => self.show(),
            _ => println!(
                "No saved resume. Use `upload <file>` or `sample` to start, `help` for commands."
            ),
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await.context("Failed to read input")? {
            let command = match SessionLine::parse_line(&line) {
                None => continue,
                Some(Ok(command)) => command,
                Some(Err(e)) => {
                    println!("{}", e.render());
                    continue;
                }
            };

            match self.execute(command).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => println!("{}", e),
            }
        }

        info!("Session ended");
        Ok(())
    }

    async fn execute(&self, command: SessionCommand) -> Result<Flow, EditorError> {
        let controller = &self.controller;

        match command {
            SessionCommand::Show => self.show(),
            SessionCommand::Sample => {
                controller.use_sample();
                self.show();
            }
            SessionCommand::Upload { file } => {
                controller.parse_upload(file.as_deref());
                self.show();
            }
            SessionCommand::Set { section, text } => {
                let applied =
                    controller.update_section(section, SectionValue::Text(text.join(" ")))?;
                report(applied, section);
            }
            SessionCommand::Edit {
                section,
                index,
                field,
                text,
            } => {
                let value = text.join(" ");
                let applied =
                    controller.update_list_field(section, index, field.as_deref(), &value)?;
                report(applied, section);
            }
            SessionCommand::Add { section } => {
                let applied = controller.add_entry(section)?;
                report(applied, section);
            }
            SessionCommand::Remove { section, index } => {
                if controller.document().is_none() {
                    return Err(EditorError::NoDocument);
                }
                if controller.stage_removal(section, index, REMOVAL_DELAY).is_some() {
                    println!("Removing {} #{}...", section, index);
                }
            }
            SessionCommand::Enhance { section } => self.spawn_enhance(section)?,
            SessionCommand::Save => {
                let status = controller.save().await?;
                println!("{}", status);
            }
            SessionCommand::Download { format } => {
                println!("Downloading as {}...", format.extension().to_uppercase());
                let path = controller.download(format).await?;
                println!("Saved {}", path.display());
            }
            SessionCommand::Status => self.status(),
            SessionCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    /// Enhancement runs in the background so editing can go on meanwhile
    fn spawn_enhance(&self, section: SectionKey) -> Result<(), EditorError> {
        if self.controller.document().is_none() {
            return Err(EditorError::NoDocument);
        }
        if self.controller.is_busy(section) {
            return Err(EditorError::SectionBusy(section));
        }

        println!("Enhancing {}...", section);
        let controller = self.controller.clone();
        tokio::spawn(async move {
            match controller.enhance_section(section).await {
                Ok(EnhanceOutcome::Applied) => println!("{} enhanced.", section),
                Ok(EnhanceOutcome::Reverted { reason }) => {
                    println!("{} left unchanged: {}", section, reason)
                }
                Err(e) => println!("{}", e),
            }
        });
        Ok(())
    }

    fn show(&self) {
        match self.controller.document() {
            Some(document) => print!("{}", render(&document)),
            None => println!("No resume loaded yet"),
        }
    }

    fn status(&self) {
        let busy: Vec<&str> = SectionKey::ALL
            .into_iter()
            .filter(|section| self.controller.is_busy(*section))
            .map(SectionKey::label)
            .collect();

        println!("Phase: {:?}", self.controller.phase());
        if !busy.is_empty() {
            println!("Enhancing: {}", busy.join(", "));
        }
        if self.controller.is_downloading() {
            println!("Download in progress");
        }
        let pending = self.controller.pending_removals();
        if pending > 0 {
            println!("Pending removals: {}", pending);
        }
    }
}

fn report(applied: bool, section: SectionKey) {
    if applied {
        println!("{} updated.", section);
    } else {
        println!("Nothing to change in {}.", section);
    }
}

/// Plain-text view of the resume. Absent record fields show as empty.
pub fn render(document: &ResumeDocument) -> String {
    let mut out = String::new();

    for section in SectionKey::ALL {
        match document.section(section) {
            SectionValue::Text(text) => {
                let _ = writeln!(out, "{}: {}", section, text);
            }
            SectionValue::StringList(items) => {
                let _ = writeln!(out, "{}:", section);
                for (index, item) in items.iter().enumerate() {
                    let _ = writeln!(out, "  [{}] {}", index, item);
                }
            }
            SectionValue::RecordList(records) => {
                let _ = writeln!(out, "{}:", section);
                for (index, record) in records.iter().enumerate() {
                    let _ = writeln!(out, "  [{}] {}", index, render_record(record));
                }
            }
        }
    }

    out
}

fn render_record(record: &Record) -> String {
    record
        .fields()
        .iter()
        .map(|field| format!("{}: {}", field, record.display(field)))
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExperienceEntry;

    #[test]
    fn test_render_sample() {
        let text = render(&ResumeDocument::sample());

        assert!(text.starts_with("Name: John Doe\nSummary: Experienced developer"));
        assert!(text.contains(
            "Experience:\n  [0] company: ABC Corp | role: Senior Developer | duration: 2 years | description: Led development teams...\n"
        ));
        assert!(text.contains("  [0] institution: Tech University | degree: BSc Computer Science | year: 2020 | gpa: 3.9\n"));
        assert!(text.ends_with("  [4] FastAPI\n"));
    }

    #[test]
    fn test_render_coerces_absent_fields() {
        let document = ResumeDocument {
            experience: vec![ExperienceEntry {
                role: Some("Lead".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };

        let text = render(&document);
        assert!(text.contains("  [0] company:  | role: Lead | duration:  | description: \n"));
        assert!(text.contains("Education:\nSkills:\n"));
    }
}
