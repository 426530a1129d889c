// src/editor/state.rs
use std::collections::{HashMap, HashSet};

use crate::types::{ResumeDocument, SectionKey};

/// Where the editing session currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    /// Waiting for the saved resume to be fetched
    Loading,
    /// No resume yet; waiting for an upload or the sample
    Uploading,
    Editing,
}

/// Everything the controller owns. Lives behind one mutex that is never held
/// across an await point.
#[derive(Debug)]
pub(crate) struct EditorState {
    pub phase: AppPhase,
    pub document: Option<ResumeDocument>,
    pub busy: HashSet<SectionKey>,
    pub downloading: bool,
    removals: HashMap<u64, (SectionKey, usize)>,
    next_ticket: u64,
}

impl EditorState {
    pub fn new() -> Self {
        Self {
            phase: AppPhase::Loading,
            document: None,
            busy: HashSet::new(),
            downloading: false,
            removals: HashMap::new(),
            next_ticket: 0,
        }
    }

    /// Swap in a whole new document; staged removals targeted the old one
    pub fn replace_document(&mut self, document: ResumeDocument) {
        self.document = Some(document);
        self.phase = AppPhase::Editing;
        self.removals.clear();
    }

    /// Register a removal to be committed later. `None` if the same entry is
    /// already staged.
    pub fn stage_removal(&mut self, section: SectionKey, index: usize) -> Option<u64> {
        if self.removals.values().any(|target| *target == (section, index)) {
            return None;
        }
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.removals.insert(ticket, (section, index));
        Some(ticket)
    }

    /// Withdraw a staged removal, returning where its entry sits now
    pub fn take_removal(&mut self, ticket: u64) -> Option<(SectionKey, usize)> {
        self.removals.remove(&ticket)
    }

    pub fn pending_removals(&self) -> usize {
        self.removals.len()
    }

    /// Keep staged removals pointing at the same entries after `removed` left
    /// `section`. A removal staged for the entry that just went is dropped.
    pub fn shift_after_removal(&mut self, section: SectionKey, removed: usize) {
        self.removals
            .retain(|_, (staged_section, index)| *staged_section != section || *index != removed);
        for (staged_section, index) in self.removals.values_mut() {
            if *staged_section == section && *index > removed {
                *index -= 1;
            }
        }
    }

    /// Forget removals staged in `section`; its entries were replaced wholesale
    pub fn drop_removals(&mut self, section: SectionKey) {
        self.removals
            .retain(|_, (staged_section, _)| *staged_section != section);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_entry_is_staged_once() {
        let mut state = EditorState::new();
        assert!(state.stage_removal(SectionKey::Skills, 1).is_some());
        assert!(state.stage_removal(SectionKey::Skills, 1).is_none());
        assert!(state.stage_removal(SectionKey::Experience, 1).is_some());
        assert_eq!(state.pending_removals(), 2);
    }

    #[test]
    fn test_staged_indices_follow_removals() {
        let mut state = EditorState::new();
        let first = state.stage_removal(SectionKey::Skills, 0).unwrap();
        let later = state.stage_removal(SectionKey::Skills, 3).unwrap();
        let other = state.stage_removal(SectionKey::Education, 3).unwrap();

        assert_eq!(state.take_removal(first), Some((SectionKey::Skills, 0)));
        state.shift_after_removal(SectionKey::Skills, 0);

        assert_eq!(state.take_removal(later), Some((SectionKey::Skills, 2)));
        assert_eq!(state.take_removal(other), Some((SectionKey::Education, 3)));
    }

    #[test]
    fn test_removal_of_the_staged_entry_drops_it() {
        let mut state = EditorState::new();
        let same = state.stage_removal(SectionKey::Skills, 1).unwrap();
        let later = state.stage_removal(SectionKey::Skills, 2).unwrap();

        state.shift_after_removal(SectionKey::Skills, 1);

        assert_eq!(state.take_removal(same), None);
        assert_eq!(state.take_removal(later), Some((SectionKey::Skills, 1)));
    }

    #[test]
    fn test_dropping_section_removals_keeps_other_sections() {
        let mut state = EditorState::new();
        let skills = state.stage_removal(SectionKey::Skills, 0).unwrap();
        let education = state.stage_removal(SectionKey::Education, 0).unwrap();

        state.drop_removals(SectionKey::Skills);

        assert_eq!(state.take_removal(skills), None);
        assert_eq!(state.take_removal(education), Some((SectionKey::Education, 0)));
    }

    #[test]
    fn test_replacing_document_drops_staged_removals() {
        let mut state = EditorState::new();
        let ticket = state.stage_removal(SectionKey::Skills, 0).unwrap();

        state.replace_document(ResumeDocument::sample());

        assert_eq!(state.phase, AppPhase::Editing);
        assert_eq!(state.take_removal(ticket), None);
    }
}
