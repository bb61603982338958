//! Wizard state and its transitions
//!
//! Navigation and field edits are pure: `WizardState::apply` consumes the
//! state and an [`Event`] and returns the next state. Uploads and submits,
//! which span an await point, are split into begin/complete halves so the
//! state can tell a stale response from a current one.

use crate::error::{Error, Result};
use crate::types::{AuthorField, DeclarationKind, Draft, RequirementSlot, UploadedFile};
use crate::wizard::payload::{SubmissionPayload, build_payload};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Wizard step, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    /// Title, topic, abstract, keywords
    Details,
    /// Author list
    Authors,
    /// File uploads per requirement slot
    Files,
    /// Summary and declarations
    Review,
}

impl Step {
    /// All steps in order
    pub const ALL: [Self; 4] = [Self::Details, Self::Authors, Self::Files, Self::Review];

    /// 1-based position
    pub const fn number(self) -> u8 {
        match self {
            Self::Details => 1,
            Self::Authors => 2,
            Self::Files => 3,
            Self::Review => 4,
        }
    }

    /// Heading shown for the step
    pub const fn title(self) -> &'static str {
        match self {
            Self::Details => "Manuscript Details",
            Self::Authors => "Authors",
            Self::Files => "Upload Files",
            Self::Review => "Review & Submit",
        }
    }

    /// Following step; the last step is a fixed point
    pub const fn next(self) -> Self {
        match self {
            Self::Details => Self::Authors,
            Self::Authors => Self::Files,
            Self::Files | Self::Review => Self::Review,
        }
    }

    /// Preceding step; the first step is a fixed point
    pub const fn previous(self) -> Self {
        match self {
            Self::Details | Self::Authors => Self::Details,
            Self::Files => Self::Authors,
            Self::Review => Self::Files,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {}/4: {}", self.number(), self.title())
    }
}

/// Input to a pure transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Advance one step
    Next,
    /// Go back one step
    Previous,
    /// Append a blank author
    AddAuthor,
    /// Edit one field of one author
    UpdateAuthorField {
        /// Position in the author list
        index: usize,
        /// Field to change
        field: AuthorField,
        /// New value
        value: String,
    },
    /// Set the article title
    SetTitle(String),
    /// Set the research topic
    SetTopic(String),
    /// Set the abstract
    SetAbstract(String),
    /// Set the comma-separated keywords
    SetKeywords(String),
    /// Flip a declaration (only on the review step)
    ToggleDeclaration(DeclarationKind),
    /// Discard everything and start over
    Reset,
}

/// Proof that an upload was started; only the latest ticket per slot may write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket {
    slot: RequirementSlot,
    generation: u64,
    draft_key: Uuid,
}

impl UploadTicket {
    /// Slot the upload targets
    pub const fn slot(&self) -> RequirementSlot {
        self.slot
    }
}

/// Current step plus the draft being assembled
#[derive(Debug, Clone)]
pub struct WizardState {
    step: Step,
    draft: Draft,
    submitting: bool,
    idempotency_key: Uuid,
    upload_generations: HashMap<RequirementSlot, u64>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    /// Fresh state: first step, empty draft
    pub fn new() -> Self {
        Self::with_draft(Draft::default())
    }

    /// First step with a pre-filled draft
    pub fn with_draft(draft: Draft) -> Self {
        Self {
            step: Step::Details,
            draft,
            submitting: false,
            idempotency_key: Uuid::new_v4(),
            upload_generations: HashMap::new(),
        }
    }

    /// Current step
    pub const fn step(&self) -> Step {
        self.step
    }

    /// Draft being assembled
    pub const fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Whether a submit request is in flight
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Key sent with the submit request; stable for the lifetime of a draft
    pub const fn idempotency_key(&self) -> Uuid {
        self.idempotency_key
    }

    /// Apply one event
    #[must_use]
    pub fn apply(mut self, event: Event) -> Self {
        match event {
            Event::Next => self.step = self.step.next(),
            Event::Previous => self.step = self.step.previous(),
            Event::AddAuthor => self.draft.authors.push(Default::default()),
            Event::UpdateAuthorField {
                index,
                field,
                value,
            } => {
                if let Some(author) = self.draft.authors.get_mut(index) {
                    *author.field_mut(field) = value;
                }
            }
            Event::SetTitle(title) => self.draft.manuscript_title = title,
            Event::SetTopic(topic) => self.draft.topic = topic,
            Event::SetAbstract(text) => self.draft.abstract_text = text,
            Event::SetKeywords(keywords) => self.draft.keywords = keywords,
            Event::ToggleDeclaration(kind) => {
                if self.step == Step::Review {
                    self.draft.declarations.toggle(kind);
                }
            }
            Event::Reset => return Self::new(),
        }
        self
    }

    /// Whether the submit control is enabled
    pub const fn can_submit(&self) -> bool {
        self.draft.declarations.all_accepted() && !self.submitting
    }

    /// Start an upload for a slot, superseding any earlier one
    pub fn begin_upload(&mut self, slot: RequirementSlot) -> UploadTicket {
        let generation = self.upload_generations.entry(slot).or_insert(0);
        *generation += 1;
        UploadTicket {
            slot,
            generation: *generation,
            draft_key: self.idempotency_key,
        }
    }

    /// Whether a ticket is still the latest for its slot on this draft
    pub fn is_current(&self, ticket: &UploadTicket) -> bool {
        ticket.draft_key == self.idempotency_key
            && self.upload_generations.get(&ticket.slot) == Some(&ticket.generation)
    }

    /// Record an upload result; returns `false` and changes nothing if the
    /// ticket was superseded or the draft was reset meanwhile
    pub fn complete_upload(&mut self, ticket: UploadTicket, mut files: Vec<UploadedFile>) -> bool {
        if !self.is_current(&ticket) {
            return false;
        }
        for file in &mut files {
            file.requirement = ticket.slot;
        }
        self.draft.replace_slot_files(ticket.slot, files);
        true
    }

    /// Mark a submit as in flight and build its payload
    pub fn begin_submit(&mut self) -> Result<SubmissionPayload> {
        if self.submitting {
            return Err(Error::Validation(
                "a submission is already in progress".to_string(),
            ));
        }
        if !self.draft.declarations.all_accepted() {
            return Err(Error::Validation(
                "all declarations must be accepted before submitting".to_string(),
            ));
        }
        self.submitting = true;
        Ok(build_payload(&self.draft))
    }

    /// Settle an in-flight submit; success resets to a fresh draft
    pub fn finish_submit(&mut self, succeeded: bool) {
        if succeeded {
            *self = Self::new();
        } else {
            self.submitting = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Author;

    fn at_review() -> WizardState {
        WizardState::new()
            .apply(Event::Next)
            .apply(Event::Next)
            .apply(Event::Next)
    }

    fn accept_all(state: WizardState) -> WizardState {
        DeclarationKind::ALL
            .into_iter()
            .fold(state, |s, kind| s.apply(Event::ToggleDeclaration(kind)))
    }

    fn stored(name: &str, slot: RequirementSlot) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            file_url: format!("https://cdn.test/{name}"),
            mime_type: "application/pdf".to_string(),
            file_size: 1,
            requirement: slot,
        }
    }

    #[test]
    fn test_step_order() {
        let numbers: Vec<u8> = Step::ALL.iter().map(|s| s.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        assert_eq!(Step::Details.to_string(), "Step 1/4: Manuscript Details");
    }

    #[test]
    fn test_previous_on_first_step_is_noop() {
        let state = WizardState::new().apply(Event::SetTitle("X".into()));
        let before = state.draft().clone();
        let after = state.apply(Event::Previous);
        assert_eq!(after.step(), Step::Details);
        assert_eq!(after.draft(), &before);
    }

    #[test]
    fn test_next_on_last_step_is_noop() {
        let state = at_review();
        let before = state.draft().clone();
        let after = state.apply(Event::Next);
        assert_eq!(after.step(), Step::Review);
        assert_eq!(after.draft(), &before);
    }

    #[test]
    fn test_next_is_unconditional() {
        // The pure transition never validates; see NavigationPolicy for the checked path
        let state = WizardState::new().apply(Event::Next);
        assert_eq!(state.step(), Step::Authors);
        assert!(state.draft().manuscript_title.is_empty());
    }

    #[test]
    fn test_author_edits() {
        let state = WizardState::new()
            .apply(Event::AddAuthor)
            .apply(Event::UpdateAuthorField {
                index: 1,
                field: AuthorField::Email,
                value: "b@uni.edu".into(),
            })
            .apply(Event::UpdateAuthorField {
                index: 7,
                field: AuthorField::FullName,
                value: "ignored".into(),
            });

        assert_eq!(state.draft().authors.len(), 2);
        assert_eq!(state.draft().authors[0], Author::default());
        assert_eq!(state.draft().authors[1].email, "b@uni.edu");
    }

    #[test]
    fn test_declarations_only_toggle_on_review() {
        let early = accept_all(WizardState::new());
        assert!(!early.draft().declarations.ethics);
        assert!(!early.can_submit());

        let late = accept_all(at_review());
        assert!(late.draft().declarations.all_accepted());
        assert!(late.can_submit());
    }

    #[test]
    fn test_submit_requires_all_declarations() {
        let state = at_review()
            .apply(Event::ToggleDeclaration(DeclarationKind::Ethics))
            .apply(Event::ToggleDeclaration(DeclarationKind::Copyright));
        assert!(!state.can_submit());

        let mut state = state;
        assert!(matches!(state.begin_submit(), Err(Error::Validation(_))));
        assert!(!state.is_submitting());
    }

    #[test]
    fn test_duplicate_submit_refused_while_in_flight() {
        let mut state = accept_all(at_review());
        assert!(state.begin_submit().is_ok());
        assert!(!state.can_submit());
        assert!(matches!(state.begin_submit(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_failed_submit_preserves_draft() {
        let mut state = accept_all(at_review().apply(Event::SetTitle("X".into())));
        let before = state.draft().clone();
        let key = state.idempotency_key();

        state.begin_submit().unwrap();
        state.finish_submit(false);

        assert_eq!(state.draft(), &before);
        assert_eq!(state.step(), Step::Review);
        assert_eq!(state.idempotency_key(), key);
        assert!(state.can_submit());
    }

    #[test]
    fn test_successful_submit_resets() {
        let mut state = accept_all(at_review().apply(Event::SetTitle("X".into())));
        let key = state.idempotency_key();

        state.begin_submit().unwrap();
        state.finish_submit(true);

        assert_eq!(state.draft(), &Draft::default());
        assert_eq!(state.step(), Step::Details);
        assert_ne!(state.idempotency_key(), key);
    }

    #[test]
    fn test_superseded_upload_is_discarded() {
        let mut state = WizardState::new();
        let first = state.begin_upload(RequirementSlot::ManuscriptFile);
        let second = state.begin_upload(RequirementSlot::ManuscriptFile);

        // Second request resolves first, first resolves last
        assert!(state.complete_upload(
            second,
            vec![stored("v2.pdf", RequirementSlot::ManuscriptFile)]
        ));
        assert!(!state.complete_upload(
            first,
            vec![stored("v1.pdf", RequirementSlot::ManuscriptFile)]
        ));

        let names: Vec<&str> = state
            .draft()
            .files
            .iter()
            .map(|f| f.file_name.as_str())
            .collect();
        assert_eq!(names, vec!["v2.pdf"]);
    }

    #[test]
    fn test_uploads_on_different_slots_are_independent() {
        let mut state = WizardState::new();
        let manuscript = state.begin_upload(RequirementSlot::ManuscriptFile);
        let letter = state.begin_upload(RequirementSlot::CoverLetter);

        assert!(state.complete_upload(
            letter,
            vec![stored("letter.pdf", RequirementSlot::CoverLetter)]
        ));
        assert!(state.complete_upload(
            manuscript,
            vec![stored("paper.pdf", RequirementSlot::ManuscriptFile)]
        ));
        assert_eq!(state.draft().files.len(), 2);
    }

    #[test]
    fn test_upload_after_reset_is_discarded() {
        let mut state = WizardState::new();
        let ticket = state.begin_upload(RequirementSlot::CoverLetter);
        let mut state = state.apply(Event::Reset);
        // Fresh draft issues its own generation 1 for the same slot
        let _fresh = state.begin_upload(RequirementSlot::CoverLetter);

        assert!(!state.complete_upload(
            ticket,
            vec![stored("late.pdf", RequirementSlot::CoverLetter)]
        ));
        assert!(state.draft().files.is_empty());
    }

    #[test]
    fn test_complete_upload_tags_slot() {
        let mut state = WizardState::new();
        let ticket = state.begin_upload(RequirementSlot::EthicsDocumentation);
        assert_eq!(ticket.slot(), RequirementSlot::EthicsDocumentation);
        assert!(state.complete_upload(
            ticket,
            vec![stored("approval.pdf", RequirementSlot::ManuscriptFile)]
        ));
        assert_eq!(
            state.draft().files[0].requirement,
            RequirementSlot::EthicsDocumentation
        );
    }
}
