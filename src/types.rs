//! Core types for journal-submit

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum accepted size of a single uploaded file (50 MB)
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// File extensions the journal accepts for any slot
pub const ACCEPTED_EXTENSIONS: &[&str] = &["docx", "pdf", "png", "jpg", "jpeg", "tiff", "tif"];

/// Maximum abstract length in words
pub const MAX_ABSTRACT_WORDS: usize = 300;

/// One manuscript author
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Full name as it should appear on the article
    pub full_name: String,
    /// Contact email
    pub email: String,
    /// Institution and department
    pub affiliation: String,
}

impl Author {
    /// Create an author from its three fields
    pub fn new(full_name: &str, email: &str, affiliation: &str) -> Self {
        Self {
            full_name: full_name.to_string(),
            email: email.to_string(),
            affiliation: affiliation.to_string(),
        }
    }

    /// Whether every field has been filled in
    pub fn is_complete(&self) -> bool {
        !self.full_name.trim().is_empty()
            && !self.email.trim().is_empty()
            && !self.affiliation.trim().is_empty()
    }

    /// Mutable access to one field
    pub fn field_mut(&mut self, field: AuthorField) -> &mut String {
        match field {
            AuthorField::FullName => &mut self.full_name,
            AuthorField::Email => &mut self.email,
            AuthorField::Affiliation => &mut self.affiliation,
        }
    }
}

/// Editable author field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorField {
    /// Full name
    FullName,
    /// Email address
    Email,
    /// Institutional affiliation
    Affiliation,
}

/// One of the three required confirmations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// Research followed ethical standards
    Ethics,
    /// Conflicts of interest disclosed
    Conflicts,
    /// Right to submit and transfer copyright
    Copyright,
}

impl DeclarationKind {
    /// All declarations in display order
    pub const ALL: [Self; 3] = [Self::Ethics, Self::Conflicts, Self::Copyright];

    /// Type tag sent to the submission service
    pub const fn wire_tag(self) -> &'static str {
        match self {
            Self::Ethics => "ETHICAL_CONDUCT",
            Self::Conflicts => "CONFLICT_OF_INTEREST",
            Self::Copyright => "COPYRIGHT_TRANSFER",
        }
    }

    /// Statement the submitter confirms
    pub const fn statement(self) -> &'static str {
        match self {
            Self::Ethics => {
                "I confirm that this research has been conducted in accordance with ethical \
                 standards and all necessary approvals have been obtained."
            }
            Self::Conflicts => {
                "I have disclosed all potential conflicts of interest related to this research."
            }
            Self::Copyright => {
                "I confirm that I have the right to submit this work and transfer copyright \
                 to the journal upon acceptance."
            }
        }
    }
}

/// Declaration checkboxes
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Declarations {
    /// Ethical conduct confirmed
    pub ethics: bool,
    /// Conflicts of interest disclosed
    pub conflicts: bool,
    /// Copyright transfer accepted
    pub copyright: bool,
}

impl Declarations {
    /// Current value of one declaration
    pub const fn get(&self, kind: DeclarationKind) -> bool {
        match kind {
            DeclarationKind::Ethics => self.ethics,
            DeclarationKind::Conflicts => self.conflicts,
            DeclarationKind::Copyright => self.copyright,
        }
    }

    /// Flip one declaration
    pub fn toggle(&mut self, kind: DeclarationKind) {
        match kind {
            DeclarationKind::Ethics => self.ethics = !self.ethics,
            DeclarationKind::Conflicts => self.conflicts = !self.conflicts,
            DeclarationKind::Copyright => self.copyright = !self.copyright,
        }
    }

    /// Whether all three are accepted
    pub const fn all_accepted(&self) -> bool {
        self.ethics && self.conflicts && self.copyright
    }
}

/// Named file category a submission attaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RequirementSlot {
    /// Main manuscript
    #[serde(rename = "Manuscript File")]
    ManuscriptFile,
    /// Cover letter
    #[serde(rename = "Cover Letter")]
    CoverLetter,
    /// Ethics approval documents
    #[serde(rename = "Ethics Documentation")]
    EthicsDocumentation,
}

impl RequirementSlot {
    /// All slots in display order
    pub const ALL: [Self; 3] = [
        Self::ManuscriptFile,
        Self::CoverLetter,
        Self::EthicsDocumentation,
    ];

    /// Human-readable label (also the key `fileType` is derived from)
    pub const fn label(self) -> &'static str {
        match self {
            Self::ManuscriptFile => "Manuscript File",
            Self::CoverLetter => "Cover Letter",
            Self::EthicsDocumentation => "Ethics Documentation",
        }
    }

    /// Short guidance shown next to the slot
    pub const fn description(self) -> &'static str {
        match self {
            Self::ManuscriptFile => "Main manuscript in .docx or .pdf format",
            Self::CoverLetter => "Brief description of significance and novelty",
            Self::EthicsDocumentation => "Ethics approval for human/animal studies",
        }
    }

    /// Whether a submission must attach this slot
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::EthicsDocumentation)
    }

    /// Parse a slot from its label
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

impl fmt::Display for RequirementSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A file stored by the upload service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    /// Original file name
    pub file_name: String,
    /// Where the service stored it
    pub file_url: String,
    /// MIME type reported by the service
    pub mime_type: String,
    /// Size in bytes
    pub file_size: u64,
    /// Slot this file satisfies
    pub requirement: RequirementSlot,
}

/// A local file about to be uploaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileToUpload {
    /// File name sent in the multipart part
    pub file_name: String,
    /// MIME type sent in the multipart part
    pub mime_type: String,
    /// File contents
    pub bytes: Vec<u8>,
}

impl FileToUpload {
    /// Build an upload from a name and contents, guessing the MIME type
    pub fn new(file_name: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            mime_type: mime_for_file_name(file_name).to_string(),
            bytes,
        }
    }

    /// Lowercased extension, if any
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// MIME type for the accepted extensions
pub fn mime_for_file_name(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "tif" | "tiff" => "image/tiff",
        _ => "application/octet-stream",
    }
}

/// The in-memory submission being assembled
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    /// Article title
    pub manuscript_title: String,
    /// Research topic label
    pub topic: String,
    /// Abstract text
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Comma-separated keywords
    pub keywords: String,
    /// Authors; index 0 is the corresponding author
    pub authors: Vec<Author>,
    /// Uploaded files across all slots
    pub files: Vec<UploadedFile>,
    /// Declaration checkboxes
    pub declarations: Declarations,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            manuscript_title: String::new(),
            topic: String::new(),
            abstract_text: String::new(),
            keywords: String::new(),
            authors: vec![Author::default()],
            files: Vec::new(),
            declarations: Declarations::default(),
        }
    }
}

impl Draft {
    /// Keywords split on commas, trimmed, empties dropped
    pub fn keyword_list(&self) -> Vec<String> {
        self.keywords
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(String::from)
            .collect()
    }

    /// Number of whitespace-separated words in the abstract
    pub fn abstract_word_count(&self) -> usize {
        self.abstract_text.split_whitespace().count()
    }

    /// Files currently attached to a slot
    pub fn files_for(&self, slot: RequirementSlot) -> impl Iterator<Item = &UploadedFile> {
        self.files.iter().filter(move |f| f.requirement == slot)
    }

    /// Replace whatever a slot held with a new batch
    pub fn replace_slot_files(&mut self, slot: RequirementSlot, files: Vec<UploadedFile>) {
        self.files.retain(|f| f.requirement != slot);
        self.files.extend(files);
    }
}

/// A research topic from the topic directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Topic {
    /// Server-side identifier
    pub id: String,
    /// Display label, also what the draft stores
    pub name: String,
}

/// Review state of a stored submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SubmissionStatus {
    /// Awaiting editorial decision
    Pending,
    /// Accepted for publication
    Accepted,
    /// Rejected
    Rejected,
    /// Any status this client does not know about
    Other(String),
}

impl From<String> for SubmissionStatus {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "accepted" => Self::Accepted,
            "rejected" => Self::Rejected,
            _ => Self::Other(s),
        }
    }
}

impl From<SubmissionStatus> for String {
    fn from(s: SubmissionStatus) -> Self {
        s.to_string()
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("Pending"),
            Self::Accepted => f.write_str("Accepted"),
            Self::Rejected => f.write_str("Rejected"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

/// A stored submission as listed for admins
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionRecord {
    /// Server-side identifier
    pub id: String,
    /// Article title
    pub manuscript_title: String,
    /// Research topic
    pub topic: String,
    /// Review status
    pub status: SubmissionStatus,
    /// Submission date as sent by the server
    pub date: Option<String>,
}

impl SubmissionRecord {
    /// Parse the server date (RFC 3339 or plain `YYYY-MM-DD`)
    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.date.as_deref()?;
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }
}

/// What the submission service said about an accepted submit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitReceipt {
    /// Server message, if any
    pub message: Option<String>,
    /// Identifier of the created submission, if returned
    pub submission_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uploaded(name: &str, slot: RequirementSlot) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            file_url: format!("https://files.test/{name}"),
            mime_type: "application/pdf".to_string(),
            file_size: 10,
            requirement: slot,
        }
    }

    #[test]
    fn test_default_draft_has_one_blank_author() {
        let draft = Draft::default();
        assert_eq!(draft.authors, vec![Author::default()]);
        assert!(draft.files.is_empty());
        assert!(!draft.declarations.all_accepted());
    }

    #[test]
    fn test_keyword_list() {
        let draft = Draft {
            keywords: " growth, , fiscal policy ,labor".to_string(),
            ..Draft::default()
        };
        assert_eq!(draft.keyword_list(), vec!["growth", "fiscal policy", "labor"]);
    }

    #[test]
    fn test_replace_slot_files_keeps_other_slots() {
        let mut draft = Draft::default();
        draft.files = vec![
            uploaded("paper.pdf", RequirementSlot::ManuscriptFile),
            uploaded("old-letter.pdf", RequirementSlot::CoverLetter),
        ];

        draft.replace_slot_files(
            RequirementSlot::CoverLetter,
            vec![uploaded("letter.pdf", RequirementSlot::CoverLetter)],
        );

        let names: Vec<&str> = draft.files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, vec!["paper.pdf", "letter.pdf"]);
    }

    #[test]
    fn test_declaration_toggle() {
        let mut decl = Declarations::default();
        for kind in DeclarationKind::ALL {
            decl.toggle(kind);
        }
        assert!(decl.all_accepted());
        decl.toggle(DeclarationKind::Conflicts);
        assert!(!decl.get(DeclarationKind::Conflicts));
        assert!(!decl.all_accepted());
    }

    #[test]
    fn test_slot_labels_round_trip() {
        for slot in RequirementSlot::ALL {
            assert_eq!(RequirementSlot::from_label(slot.label()), Some(slot));
        }
        assert_eq!(RequirementSlot::from_label("Figures"), None);
        assert!(RequirementSlot::ManuscriptFile.is_required());
        assert!(!RequirementSlot::EthicsDocumentation.is_required());
    }

    #[test]
    fn test_mime_guess() {
        assert_eq!(mime_for_file_name("Paper.PDF"), "application/pdf");
        assert_eq!(mime_for_file_name("fig.jpeg"), "image/jpeg");
        assert_eq!(mime_for_file_name("noext"), "application/octet-stream");
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(
            SubmissionStatus::from("accepted".to_string()),
            SubmissionStatus::Accepted
        );
        assert_eq!(
            SubmissionStatus::from("Under Review".to_string()),
            SubmissionStatus::Other("Under Review".to_string())
        );
    }

    #[test]
    fn test_submitted_at_formats() {
        let mut record = SubmissionRecord {
            id: "1".to_string(),
            manuscript_title: "T".to_string(),
            topic: "Other".to_string(),
            status: SubmissionStatus::Pending,
            date: Some("2025-03-01".to_string()),
        };
        assert!(record.submitted_at().is_some());

        record.date = Some("2025-03-01T10:00:00Z".to_string());
        assert!(record.submitted_at().is_some());

        record.date = Some("yesterday".to_string());
        assert!(record.submitted_at().is_none());
    }
}
