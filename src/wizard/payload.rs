//! Submission payload assembly
//!
//! Turns a draft into the JSON body the submission service expects.

use crate::types::{DeclarationKind, Draft};
use serde::{Deserialize, Serialize};

/// Outbound file category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileType {
    /// Main manuscript
    Manuscript,
    /// Cover letter
    CoverLetter,
    /// Ethics approval and anything unrecognised
    EthicsDocumentation,
}

impl FileType {
    /// Map a requirement-slot label to its outbound type
    pub fn from_requirement_label(label: &str) -> Self {
        match label {
            "Manuscript File" => Self::Manuscript,
            "Cover Letter" => Self::CoverLetter,
            _ => Self::EthicsDocumentation,
        }
    }
}

/// Author entry with its derived position fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PayloadAuthor {
    /// Full name as entered
    pub full_name: String,
    /// Contact email
    pub email: String,
    /// Institutional affiliation
    pub affiliation: String,
    /// True only for the first author
    pub is_corresponding: bool,
    /// 1-based display order
    pub order: u32,
}

/// Uploaded file as the submission service expects it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PayloadFile {
    /// Original file name
    pub file_name: String,
    /// URL returned by the upload service
    pub file_url: String,
    /// MIME type
    pub mime_type: String,
    /// Size in bytes
    pub file_size: u64,
    /// Category derived from the requirement slot
    pub file_type: FileType,
}

/// One declaration and whether it was accepted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PayloadDeclaration {
    /// Wire name such as `ETHICAL_CONDUCT`
    #[serde(rename = "type")]
    pub kind: String,
    /// Whether the author accepted it
    pub accepted: bool,
}

/// Body of `POST /submission`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    /// Article title
    pub manuscript_title: String,
    /// Research topic name
    pub topic: String,
    /// Abstract text
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Comma-separated keywords
    pub keywords: String,
    /// Authors in display order
    pub authors: Vec<PayloadAuthor>,
    /// Every uploaded file
    pub files: Vec<PayloadFile>,
    /// The three declarations
    pub declarations: Vec<PayloadDeclaration>,
}

/// Build the outbound payload for a draft
pub fn build_payload(draft: &Draft) -> SubmissionPayload {
    let authors = draft
        .authors
        .iter()
        .enumerate()
        .map(|(index, author)| PayloadAuthor {
            full_name: author.full_name.trim().to_string(),
            email: author.email.trim().to_string(),
            affiliation: author.affiliation.trim().to_string(),
            is_corresponding: index == 0,
            order: u32::try_from(index + 1).unwrap_or(u32::MAX),
        })
        .collect();

    let files = draft
        .files
        .iter()
        .map(|file| PayloadFile {
            file_name: file.file_name.clone(),
            file_url: file.file_url.clone(),
            mime_type: file.mime_type.clone(),
            file_size: file.file_size,
            file_type: FileType::from_requirement_label(file.requirement.label()),
        })
        .collect();

    let declarations = DeclarationKind::ALL
        .into_iter()
        .map(|kind| PayloadDeclaration {
            kind: kind.wire_tag().to_string(),
            accepted: draft.declarations.get(kind),
        })
        .collect();

    SubmissionPayload {
        manuscript_title: draft.manuscript_title.trim().to_string(),
        topic: draft.topic.clone(),
        abstract_text: draft.abstract_text.trim().to_string(),
        keywords: draft.keyword_list().join(", "),
        authors,
        files,
        declarations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Author, Declarations, RequirementSlot, UploadedFile};
    use serde_json::json;

    fn file(name: &str, slot: RequirementSlot) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            file_url: format!("https://cdn.test/{name}"),
            mime_type: "application/pdf".to_string(),
            file_size: 2048,
            requirement: slot,
        }
    }

    #[test]
    fn test_file_type_mapping() {
        assert_eq!(
            FileType::from_requirement_label("Manuscript File"),
            FileType::Manuscript
        );
        assert_eq!(
            FileType::from_requirement_label("Cover Letter"),
            FileType::CoverLetter
        );
        assert_eq!(
            FileType::from_requirement_label("Ethics Documentation"),
            FileType::EthicsDocumentation
        );
        assert_eq!(
            FileType::from_requirement_label("Supplementary Data"),
            FileType::EthicsDocumentation
        );
        assert_eq!(
            serde_json::to_value(FileType::CoverLetter).unwrap(),
            json!("COVER_LETTER")
        );
    }

    #[test]
    fn test_author_positions() {
        let draft = Draft {
            authors: vec![
                Author::new("A", "a@b.com", "Univ"),
                Author::new("B", "b@b.com", "Univ"),
                Author::new("C", "c@b.com", "Inst"),
            ],
            ..Draft::default()
        };
        let payload = build_payload(&draft);

        for (index, author) in payload.authors.iter().enumerate() {
            assert_eq!(author.is_corresponding, index == 0);
            assert_eq!(author.order as usize, index + 1);
        }
    }

    #[test]
    fn test_single_author_scenario() {
        let draft = Draft {
            manuscript_title: "X".to_string(),
            authors: vec![Author::new("A", "a@b.com", "Univ")],
            declarations: Declarations {
                ethics: true,
                conflicts: true,
                copyright: true,
            },
            ..Draft::default()
        };
        let value = serde_json::to_value(build_payload(&draft)).unwrap();

        assert_eq!(value["manuscriptTitle"], json!("X"));
        assert_eq!(value["authors"][0]["isCorresponding"], json!(true));
        assert_eq!(value["authors"][0]["order"], json!(1));
        assert_eq!(value["authors"][0]["fullName"], json!("A"));
        assert_eq!(value["files"], json!([]));
    }

    #[test]
    fn test_files_and_declarations_shape() {
        let draft = Draft {
            files: vec![
                file("paper.pdf", RequirementSlot::ManuscriptFile),
                file("letter.pdf", RequirementSlot::CoverLetter),
            ],
            declarations: Declarations {
                ethics: true,
                conflicts: false,
                copyright: true,
            },
            ..Draft::default()
        };
        let value = serde_json::to_value(build_payload(&draft)).unwrap();

        assert_eq!(
            value["files"][0],
            json!({
                "fileName": "paper.pdf",
                "fileUrl": "https://cdn.test/paper.pdf",
                "mimeType": "application/pdf",
                "fileSize": 2048,
                "fileType": "MANUSCRIPT"
            })
        );
        assert_eq!(value["files"][1]["fileType"], json!("COVER_LETTER"));
        assert_eq!(
            value["declarations"],
            json!([
                {"type": "ETHICAL_CONDUCT", "accepted": true},
                {"type": "CONFLICT_OF_INTEREST", "accepted": false},
                {"type": "COPYRIGHT_TRANSFER", "accepted": true}
            ])
        );
    }

    #[test]
    fn test_keywords_normalised() {
        let draft = Draft {
            keywords: "growth ,, inflation,".to_string(),
            ..Draft::default()
        };
        assert_eq!(build_payload(&draft).keywords, "growth, inflation");
    }
}
