//! Client-side checks
//!
//! Advisory only: the backend re-validates everything it receives.

use crate::error::{Error, Result};
use crate::types::{
    ACCEPTED_EXTENSIONS, Draft, FileToUpload, MAX_ABSTRACT_WORDS, MAX_FILE_SIZE, RequirementSlot,
    Topic,
};
use crate::wizard::Step;
use regex::Regex;
use std::sync::OnceLock;

/// Whether `Next` and `Submit` check the draft first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NavigationPolicy {
    /// Refuse to leave a step (or submit) while it has issues
    #[default]
    Strict,
    /// Move freely; only the declarations gate submission
    Lenient,
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("hardcoded email pattern is valid")
    })
}

/// Loose `local@domain.tld` shape check
pub fn looks_like_email(email: &str) -> bool {
    email_regex().is_match(email.trim())
}

/// Issues preventing a step from being left
///
/// An empty `topics` list means the directory is unknown; any non-empty
/// topic is then accepted.
pub fn step_issues(step: Step, draft: &Draft, topics: &[Topic]) -> Vec<String> {
    let mut issues = Vec::new();

    match step {
        Step::Details => {
            if draft.manuscript_title.trim().is_empty() {
                issues.push("Article title is required".to_string());
            }
            let topic = draft.topic.trim();
            if topic.is_empty() {
                issues.push("Research topic is required".to_string());
            } else if !topics.is_empty() && !topics.iter().any(|t| t.name == topic) {
                issues.push(format!("Unknown research topic: {topic}"));
            }
            let words = draft.abstract_word_count();
            if words == 0 {
                issues.push("Abstract is required".to_string());
            } else if words > MAX_ABSTRACT_WORDS {
                issues.push(format!(
                    "Abstract is {words} words; the limit is {MAX_ABSTRACT_WORDS}"
                ));
            }
        }
        Step::Authors => {
            if draft.authors.is_empty() {
                issues.push("At least one author is required".to_string());
            }
            for (i, author) in draft.authors.iter().enumerate() {
                let n = i + 1;
                if author.full_name.trim().is_empty() {
                    issues.push(format!("Author {n}: full name is required"));
                }
                if author.email.trim().is_empty() {
                    issues.push(format!("Author {n}: email address is required"));
                } else if !looks_like_email(&author.email) {
                    issues.push(format!("Author {n}: email address is invalid"));
                }
                if author.affiliation.trim().is_empty() {
                    issues.push(format!("Author {n}: affiliation is required"));
                }
            }
        }
        Step::Files => {
            for slot in RequirementSlot::ALL {
                if slot.is_required() && draft.files_for(slot).next().is_none() {
                    issues.push(format!("{slot} is required"));
                }
            }
        }
        Step::Review => {
            if !draft.declarations.all_accepted() {
                issues.push("All declarations must be accepted".to_string());
            }
        }
    }

    issues
}

/// Issues across every step, in step order
pub fn draft_issues(draft: &Draft, topics: &[Topic]) -> Vec<String> {
    Step::ALL
        .into_iter()
        .flat_map(|step| step_issues(step, draft, topics))
        .collect()
}

/// `Err(Validation)` listing a step's issues, if any
pub fn check_step(step: Step, draft: &Draft, topics: &[Topic]) -> Result<()> {
    into_result(step_issues(step, draft, topics))
}

/// `Err(Validation)` listing every issue in the draft, if any
pub fn check_draft(draft: &Draft, topics: &[Topic]) -> Result<()> {
    into_result(draft_issues(draft, topics))
}

fn into_result(issues: Vec<String>) -> Result<()> {
    if issues.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(issues.join("; ")))
    }
}

/// Local file rules checked before any upload request
pub fn check_upload_batch(files: &[FileToUpload]) -> Result<()> {
    if files.is_empty() {
        return Err(Error::Validation("no files selected".to_string()));
    }

    for file in files {
        let ext = file.extension().unwrap_or_default();
        if !ACCEPTED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(Error::Validation(format!(
                "{}: unsupported format (accepted: {})",
                file.file_name,
                ACCEPTED_EXTENSIONS.join(", ")
            )));
        }
        if file.size() > MAX_FILE_SIZE {
            return Err(Error::Validation(format!(
                "{}: exceeds the 50MB limit",
                file.file_name
            )));
        }
    }

    Ok(())
}
