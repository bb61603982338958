//! Plain-text summary shown on the review step

use crate::types::{Draft, RequirementSlot};
use std::fmt::Write;

/// Summarise a draft for the final review
pub fn review_summary(draft: &Draft) -> String {
    let mut out = String::new();

    let title = non_empty_or(&draft.manuscript_title, "Not provided");
    let topic = non_empty_or(&draft.topic, "Not selected");
    let authors: Vec<&str> = draft
        .authors
        .iter()
        .map(|a| a.full_name.trim())
        .filter(|name| !name.is_empty())
        .collect();
    let authors = if authors.is_empty() {
        "No authors added".to_string()
    } else {
        authors.join(", ")
    };
    let keywords = draft.keyword_list();
    let keywords = if keywords.is_empty() {
        "None".to_string()
    } else {
        keywords.join(", ")
    };

    let _ = writeln!(out, "Title: {title}");
    let _ = writeln!(out, "Topic: {topic}");
    let _ = writeln!(out, "Authors: {authors}");
    let _ = writeln!(out, "Keywords: {keywords}");
    let _ = writeln!(out, "Abstract: {} words", draft.abstract_word_count());
    let _ = write!(out, "Files:");

    for slot in RequirementSlot::ALL {
        let names: Vec<&str> = draft.files_for(slot).map(|f| f.file_name.as_str()).collect();
        let listed = if !names.is_empty() {
            names.join(", ")
        } else if slot.is_required() {
            "(missing)".to_string()
        } else {
            "(optional, none)".to_string()
        };
        let _ = write!(out, "\n  {slot}: {listed}");
    }

    out
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { fallback } else { trimmed }
}
