//! Test data factories for journal-submit types
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use journal_submit::auth::Session;
use journal_submit::types::{Author, FileToUpload, SubmissionRecord, SubmissionStatus};

pub const TOPIC: &str = "Financial Inclusion and Sector Stability";
pub const OTHER_TOPIC: &str = "Public Finance and Fiscal Policy";

pub fn make_session() -> Session {
    Session::new("test-token")
}

pub fn make_author(name: &str) -> Author {
    let handle = name.to_lowercase().replace(' ', ".");
    Author::new(name, &format!("{handle}@uni.test"), "University of Testing")
}

/// A small PDF-named upload
pub fn make_pdf(name: &str) -> FileToUpload {
    FileToUpload::new(name, b"%PDF-1.4 test".to_vec())
}

pub fn make_record(id: &str, status: SubmissionStatus, date: Option<&str>) -> SubmissionRecord {
    SubmissionRecord {
        id: id.to_string(),
        manuscript_title: format!("Paper {id}"),
        topic: TOPIC.to_string(),
        status,
        date: date.map(ToString::to_string),
    }
}

/// `n` words of filler
pub fn words(n: usize) -> String {
    vec!["word"; n].join(" ")
}
