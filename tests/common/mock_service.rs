//! Mock journal service for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use journal_submit::api::JournalService;
use journal_submit::auth::Session;
use journal_submit::config::ApiConfig;
use journal_submit::error::{Error, Result};
use journal_submit::types::{
    FileToUpload, RequirementSlot, SubmissionRecord, SubmitReceipt, Topic, UploadedFile,
};
use journal_submit::wizard::SubmissionPayload;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `upload_files`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCall {
    pub token: String,
    pub slot: RequirementSlot,
    pub file_names: Vec<String>,
}

/// Call record for `create_submission`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitCall {
    pub token: String,
    pub payload: SubmissionPayload,
    pub idempotency_key: String,
}

/// Simple mock journal service for testing
///
/// Features:
/// - Auto-incrementing submission ids
/// - Call tracking for verification
/// - Configurable topic and submission listings
/// - Error injection for failure path testing
pub struct MockJournalService {
    config: ApiConfig,
    next_submission_id: AtomicU64,
    topics: Mutex<Vec<Topic>>,
    submissions: Mutex<Vec<SubmissionRecord>>,
    // Call tracking
    topic_calls: AtomicU64,
    upload_calls: Mutex<Vec<UploadCall>>,
    submit_calls: Mutex<Vec<SubmitCall>>,
    // Error injection
    error_on_topics: Mutex<Option<String>>,
    error_on_upload: Mutex<Option<String>>,
    error_on_submit: Mutex<Option<String>>,
}

impl Default for MockJournalService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockJournalService {
    /// Create a mock pointing at the default backend URL
    pub fn new() -> Self {
        Self {
            config: ApiConfig::default(),
            next_submission_id: AtomicU64::new(1),
            topics: Mutex::new(Vec::new()),
            submissions: Mutex::new(Vec::new()),
            topic_calls: AtomicU64::new(0),
            upload_calls: Mutex::new(Vec::new()),
            submit_calls: Mutex::new(Vec::new()),
            error_on_topics: Mutex::new(None),
            error_on_upload: Mutex::new(None),
            error_on_submit: Mutex::new(None),
        }
    }

    /// Create a mock serving the given topic names
    pub fn with_topics(names: &[&str]) -> Self {
        let mock = Self::new();
        mock.set_topics(names);
        mock
    }

    pub fn set_topics(&self, names: &[&str]) {
        *self.topics.lock().unwrap() = names
            .iter()
            .enumerate()
            .map(|(i, name)| Topic {
                id: (i + 1).to_string(),
                name: (*name).to_string(),
            })
            .collect();
    }

    pub fn set_submissions(&self, records: Vec<SubmissionRecord>) {
        *self.submissions.lock().unwrap() = records;
    }

    // === Error injection methods ===

    /// Make `list_topics` return a network-style error
    pub fn fail_topics(&self, msg: &str) {
        *self.error_on_topics.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `upload_files` return an upload error
    pub fn fail_upload(&self, msg: &str) {
        *self.error_on_upload.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `create_submission` return a submit error
    pub fn fail_submit(&self, msg: &str) {
        *self.error_on_submit.lock().unwrap() = Some(msg.to_string());
    }

    /// Clear the injected submit error
    pub fn heal_submit(&self) {
        *self.error_on_submit.lock().unwrap() = None;
    }

    // === Call verification methods ===

    pub fn topic_call_count(&self) -> u64 {
        self.topic_calls.load(Ordering::SeqCst)
    }

    pub fn get_upload_calls(&self) -> Vec<UploadCall> {
        self.upload_calls.lock().unwrap().clone()
    }

    pub fn get_submit_calls(&self) -> Vec<SubmitCall> {
        self.submit_calls.lock().unwrap().clone()
    }

    /// Total number of calls across every endpoint
    pub fn total_calls(&self) -> usize {
        usize::try_from(self.topic_call_count()).unwrap()
            + self.get_upload_calls().len()
            + self.get_submit_calls().len()
    }
}

#[async_trait]
impl JournalService for MockJournalService {
    async fn list_topics(&self) -> Result<Vec<Topic>> {
        self.topic_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(msg) = self.error_on_topics.lock().unwrap().as_ref() {
            return Err(Error::Api(msg.clone()));
        }

        Ok(self.topics.lock().unwrap().clone())
    }

    async fn upload_files(
        &self,
        session: &Session,
        slot: RequirementSlot,
        files: &[FileToUpload],
    ) -> Result<Vec<UploadedFile>> {
        self.upload_calls.lock().unwrap().push(UploadCall {
            token: session.token().to_string(),
            slot,
            file_names: files.iter().map(|f| f.file_name.clone()).collect(),
        });

        if let Some(msg) = self.error_on_upload.lock().unwrap().as_ref() {
            return Err(Error::Upload(msg.clone()));
        }

        Ok(files
            .iter()
            .map(|f| UploadedFile {
                file_name: f.file_name.clone(),
                file_url: format!("https://cdn.test/{}", f.file_name),
                mime_type: f.mime_type.clone(),
                file_size: f.size(),
                requirement: slot,
            })
            .collect())
    }

    async fn create_submission(
        &self,
        session: &Session,
        payload: &SubmissionPayload,
        idempotency_key: &str,
    ) -> Result<SubmitReceipt> {
        self.submit_calls.lock().unwrap().push(SubmitCall {
            token: session.token().to_string(),
            payload: payload.clone(),
            idempotency_key: idempotency_key.to_string(),
        });

        if let Some(msg) = self.error_on_submit.lock().unwrap().as_ref() {
            return Err(Error::Submit(msg.clone()));
        }

        let id = self.next_submission_id.fetch_add(1, Ordering::SeqCst);
        Ok(SubmitReceipt {
            message: Some("Manuscript submitted successfully".to_string()),
            submission_id: Some(format!("sub-{id}")),
        })
    }

    async fn list_submissions(&self, _session: &Session) -> Result<Vec<SubmissionRecord>> {
        Ok(self.submissions.lock().unwrap().clone())
    }

    fn config(&self) -> &ApiConfig {
        &self.config
    }
}
