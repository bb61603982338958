//! Journal backend services
//!
//! Topic directory, file upload and submission endpoints behind one trait,
//! so the wizard can run against the real backend or a test double.

mod http;
mod wire;

pub use http::{GENERIC_SUBMIT_FAILURE, HttpJournalService};

use crate::auth::Session;
use crate::config::ApiConfig;
use crate::error::Result;
use crate::types::{
    FileToUpload, RequirementSlot, SubmissionRecord, SubmitReceipt, Topic, UploadedFile,
};
use crate::wizard::SubmissionPayload;
use async_trait::async_trait;

/// Header carrying the per-draft idempotency key on submit
pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

/// Journal backend operations
#[async_trait]
pub trait JournalService: Send + Sync {
    /// List the research topics a submission may pick from
    async fn list_topics(&self) -> Result<Vec<Topic>>;

    /// Upload one batch of files for a requirement slot
    ///
    /// Returns one descriptor per file, in the order sent, each tagged with
    /// `slot`. The whole batch fails or succeeds together.
    async fn upload_files(
        &self,
        session: &Session,
        slot: RequirementSlot,
        files: &[FileToUpload],
    ) -> Result<Vec<UploadedFile>>;

    /// Create a submission from an assembled payload
    async fn create_submission(
        &self,
        session: &Session,
        payload: &SubmissionPayload,
        idempotency_key: &str,
    ) -> Result<SubmitReceipt>;

    /// List all submissions (admin only)
    async fn list_submissions(&self, session: &Session) -> Result<Vec<SubmissionRecord>>;

    /// Get the backend configuration
    fn config(&self) -> &ApiConfig;
}
