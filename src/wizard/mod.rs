//! Four-step manuscript submission wizard
//!
//! 1. Details - title, topic, abstract, keywords
//! 2. Authors - ordered list, first author is corresponding
//! 3. Files - uploaded per requirement slot as they are attached
//! 4. Review - declarations, then one atomic submit

mod driver;
mod notify;
mod payload;
mod review;
mod state;
mod validate;

pub use driver::{FALLBACK_TOPICS, PendingUpload, Wizard};
pub use notify::{NoopNotifier, Notifier, UploadStatus};
pub use payload::{
    FileType, PayloadAuthor, PayloadDeclaration, PayloadFile, SubmissionPayload, build_payload,
};
pub use review::review_summary;
pub use state::{Event, Step, UploadTicket, WizardState};
pub use validate::{
    NavigationPolicy, check_draft, check_step, check_upload_batch, draft_issues,
    looks_like_email, step_issues,
};
