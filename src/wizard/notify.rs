//! Notification callback trait for interface-agnostic updates
//!
//! Failures inside the wizard are reported here as transient notices rather
//! than propagated to a global error state.

use crate::error::Error;
use crate::types::{RequirementSlot, SubmitReceipt};
use crate::wizard::Step;
use async_trait::async_trait;
use std::fmt;

/// Upload operation status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    /// Request issued for this many files
    Started(usize),
    /// Files stored and recorded on the draft
    Stored(usize),
    /// A newer upload for the same slot was issued; this result was dropped
    Superseded,
    /// Upload failed with error message
    Failed(String),
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started(n) => write!(f, "uploading {n} file{}", if *n == 1 { "" } else { "s" }),
            Self::Stored(n) => write!(f, "stored {n} file{}", if *n == 1 { "" } else { "s" }),
            Self::Superseded => f.write_str("superseded by a newer upload"),
            Self::Failed(msg) => write!(f, "failed: {msg}"),
        }
    }
}

/// Notification callback trait
///
/// Implement this trait to surface wizard activity to a user.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Called when the wizard lands on a step
    async fn on_step(&self, step: Step);

    /// Called as an upload progresses
    async fn on_upload(&self, slot: RequirementSlot, status: UploadStatus);

    /// Called when the submission service accepted the manuscript
    async fn on_submitted(&self, receipt: &SubmitReceipt);

    /// Called when an operation fails (never fatal to the wizard)
    async fn on_error(&self, error: &Error);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op notifier for testing or when notices aren't needed
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn on_step(&self, _step: Step) {}
    async fn on_upload(&self, _slot: RequirementSlot, _status: UploadStatus) {}
    async fn on_submitted(&self, _receipt: &SubmitReceipt) {}
    async fn on_error(&self, _error: &Error) {}
    async fn on_message(&self, _message: &str) {}
}
