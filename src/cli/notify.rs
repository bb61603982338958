//! Terminal notifier: styled notices and an upload spinner

use crate::cli::style::{arrow, check, cross, spinner, Stylize};
use anstream::{eprintln, println};
use async_trait::async_trait;
use indicatif::ProgressBar;
use journal_submit::error::Error;
use journal_submit::types::{RequirementSlot, SubmitReceipt};
use journal_submit::wizard::{Notifier, Step, UploadStatus};
use std::sync::Mutex;

/// Notifier that prints to the terminal
///
/// Holds at most one spinner, shown while an upload is in flight.
pub struct CliNotifier {
    spinner: Mutex<Option<ProgressBar>>,
    show_steps: bool,
}

impl CliNotifier {
    /// Notifier for the manifest-driven submit (prints step headings)
    pub const fn verbose() -> Self {
        Self {
            spinner: Mutex::new(None),
            show_steps: true,
        }
    }

    /// Notifier for the interactive wizard, which draws its own headings
    pub const fn quiet_steps() -> Self {
        Self {
            spinner: Mutex::new(None),
            show_steps: false,
        }
    }

    fn clear_spinner(&self) {
        if let Ok(mut guard) = self.spinner.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }
    }
}

#[async_trait]
impl Notifier for CliNotifier {
    async fn on_step(&self, step: Step) {
        if self.show_steps {
            println!("{} {}", arrow(), step.to_string().emphasis());
        }
    }

    async fn on_upload(&self, slot: RequirementSlot, status: UploadStatus) {
        match &status {
            UploadStatus::Started(_) => {
                let pb = spinner(&format!("{slot}: {status}"));
                if let Ok(mut guard) = self.spinner.lock() {
                    if let Some(old) = guard.replace(pb) {
                        old.finish_and_clear();
                    }
                }
            }
            UploadStatus::Stored(_) => {
                self.clear_spinner();
                println!("  {} {}: {}", check(), slot.accent(), status);
            }
            UploadStatus::Superseded => {
                self.clear_spinner();
                println!("  {} {}: {}", "-".muted(), slot.accent(), status.muted());
            }
            UploadStatus::Failed(_) => {
                self.clear_spinner();
                eprintln!("  {} {}: {}", cross(), slot, status.error());
            }
        }
    }

    async fn on_submitted(&self, receipt: &SubmitReceipt) {
        let message = receipt
            .message
            .as_deref()
            .unwrap_or("Manuscript submitted successfully");
        println!("{} {}", check(), message.success());
        if let Some(id) = &receipt.submission_id {
            println!("  Submission ID: {}", id.accent());
        }
    }

    async fn on_error(&self, error: &Error) {
        self.clear_spinner();
        eprintln!("{}: {}", "error".error(), error);
        if error.requires_login() {
            eprintln!(
                "  {}",
                "Log in on the journal website, then run `jsub auth login --token <TOKEN>`".muted()
            );
        }
    }

    async fn on_message(&self, message: &str) {
        println!("  {}", message.muted());
    }
}
