//! Notifier that records every notice

#![allow(dead_code)]

use async_trait::async_trait;
use journal_submit::error::{Error, ErrorKind};
use journal_submit::types::{RequirementSlot, SubmitReceipt};
use journal_submit::wizard::{Notifier, Step, UploadStatus};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Step(Step),
    Upload(RequirementSlot, UploadStatus),
    Submitted(Option<String>),
    Error(ErrorKind, String),
    Message(String),
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<(ErrorKind, String)> {
        self.notices()
            .into_iter()
            .filter_map(|n| match n {
                Notice::Error(kind, msg) => Some((kind, msg)),
                _ => None,
            })
            .collect()
    }

    pub fn steps(&self) -> Vec<Step> {
        self.notices()
            .into_iter()
            .filter_map(|n| match n {
                Notice::Step(step) => Some(step),
                _ => None,
            })
            .collect()
    }

    fn push(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn on_step(&self, step: Step) {
        self.push(Notice::Step(step));
    }

    async fn on_upload(&self, slot: RequirementSlot, status: UploadStatus) {
        self.push(Notice::Upload(slot, status));
    }

    async fn on_submitted(&self, receipt: &SubmitReceipt) {
        self.push(Notice::Submitted(receipt.submission_id.clone()));
    }

    async fn on_error(&self, error: &Error) {
        self.push(Notice::Error(error.kind(), error.to_string()));
    }

    async fn on_message(&self, message: &str) {
        self.push(Notice::Message(message.to_string()));
    }
}
