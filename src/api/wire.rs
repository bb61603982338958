//! JSON bodies exchanged with the backend
//!
//! The backend is not consistent about field names (the upload service passes
//! through storage-provider names, listings may carry both `id` and `_id`).
//! Each spelling is read into its own field and merged afterwards, so a body
//! carrying both is still accepted.

use crate::types::{
    FileToUpload, RequirementSlot, SubmissionRecord, SubmissionStatus, Topic, UploadedFile,
};
use serde::Deserialize;
use serde_json::Value;

fn value_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First usable identifier, preferring `id` over `_id`
fn either_id(id: Option<&Value>, mongo_id: Option<&Value>) -> Option<String> {
    id.and_then(value_id).or_else(|| mongo_id.and_then(value_id))
}

#[derive(Deserialize)]
pub(crate) struct TopicList {
    #[serde(default)]
    pub data: Vec<TopicEntry>,
}

#[derive(Deserialize)]
pub(crate) struct TopicEntry {
    #[serde(default)]
    id: Option<Value>,
    #[serde(rename = "_id", default)]
    mongo_id: Option<Value>,
    name: String,
}

impl From<TopicEntry> for Topic {
    fn from(t: TopicEntry) -> Self {
        Self {
            id: either_id(t.id.as_ref(), t.mongo_id.as_ref()).unwrap_or_default(),
            name: t.name,
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct UploadResponse {
    pub files: Vec<FileDescriptor>,
}

/// One stored file; camelCase names win over storage-provider names
#[derive(Deserialize)]
pub(crate) struct FileDescriptor {
    #[serde(rename = "fileName", default)]
    file_name: Option<String>,
    #[serde(default)]
    original_filename: Option<String>,
    #[serde(rename = "fileUrl", default)]
    file_url: Option<String>,
    #[serde(default)]
    secure_url: Option<String>,
    #[serde(rename = "mimeType", default)]
    mime_type: Option<String>,
    #[serde(rename = "type", default)]
    storage_type: Option<String>,
    #[serde(rename = "fileSize", default)]
    file_size: Option<u64>,
    #[serde(default)]
    bytes: Option<u64>,
}

impl FileDescriptor {
    /// Merge the descriptor with the file that was sent for it
    ///
    /// `None` if the descriptor names neither a file name nor a URL. MIME
    /// type and size fall back to what was sent.
    pub fn into_uploaded(self, sent: &FileToUpload, slot: RequirementSlot) -> Option<UploadedFile> {
        Some(UploadedFile {
            file_name: self.file_name.or(self.original_filename)?,
            file_url: self.file_url.or(self.secure_url)?,
            mime_type: self
                .mime_type
                .or(self.storage_type)
                .unwrap_or_else(|| sent.mime_type.clone()),
            file_size: self.file_size.or(self.bytes).unwrap_or_else(|| sent.size()),
            requirement: slot,
        })
    }
}

#[derive(Deserialize, Default)]
pub(crate) struct SubmitResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub ok: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl SubmitResponse {
    /// Explicit `success: false` or `ok: false` in a 2xx body
    pub fn rejected(&self) -> bool {
        self.success == Some(false) || self.ok == Some(false)
    }

    pub fn submission_id(&self) -> Option<String> {
        let data = self.data.as_ref()?;
        data.get("id")
            .or_else(|| data.get("_id"))
            .and_then(value_id)
    }
}

/// Error payload; only the message is of interest
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Server-provided message from an error body, if any
pub(crate) fn server_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .message
        .or(parsed.error)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum SubmissionList {
    Wrapped { data: Vec<SubmissionEntry> },
    Bare(Vec<SubmissionEntry>),
}

impl SubmissionList {
    pub fn into_records(self) -> Vec<SubmissionRecord> {
        let entries = match self {
            Self::Wrapped { data } => data,
            Self::Bare(entries) => entries,
        };
        entries.into_iter().map(SubmissionRecord::from).collect()
    }
}

#[derive(Deserialize)]
pub(crate) struct SubmissionEntry {
    #[serde(default)]
    id: Option<Value>,
    #[serde(rename = "_id", default)]
    mongo_id: Option<Value>,
    #[serde(rename = "manuscriptTitle", default)]
    manuscript_title: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    topic: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(rename = "createdAt", default)]
    created_at: Option<String>,
}

impl From<SubmissionEntry> for SubmissionRecord {
    fn from(e: SubmissionEntry) -> Self {
        Self {
            id: either_id(e.id.as_ref(), e.mongo_id.as_ref()).unwrap_or_default(),
            manuscript_title: e.manuscript_title.or(e.title).unwrap_or_default(),
            topic: e.topic.or(e.category).unwrap_or_default(),
            status: e
                .status
                .map_or(SubmissionStatus::Pending, SubmissionStatus::from),
            date: e.date.or(e.created_at),
        }
    }
}
