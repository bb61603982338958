//! Journal backend service using reqwest

use crate::api::wire::{SubmissionList, SubmitResponse, TopicList, UploadResponse, server_message};
use crate::api::{IDEMPOTENCY_HEADER, JournalService};
use crate::auth::Session;
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::types::{
    FileToUpload, RequirementSlot, SubmissionRecord, SubmitReceipt, Topic, UploadedFile,
};
use crate::wizard::SubmissionPayload;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, info};

/// Generic notice when the submission service gives no reason
pub const GENERIC_SUBMIT_FAILURE: &str = "Submission failed. Please try again.";

/// Journal backend over HTTP+JSON
pub struct HttpJournalService {
    client: Client,
    config: ApiConfig,
}

impl HttpJournalService {
    /// Create a new service; every request uses the configured timeout
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("cannot build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }
}

fn is_auth_rejection(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}

/// Read the body of an authenticated response, mapping 401/403 to `Unauthenticated`
async fn authed_body(response: Response) -> Result<(StatusCode, String)> {
    let status = response.status();
    let body = response.text().await?;

    if is_auth_rejection(status) {
        return Err(Error::Unauthenticated(
            server_message(&body).unwrap_or_else(|| format!("server returned {status}")),
        ));
    }

    Ok((status, body))
}

#[async_trait]
impl JournalService for HttpJournalService {
    async fn list_topics(&self) -> Result<Vec<Topic>> {
        let url = self.config.endpoint("/topic");
        debug!(%url, "fetching topics");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::Api(server_message(&body).unwrap_or_else(|| {
                format!("topic directory returned {status}")
            })));
        }

        let topics: TopicList = serde_json::from_str(&body)
            .map_err(|e| Error::Api(format!("malformed topic list: {e}")))?;

        Ok(topics.data.into_iter().map(Topic::from).collect())
    }

    async fn upload_files(
        &self,
        session: &Session,
        slot: RequirementSlot,
        files: &[FileToUpload],
    ) -> Result<Vec<UploadedFile>> {
        let url = self.config.endpoint("/submission/upload-multiple");
        debug!(%url, slot = %slot, count = files.len(), "uploading files");

        let mut form = Form::new();
        for file in files {
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.file_name.clone())
                .mime_str(&file.mime_type)
                .map_err(|e| Error::Upload(format!("invalid MIME type {}: {e}", file.mime_type)))?;
            form = form.part("files", part);
        }

        let response = self
            .client
            .post(&url)
            .bearer_auth(session.token())
            .multipart(form)
            .send()
            .await?;

        let (status, body) = authed_body(response).await?;

        if !status.is_success() {
            return Err(Error::Upload(server_message(&body).unwrap_or_else(|| {
                format!("upload service returned {status}")
            })));
        }

        let uploaded: UploadResponse = serde_json::from_str(&body)
            .map_err(|_| Error::Upload("upload service returned a malformed response".to_string()))?;

        if uploaded.files.len() != files.len() {
            return Err(Error::Upload(format!(
                "sent {} file{}, upload service described {}",
                files.len(),
                if files.len() == 1 { "" } else { "s" },
                uploaded.files.len()
            )));
        }

        let stored: Vec<UploadedFile> = uploaded
            .files
            .into_iter()
            .zip(files)
            .map(|(desc, sent)| desc.into_uploaded(sent, slot))
            .collect::<Option<_>>()
            .ok_or_else(|| {
                Error::Upload("upload service returned a file without a name or URL".to_string())
            })?;

        info!(slot = %slot, count = stored.len(), "files uploaded");
        Ok(stored)
    }

    async fn create_submission(
        &self,
        session: &Session,
        payload: &SubmissionPayload,
        idempotency_key: &str,
    ) -> Result<SubmitReceipt> {
        let url = self.config.endpoint("/submission");
        debug!(%url, title = %payload.manuscript_title, "creating submission");

        let response = self
            .client
            .post(&url)
            .bearer_auth(session.token())
            .header(IDEMPOTENCY_HEADER, idempotency_key)
            .json(payload)
            .send()
            .await?;

        let (status, body) = authed_body(response).await?;

        if !status.is_success() {
            return Err(Error::Submit(
                server_message(&body).unwrap_or_else(|| GENERIC_SUBMIT_FAILURE.to_string()),
            ));
        }

        // An empty 2xx body counts as success
        let parsed: SubmitResponse = if body.trim().is_empty() {
            SubmitResponse::default()
        } else {
            serde_json::from_str(&body).unwrap_or_default()
        };

        if parsed.rejected() {
            return Err(Error::Submit(
                parsed
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| GENERIC_SUBMIT_FAILURE.to_string()),
            ));
        }

        let receipt = SubmitReceipt {
            submission_id: parsed.submission_id(),
            message: parsed.message,
        };
        info!(id = ?receipt.submission_id, "submission created");
        Ok(receipt)
    }

    async fn list_submissions(&self, session: &Session) -> Result<Vec<SubmissionRecord>> {
        let url = self.config.endpoint("/submission");
        debug!(%url, "listing submissions");

        let response = self
            .client
            .get(&url)
            .bearer_auth(session.token())
            .send()
            .await?;

        let (status, body) = authed_body(response).await?;

        if !status.is_success() {
            return Err(Error::Api(server_message(&body).unwrap_or_else(|| {
                format!("submission listing returned {status}")
            })));
        }

        let list: SubmissionList = serde_json::from_str(&body)
            .map_err(|e| Error::Api(format!("malformed submission list: {e}")))?;

        Ok(list.into_records())
    }

    fn config(&self) -> &ApiConfig {
        &self.config
    }
}
