//! Error types for journal-submit

use thiserror::Error;

/// Closed set of failure categories the wizard reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or rejected credential
    Unauthenticated,
    /// A local check failed before any network call
    ValidationFailure,
    /// The upload service rejected the batch or answered garbage
    UploadFailure,
    /// The submission service rejected the payload
    SubmitFailure,
    /// The backend could not serve the request
    ///
    /// Covers transport failures (connect, timeout, body read) and non-2xx or
    /// malformed answers from the read-only endpoints (topic directory,
    /// submission listing), which have no failure kind of their own.
    NetworkFailure,
    /// Local configuration, I/O or encoding problem
    Internal,
}

/// Errors that can occur in journal-submit
#[derive(Error, Debug)]
pub enum Error {
    /// No credential, or the server refused it
    #[error("not authenticated: {0}")]
    Unauthenticated(String),

    /// Client-side validation failed
    #[error("validation failed: {0}")]
    Validation(String),

    /// Upload service failure
    #[error("upload failed: {0}")]
    Upload(String),

    /// Submission service failure
    #[error("submission failed: {0}")]
    Submit(String),

    /// Non-2xx or malformed answer from the topic directory or submission
    /// listing; reported as [`ErrorKind::NetworkFailure`]
    #[error("API error: {0}")]
    Api(String),

    /// Transport failure (connect, timeout, body read)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Bad configuration value
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Category of this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthenticated(_) => ErrorKind::Unauthenticated,
            Self::Validation(_) => ErrorKind::ValidationFailure,
            Self::Upload(_) => ErrorKind::UploadFailure,
            Self::Submit(_) => ErrorKind::SubmitFailure,
            Self::Network(_) | Self::Api(_) => ErrorKind::NetworkFailure,
            Self::Config(_) | Self::Io(_) | Self::Json(_) => ErrorKind::Internal,
        }
    }

    /// Whether the user has to log in again before retrying
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::Unauthenticated(_))
    }
}

/// Result type alias for journal-submit
pub type Result<T> = std::result::Result<T, Error>;
