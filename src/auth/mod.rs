//! Session credential handling
//!
//! The journal backend authenticates with a bearer token. The token is
//! obtained by the web login flow; this crate only reads and stores it.

mod store;

pub use store::{default_token_path, read_token, remove_token, write_token};

use crate::error::{Error, Result};
use std::env;
use std::fmt;
use std::path::Path;

/// Environment variable holding a bearer token
pub const TOKEN_ENV_VAR: &str = "JOURNAL_TOKEN";

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from environment variable
    EnvVar,
    /// Token from the stored token file
    File,
    /// Token handed in directly by the caller
    Explicit,
}

/// Bearer credential injected into the wizard and every service call
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    source: AuthSource,
}

impl Session {
    /// Wrap a token supplied by the caller
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            source: AuthSource::Explicit,
        }
    }

    /// The raw bearer token
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Where the token came from
    pub const fn source(&self) -> AuthSource {
        self.source
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Look up a stored credential
///
/// Priority:
/// 1. `JOURNAL_TOKEN` environment variable
/// 2. Token file in the user config directory
pub fn find_session() -> Result<Option<Session>> {
    let env_token = env::var(TOKEN_ENV_VAR).ok();
    let path = default_token_path();
    session_from(env_token, path.as_deref())
}

/// Like [`find_session`], but a missing credential is an error
pub fn get_session() -> Result<Session> {
    find_session()?.ok_or_else(|| {
        Error::Unauthenticated(
            "No stored credential. Log in on the journal website, then run `jsub auth login --token <TOKEN>` or set JOURNAL_TOKEN"
                .to_string(),
        )
    })
}

/// Resolve a session from an optional env value and an optional token file
pub fn session_from(env_token: Option<String>, token_file: Option<&Path>) -> Result<Option<Session>> {
    if let Some(token) = env_token.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) {
        return Ok(Some(Session {
            token,
            source: AuthSource::EnvVar,
        }));
    }

    if let Some(path) = token_file {
        if let Some(token) = read_token(path)? {
            return Ok(Some(Session {
                token,
                source: AuthSource::File,
            }));
        }
    }

    Ok(None)
}
