//! CLI commands
//!
//! Command implementations for the `jsub` binary.

mod auth;
mod manifest;
mod notify;
mod style;
mod submissions;
mod submit;
mod topics;
mod wizard;

pub use auth::{AuthAction, run_auth};
pub use submissions::run_submissions;
pub use submit::run_submit;
pub use topics::run_topics;
pub use wizard::run_wizard;
