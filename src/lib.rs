//! journal-submit - manuscript submission client
//!
//! Drives the journal's four-step submission wizard against its REST backend:
//! manuscript details, authors, file uploads, then review and an atomic submit.

pub mod admin;
pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod types;
pub mod wizard;
