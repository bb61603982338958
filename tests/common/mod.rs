//! Shared test utilities

pub mod fixtures;
pub mod mock_notifier;
pub mod mock_service;
