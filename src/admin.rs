//! Admin submission overview
//!
//! The dashboard lists every submission and counts them by review status.

use crate::api::JournalService;
use crate::auth::Session;
use crate::error::Result;
use crate::types::{SubmissionRecord, SubmissionStatus};

/// Submission counts by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmissionStats {
    /// Every record, whatever its status
    pub total: usize,
    /// Accepted for publication
    pub accepted: usize,
    /// Awaiting review
    pub pending: usize,
    /// Rejected
    pub rejected: usize,
}

impl SubmissionStats {
    /// Count records by status; unknown statuses only count toward `total`
    pub fn from_records(records: &[SubmissionRecord]) -> Self {
        records.iter().fold(
            Self {
                total: records.len(),
                ..Self::default()
            },
            |mut stats, record| {
                match record.status {
                    SubmissionStatus::Accepted => stats.accepted += 1,
                    SubmissionStatus::Pending => stats.pending += 1,
                    SubmissionStatus::Rejected => stats.rejected += 1,
                    SubmissionStatus::Other(_) => {}
                }
                stats
            },
        )
    }
}

/// Listing plus counts
#[derive(Debug, Clone)]
pub struct SubmissionOverview {
    /// Records, newest first when the server sent dates
    pub submissions: Vec<SubmissionRecord>,
    /// Counts over `submissions`
    pub stats: SubmissionStats,
}

/// Fetch every submission and summarise it
pub async fn fetch_overview(
    service: &dyn JournalService,
    session: &Session,
) -> Result<SubmissionOverview> {
    let mut submissions = service.list_submissions(session).await?;
    // Undated records sort last
    submissions.sort_by(|a, b| b.submitted_at().cmp(&a.submitted_at()));
    let stats = SubmissionStats::from_records(&submissions);
    Ok(SubmissionOverview { submissions, stats })
}
