//! Submissions command - admin overview of every submission

use crate::cli::style::{Stylize, spinner};
use anstream::println;
use journal_submit::admin::fetch_overview;
use journal_submit::api::HttpJournalService;
use journal_submit::auth::get_session;
use journal_submit::config::ApiConfig;
use journal_submit::error::Result;
use journal_submit::types::{SubmissionRecord, SubmissionStatus};

const TITLE_WIDTH: usize = 48;

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

fn print_record(record: &SubmissionRecord) {
    let status = record.status.to_string();
    let status = match record.status {
        SubmissionStatus::Accepted => status.success().to_string(),
        SubmissionStatus::Rejected => status.error().to_string(),
        SubmissionStatus::Pending => status.warn().to_string(),
        SubmissionStatus::Other(_) => status.muted().to_string(),
    };
    let date = record
        .submitted_at()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());

    let date = format!("{date:<10}");
    println!(
        "  {} {:<width$} {}",
        date.muted(),
        truncate(&record.manuscript_title, TITLE_WIDTH),
        status,
        width = TITLE_WIDTH
    );
    println!("  {:<10} {}", "", record.topic.muted());
}

/// Print submission counts and the full listing
pub async fn run_submissions(config: ApiConfig) -> Result<()> {
    let session = get_session()?;
    let service = HttpJournalService::new(config)?;

    let pb = spinner("Loading submissions...");
    let overview = fetch_overview(&service, &session).await;
    pb.finish_and_clear();
    let overview = overview?;

    let stats = overview.stats;
    println!(
        "{}  total {}  accepted {}  pending {}  rejected {}",
        "Submissions".emphasis(),
        stats.total.accent(),
        stats.accepted.success(),
        stats.pending.warn(),
        stats.rejected.error()
    );
    println!();

    if overview.submissions.is_empty() {
        println!("{}", "No submissions yet".muted());
        return Ok(());
    }

    for record in &overview.submissions {
        print_record(record);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 6), "abcde…");
    }
}
