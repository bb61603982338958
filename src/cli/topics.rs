//! Topics command - list the research topic directory

use crate::cli::style::{Stylize, bullet, spinner};
use anstream::println;
use journal_submit::api::{HttpJournalService, JournalService};
use journal_submit::config::ApiConfig;
use journal_submit::error::Result;

/// Print every research topic the backend offers
pub async fn run_topics(config: ApiConfig) -> Result<()> {
    let service = HttpJournalService::new(config)?;

    let pb = spinner("Loading research topics...");
    let topics = service.list_topics().await;
    pb.finish_and_clear();
    let topics = topics?;

    if topics.is_empty() {
        println!("{}", "No research topics configured".muted());
        return Ok(());
    }

    println!("{} ({})", "Research topics".emphasis(), topics.len().accent());
    for topic in &topics {
        println!("  {} {}", bullet(), topic.name);
    }
    Ok(())
}
