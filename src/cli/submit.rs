//! Submit command - run the wizard from a manifest

use crate::cli::manifest::{Manifest, read_uploads};
use crate::cli::notify::CliNotifier;
use crate::cli::style::{Stylize, check};
use anstream::println;
use journal_submit::api::HttpJournalService;
use journal_submit::auth::find_session;
use journal_submit::config::ApiConfig;
use journal_submit::error::{Error, Result};
use journal_submit::types::{AuthorField, DeclarationKind, RequirementSlot};
use journal_submit::wizard::{
    Event, NavigationPolicy, Notifier, Step, Wizard, check_step, check_upload_batch,
    review_summary,
};
use std::path::Path;

/// Run the submit command
///
/// Returns `Ok(false)` when the wizard stopped on a reported failure.
pub async fn run_submit(
    config: ApiConfig,
    manifest_path: &Path,
    dry_run: bool,
    lenient: bool,
) -> Result<bool> {
    let manifest = Manifest::load(manifest_path)?;
    let session = find_session()?;
    let service = HttpJournalService::new(config)?;
    let notifier = CliNotifier::verbose();

    let policy = if lenient {
        NavigationPolicy::Lenient
    } else {
        NavigationPolicy::Strict
    };

    let mut wizard = match Wizard::mount(session, &service, &notifier).await {
        Ok(w) => w.with_policy(policy),
        Err(e) => {
            notifier.on_error(&e).await;
            return Ok(false);
        }
    };

    // Step 1: details
    wizard.dispatch(Event::SetTitle(manifest.manuscript_title.clone()));
    wizard.dispatch(Event::SetTopic(manifest.topic.clone()));
    wizard.dispatch(Event::SetAbstract(manifest.abstract_text.clone()));
    wizard.dispatch(Event::SetKeywords(manifest.keywords.clone()));
    if wizard.next().await.is_err() {
        return Ok(false);
    }

    // Step 2: authors
    for (index, author) in manifest.authors.iter().enumerate() {
        if index > 0 {
            wizard.add_author();
        }
        wizard.update_author(index, AuthorField::FullName, &author.full_name);
        wizard.update_author(index, AuthorField::Email, &author.email);
        wizard.update_author(index, AuthorField::Affiliation, &author.affiliation);
    }
    if wizard.next().await.is_err() {
        return Ok(false);
    }

    // Step 3: files
    if dry_run {
        return dry_run_report(&wizard, &manifest).await;
    }

    for (slot, paths) in &manifest.files {
        let files = match read_uploads(paths).await {
            Ok(files) => files,
            Err(e) => {
                notifier.on_error(&e).await;
                return Ok(false);
            }
        };
        if wizard.upload(*slot, files).await.is_err() {
            return Ok(false);
        }
    }
    if wizard.next().await.is_err() {
        return Ok(false);
    }

    // Step 4: review and declarations
    for kind in DeclarationKind::ALL {
        if manifest.declarations.get(kind) {
            wizard.toggle_declaration(kind);
        }
    }

    println!();
    println!("{}", review_summary(wizard.draft()));
    println!();

    if !wizard.can_submit() {
        let e = Error::Validation(
            "all three declarations (ethics, conflicts, copyright) must be true".to_string(),
        );
        notifier.on_error(&e).await;
        return Ok(false);
    }

    Ok(wizard.submit().await.is_ok())
}

/// Validate the remaining steps locally without uploading or submitting
async fn dry_run_report(wizard: &Wizard<'_>, manifest: &Manifest) -> Result<bool> {
    let mut ok = true;

    println!();
    println!("{}", "Dry run - nothing will be uploaded or submitted".emphasis());

    for (slot, paths) in &manifest.files {
        let files = read_uploads(paths).await?;
        match check_upload_batch(&files) {
            Ok(()) => {
                let total: u64 = files.iter().map(|f| f.size()).sum();
                println!(
                    "  {} {}: {} file{} ({} bytes)",
                    check(),
                    slot.accent(),
                    files.len(),
                    if files.len() == 1 { "" } else { "s" },
                    total
                );
            }
            Err(e) => {
                println!("  {}: {}", slot.accent(), e.error());
                ok = false;
            }
        }
    }

    for slot in RequirementSlot::ALL {
        if slot.is_required() && !manifest.files.contains_key(&slot) {
            println!("  {}", format!("{slot} is required").warn());
            ok = false;
        }
    }

    if !manifest.declarations.all_accepted() {
        println!(
            "  {}",
            "All declarations must be accepted before submitting".warn()
        );
        ok = false;
    }

    if let Err(e) = check_step(Step::Details, wizard.draft(), wizard.topics()) {
        println!("  {}", e.error());
        ok = false;
    }

    println!();
    println!("{}", review_summary(wizard.draft()));

    Ok(ok)
}
