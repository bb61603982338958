//! Interactive wizard - default when no subcommand is given

use crate::cli::manifest::read_uploads;
use crate::cli::notify::CliNotifier;
use crate::cli::style::{Stylize, bullet, check, file_link};
use anstream::println;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use journal_submit::api::HttpJournalService;
use journal_submit::auth::find_session;
use journal_submit::config::ApiConfig;
use journal_submit::error::{Error, Result};
use journal_submit::types::{AuthorField, DeclarationKind, RequirementSlot};
use journal_submit::wizard::{Event, Notifier, Step, Wizard, draft_issues, review_summary};
use std::path::PathBuf;

fn prompt_error(e: dialoguer::Error) -> Error {
    Error::Io(std::io::Error::other(e.to_string()))
}

fn ask(prompt: &str, current: &str) -> Result<String> {
    Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)
}

fn choose(prompt: &str, items: &[String], default: usize) -> Result<usize> {
    Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(items)
        .default(default.min(items.len().saturating_sub(1)))
        .interact()
        .map_err(prompt_error)
}

/// Run the interactive wizard
///
/// Returns `Ok(false)` if the user quit without submitting.
pub async fn run_wizard(config: ApiConfig) -> Result<bool> {
    let session = find_session()?;
    let service = HttpJournalService::new(config)?;
    let notifier = CliNotifier::quiet_steps();

    let mut wizard = match Wizard::mount(session, &service, &notifier).await {
        Ok(w) => w,
        Err(e) => {
            notifier.on_error(&e).await;
            return Ok(false);
        }
    };

    println!("{}", "Submit Your Research".emphasis());

    loop {
        println!();
        println!("{}", wizard.step().to_string().emphasis());

        let submitted = match wizard.step() {
            Step::Details => {
                details_step(&mut wizard)?;
                navigate(&mut wizard).await?
            }
            Step::Authors => {
                authors_step(&mut wizard)?;
                navigate(&mut wizard).await?
            }
            Step::Files => {
                files_step(&mut wizard).await?;
                navigate(&mut wizard).await?
            }
            Step::Review => review_step(&mut wizard).await?,
        };

        match submitted {
            Some(done) => return Ok(done),
            None => continue,
        }
    }
}

fn details_step(wizard: &mut Wizard<'_>) -> Result<()> {
    let title = ask("Article title", &wizard.draft().manuscript_title)?;
    wizard.dispatch(Event::SetTitle(title));

    let names: Vec<String> = wizard.topics().iter().map(|t| t.name.clone()).collect();
    let current = names
        .iter()
        .position(|n| *n == wizard.draft().topic)
        .unwrap_or(0);
    let picked = choose("Research topic", &names, current)?;
    wizard.dispatch(Event::SetTopic(names[picked].clone()));

    let abstract_text = ask("Abstract (max 300 words)", &wizard.draft().abstract_text)?;
    wizard.dispatch(Event::SetAbstract(abstract_text));
    println!(
        "  {}",
        format!("{}/300 words", wizard.draft().abstract_word_count()).muted()
    );

    let keywords = ask("Keywords (comma-separated)", &wizard.draft().keywords)?;
    wizard.dispatch(Event::SetKeywords(keywords));
    Ok(())
}

fn authors_step(wizard: &mut Wizard<'_>) -> Result<()> {
    loop {
        let mut items: Vec<String> = wizard
            .draft()
            .authors
            .iter()
            .enumerate()
            .map(|(i, a)| {
                let name = if a.full_name.is_empty() {
                    "(blank)"
                } else {
                    a.full_name.as_str()
                };
                let role = if i == 0 { " - corresponding" } else { "" };
                format!("Edit author {}: {name}{role}", i + 1)
            })
            .collect();
        items.push("Add another author".to_string());
        items.push("Done".to_string());

        let picked = choose("Authors", &items, items.len() - 1)?;
        let author_count = wizard.draft().authors.len();

        if picked < author_count {
            let author = wizard.draft().authors[picked].clone();
            let name = ask("Full name", &author.full_name)?;
            let email = ask("Email address", &author.email)?;
            let affiliation = ask("Institutional affiliation", &author.affiliation)?;
            wizard.update_author(picked, AuthorField::FullName, &name);
            wizard.update_author(picked, AuthorField::Email, &email);
            wizard.update_author(picked, AuthorField::Affiliation, &affiliation);
        } else if picked == author_count {
            wizard.add_author();
        } else {
            return Ok(());
        }
    }
}

async fn files_step(wizard: &mut Wizard<'_>) -> Result<()> {
    loop {
        for slot in RequirementSlot::ALL {
            let tag = if slot.is_required() {
                "Required".warn().to_string()
            } else {
                "Optional".muted().to_string()
            };
            println!("  {} {} [{tag}]", bullet(), slot.emphasis());
            println!("    {}", slot.description().muted());
            for file in wizard.draft().files_for(slot) {
                println!(
                    "    {} {} {}",
                    check(),
                    file.file_name,
                    file_link(&file.file_url).muted()
                );
            }
        }

        let mut items: Vec<String> = RequirementSlot::ALL
            .iter()
            .map(|slot| format!("Upload {slot}"))
            .collect();
        items.push("Done".to_string());

        let picked = choose("Files (max 50MB each; .docx .pdf .png .jpg .tiff)", &items, items.len() - 1)?;
        let Some(slot) = RequirementSlot::ALL.get(picked).copied() else {
            return Ok(());
        };

        let raw = ask("File path(s), comma-separated", "")?;
        let paths: Vec<PathBuf> = raw
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .collect();

        match read_uploads(&paths).await {
            // Failures are reported by the notifier; stay on the step
            Ok(files) => {
                let _ = wizard.upload(slot, files).await;
            }
            Err(e) => println!("  {}", e.error()),
        }
    }
}

/// Returns `Some(true)` once submitted, `Some(false)` if the user quit
async fn review_step(wizard: &mut Wizard<'_>) -> Result<Option<bool>> {
    println!("{}", review_summary(wizard.draft()));
    println!();
    println!("{}", "Required Declarations".emphasis());

    for kind in DeclarationKind::ALL {
        let current = wizard.draft().declarations.get(kind);
        let accepted = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(kind.statement())
            .default(current)
            .interact()
            .map_err(prompt_error)?;
        if accepted != current {
            wizard.toggle_declaration(kind);
        }
    }

    let mut items = vec!["Previous".to_string(), "Quit without submitting".to_string()];
    if wizard.can_submit() {
        items.insert(0, "Submit manuscript".to_string());
    } else if !wizard.draft().declarations.all_accepted() {
        println!(
            "  {}",
            "Accept all three declarations to enable submission".warn()
        );
    } else {
        for issue in draft_issues(wizard.draft(), wizard.topics()) {
            println!("  {} {}", bullet(), issue.warn());
        }
    }

    let picked = items[choose("Review & Submit", &items, 0)?].clone();
    match picked.as_str() {
        "Submit manuscript" => {
            // The draft is kept on failure, so loop back to retry
            Ok(wizard.submit().await.ok().map(|_| true))
        }
        "Previous" => {
            wizard.previous().await;
            Ok(None)
        }
        _ => Ok(Some(false)),
    }
}

/// Next/previous prompt shared by the first three steps
async fn navigate(wizard: &mut Wizard<'_>) -> Result<Option<bool>> {
    let mut items = vec!["Next step".to_string()];
    if wizard.step() != Step::Details {
        items.push("Previous".to_string());
    }
    items.push("Quit".to_string());

    let picked = items[choose("Continue", &items, 0)?].clone();
    match picked.as_str() {
        "Next step" => {
            // Validation failures are reported by the notifier; redo the step
            let _ = wizard.next().await;
            Ok(None)
        }
        "Previous" => {
            wizard.previous().await;
            Ok(None)
        }
        _ => Ok(Some(false)),
    }
}
