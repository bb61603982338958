//! Auth command - store, inspect and remove the bearer token

use crate::cli::style::{Stylize, check};
use anstream::println;
use journal_submit::auth::{
    AuthSource, TOKEN_ENV_VAR, default_token_path, find_session, remove_token, write_token,
};
use journal_submit::error::{Error, Result};
use std::path::PathBuf;

/// Auth subcommand selected on the command line
#[derive(Debug, Clone)]
pub enum AuthAction {
    Login { token: String },
    Logout,
    Status,
    Setup,
}

fn token_path() -> Result<PathBuf> {
    default_token_path()
        .ok_or_else(|| Error::Config("could not determine the user config directory".to_string()))
}

/// Run the login command
pub fn run_auth_login(token: &str) -> Result<()> {
    if token.trim().is_empty() {
        return Err(Error::Validation("token must not be empty".to_string()));
    }
    let path = token_path()?;
    write_token(&path, token)?;
    println!("{} Token saved to {}", check(), path.display().accent());
    Ok(())
}

/// Run the logout command
pub fn run_auth_logout() -> Result<()> {
    let path = token_path()?;
    if remove_token(&path)? {
        println!("{} Removed {}", check(), path.display().accent());
    } else {
        println!("{}", "No stored token".muted());
    }
    if std::env::var_os(TOKEN_ENV_VAR).is_some() {
        println!(
            "  {}",
            format!("{TOKEN_ENV_VAR} is still set in the environment").warn()
        );
    }
    Ok(())
}

/// Run the status command
pub fn run_auth_status() -> Result<()> {
    match find_session()? {
        Some(session) => {
            let source = match session.source() {
                AuthSource::EnvVar => format!("{TOKEN_ENV_VAR} environment variable"),
                AuthSource::File => token_path()?.display().to_string(),
                AuthSource::Explicit => "command line".to_string(),
            };
            println!("{} Signed in", check());
            println!("Token source: {}", source.accent());
        }
        None => {
            println!("{}", "Not signed in".warn());
            println!("  {}", "Run `jsub auth setup` for instructions".muted());
        }
    }
    Ok(())
}

/// Run the setup command (show instructions)
pub fn run_auth_setup() {
    println!("{}", "Journal Authentication Setup".emphasis());
    println!("============================");
    println!();
    println!("Option 1: Stored token (recommended)");
    println!("  Log in on the journal website and copy your session token");
    println!("  Run: jsub auth login --token <TOKEN>");
    println!();
    println!("Option 2: Environment variable");
    println!("  Set {TOKEN_ENV_VAR}");
    println!();
    println!("For a different backend:");
    println!("  Set JOURNAL_API_URL or pass --api-url");
}

/// Dispatch an auth subcommand
pub fn run_auth(action: AuthAction) -> Result<()> {
    match action {
        AuthAction::Login { token } => run_auth_login(&token),
        AuthAction::Logout => run_auth_logout(),
        AuthAction::Status => run_auth_status(),
        AuthAction::Setup => {
            run_auth_setup();
            Ok(())
        }
    }
}
