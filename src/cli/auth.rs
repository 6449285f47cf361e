//! Authentication CLI command handlers

use std::io::{self, Write};

use crate::cli::commands::AuthCommand;
use crate::core::browser::open_browser;
use crate::core::credentials::{CredentialStore, AUTH_TOKEN_ENV};
use crate::error::{Result, TagsError};

/// Page where users create auth tokens
const TOKEN_URL: &str = "https://sentry.io/settings/account/api/auth-tokens/";

/// Handle authentication commands
pub fn handle_auth(command: AuthCommand) -> Result<()> {
    match command {
        AuthCommand::Login => handle_login(),
        AuthCommand::Logout => handle_logout(),
        AuthCommand::Status => handle_status(),
    }
}

/// Store an auth token pasted by the user
fn handle_login() -> Result<()> {
    if CredentialStore::is_env_override() {
        println!("✓ Using the token from {}.", AUTH_TOKEN_ENV);
        println!();
        println!("  Unset it to store a token in the keyring instead.");
        return Ok(());
    }

    println!("Auth Token Login");
    println!("================");
    println!();
    println!("To create a token:");
    println!("  1. Go to: {}", TOKEN_URL);
    println!("  2. Create a token with the 'project:read' and 'project:write' scopes");
    println!("  3. Copy it");
    println!();

    if open_browser(TOKEN_URL) {
        println!("✓ Browser opened to token creation page.");
        println!();
    }

    print!("Paste your token here: ");
    io::stdout().flush()?;

    let mut token = String::new();
    io::stdin().read_line(&mut token)?;
    let token = token.trim();

    if token.is_empty() {
        return Err(TagsError::InvalidInput("Token cannot be empty".to_string()));
    }

    CredentialStore::store_auth_token(token)?;
    tracing::info!("auth token stored");

    println!("\n✓ Token stored in the system keyring.");
    Ok(())
}

fn handle_logout() -> Result<()> {
    CredentialStore::delete_auth_token()?;
    println!("✓ Stored token removed.");

    if CredentialStore::is_env_override() {
        println!("  Note: {} is still set and will be used.", AUTH_TOKEN_ENV);
    }
    Ok(())
}

fn handle_status() -> Result<()> {
    println!("Authentication Status:");

    match CredentialStore::get_auth_token()? {
        Some(token) => {
            let source = if CredentialStore::is_env_override() {
                AUTH_TOKEN_ENV
            } else {
                "keyring"
            };
            println!("  Authenticated ({})", source);
            println!("  Token: {}", CredentialStore::mask_token(&token));
        }
        None => {
            println!("  Not authenticated");
            println!();
            println!("  Run 'ptags auth login' to store a token.");
        }
    }

    Ok(())
}
