//! Secure credential storage using the system keyring
//!
//! The API auth token lives in the system keyring (macOS Keychain,
//! Linux Secret Service) with an in-memory cache to minimize keychain prompts.
//!
//! ## Environment Variable Fallback
//!
//! For development and CI, set `SENTRY_AUTH_TOKEN`.
//!
//! Priority: env var > cache > keyring

use std::sync::RwLock;

use keyring::Entry;
use once_cell::sync::Lazy;
use secrecy::{ExposeSecret, SecretString};

use crate::error::{Result, TagsError};

const SERVICE_NAME: &str = "project-tags";
const AUTH_TOKEN_KEY: &str = "auth_token";

/// Environment variable holding an auth token
pub const AUTH_TOKEN_ENV: &str = "SENTRY_AUTH_TOKEN";

// Option<Option<T>>:
//   - None = not yet fetched from keyring
//   - Some(None) = fetched, but no credential exists
//   - Some(Some(value)) = fetched and cached
static AUTH_TOKEN_CACHE: Lazy<RwLock<Option<Option<SecretString>>>> =
    Lazy::new(|| RwLock::new(None));

/// Credential store for secure token management
pub struct CredentialStore;

impl CredentialStore {
    /// Store the auth token securely
    ///
    /// Updates both the keyring and the in-memory cache.
    pub fn store_auth_token(token: &str) -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, AUTH_TOKEN_KEY)?;
        entry.set_password(token)?;

        if let Ok(mut cache) = AUTH_TOKEN_CACHE.write() {
            *cache = Some(Some(SecretString::from(token.to_string())));
        }

        Ok(())
    }

    /// Retrieve the auth token
    ///
    /// Priority: environment variable > cache > keyring
    pub fn get_auth_token() -> Result<Option<SecretString>> {
        if let Some(token) = Self::token_from_env() {
            return Ok(Some(token));
        }

        if let Ok(cache) = AUTH_TOKEN_CACHE.read() {
            if let Some(cached_value) = cache.as_ref() {
                return Ok(cached_value.clone());
            }
        }

        let result = Self::fetch_auth_token_from_keyring()?;

        if let Ok(mut cache) = AUTH_TOKEN_CACHE.write() {
            *cache = Some(result.clone());
        }

        Ok(result)
    }

    /// Retrieve the auth token or fail with `NotAuthenticated`
    pub fn require_auth_token() -> Result<SecretString> {
        Self::get_auth_token()?.ok_or(TagsError::NotAuthenticated)
    }

    /// Delete the stored auth token
    ///
    /// Clears both the keyring and the in-memory cache.
    pub fn delete_auth_token() -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, AUTH_TOKEN_KEY)?;
        let result = match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        };

        if let Ok(mut cache) = AUTH_TOKEN_CACHE.write() {
            *cache = Some(None);
        }

        result
    }

    /// Whether the token comes from the environment rather than the keyring
    pub fn is_env_override() -> bool {
        Self::token_from_env().is_some()
    }

    fn token_from_env() -> Option<SecretString> {
        std::env::var(AUTH_TOKEN_ENV)
            .ok()
            .filter(|t| !t.is_empty())
            .map(SecretString::from)
    }

    /// Fetch the token directly from keyring (no cache)
    fn fetch_auth_token_from_keyring() -> Result<Option<SecretString>> {
        let entry = Entry::new(SERVICE_NAME, AUTH_TOKEN_KEY)?;
        match entry.get_password() {
            Ok(password) => Ok(Some(SecretString::from(password))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(TagsError::Credential(format!(
                "Cannot access system keychain. Make sure your keyring is unlocked. ({})",
                e
            ))),
        }
    }

    /// Get a masked version of a token for display (shows first 4 and last 4 chars)
    pub fn mask_token(token: &SecretString) -> String {
        let chars: Vec<char> = token.expose_secret().chars().collect();
        if chars.len() <= 8 {
            "*".repeat(chars.len())
        } else {
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{}...{}", head, tail)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_token() {
        let short = SecretString::from("abc");
        assert_eq!(CredentialStore::mask_token(&short), "***");

        let long = SecretString::from("sntrys_1234567890abcdef");
        assert_eq!(CredentialStore::mask_token(&long), "sntr...cdef");
    }

    #[test]
    fn test_mask_token_non_ascii() {
        let token = SecretString::from("ключ_1234567890ßßßß");
        assert_eq!(CredentialStore::mask_token(&token), "ключ...ßßßß");

        let short = SecretString::from("ßßßß");
        assert_eq!(CredentialStore::mask_token(&short), "****");
    }

    #[test]
    fn test_env_token_wins() {
        // Env var path avoids keyring access
        std::env::set_var(AUTH_TOKEN_ENV, "env_token_value");
        let token = CredentialStore::get_auth_token().unwrap();
        assert_eq!(token.unwrap().expose_secret(), "env_token_value");
        assert!(CredentialStore::is_env_override());
        std::env::remove_var(AUTH_TOKEN_ENV);
    }
}
