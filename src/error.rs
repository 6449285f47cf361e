//! Custom error types for project-tags
//!
//! User-friendly error messages for all failure scenarios.

use thiserror::Error;

/// Main error type for the project-tags application
#[derive(Error, Debug)]
pub enum TagsError {
    /// No API token available
    #[error("You are not logged in.\n\n  → Run 'ptags auth login' to store an auth token.\n  → Or set the SENTRY_AUTH_TOKEN environment variable.")]
    NotAuthenticated,

    /// Token is valid but lacks the required scope
    #[error("Permission denied: {0}\n\n  → Make sure your auth token has the 'project:write' scope.")]
    PermissionDenied(String),

    /// Organization or project does not exist (or is not visible)
    #[error("Project '{org}/{project}' not found.\n\n  → Check the organization and project slugs with 'ptags config get org' / 'ptags config get project'.")]
    ProjectNotFound { org: String, project: String },

    /// Tag key does not exist on the project
    #[error("Tag '{0}' not found.\n\n  → Run 'ptags tags list' to see available tags.")]
    TagNotFound(String),

    /// Tag is protected by the server
    #[error("Tag '{0}' cannot be deleted.\n\n  → Built-in tags are managed by the server.")]
    TagProtected(String),

    /// Tag key is syntactically invalid
    #[error("Invalid tag key '{0}'.\n\n  → Tag keys may only contain letters, digits, '_', '.', ':' and '-' (max 32 characters).")]
    InvalidTagKey(String),

    /// Server-side rate limiting
    #[error("API rate limit exceeded.\n\n  → Please wait a few minutes and try again.")]
    RateLimited,

    /// Any other non-2xx API response
    #[error("API request failed ({status}): {detail}")]
    Api { status: u16, detail: String },

    /// Organization / project could not be resolved
    #[error("No project selected.\n\n  → Pass --org and --project, set SENTRY_ORG / SENTRY_PROJECT,\n  → or run 'ptags config set org <slug>' and 'ptags config set project <slug>'.")]
    MissingProject,

    /// Base URL could not be parsed or extended
    #[error("Invalid API URL: {0}\n\n  → Expected something like https://sentry.io/api/0/")]
    InvalidUrl(String),

    /// Credential storage error
    #[error("Cannot access secure storage: {0}\n\n  → On macOS: Make sure Keychain Access is available.\n  → On Linux: Ensure a secret service (like gnome-keyring) is running.")]
    Credential(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    /// Network request error
    #[error("Network request failed: {0}\n\n  → Check your internet connection.")]
    Network(#[from] reqwest::Error),

    /// TOML serialization/deserialization error
    #[error("Configuration file is invalid: {0}")]
    Toml(String),

    /// Terminal/TUI error
    #[error("Terminal error: {0}\n\n  → Try resizing your terminal or restarting it.")]
    Terminal(String),

    /// Invalid input from user
    #[error("{0}")]
    InvalidInput(String),
}

impl From<keyring::Error> for TagsError {
    fn from(err: keyring::Error) -> Self {
        TagsError::Credential(err.to_string())
    }
}

impl From<toml::de::Error> for TagsError {
    fn from(err: toml::de::Error) -> Self {
        TagsError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for TagsError {
    fn from(err: toml::ser::Error) -> Self {
        TagsError::Toml(err.to_string())
    }
}

impl From<url::ParseError> for TagsError {
    fn from(err: url::ParseError) -> Self {
        TagsError::InvalidUrl(err.to_string())
    }
}

/// Result type alias using TagsError
pub type Result<T> = std::result::Result<T, TagsError>;
