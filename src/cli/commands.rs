//! CLI command definitions using clap
//!
//! Defines the command structure for the `ptags` CLI tool.

use clap::{Args, Parser, Subcommand, ValueEnum};

/// project-tags - manage the tag keys of a project
///
/// Run without arguments to launch the TUI mode.
#[derive(Parser, Debug)]
#[command(name = "ptags", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Organization / project selection shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Organization slug
    #[arg(long, global = true, env = "SENTRY_ORG")]
    pub org: Option<String>,

    /// Project slug
    #[arg(long, global = true, env = "SENTRY_PROJECT")]
    pub project: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List and remove tag keys
    Tags(TagsArgs),

    /// Manage the auth token
    Auth(AuthArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Tag Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Tag commands
#[derive(Parser, Debug)]
pub struct TagsArgs {
    #[command(subcommand)]
    pub command: TagCommand,
}

#[derive(Subcommand, Debug)]
pub enum TagCommand {
    /// List the tag keys of the project
    List,

    /// Remove a tag key from the project
    Delete {
        /// Tag key to remove
        key: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Auth Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Authentication commands
#[derive(Parser, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Store an auth token in the system keyring
    Login,
    /// Remove the stored auth token
    Logout,
    /// Show current authentication status
    Status,
}

// ─────────────────────────────────────────────────────────────────────────────
// Config Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration commands
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Set a configuration value
    Set {
        /// Configuration key
        key: ConfigKey,

        /// Configuration value
        value: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key
        key: ConfigKey,
    },

    /// Remove a configuration value
    Remove {
        /// Configuration key
        key: ConfigKey,
    },
}

/// Available configuration keys
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigKey {
    /// API root URL
    Url,
    /// Default organization slug
    Org,
    /// Default project slug
    Project,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_delete_with_global_flags() {
        let cli = Cli::try_parse_from([
            "ptags", "tags", "delete", "env", "--force", "--org", "acme", "--project", "backend",
        ])
        .unwrap();

        assert_eq!(cli.project.org.as_deref(), Some("acme"));
        assert_eq!(cli.project.project.as_deref(), Some("backend"));
        match cli.command {
            Some(Commands::Tags(TagsArgs {
                command: TagCommand::Delete { key, force },
            })) => {
                assert_eq!(key, "env");
                assert!(force);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["ptags"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_config_key_values() {
        let cli = Cli::try_parse_from(["ptags", "config", "set", "url", "https://x/api/0/"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config(ConfigArgs {
                command: ConfigCommand::Set {
                    key: ConfigKey::Url,
                    ..
                }
            }))
        ));
    }
}
