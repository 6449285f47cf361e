//! project-tags - Project Tag Manager TUI
//!
//! A terminal application for managing the tag keys of a project.
//! Run without arguments to launch the TUI, or use subcommands for CLI mode.
//!
//! Available as the `ptags` command.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use project_tags::cli::commands::{Cli, Commands, ProjectArgs};
use project_tags::cli::{auth, config, tag};
use project_tags::core::{Config, ProjectContext};
use project_tags::error::{Result, TagsError};
use project_tags::sentry::SentryClient;
use project_tags::tui::App;

#[tokio::main]
async fn main() {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        handle_error(&e);
        std::process::exit(1);
    }
}

/// Print errors, with a hint for the first-run case
fn handle_error(e: &TagsError) {
    eprintln!("Error: {}", e);

    if matches!(e, TagsError::NotAuthenticated) {
        eprintln!();
        eprintln!("Tokens are created under User Settings → Auth Tokens.");
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        // No subcommand - launch TUI mode
        None => run_tui(cli.project).await,
        Some(Commands::Tags(args)) => tag::handle_tags(args.command, cli.project).await,
        Some(Commands::Auth(args)) => auth::handle_auth(args.command),
        Some(Commands::Config(args)) => config::handle_config(args.command),
    }
}

/// Run the TUI application
async fn run_tui(project_args: ProjectArgs) -> Result<()> {
    let config = Config::load()?;
    let project = ProjectContext::resolve(project_args.org, project_args.project, &config)?;
    let client = SentryClient::from_config(&config)?;

    tracing::debug!(project = %project.full_name(), api = %client.base_url(), "starting tui");

    let mut app = App::new(Arc::new(client), project);
    app.run().await
}
