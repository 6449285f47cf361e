//! Tag CLI command handlers

use std::io::{self, Write};

use crate::cli::commands::{ProjectArgs, TagCommand};
use crate::cli::prompt::{Confirm, StdinConfirm};
use crate::core::config::Config;
use crate::core::project::ProjectContext;
use crate::error::{Result, TagsError};
use crate::sentry::tag::{validate_tag_key, TagsApi, TAGS_DOCS_URL};
use crate::sentry::SentryClient;

/// Handle tag commands
pub async fn handle_tags(command: TagCommand, project_args: ProjectArgs) -> Result<()> {
    match command {
        TagCommand::List => {
            let (client, project) = connect(project_args)?;
            list_tags(&client, &project, &mut io::stdout()).await
        }
        TagCommand::Delete { key, force } => {
            // Reject bad keys before touching config or credentials
            validate_tag_key(&key)?;
            let (client, project) = connect(project_args)?;
            delete_tag(
                &client,
                &project,
                &key,
                force,
                &mut StdinConfirm,
                &mut io::stdout(),
            )
            .await
        }
    }
}

fn connect(project_args: ProjectArgs) -> Result<(SentryClient, ProjectContext)> {
    let config = Config::load()?;
    let project = ProjectContext::resolve(project_args.org, project_args.project, &config)?;
    let client = SentryClient::from_config(&config)?;
    Ok((client, project))
}

/// Print the tag keys of a project
pub async fn list_tags<C: TagsApi, W: Write>(
    client: &C,
    project: &ProjectContext,
    out: &mut W,
) -> Result<()> {
    let tags = client.list_tags(project).await?;

    writeln!(out, "Tags for {}:\n", project.full_name())?;

    if tags.is_empty() {
        writeln!(out, "  There are no tags, learn to add tags:")?;
        writeln!(out, "  {}", TAGS_DOCS_URL)?;
        return Ok(());
    }

    let name_width = tags.iter().map(|t| t.name.chars().count()).max().unwrap_or(0);
    let key_width = tags.iter().map(|t| t.key.chars().count()).max().unwrap_or(0);

    for tag in &tags {
        let marker = if tag.can_delete { "" } else { "[protected]" };
        let line = format!(
            "  {:name_width$}  {:key_width$}  {}",
            tag.name, tag.key, marker
        );
        writeln!(out, "{}", line.trim_end())?;
    }

    Ok(())
}

/// Remove one tag key after checking it exists and may be deleted
pub async fn delete_tag<C: TagsApi, P: Confirm, W: Write>(
    client: &C,
    project: &ProjectContext,
    key: &str,
    force: bool,
    prompt: &mut P,
    out: &mut W,
) -> Result<()> {
    validate_tag_key(key)?;

    let tags = client.list_tags(project).await?;
    let tag = tags
        .iter()
        .find(|t| t.key == key)
        .ok_or_else(|| TagsError::TagNotFound(key.to_string()))?;

    if !tag.can_delete {
        return Err(TagsError::TagProtected(key.to_string()));
    }

    if !force {
        let question = format!(
            "Remove tag '{}' ({}) from {}?",
            tag.name,
            tag.key,
            project.full_name()
        );
        if !prompt.confirm(&question)? {
            writeln!(out, "Cancelled.")?;
            return Ok(());
        }
    }

    client.delete_tag(project, key).await?;
    writeln!(out, "✓ Deleted tag: {}", key)?;

    Ok(())
}
