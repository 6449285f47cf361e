//! Configuration CLI command handlers

use crate::cli::commands::{ConfigCommand, ConfigKey};
use crate::core::config::{Config, DEFAULT_BASE_URL};
use crate::error::{Result, TagsError};

/// Handle configuration commands
pub fn handle_config(command: ConfigCommand) -> Result<()> {
    let mut config = Config::load()?;

    match command {
        ConfigCommand::Set { key, value } => {
            apply_set(&mut config, key, &value)?;
            config.save()?;
            println!("{} set to: {}", key_label(key), display_value(&config, key));
        }
        ConfigCommand::Get { key } => {
            println!("{}: {}", key_label(key), display_value(&config, key));
        }
        ConfigCommand::Remove { key } => {
            apply_remove(&mut config, key);
            config.save()?;
            println!("{} reset to: {}", key_label(key), display_value(&config, key));
        }
    }

    Ok(())
}

fn apply_set(config: &mut Config, key: ConfigKey, value: &str) -> Result<()> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TagsError::InvalidInput(format!(
            "Value for '{}' cannot be empty",
            key_label(key)
        )));
    }

    match key {
        ConfigKey::Url => config.set_base_url(value)?,
        ConfigKey::Org => config.organization = Some(value.to_string()),
        ConfigKey::Project => config.project = Some(value.to_string()),
    }
    Ok(())
}

fn apply_remove(config: &mut Config, key: ConfigKey) {
    match key {
        ConfigKey::Url => config.base_url = DEFAULT_BASE_URL.to_string(),
        ConfigKey::Org => config.organization = None,
        ConfigKey::Project => config.project = None,
    }
}

fn key_label(key: ConfigKey) -> &'static str {
    match key {
        ConfigKey::Url => "API URL",
        ConfigKey::Org => "Organization",
        ConfigKey::Project => "Project",
    }
}

fn display_value(config: &Config, key: ConfigKey) -> String {
    let value = match key {
        ConfigKey::Url => Some(config.base_url.as_str()),
        ConfigKey::Org => config.organization.as_deref(),
        ConfigKey::Project => config.project.as_deref(),
    };
    value.unwrap_or("Not configured").to_string()
}
