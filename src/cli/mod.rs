//! CLI module for project-tags
//!
//! This module contains all CLI command definitions and handlers using clap.

pub mod auth;
pub mod commands;
pub mod config;
pub mod prompt;
pub mod tag;

pub use commands::{Cli, Commands};
