//! Core functionality for project-tags
//!
//! This module contains shared plumbing including:
//! - Application configuration
//! - Credential management
//! - Project context resolution
//! - The fetch lifecycle used by screens

pub mod browser;
pub mod config;
pub mod credentials;
pub mod project;
pub mod resource;

pub use config::Config;
pub use credentials::CredentialStore;
pub use project::ProjectContext;
pub use resource::Resource;
