//! project-tags - A TUI application for managing project tag keys
//!
//! This library provides both CLI and TUI interfaces for listing the tag keys
//! of an error-tracking project and removing the ones the server allows.

pub mod cli;
pub mod core;
pub mod error;
pub mod sentry;
pub mod tui;

pub use error::{Result, TagsError};
