//! Project API integration module
//!
//! This module provides everything that talks to the backend:
//! - Authenticated HTTP client
//! - Tag key listing and deletion
//! - Error classification

pub mod client;
pub mod error_handler;
pub mod tag;

pub use client::SentryClient;
pub use error_handler::{classify_response, RequestTarget};
pub use tag::{validate_tag_key, Tag, TagsApi, TAGS_DOCS_URL};

#[cfg(test)]
pub mod testing;
