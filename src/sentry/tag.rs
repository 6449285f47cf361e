//! Tag key operations

use std::future::Future;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::core::project::ProjectContext;
use crate::error::{Result, TagsError};
use crate::sentry::client::SentryClient;
use crate::sentry::error_handler::RequestTarget;

/// Documentation page about adding custom tags
pub const TAGS_DOCS_URL: &str = "https://docs.sentry.io/hosted/learn/context/";

/// Longest tag key the server accepts
pub const MAX_TAG_KEY_LENGTH: usize = 32;

static TAG_KEY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.:-]+$").expect("Invalid regex pattern for tag keys")
});

/// A tag key known to a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Unique key, e.g. `environment`
    pub key: String,
    /// Display label
    pub name: String,
    /// Whether the server allows removing this key
    #[serde(default)]
    pub can_delete: bool,
}

/// Check a tag key before sending it anywhere
pub fn validate_tag_key(key: &str) -> Result<()> {
    if key.len() > MAX_TAG_KEY_LENGTH || !TAG_KEY_PATTERN.is_match(key) {
        return Err(TagsError::InvalidTagKey(key.to_string()));
    }
    Ok(())
}

/// Tag operations a screen or command needs from the backend
///
/// Passed explicitly to whoever issues requests, so tests can substitute an
/// in-memory implementation.
pub trait TagsApi: Send + Sync + 'static {
    /// List the tag keys of a project
    fn list_tags(
        &self,
        project: &ProjectContext,
    ) -> impl Future<Output = Result<Vec<Tag>>> + Send;

    /// Remove a tag key from a project
    fn delete_tag(
        &self,
        project: &ProjectContext,
        key: &str,
    ) -> impl Future<Output = Result<()>> + Send;
}

impl TagsApi for SentryClient {
    fn list_tags(
        &self,
        project: &ProjectContext,
    ) -> impl Future<Output = Result<Vec<Tag>>> + Send {
        async move {
            // GET /projects/{org}/{project}/tags/
            let url = self.endpoint(&project.tags_segments())?;
            tracing::debug!(%url, "listing tags");

            let response = self
                .send(
                    self.request(Method::GET, url),
                    RequestTarget::Project(project),
                )
                .await?;
            let tags: Vec<Tag> = response.json().await?;

            tracing::info!(project = %project.full_name(), count = tags.len(), "tags loaded");
            Ok(tags)
        }
    }

    fn delete_tag(
        &self,
        project: &ProjectContext,
        key: &str,
    ) -> impl Future<Output = Result<()>> + Send {
        async move {
            // DELETE /projects/{org}/{project}/tags/{key}/
            let [a, b, c, d] = project.tags_segments();
            let url = self.endpoint(&[a, b, c, d, key])?;
            tracing::debug!(%url, "deleting tag");

            self.send(
                self.request(Method::DELETE, url),
                RequestTarget::Tag(project, key),
            )
            .await?;

            tracing::info!(project = %project.full_name(), key, "tag deleted");
            Ok(())
        }
    }
}
