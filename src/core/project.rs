//! Project context resolution
//!
//! A project is identified by its organization and project slugs. They come
//! from command line flags (or their environment variables) first, then from
//! the configuration file.

use crate::core::config::Config;
use crate::error::{Result, TagsError};

/// Organization and project the tags belong to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    /// Organization slug
    pub org_id: String,
    /// Project slug
    pub project_id: String,
}

impl ProjectContext {
    pub fn new(org_id: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            org_id: org_id.into(),
            project_id: project_id.into(),
        }
    }

    /// Resolve from explicit values, falling back to the config file
    pub fn resolve(org: Option<String>, project: Option<String>, config: &Config) -> Result<Self> {
        let org_id = org
            .or_else(|| config.organization.clone())
            .filter(|s| !s.trim().is_empty())
            .ok_or(TagsError::MissingProject)?;
        let project_id = project
            .or_else(|| config.project.clone())
            .filter(|s| !s.trim().is_empty())
            .ok_or(TagsError::MissingProject)?;

        Ok(Self::new(org_id, project_id))
    }

    /// Get the full project name (org/project)
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.org_id, self.project_id)
    }

    /// Path segments of the tag collection, relative to the API root
    pub fn tags_segments(&self) -> [&str; 4] {
        ["projects", &self.org_id, &self.project_id, "tags"]
    }

    /// Path of the tag collection, relative to the API root
    ///
    /// Derived from `tags_segments` so the displayed path and the requested
    /// URL cannot disagree.
    pub fn tags_path(&self) -> String {
        format!("/{}/", self.tags_segments().join("/"))
    }
}
