//! In-memory `TagsApi` for tests

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::core::project::ProjectContext;
use crate::error::{Result, TagsError};
use crate::sentry::tag::{Tag, TagsApi};

#[derive(Default)]
pub struct FakeTagsApi {
    tags: Mutex<Vec<Tag>>,
    deleted: Mutex<Vec<String>>,
    list_calls: AtomicUsize,
    fail_list: bool,
    fail_delete: bool,
}

impl FakeTagsApi {
    pub fn with_tags(tags: Vec<Tag>) -> Self {
        Self {
            tags: Mutex::new(tags),
            ..Self::default()
        }
    }

    /// `env` (deletable) and `level` (protected)
    pub fn with_scenario_tags() -> Self {
        Self::with_tags(vec![
            Tag {
                key: "env".to_string(),
                name: "environment".to_string(),
                can_delete: true,
            },
            Tag {
                key: "level".to_string(),
                name: "level".to_string(),
                can_delete: false,
            },
        ])
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn failing_delete(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    /// Keys passed to `delete_tag`, in call order
    pub fn deleted_keys(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn remaining_keys(&self) -> Vec<String> {
        self.tags.lock().unwrap().iter().map(|t| t.key.clone()).collect()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

impl TagsApi for FakeTagsApi {
    fn list_tags(
        &self,
        _project: &ProjectContext,
    ) -> impl Future<Output = Result<Vec<Tag>>> + Send {
        async move {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_list {
                return Err(TagsError::Api {
                    status: 500,
                    detail: "Internal Server Error".to_string(),
                });
            }
            Ok(self.tags.lock().unwrap().clone())
        }
    }

    fn delete_tag(
        &self,
        _project: &ProjectContext,
        key: &str,
    ) -> impl Future<Output = Result<()>> + Send {
        async move {
            self.deleted.lock().unwrap().push(key.to_string());
            if self.fail_delete {
                return Err(TagsError::Api {
                    status: 500,
                    detail: "Internal Server Error".to_string(),
                });
            }

            let mut tags = self.tags.lock().unwrap();
            let before = tags.len();
            tags.retain(|t| t.key != key);
            if tags.len() == before {
                return Err(TagsError::TagNotFound(key.to_string()));
            }
            Ok(())
        }
    }
}
