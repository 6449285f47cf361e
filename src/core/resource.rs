//! Fetch lifecycle for a remote resource
//!
//! Screens hold one `Resource<T>` per remote collection instead of a loose set
//! of `loading` / `error` / `fetched` flags. Loaded data and an error can never
//! coexist, and neither can coexist with an in-flight load.

use std::fmt::Display;

/// State of a remote resource
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Resource<T> {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Request in flight
    Loading,
    /// Request succeeded
    Loaded(T),
    /// Request (or a later mutation) failed
    Failed(String),
}

impl<T> Resource<T> {
    /// Mark a request as started
    ///
    /// Returns `false` when one is already in flight, so callers can skip
    /// issuing a duplicate request.
    pub fn start(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        *self = Resource::Loading;
        true
    }

    /// Commit the outcome of a request
    pub fn finish<E: Display>(&mut self, result: Result<T, E>) {
        *self = match result {
            Ok(data) => Resource::Loaded(data),
            Err(e) => Resource::Failed(e.to_string()),
        };
    }

    /// Switch to the error state, dropping any loaded data
    pub fn fail(&mut self, message: impl Into<String>) {
        *self = Resource::Failed(message.into());
    }

    /// Forget everything (next access triggers a fresh load)
    pub fn reset(&mut self) {
        *self = Resource::Idle;
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading)
    }

    /// Loaded data, if any
    pub fn data(&self) -> Option<&T> {
        match self {
            Resource::Loaded(data) => Some(data),
            _ => None,
        }
    }

    /// Mutable access to loaded data, if any
    pub fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            Resource::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_success() {
        let mut res: Resource<Vec<u8>> = Resource::default();
        assert_eq!(res, Resource::Idle);

        assert!(res.start());
        assert!(res.is_loading());
        assert!(res.data().is_none());

        res.finish(Ok::<_, String>(vec![1, 2]));
        assert_eq!(res.data(), Some(&vec![1, 2]));
    }

    #[test]
    fn test_lifecycle_failure() {
        let mut res: Resource<Vec<u8>> = Resource::Loading;
        res.finish(Err::<Vec<u8>, _>("boom"));
        assert_eq!(res, Resource::Failed("boom".to_string()));
        assert!(!res.is_loading());
        assert!(res.data().is_none());
    }

    #[test]
    fn test_start_while_loading_is_rejected() {
        let mut res: Resource<()> = Resource::default();
        assert!(res.start());
        assert!(!res.start());
    }

    #[test]
    fn test_fail_drops_data() {
        let mut res = Resource::Loaded(vec!["a"]);
        res.fail("delete failed");
        assert!(res.data().is_none());
        assert_eq!(res, Resource::Failed("delete failed".to_string()));
    }

    #[test]
    fn test_data_mut_and_reset() {
        let mut res = Resource::Loaded(vec![1, 2, 3]);
        res.data_mut().unwrap().retain(|n| *n != 2);
        assert_eq!(res.data(), Some(&vec![1, 3]));

        res.reset();
        assert_eq!(res, Resource::Idle);
        assert!(res.data_mut().is_none());
    }
}
