//! API error classification
//!
//! Maps non-2xx responses to `TagsError` variants with actionable guidance.
//! The API reports failures as `{"detail": "..."}`; when that body is missing
//! the raw text (or the status reason) is used instead.

use serde::Deserialize;

use crate::core::project::ProjectContext;
use crate::error::TagsError;

/// Longest raw body excerpt kept in an error message
const MAX_DETAIL_LEN: usize = 200;

/// What a request was about, used to pick the right "not found" error
#[derive(Debug, Clone, Copy)]
pub enum RequestTarget<'a> {
    /// The tag collection of a project
    Project(&'a ProjectContext),
    /// A single tag key of a project
    Tag(&'a ProjectContext, &'a str),
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Classify a failed response
pub fn classify_response(status: u16, body: &str, target: RequestTarget<'_>) -> TagsError {
    let detail = extract_detail(status, body);
    tracing::warn!(status, %detail, "api request failed");

    match status {
        401 => TagsError::NotAuthenticated,
        403 => TagsError::PermissionDenied(detail),
        404 => match target {
            RequestTarget::Tag(_, key) => TagsError::TagNotFound(key.to_string()),
            RequestTarget::Project(project) => TagsError::ProjectNotFound {
                org: project.org_id.clone(),
                project: project.project_id.clone(),
            },
        },
        429 => TagsError::RateLimited,
        _ => TagsError::Api { status, detail },
    }
}

/// Pull a human readable reason out of an error body
fn extract_detail(status: u16, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.detail;
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown error")
            .to_string();
    }

    if trimmed.chars().count() > MAX_DETAIL_LEN {
        let cut: String = trimmed.chars().take(MAX_DETAIL_LEN).collect();
        format!("{}...", cut)
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> ProjectContext {
        ProjectContext::new("acme", "backend")
    }

    #[test]
    fn test_detail_from_json_body() {
        assert_eq!(
            extract_detail(403, r#"{"detail": "You do not have permission"}"#),
            "You do not have permission"
        );
    }

    #[test]
    fn test_detail_falls_back_to_reason() {
        assert_eq!(extract_detail(500, ""), "Internal Server Error");
        assert_eq!(extract_detail(502, "  bad gateway \n"), "bad gateway");
    }

    #[test]
    fn test_detail_truncates_long_bodies() {
        let body = "x".repeat(500);
        let detail = extract_detail(500, &body);
        assert_eq!(detail.len(), MAX_DETAIL_LEN + 3);
        assert!(detail.ends_with("..."));
    }

    #[test]
    fn test_not_found_depends_on_target() {
        let ctx = project();
        assert!(matches!(
            classify_response(404, "", RequestTarget::Tag(&ctx, "env")),
            TagsError::TagNotFound(k) if k == "env"
        ));
        assert!(matches!(
            classify_response(404, "", RequestTarget::Project(&ctx)),
            TagsError::ProjectNotFound { org, project } if org == "acme" && project == "backend"
        ));
    }

    #[test]
    fn test_auth_and_rate_limit() {
        let ctx = project();
        assert!(matches!(
            classify_response(401, "", RequestTarget::Project(&ctx)),
            TagsError::NotAuthenticated
        ));
        assert!(matches!(
            classify_response(429, "", RequestTarget::Project(&ctx)),
            TagsError::RateLimited
        ));
        assert!(matches!(
            classify_response(403, r#"{"detail":"nope"}"#, RequestTarget::Project(&ctx)),
            TagsError::PermissionDenied(d) if d == "nope"
        ));
    }

    #[test]
    fn test_other_status_is_generic() {
        let ctx = project();
        assert!(matches!(
            classify_response(500, "", RequestTarget::Tag(&ctx, "env")),
            TagsError::Api { status: 500, .. }
        ));
    }
}
