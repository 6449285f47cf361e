//! HTTP client for the project API

use reqwest::{Client, Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::core::config::Config;
use crate::core::credentials::CredentialStore;
use crate::error::{Result, TagsError};
use crate::sentry::error_handler::{classify_response, RequestTarget};

/// API client bound to one API root and auth token
#[derive(Clone)]
pub struct SentryClient {
    http: Client,
    base_url: Url,
    token: SecretString,
}

impl std::fmt::Debug for SentryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentryClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl SentryClient {
    /// Create a client for an explicit API root and token
    pub fn new(base_url: Url, token: SecretString) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(TagsError::InvalidUrl(base_url.to_string()));
        }

        let http = Client::builder()
            .user_agent(concat!("project-tags/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    /// Create a client from the configuration file and stored credentials
    ///
    /// - Base URL: `SENTRY_URL` if set, else the config file
    /// - Token: `SENTRY_AUTH_TOKEN` if set, else the system keyring
    pub fn from_config(config: &Config) -> Result<Self> {
        let token = CredentialStore::require_auth_token()?;
        Self::new(config.effective_base_url()?, token)
    }

    /// API root this client talks to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL from path segments (percent-encoded, trailing slash)
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TagsError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments)
            .push("");
        Ok(url)
    }

    /// Start an authenticated request
    pub fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(self.token.expose_secret())
    }

    /// Send a request, turning non-2xx responses into classified errors
    pub async fn send(
        &self,
        request: RequestBuilder,
        target: RequestTarget<'_>,
    ) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(%status, url = %response.url(), "api response");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(classify_response(status.as_u16(), &body, target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::project::ProjectContext;

    fn client(base: &str) -> SentryClient {
        SentryClient::new(Url::parse(base).unwrap(), SecretString::from("t")).unwrap()
    }

    #[test]
    fn test_endpoint_keeps_api_prefix() {
        let c = client("https://sentry.io/api/0/");
        let url = c.endpoint(&["projects", "acme", "backend", "tags"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://sentry.io/api/0/projects/acme/backend/tags/"
        );
    }

    #[test]
    fn test_endpoint_without_trailing_slash_base() {
        let c = client("https://self.hosted/api/0");
        let url = c.endpoint(&["projects", "a", "b", "tags", "env"]).unwrap();
        assert_eq!(url.as_str(), "https://self.hosted/api/0/projects/a/b/tags/env/");
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let c = client("https://sentry.io/api/0/");
        let url = c
            .endpoint(&["projects", "acme", "backend", "tags", "a/b c"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://sentry.io/api/0/projects/acme/backend/tags/a%2Fb%20c/"
        );
    }

    #[test]
    fn test_endpoint_matches_display_path() {
        let c = client("https://sentry.io/api/0/");
        let ctx = ProjectContext::new("acme", "backend");
        let url = c.endpoint(&ctx.tags_segments()).unwrap();
        assert_eq!(url.path(), format!("/api/0{}", ctx.tags_path()));
    }

    #[test]
    fn test_rejects_non_base_url() {
        let url = Url::parse("mailto:ops@example.com").unwrap();
        assert!(matches!(
            SentryClient::new(url, SecretString::from("t")),
            Err(TagsError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_debug_hides_token() {
        let c = client("https://sentry.io/api/0/");
        let dbg = format!("{:?}", c);
        assert!(dbg.contains("sentry.io"));
        assert!(!dbg.contains("token"));
    }
}
