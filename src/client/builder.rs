//! Builder for configuring and creating Stockast API clients

use std::sync::Arc;
use std::time::Duration;

use reqwest::header;
use url::Url;

use super::Client;
use crate::auth::{CredentialProvider, StaticCredentials};
use crate::error::Error;

/// Default base URL of the hosted Stockast backend
pub const DEFAULT_BASE_URL: &str = "https://stockast.itomaldonado.com/";

/// Default path prefix the API is served under
pub const DEFAULT_API_PREFIX: &str = "api/";

/// Default timeout for requests in milliseconds
const DEFAULT_TIMEOUT_MS: u64 = 30000;

/// Builder for creating and configuring Stockast API clients
pub struct ClientBuilder {
    /// Base URL of the backend
    base_url: String,
    /// Path prefix the API is served under
    api_prefix: String,
    /// Credential source for the `Authorization` header
    credentials: Option<Arc<dyn CredentialProvider>>,
    /// Request timeout in milliseconds
    timeout_ms: u64,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            credentials: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ClientBuilder {
    /// Create a new client builder with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the backend to talk to
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the path prefix the API is served under
    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    /// Authenticate requests with a fixed account/password pair
    pub fn with_credentials(
        mut self,
        account: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Arc::new(StaticCredentials::new(account, password)));
        self
    }

    /// Authenticate requests through a custom credential provider
    pub fn with_credential_provider(mut self, provider: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = Some(provider);
        self
    }

    /// Set the timeout for requests in milliseconds
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<Client, Error> {
        // The base URL must end with a slash so joining keeps every segment
        let mut base_url = self.base_url;
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base_url = Url::parse(&base_url).map_err(Error::from)?;

        // Ensure it's HTTP or HTTPS
        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            return Err(Error::UrlError(format!(
                "Invalid URL scheme: {}. Expected http or https",
                base_url.scheme()
            )));
        }

        // All traffic is JSON in both directions
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(self.timeout_ms))
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Client::new(http, base_url, self.api_prefix, self.credentials))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_with_defaults() {
        let client = ClientBuilder::new().build().unwrap();
        assert_eq!(client.base_url().as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_build_normalizes_missing_trailing_slash() {
        let client = ClientBuilder::new()
            .with_base_url("http://localhost:8000")
            .build()
            .unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8000/");
    }

    #[test]
    fn test_build_rejects_bad_urls() {
        let result = ClientBuilder::new().with_base_url("not a url").build();
        assert!(result.is_err());

        let result = ClientBuilder::new().with_base_url("ftp://example.com").build();
        assert!(result.is_err());
    }
}
