/*
[INPUT]:  HTTP configuration (base URL, timeouts, credentials)
[OUTPUT]: Configured reqwest client ready for API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::http::{AgrisyncError, Result};

/// Default base URL for a locally running backend
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Credentials for authenticated requests
#[derive(Debug, Clone)]
pub struct Credentials {
    pub token: String,
    /// Authorization scheme, e.g. `Bearer` or `Token`
    pub scheme: String,
}

impl Credentials {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            scheme: "Bearer".to_string(),
        }
    }

    fn header_value(&self) -> String {
        format!("{} {}", self.scheme, self.token)
    }
}

/// Main HTTP client for the AgriSync REST API
#[derive(Debug, Clone)]
pub struct AgrisyncClient {
    http_client: Client,
    base_url: Url,
    credentials: Option<Credentials>,
}

impl AgrisyncClient {
    /// Create a new client with default configuration
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(ClientConfig::default(), base_url)
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: normalize_base_url(base_url)?,
            credentials: None,
        })
    }

    /// Set credentials for authenticated requests
    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
    }

    /// Get credentials if set
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build full URL for an endpoint, keeping the base path prefix
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(endpoint.trim_start_matches('/'))?)
    }

    /// Build request builder for an endpoint, attaching credentials if set
    pub(crate) fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.endpoint_url(endpoint)?;
        debug!(%method, %url, "building request");
        let builder = self.http_client.request(method, url);
        Ok(match &self.credentials {
            Some(credentials) => builder.header(AUTHORIZATION, credentials.header_value()),
            None => builder,
        })
    }

    /// Send a request and decode a JSON body
    pub(crate) async fn send_json<T>(&self, builder: RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            debug!(status = status.as_u16(), "request rejected by backend");
            return Err(AgrisyncError::api_error(status, &bytes));
        }
        if bytes.is_empty() {
            return Err(AgrisyncError::InvalidResponse(format!(
                "empty body with status {status}"
            )));
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send a request whose success response carries no body of interest
    pub(crate) async fn send_empty(&self, builder: RequestBuilder) -> Result<()> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let bytes = response.bytes().await?;
            return Err(AgrisyncError::api_error(status, &bytes));
        }
        Ok(())
    }
}

fn normalize_base_url(base_url: &str) -> Result<Url> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(AgrisyncError::Config("base URL must not be empty".to_string()));
    }
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Ok(Url::parse(&with_slash)?)
}
