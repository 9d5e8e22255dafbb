use crate::config::{ConfigError, DispatcherOptions};
use crate::domain::DispatchError;
use bytes::Bytes;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, ClientBuilder, StatusCode};
use std::time::Duration;
use tokio::time::timeout;
use url::Url;

/// HTTP client bound to one collector endpoint.
///
/// The request headers are built once from the options; each `post` is a
/// single attempt bounded by the configured timeout.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    endpoint: Url,
    headers: HeaderMap,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(options: &DispatcherOptions) -> Result<Self, ConfigError> {
        let endpoint: Url = options
            .host
            .parse()
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid host URL: {e}")))?;

        let timeout = options.timeout();
        let headers = Self::build_headers(options)?;

        let client = ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(&options.user_agent)
            .build()
            .map_err(|e| {
                ConfigError::InvalidConfig(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            endpoint,
            headers,
            timeout,
        })
    }

    fn build_headers(options: &DispatcherOptions) -> Result<HeaderMap, ConfigError> {
        let mut headers = HeaderMap::new();

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let token_header = HeaderName::from_bytes(options.token_header.as_bytes())
            .map_err(|e| ConfigError::InvalidConfig(format!("Invalid token header: {e}")))?;
        let mut token = HeaderValue::from_str(&options.token)
            .map_err(|e| ConfigError::InvalidConfig(format!("Invalid token: {e}")))?;
        token.set_sensitive(true);
        headers.insert(token_header, token);

        Ok(headers)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Posts `body` to the endpoint.
    ///
    /// Any completed round trip is returned as `Ok` with its status; the
    /// response body is never read.
    pub async fn post(&self, body: Bytes) -> Result<StatusCode, DispatchError> {
        let request = self
            .client
            .post(self.endpoint.clone())
            .headers(self.headers.clone())
            .body(body)
            .send();

        let response = timeout(self.timeout, request)
            .await
            .map_err(|_| DispatchError::Timeout(self.timeout))?
            .map_err(|e| {
                if e.is_timeout() {
                    DispatchError::Timeout(self.timeout)
                } else {
                    DispatchError::Transport(e)
                }
            })?;

        Ok(response.status())
    }
}
