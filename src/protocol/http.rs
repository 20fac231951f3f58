// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the `JuiceNet` cloud API.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::command::ApiRequest;
use crate::error::{Error, TransportError};

// ============================================================================
// ApiConfig - Client configuration
// ============================================================================

/// Configuration for a [`Connection`](crate::Connection).
///
/// # Examples
///
/// ```
/// use juicenet_lib::protocol::ApiConfig;
/// use std::time::Duration;
///
/// // Defaults: public service, 10 s timeout, 30 s freshness window
/// let config = ApiConfig::new();
///
/// // With all options
/// let config = ApiConfig::new()
///     .with_base_url("http://localhost:8080")
///     .with_timeout(Duration::from_secs(5))
///     .with_freshness_window(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: String,
    timeout: Duration,
    freshness_window: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiConfig {
    /// Base URL of the public service.
    pub const DEFAULT_BASE_URL: &'static str = "http://emwjuicebox.cloudapp.net";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    /// Minimum time between two non-forced state refreshes of a device.
    pub const DEFAULT_FRESHNESS_WINDOW: Duration = Duration::from_secs(30);

    /// Creates a configuration pointing at the public service.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
            freshness_window: Self::DEFAULT_FRESHNESS_WINDOW,
        }
    }

    /// Sets a custom base URL.
    ///
    /// A trailing slash is ignored.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the minimum interval between non-forced state refreshes.
    #[must_use]
    pub fn with_freshness_window(mut self, window: Duration) -> Self {
        self.freshness_window = window;
        self
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the freshness window.
    #[must_use]
    pub fn freshness_window(&self) -> Duration {
        self.freshness_window
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the base URL is not an absolute
    /// `http`/`https` URL, or a transport error if the HTTP client cannot be
    /// created.
    pub fn into_client(self) -> Result<HttpClient, Error> {
        let base_url = Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("invalid base URL {:?}: {e}", self.base_url)))?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "unsupported URL scheme: {}",
                base_url.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(TransportError::Http)?;

        Ok(HttpClient {
            base_url: self.base_url,
            client,
        })
    }
}

// ============================================================================
// HttpClient - JSON-over-POST transport
// ============================================================================

/// HTTP client for the cloud service.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Returns the base URL of the service.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the URL a request is posted to.
    fn build_url(&self, request: &ApiRequest<'_>) -> String {
        format!("{}{}", self.base_url, request.endpoint().path())
    }

    /// Posts a request and parses the JSON response.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the request fails, the service answers
    /// with a non-success status, or the body is not the expected JSON.
    pub async fn post<T: DeserializeOwned>(
        &self,
        request: &ApiRequest<'_>,
    ) -> Result<T, TransportError> {
        let url = self.build_url(request);

        tracing::debug!(url = %url, cmd = %request.cmd(), "Sending API request");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(TransportError::Http)?;

        let status = response.status();
        let body = response.text().await.map_err(TransportError::Http)?;

        tracing::debug!(status = status.as_u16(), body = %body, "Received API response");

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(TransportError::InvalidBody)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandKind;
    use uuid::Uuid;

    #[test]
    fn api_config_default_values() {
        let config = ApiConfig::new();
        assert_eq!(config.base_url(), "http://emwjuicebox.cloudapp.net");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.freshness_window(), Duration::from_secs(30));
    }

    #[test]
    fn api_config_builder_chain() {
        let config = ApiConfig::new()
            .with_base_url("https://example.test/")
            .with_timeout(Duration::from_secs(3))
            .with_freshness_window(Duration::ZERO);

        assert_eq!(config.base_url(), "https://example.test");
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.freshness_window(), Duration::ZERO);
    }

    #[test]
    fn into_client_rejects_garbage_url() {
        let result = ApiConfig::new().with_base_url("not a url").into_client();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn into_client_rejects_other_schemes() {
        let result = ApiConfig::new().with_base_url("ftp://example.test").into_client();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn build_url_per_endpoint() {
        let client = ApiConfig::new().into_client().unwrap();
        let id = Uuid::new_v4();

        let discovery = ApiRequest::account_units(id, "acct");
        assert_eq!(
            client.build_url(&discovery),
            "http://emwjuicebox.cloudapp.net/box_pin"
        );

        let state = ApiRequest::device(CommandKind::GetState, id, "t1", "acct");
        assert_eq!(
            client.build_url(&state),
            "http://emwjuicebox.cloudapp.net/box_api_secure"
        );
    }
}
