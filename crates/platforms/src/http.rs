//! Shared HTTP execution for all adapters.
//!
//! One execute primitive per response shape: JSON into a typed value, or raw
//! bytes for label documents. Non-2xx statuses become typed errors carrying
//! the upstream status and a response snippet; 404 is surfaced as
//! [`IntegrationError::NotFound`] so probe-style lookups can distinguish a
//! missing resource from a transport failure.

use std::time::Duration;

use orderhub_core::Credential;
use serde::de::DeserializeOwned;

use crate::error::IntegrationError;

/// Connect timeout for every outbound call.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
/// Total timeout for API calls.
const API_TIMEOUT: Duration = Duration::from_secs(30);
/// Total timeout for binary document downloads (labels are slower).
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Maximum response-body length echoed into error messages.
const ERROR_SNIPPET_LEN: usize = 512;

/// Reusable HTTP clients with bounded timeouts.
///
/// `client` serves JSON API calls; `download_client` is a separate instance
/// with a longer read budget for label/document downloads.
#[derive(Debug, Clone)]
pub(crate) struct HttpExecutor {
    client: reqwest::Client,
    download_client: reqwest::Client,
}

impl HttpExecutor {
    /// Build the two pooled clients.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying TLS/connector setup fails.
    pub(crate) fn new() -> Result<Self, IntegrationError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(API_TIMEOUT)
            .build()?;
        let download_client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(DOWNLOAD_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            download_client,
        })
    }

    /// The client for JSON API calls.
    pub(crate) const fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Execute a request and decode the JSON response body.
    ///
    /// # Errors
    ///
    /// - [`IntegrationError::NotFound`] on HTTP 404
    /// - [`IntegrationError::Transport`] on any other non-2xx status
    /// - [`IntegrationError::Http`] on I/O or timeout
    /// - [`IntegrationError::Serialization`] if the body is not the expected
    ///   JSON shape
    pub(crate) async fn execute_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, IntegrationError> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().to_string();
        let body = response.text().await?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(IntegrationError::NotFound(url));
        }
        if !status.is_success() {
            return Err(IntegrationError::Transport {
                url,
                status: status.as_u16(),
                snippet: snippet(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Download a binary document (shipping label) from `url`.
    ///
    /// Uses the long-timeout client and no platform headers: label URLs are
    /// pre-signed by the platform.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::execute_json`], minus serialization.
    pub(crate) async fn execute_bytes(&self, url: &str) -> Result<Vec<u8>, IntegrationError> {
        let response = self.download_client.get(url).send().await?;
        let status = response.status();
        let url = response.url().to_string();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(IntegrationError::NotFound(url));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IntegrationError::Transport {
                url,
                status: status.as_u16(),
                snippet: snippet(&body),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Download a binary document passing an Authorization bearer header and
    /// query parameters (Mercado Libre's label endpoint requires auth).
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::execute_bytes`].
    pub(crate) async fn execute_bytes_with_bearer(
        &self,
        url: &str,
        token: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<u8>, IntegrationError> {
        let response = self
            .download_client
            .get(url)
            .query(query)
            .bearer_auth(token)
            .send()
            .await?;
        let status = response.status();
        let url = response.url().to_string();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(IntegrationError::NotFound(url));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IntegrationError::Transport {
                url,
                status: status.as_u16(),
                snippet: snippet(&body),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Reject credentials with an empty access token before any signed call.
pub(crate) fn require_access_token(credential: &Credential) -> Result<&str, IntegrationError> {
    let token = credential.access_token_str();
    if token.is_empty() {
        return Err(IntegrationError::MissingAccessToken);
    }
    Ok(token)
}

/// Truncate a response body for inclusion in an error message.
fn snippet(body: &str) -> String {
    if body.len() <= ERROR_SNIPPET_LEN {
        return body.to_string();
    }
    let mut end = ERROR_SNIPPET_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
