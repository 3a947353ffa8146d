//! HTTP transport seam
//!
//! The client never talks to reqwest directly. It issues requests through the
//! [`Transport`] trait, which maps `(method, url, query, timeout)` to a status
//! code and a body. [`HttpTransport`] is the production implementation; tests
//! substitute scripted transports.

use crate::config::SecretString;
use crate::domain::{ReportError, Result, WeclappError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, Method};
use serde_json::Value;
use std::time::Duration;

/// Header carrying the weclapp API token
pub const AUTH_HEADER: &str = "AuthenticationToken";

/// Body of a transport response
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Body parsed as JSON
    Json(Value),

    /// Body that is not valid JSON
    Text(String),
}

impl ResponseBody {
    /// Raw text of the body, used for diagnostics
    pub fn text(&self) -> String {
        match self {
            ResponseBody::Json(value) => value.to_string(),
            ResponseBody::Text(text) => text.clone(),
        }
    }
}

/// Status and body returned by a transport
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,

    /// Response body
    pub body: ResponseBody,
}

impl TransportResponse {
    /// Response with a JSON body
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: ResponseBody::Json(body),
        }
    }

    /// Response with a plain-text body
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: ResponseBody::Text(body.into()),
        }
    }
}

/// Request/response function the client is built on
///
/// Implementations must not interpret the status code; the client decides
/// which statuses are failures.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue one request
    ///
    /// # Errors
    ///
    /// Returns an error only when no response was received (connection
    /// failure, timeout).
    async fn request(
        &self,
        method: Method,
        url: &str,
        query: &[(String, String)],
        timeout: Duration,
    ) -> Result<TransportResponse>;
}

/// reqwest-backed transport sending the weclapp authentication headers
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport authenticating with `api_token`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the token is not a valid header value
    /// or the HTTP client cannot be built.
    pub fn new(api_token: &SecretString) -> Result<Self> {
        use secrecy::ExposeSecret;

        let mut token = HeaderValue::from_str(api_token.expose_secret().as_ref()).map_err(|_| {
            ReportError::Configuration("api_token contains invalid header characters".to_string())
        })?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTH_HEADER, token);

        let client = ClientBuilder::new()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                ReportError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        method: Method,
        url: &str,
        query: &[(String, String)],
        timeout: Duration,
    ) -> Result<TransportResponse> {
        let response = self
            .client
            .request(method, url)
            .query(query)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    WeclappError::Timeout(format!("{url} after {}s", timeout.as_secs()))
                } else {
                    WeclappError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| WeclappError::ConnectionFailed(format!("Failed to read body: {e}")))?;

        let body = match serde_json::from_str::<Value>(&text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(text),
        };

        Ok(TransportResponse { status, body })
    }
}
