//! Authenticated HTTP transport for the pfSense appliance.
//!
//! [`ApplianceClient`] is a thin request/response capability: it attaches
//! basic-auth credentials, performs the call, and hands back the raw status
//! and body. Interpreting envelope codes and JSON shapes is the caller's job.
//!
//! The [`Transport`] trait is the seam the reconciler is built against, so
//! tests can substitute a scripted double for the real appliance.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::config::ApplianceConfig;
use crate::error::SyncError;

/// The `user:password` blob used for HTTP basic auth against the appliance.
///
/// Loaded once at startup from a local file; the process refuses to start
/// without it. `Debug` output is redacted.
#[derive(Clone)]
pub struct Credentials(String);

impl Credentials {
    /// Read credentials from `path`. Fails if the file is missing or
    /// contains only whitespace.
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            SyncError::Credentials(format!("unable to read {}: {}", path.display(), e))
        })?;

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SyncError::Credentials(format!(
                "credentials file {} is empty",
                path.display()
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Build credentials from a raw `user:password` string.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Split into the username and optional password for basic auth.
    fn basic_auth_parts(&self) -> (&str, Option<&str>) {
        match self.0.split_once(':') {
            Some((user, password)) => (user, Some(password)),
            None => (self.0.as_str(), None),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credentials(<redacted>)")
    }
}

/// Raw response from the appliance: HTTP status plus the unparsed body.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code of the response.
    pub status: StatusCode,

    /// Raw response body.
    pub body: Bytes,
}

/// Request/response capability against the appliance API.
///
/// Implementations perform the network call and nothing else: no status-code
/// interpretation, no JSON decoding. A transport error means the call never
/// produced a response (connection, DNS, TLS, timeout).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform an authenticated GET against `path` (relative to the base URL).
    async fn get(&self, path: &str) -> Result<ApiResponse, SyncError>;

    /// Perform an authenticated POST with a JSON body.
    async fn post_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<ApiResponse, SyncError>;
}

/// HTTP client for the pfSense appliance.
///
/// TLS certificate verification is disabled by default
/// (`appliance.accept_invalid_certs`): private-network pfSense boxes ship
/// self-signed certificates, and this service trusts the appliance it is
/// pointed at. Every request carries the same basic-auth credential and is
/// bounded by `appliance.request_timeout_secs`.
///
/// Stateless apart from the connection pool, so safe to share across tasks.
#[derive(Debug, Clone)]
pub struct ApplianceClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl ApplianceClient {
    /// Create a client for the configured appliance.
    pub fn new(config: &ApplianceConfig, credentials: Credentials) -> Result<Self, SyncError> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Transport for ApplianceClient {
    async fn get(&self, path: &str) -> Result<ApiResponse, SyncError> {
        let (user, password) = self.credentials.basic_auth_parts();
        let response = self
            .http
            .get(self.url(path))
            .basic_auth(user, password)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        Ok(ApiResponse { status, body })
    }

    async fn post_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<ApiResponse, SyncError> {
        let (user, password) = self.credentials.basic_auth_parts();
        let response = self
            .http
            .post(self.url(path))
            .basic_auth(user, password)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        Ok(ApiResponse { status, body })
    }
}
