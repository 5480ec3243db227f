//! Error types for pfsense-dns-sync.

use thiserror::Error;

/// Errors that can occur during a reconciliation pass.
#[derive(Debug, Error)]
pub enum SyncError {
    /// IO error (credentials file, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-level HTTP failure (connection, DNS, TLS, timeout)
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body failed to decode as the expected JSON shape
    #[error("failed to decode {context}: {source}")]
    Decode {
        /// What was being decoded (endpoint or shape name).
        context: &'static str,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// The appliance returned a non-200 application-level status code
    #[error("appliance returned code {code}: {status}")]
    RemoteStatus {
        /// The `code` field of the response envelope.
        code: i64,
        /// The `status` field of the response envelope.
        status: String,
    },

    /// Override enumeration reached the safety ceiling without the
    /// appliance ever signalling end-of-data
    #[error("override enumeration hit the ceiling of {ceiling} IDs without a terminator")]
    EnumerationCeiling {
        /// The configured ceiling that was exhausted.
        ceiling: u32,
    },

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Credentials file missing or empty
    #[error("credentials error: {0}")]
    Credentials(String),
}
