//! Error taxonomy for the Connect engine
//!
//! Every failure mode is classified exactly once, at the transport boundary,
//! into this closed enumeration. Layers above match on the variant and never
//! re-inspect raw transport details. Display strings are the user-facing
//! text: the calling layer shows them verbatim, so each message must stand on
//! its own.

use thiserror::Error;

/// Connect engine errors
#[derive(Error, Debug)]
pub enum ConnectError {
    /// No base URL was supplied before an operation was attempted
    #[error("Kafka Connect URL is not configured.")]
    NotConfigured,

    /// HTTP 401 from the cluster
    #[error("Authentication failed. Please check your username and password.")]
    Unauthorized,

    /// HTTP 403 from the cluster
    #[error("Connection forbidden. You do not have permission to access the Kafka Connect API.")]
    Forbidden,

    /// HTTP 406: the server cannot satisfy the `Accept` header
    #[error("Failed to fetch from Kafka Connect API at {endpoint}. Status: 406 (Not Acceptable). The server cannot provide a response in the requested format.")]
    NotAcceptable { endpoint: String },

    /// Any other non-2xx response; `message` carries the upstream JSON
    /// `message` field when the body had one, else a generic status line
    #[error("{message}")]
    Upstream {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// Transport-level reset, possibly transient or load-related
    #[error("The connection to the Kafka Connect API at {url} was reset. This can happen if the server is under heavy load or has a connection limit.")]
    ConnectionReset { url: String },

    /// DNS resolution failed for the configured host
    #[error("Could not resolve the address for the Kafka Connect API at {url}. Please check the URL and your network connection.")]
    HostUnresolvable { url: String },

    /// Connect-level failure: host down or a firewall in the way
    #[error("Network error when fetching from {url}. The host may be down, or a firewall may be blocking the connection.")]
    Unreachable { url: String },

    /// Network failure that matched no more specific classification
    #[error("Could not connect to Kafka Connect API at {url}. Please check if the service is running and accessible.")]
    ConnectionFailed { url: String },

    /// First-item failure aborting a bulk export
    #[error("Failed to fetch config for {name}: {source}")]
    ExportFailed {
        name: String,
        #[source]
        source: Box<ConnectError>,
    },

    /// Malformed or missing required input, detected before any call
    #[error("{0}")]
    InvalidConfig(String),

    #[error("Request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
