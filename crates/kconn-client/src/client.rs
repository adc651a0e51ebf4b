//! HTTP transport for the Kafka Connect REST API
//!
//! One place builds requests, classifies responses, and maps network-level
//! failures onto the `ConnectError` taxonomy. Everything above this module
//! matches on error kinds and never re-inspects raw transport details.

use std::time::Duration;

use reqwest::{header, Client, Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use kconn_core::{ConnectConfig, ConnectError};

/// `Accept` header sent on every call; the API answers with plain text on
/// some endpoints, so JSON alone is not enough
const ACCEPT_ANY_JSON_FIRST: &str = "application/json, text/plain, */*";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Successful response body, classified by content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    /// Converts into a JSON value; plain text becomes a JSON string
    pub fn into_value(self) -> Value {
        match self {
            Payload::Json(value) => value,
            Payload::Text(text) => Value::String(text),
        }
    }
}

/// Error body shape the Connect REST API uses for most failures
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Client for one Kafka Connect cluster
///
/// Holds no state beyond the configuration it was built from; callers
/// construct one per session (or per call) and drop it afterwards.
#[derive(Debug)]
pub struct ConnectClient {
    http: Client,
    config: ConnectConfig,
}

impl ConnectClient {
    /// Creates a client with the default 30 second timeout
    pub fn new(config: ConnectConfig) -> Result<Self, ConnectError> {
        Self::with_timeout(config, DEFAULT_TIMEOUT)
    }

    /// Creates a client with a caller-supplied timeout bounding every call
    pub fn with_timeout(config: ConnectConfig, timeout: Duration) -> Result<Self, ConnectError> {
        config.validate()?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ConnectConfig {
        &self.config
    }

    /// Verifies that the endpoint/credentials pair is reachable
    ///
    /// Probes the API root and reports only presence or absence of an error.
    /// The root body varies by deployment (empty, HTML, plain text) and is
    /// never interpreted.
    pub async fn test_connection(&self) -> Result<(), ConnectError> {
        self.request(Method::GET, "/", None).await?;
        Ok(())
    }

    /// Prefixes `suffix` with the configured cluster path
    pub(crate) fn cluster_endpoint(&self, suffix: &str) -> String {
        format!("{}{}", self.config.cluster_path_or_default(), suffix)
    }

    /// Executes a single call against the Connect REST API
    ///
    /// Classification, in priority order: non-2xx status becomes a typed
    /// error; empty bodies and 204 become an empty JSON object; JSON content
    /// is decoded; anything else is returned as raw text.
    pub(crate) async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<Payload, ConnectError> {
        let base = self.config.url.trim_end_matches('/');
        let url = format!("{}{}", base, endpoint);

        debug!(%method, endpoint, "kafka connect request");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(header::ACCEPT, ACCEPT_ANY_JSON_FIRST)
            .header(header::CACHE_CONTROL, "no-store");

        if method != Method::GET {
            request = request.header(header::CONTENT_TYPE, "application/json");
        }
        if let Some((username, password)) = self.config.basic_auth() {
            request = request.basic_auth(username, Some(password));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => return Err(classify_send_error(err, &self.config.url)),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(self.status_error(endpoint, status, response).await);
        }

        // The connectivity probe hits the root; its body shape varies by
        // deployment and must not be parsed.
        if endpoint.is_empty() || endpoint == "/" {
            return Ok(Payload::Json(Value::Object(Default::default())));
        }

        if status == StatusCode::NO_CONTENT || response.content_length() == Some(0) {
            return Ok(Payload::Json(Value::Object(Default::default())));
        }

        let is_json = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.contains("application/json"))
            .unwrap_or(false);

        let text = response.text().await?;
        if text.is_empty() {
            return Ok(Payload::Json(Value::Object(Default::default())));
        }
        if is_json {
            return Ok(Payload::Json(serde_json::from_str(&text)?));
        }
        Ok(Payload::Text(text))
    }

    async fn status_error(
        &self,
        endpoint: &str,
        status: StatusCode,
        response: reqwest::Response,
    ) -> ConnectError {
        let body = response.text().await.unwrap_or_default();

        match status {
            StatusCode::UNAUTHORIZED => ConnectError::Unauthorized,
            StatusCode::FORBIDDEN => ConnectError::Forbidden,
            StatusCode::NOT_ACCEPTABLE => ConnectError::NotAcceptable {
                endpoint: endpoint.to_string(),
            },
            _ => {
                let message = serde_json::from_str::<ErrorBody>(&body)
                    .ok()
                    .and_then(|body| body.message)
                    .unwrap_or_else(|| {
                        format!(
                            "Failed to fetch from Kafka Connect API at {}. Status: {}.",
                            endpoint,
                            status.as_u16()
                        )
                    });
                ConnectError::Upstream {
                    endpoint: endpoint.to_string(),
                    status: status.as_u16(),
                    message,
                }
            }
        }
    }
}

/// Maps a network-level failure onto a distinct, human-readable error kind
fn classify_send_error(err: reqwest::Error, url: &str) -> ConnectError {
    let url = url.to_string();
    if is_connection_reset(&err) {
        return ConnectError::ConnectionReset { url };
    }
    if is_dns_failure(&err) {
        return ConnectError::HostUnresolvable { url };
    }
    if err.is_connect() {
        return ConnectError::Unreachable { url };
    }
    ConnectError::ConnectionFailed { url }
}

fn source_chain<'a>(
    err: &'a (dyn std::error::Error + 'static),
) -> impl Iterator<Item = &'a (dyn std::error::Error + 'static)> {
    std::iter::successors(Some(err), |err| err.source())
}

fn is_connection_reset(err: &reqwest::Error) -> bool {
    source_chain(err).any(|cause| {
        cause
            .downcast_ref::<std::io::Error>()
            .map(|io| io.kind() == std::io::ErrorKind::ConnectionReset)
            .unwrap_or(false)
    })
}

fn is_dns_failure(err: &reqwest::Error) -> bool {
    source_chain(err).any(|cause| {
        let text = cause.to_string();
        text.contains("dns error") || text.contains("failed to lookup address")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kconn_core::ConnectConfig;

    #[test]
    fn test_new_rejects_missing_url() {
        let err = ConnectClient::new(ConnectConfig::new("")).unwrap_err();
        assert!(matches!(err, ConnectError::NotConfigured));
    }

    #[test]
    fn test_source_chain_reaches_nested_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
        let wrapped: Box<dyn std::error::Error + Send + Sync> = Box::new(io);
        let outer = std::io::Error::new(std::io::ErrorKind::Other, wrapped);

        let found = source_chain(&outer).any(|cause| {
            cause
                .downcast_ref::<std::io::Error>()
                .map(|io| io.kind() == std::io::ErrorKind::ConnectionReset)
                .unwrap_or(false)
        });
        assert!(found);
    }

    #[test]
    fn test_payload_into_value() {
        let payload = Payload::Json(serde_json::json!({"a": 1}));
        assert_eq!(payload.into_value()["a"], 1);

        let payload = Payload::Text("plain".to_string());
        assert_eq!(payload.into_value(), Value::String("plain".to_string()));
    }
}
