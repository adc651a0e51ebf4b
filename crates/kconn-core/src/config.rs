//! Connection settings for a Kafka Connect cluster
//!
//! A [`ConnectConfig`] is supplied by the caller for every operation. The
//! engine holds no session: whoever drives it (a UI, a CLI, a test) owns the
//! credentials and hands them over per call.

use serde::{Deserialize, Serialize};

use crate::errors::ConnectError;

/// Cluster path prefix used when the caller does not supply one.
///
/// Deployments mount the Connect REST API under different prefixes
/// (`/clusters/local`, `/api/clusters/local`, ...), so this is overridable.
pub const DEFAULT_CLUSTER_PATH: &str = "/clusters/local";

/// Connection settings for a Kafka Connect REST endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectConfig {
    /// Base URL of the Connect REST API, e.g. `http://localhost:8083`
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Cluster path prefix; [`DEFAULT_CLUSTER_PATH`] when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_path: Option<String>,
}

impl ConnectConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: None,
            password: None,
            cluster_path: None,
        }
    }

    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_cluster_path(mut self, cluster_path: impl Into<String>) -> Self {
        self.cluster_path = Some(cluster_path.into());
        self
    }

    /// Checks the invariants that must hold before any call is attempted
    pub fn validate(&self) -> Result<(), ConnectError> {
        if self.url.trim().is_empty() {
            return Err(ConnectError::NotConfigured);
        }
        Ok(())
    }

    /// Basic-Auth credentials, present only when both halves are set
    pub fn basic_auth(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(username), Some(password)) => Some((username, password)),
            _ => None,
        }
    }

    pub fn cluster_path_or_default(&self) -> &str {
        self.cluster_path.as_deref().unwrap_or(DEFAULT_CLUSTER_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_empty_url() {
        let config = ConnectConfig::new("");
        assert!(matches!(
            config.validate(),
            Err(ConnectError::NotConfigured)
        ));

        let config = ConnectConfig::new("   ");
        assert!(matches!(
            config.validate(),
            Err(ConnectError::NotConfigured)
        ));
    }

    #[test]
    fn test_validate_accepts_url() {
        let config = ConnectConfig::new("http://localhost:8083");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_basic_auth_requires_both_halves() {
        let config = ConnectConfig::new("http://localhost:8083");
        assert!(config.basic_auth().is_none());

        let mut config = ConnectConfig::new("http://localhost:8083");
        config.username = Some("admin".to_string());
        assert!(config.basic_auth().is_none());

        let config =
            ConnectConfig::new("http://localhost:8083").with_basic_auth("admin", "secret");
        assert_eq!(config.basic_auth(), Some(("admin", "secret")));
    }

    #[test]
    fn test_cluster_path_default() {
        let config = ConnectConfig::new("http://localhost:8083");
        assert_eq!(config.cluster_path_or_default(), "/clusters/local");

        let config = config.with_cluster_path("/api/clusters/local");
        assert_eq!(config.cluster_path_or_default(), "/api/clusters/local");
    }
}
