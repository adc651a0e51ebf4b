//! Bulk export/import orchestration
//!
//! Export is all-or-nothing: the first per-connector failure aborts the whole
//! operation with an error naming the connector. Import is best-effort: every
//! item yields an [`ImportResult`] in input order, and one rejection does not
//! stop the rest. Per-item calls run strictly in sequence to bound load on
//! the cluster.

use std::collections::BTreeMap;

use reqwest::Method;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use kconn_core::{ConnectError, ImportResult};

use crate::client::ConnectClient;

/// One connector to import: its name plus the raw config object
#[derive(Debug, Clone)]
pub struct ImportItem {
    pub name: String,
    pub config: Value,
}

impl ConnectClient {
    /// Submits a new connector to the cluster
    ///
    /// `connector_config` is passed through as-is; schema correctness is the
    /// cluster's responsibility and its rejection becomes the returned error.
    pub async fn create_connector(
        &self,
        name: &str,
        connector_config: &Value,
    ) -> Result<(), ConnectError> {
        let endpoint = self.cluster_endpoint("/connectors");
        let body = json!({ "name": name, "config": connector_config });
        self.request(Method::POST, &endpoint, Some(&body)).await?;
        info!(connector = name, "created connector");
        Ok(())
    }

    /// Fetches the config of every named connector, aborting on the first
    /// failure
    pub async fn export_connectors(
        &self,
        names: &[String],
    ) -> Result<BTreeMap<String, Value>, ConnectError> {
        let mut configs = BTreeMap::new();
        for name in names {
            let endpoint = self.cluster_endpoint(&format!("/connectors/{}/config", name));
            let payload = self
                .request(Method::GET, &endpoint, None)
                .await
                .map_err(|err| ConnectError::ExportFailed {
                    name: name.clone(),
                    source: Box::new(err),
                })?;
            configs.insert(name.clone(), payload.into_value());
        }
        info!(count = configs.len(), "exported connector configs");
        Ok(configs)
    }

    /// Exports every connector currently known to the cluster
    ///
    /// A cluster with zero connectors is an error, not an empty success.
    pub async fn export_all(&self) -> Result<BTreeMap<String, Value>, ConnectError> {
        let overview = self.get_connectors().await?;
        if overview.connectors.is_empty() {
            return Err(ConnectError::InvalidConfig(
                "No connectors found to export".to_string(),
            ));
        }
        let names: Vec<String> = overview
            .connectors
            .iter()
            .map(|connector| connector.name.clone())
            .collect();
        self.export_connectors(&names).await
    }

    /// Imports connectors best-effort, one result per item in input order
    pub async fn import_connectors(&self, items: &[ImportItem]) -> Vec<ImportResult> {
        self.import_connectors_with_cancel(items, &CancellationToken::new())
            .await
    }

    /// Like [`import_connectors`](Self::import_connectors), but stops at the
    /// next item boundary once `cancel` fires, returning the results already
    /// computed
    pub async fn import_connectors_with_cancel(
        &self,
        items: &[ImportItem],
        cancel: &CancellationToken,
    ) -> Vec<ImportResult> {
        let mut results = Vec::with_capacity(items.len());
        for item in items {
            let outcome = tokio::select! {
                _ = cancel.cancelled() => {
                    warn!(
                        done = results.len(),
                        total = items.len(),
                        "import cancelled"
                    );
                    break;
                }
                outcome = self.create_connector(&item.name, &item.config) => outcome,
            };

            match outcome {
                Ok(()) => results.push(ImportResult {
                    name: item.name.clone(),
                    success: true,
                    error: None,
                }),
                Err(err) => results.push(ImportResult {
                    name: item.name.clone(),
                    success: false,
                    error: Some(err.to_string()),
                }),
            }
        }

        let succeeded = results.iter().filter(|result| result.success).count();
        info!(succeeded, total = items.len(), "import finished");
        results
    }
}

/// Renders an exported config map as the operator-facing file payload:
/// a pretty-printed `{name: config}` object
pub fn render_export(configs: &BTreeMap<String, Value>) -> Result<String, ConnectError> {
    Ok(serde_json::to_string_pretty(configs)?)
}

/// Parses the operator-supplied import file: a JSON object mapping connector
/// names to config objects
pub fn parse_import_payload(payload: &str) -> Result<Vec<ImportItem>, ConnectError> {
    let value: Value = serde_json::from_str(payload)?;
    let entries = match value {
        Value::Object(entries) => entries,
        _ => {
            return Err(ConnectError::InvalidConfig(
                "Import payload must be a JSON object mapping connector names to configs."
                    .to_string(),
            ))
        }
    };
    Ok(entries
        .into_iter()
        .map(|(name, config)| ImportItem { name, config })
        .collect())
}


#[cfg(test)]
mod integration_tests {
    use super::*;
    use kconn_core::ConnectConfig;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ConnectClient {
        ConnectClient::new(ConnectConfig::new(server.uri())).unwrap()
    }

    fn config_mock(name: &str, template: ResponseTemplate) -> Mock {
        Mock::given(method("GET"))
            .and(path(format!("/clusters/local/connectors/{}/config", name)))
            .respond_with(template)
    }

    #[tokio::test]
    async fn test_create_connector_posts_name_and_config() {
        let server = MockServer::start().await;

        let config = json!({"connector.class": "io.example.Sink", "topics": "t1"});
        Mock::given(method("POST"))
            .and(path("/clusters/local/connectors"))
            .and(body_json(json!({"name": "audit-sink", "config": config})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "name": "audit-sink",
                "config": {"connector.class": "io.example.Sink", "topics": "t1"},
                "tasks": []
            })))
            .mount(&server)
            .await;

        client_for(&server)
            .create_connector("audit-sink", &config)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_export_is_all_or_nothing() {
        let server = MockServer::start().await;

        config_mock(
            "a",
            ResponseTemplate::new(200).set_body_json(json!({"connector.class": "A"})),
        )
        .mount(&server)
        .await;
        config_mock(
            "b",
            ResponseTemplate::new(500)
                .set_body_json(json!({"message": "rebalance in progress"})),
        )
        .mount(&server)
        .await;
        config_mock(
            "c",
            ResponseTemplate::new(200).set_body_json(json!({"connector.class": "C"})),
        )
        .mount(&server)
        .await;

        let names = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let err = client_for(&server)
            .export_connectors(&names)
            .await
            .unwrap_err();

        match err {
            ConnectError::ExportFailed { ref name, .. } => assert_eq!(name, "b"),
            other => panic!("expected ExportFailed, got {:?}", other),
        }
        let text = err.to_string();
        assert!(text.contains("Failed to fetch config for b"));
        assert!(text.contains("rebalance in progress"));
    }

    #[tokio::test]
    async fn test_export_collects_every_config() {
        let server = MockServer::start().await;

        config_mock(
            "a",
            ResponseTemplate::new(200).set_body_json(json!({"connector.class": "A"})),
        )
        .mount(&server)
        .await;
        config_mock(
            "b",
            ResponseTemplate::new(200).set_body_json(json!({"connector.class": "B"})),
        )
        .mount(&server)
        .await;

        let names = vec!["a".to_string(), "b".to_string()];
        let configs = client_for(&server).export_connectors(&names).await.unwrap();

        assert_eq!(configs.len(), 2);
        assert_eq!(configs["a"]["connector.class"], "A");
        assert_eq!(configs["b"]["connector.class"], "B");
    }

    #[tokio::test]
    async fn test_export_all_with_zero_connectors_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/clusters/local/connectors"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let err = client_for(&server).export_all().await.unwrap_err();
        match err {
            ConnectError::InvalidConfig(message) => {
                assert!(message.contains("No connectors found to export"));
            }
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_import_is_best_effort_and_order_preserving() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/clusters/local/connectors"))
            .and(body_json(json!({"name": "two", "config": {"n": 2}})))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "message": "Connector two already exists"
            })))
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/clusters/local/connectors"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let items = vec![
            ImportItem {
                name: "one".to_string(),
                config: json!({"n": 1}),
            },
            ImportItem {
                name: "two".to_string(),
                config: json!({"n": 2}),
            },
            ImportItem {
                name: "three".to_string(),
                config: json!({"n": 3}),
            },
        ];

        let results = client_for(&server).import_connectors(&items).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].name, "one");
        assert!(results[0].success);
        assert!(results[0].error.is_none());

        assert_eq!(results[1].name, "two");
        assert!(!results[1].success);
        assert!(results[1]
            .error
            .as_deref()
            .unwrap()
            .contains("already exists"));

        assert_eq!(results[2].name, "three");
        assert!(results[2].success);
    }

    #[tokio::test]
    async fn test_cancelled_import_returns_results_already_computed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/clusters/local/connectors"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let items = vec![
            ImportItem {
                name: "one".to_string(),
                config: json!({}),
            },
            ImportItem {
                name: "two".to_string(),
                config: json!({}),
            },
        ];

        let cancel = CancellationToken::new();
        cancel.cancel();

        let results = client_for(&server)
            .import_connectors_with_cancel(&items, &cancel)
            .await;
        assert!(results.is_empty());
    }
}
