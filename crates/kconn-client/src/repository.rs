//! Connector repository: bulk fetch and normalization
//!
//! One `GET /connectors?expand=status&expand=info` call returns status and
//! info for every connector, keyed by name. Each entry is normalized into the
//! strict domain model; entries the cluster reports in a transiently
//! inconsistent shape (missing `status`, `info`, or `status.connector`) are
//! skipped, not treated as errors. A transport-level failure aborts the whole
//! call with no partial result.

use std::collections::HashMap;

use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use kconn_core::{
    aggregate, ConnectError, Connector, ConnectorStatus, ConnectorType, DashboardStats, Task,
    TaskState,
};

use crate::client::ConnectClient;

/// Result of one connector fetch: the normalized list plus the health
/// counters folded from it
#[derive(Debug, Clone)]
pub struct ConnectorOverview {
    pub connectors: Vec<Connector>,
    pub stats: DashboardStats,
}

// Raw payload shapes. Every upstream field that can be absent is an explicit
// Option; normalization decides what absence means.

#[derive(Debug, Deserialize)]
struct RawEntry {
    status: Option<RawStatus>,
    info: Option<RawInfo>,
}

#[derive(Debug, Deserialize)]
struct RawStatus {
    connector: Option<RawConnectorState>,
    #[serde(default)]
    tasks: Vec<RawTask>,
}

#[derive(Debug, Deserialize)]
struct RawConnectorState {
    state: ConnectorStatus,
}

#[derive(Debug, Deserialize)]
struct RawTask {
    id: u32,
    state: TaskState,
    worker_id: String,
    #[serde(default)]
    trace: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawInfo {
    #[serde(rename = "type")]
    connector_type: ConnectorType,
    #[serde(default)]
    config: HashMap<String, String>,
}

impl ConnectClient {
    /// Fetches the full connector set and folds it into dashboard stats
    ///
    /// The returned list follows the payload's key order, which the backend
    /// does not guarantee stable across calls; callers must not rely on it.
    pub async fn get_connectors(&self) -> Result<ConnectorOverview, ConnectError> {
        let endpoint = self.cluster_endpoint("/connectors?expand=status&expand=info");
        let payload = self.request(Method::GET, &endpoint, None).await?;

        let entries = match payload.into_value() {
            Value::Object(entries) => entries,
            _ => {
                return Err(ConnectError::Upstream {
                    endpoint,
                    status: 200,
                    message: "Failed to fetch connectors.".to_string(),
                })
            }
        };

        let mut connectors = Vec::with_capacity(entries.len());
        for (name, raw) in entries {
            match normalize_entry(&name, raw) {
                Some(connector) => connectors.push(connector),
                None => warn!(connector = %name, "skipping connector with missing status or info"),
            }
        }

        let stats = aggregate(&connectors);
        debug!(
            total = stats.total_connectors,
            failed = stats.failed_connectors,
            "fetched connectors"
        );

        Ok(ConnectorOverview { connectors, stats })
    }
}

/// Builds one `Connector` from a raw payload entry, or `None` when the entry
/// is missing a required sub-object or does not deserialize
fn normalize_entry(name: &str, raw: Value) -> Option<Connector> {
    let entry: RawEntry = serde_json::from_value(raw).ok()?;
    let status = entry.status?;
    let info = entry.info?;
    let state = status.connector?;

    let tasks: Vec<Task> = status
        .tasks
        .into_iter()
        .map(|task| Task {
            id: task.id,
            state: task.state,
            worker_id: task.worker_id,
            trace: task.trace,
        })
        .collect();

    let error_message = join_failed_traces(&tasks);
    let topics = info
        .config
        .get("topics")
        .map(|topics| topics.split(',').map(str::to_string).collect())
        .unwrap_or_default();
    let plugin = info
        .config
        .get("connector.class")
        .cloned()
        .unwrap_or_default();

    Some(Connector {
        id: name.to_string(),
        name: name.to_string(),
        status: state.state,
        connector_type: info.connector_type,
        plugin,
        topics,
        tasks,
        config: info.config,
        error_message,
    })
}

/// Newline-joins the traces of every failed task, in task order; `None` when
/// no task failed
fn join_failed_traces(tasks: &[Task]) -> Option<String> {
    let failed: Vec<&Task> = tasks
        .iter()
        .filter(|task| task.state == TaskState::Failed)
        .collect();
    if failed.is_empty() {
        return None;
    }
    Some(
        failed
            .iter()
            .map(|task| task.trace.as_deref().unwrap_or_default())
            .collect::<Vec<_>>()
            .join("\n"),
    )
}
