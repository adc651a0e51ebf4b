//! Normalized domain model for connectors and tasks
//!
//! The Kafka Connect REST API returns loosely shaped JSON trees whose fields
//! vary across API variants. These types are the strict form the rest of the
//! console works with; the client crate owns the fallible normalization step
//! that produces them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Execution state of a single connector task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskState {
    Running,
    Paused,
    Failed,
}

/// Connector-level state as reported by the cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConnectorStatus {
    Running,
    Paused,
    Failed,
    Unassigned,
}

/// Whether a connector produces into or consumes from Kafka
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorType {
    Source,
    Sink,
}

impl std::fmt::Display for ConnectorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectorStatus::Running => write!(f, "RUNNING"),
            ConnectorStatus::Paused => write!(f, "PAUSED"),
            ConnectorStatus::Failed => write!(f, "FAILED"),
            ConnectorStatus::Unassigned => write!(f, "UNASSIGNED"),
        }
    }
}

impl std::fmt::Display for ConnectorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectorType::Source => write!(f, "source"),
            ConnectorType::Sink => write!(f, "sink"),
        }
    }
}

/// One execution unit of a connector, pinned to a worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub state: TaskState,
    pub worker_id: String,
    /// Stack trace from the worker; present only for failed tasks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

/// A named source/sink unit, normalized from one REST payload entry
///
/// `id` always equals `name`: the Connect REST API has no separate identity.
/// `error_message` and `topics` are derived during normalization, never
/// transmitted by the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connector {
    pub id: String,
    pub name: String,
    pub status: ConnectorStatus,
    #[serde(rename = "type")]
    pub connector_type: ConnectorType,
    /// Fully qualified class name from `config["connector.class"]`
    pub plugin: String,
    pub topics: Vec<String>,
    pub tasks: Vec<Task>,
    pub config: HashMap<String, String>,
    /// Newline-joined traces of every failed task, in task order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Cluster-wide health counters derived from one connector fetch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_connectors: usize,
    pub failed_connectors: usize,
    /// Failed tasks across all connectors; independent of, and possibly
    /// larger than, `failed_connectors`
    pub failed_tasks: usize,
}

/// Outcome of one attempted connector import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    pub name: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
