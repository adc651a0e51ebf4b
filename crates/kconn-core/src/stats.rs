//! Cluster health aggregation
//!
//! A pure fold over an already-normalized connector slice. No I/O and no
//! error path; the counters are recomputed from scratch on every fetch and
//! never updated incrementally.

use crate::types::{Connector, ConnectorStatus, DashboardStats, TaskState};

/// Derives the dashboard counters from a normalized connector set
pub fn aggregate(connectors: &[Connector]) -> DashboardStats {
    let failed_connectors = connectors
        .iter()
        .filter(|c| c.status == ConnectorStatus::Failed)
        .count();
    let failed_tasks = connectors
        .iter()
        .flat_map(|c| c.tasks.iter())
        .filter(|t| t.state == TaskState::Failed)
        .count();

    DashboardStats {
        total_connectors: connectors.len(),
        failed_connectors,
        failed_tasks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ConnectorType, Task};
    use std::collections::HashMap;

    fn connector(name: &str, status: ConnectorStatus, tasks: Vec<Task>) -> Connector {
        Connector {
            id: name.to_string(),
            name: name.to_string(),
            status,
            connector_type: ConnectorType::Source,
            plugin: "io.example.Source".to_string(),
            topics: vec![],
            tasks,
            config: HashMap::new(),
            error_message: None,
        }
    }

    fn task(id: u32, state: TaskState) -> Task {
        Task {
            id,
            state,
            worker_id: "worker-1:8083".to_string(),
            trace: None,
        }
    }

    #[test]
    fn test_aggregate_empty() {
        let stats = aggregate(&[]);
        assert_eq!(stats, DashboardStats::default());
    }

    #[test]
    fn test_aggregate_counts_failed_connectors() {
        let connectors = vec![
            connector("a", ConnectorStatus::Running, vec![]),
            connector("b", ConnectorStatus::Failed, vec![]),
            connector("c", ConnectorStatus::Paused, vec![]),
        ];

        let stats = aggregate(&connectors);
        assert_eq!(stats.total_connectors, 3);
        assert_eq!(stats.failed_connectors, 1);
        assert_eq!(stats.failed_tasks, 0);
    }

    #[test]
    fn test_failed_tasks_counted_independently_of_connector_state() {
        // A running connector can still carry failed tasks, and a failed
        // connector can have more than one.
        let connectors = vec![
            connector(
                "a",
                ConnectorStatus::Running,
                vec![task(0, TaskState::Failed), task(1, TaskState::Running)],
            ),
            connector(
                "b",
                ConnectorStatus::Failed,
                vec![task(0, TaskState::Failed), task(1, TaskState::Failed)],
            ),
        ];

        let stats = aggregate(&connectors);
        assert_eq!(stats.total_connectors, 2);
        assert_eq!(stats.failed_connectors, 1);
        assert_eq!(stats.failed_tasks, 3);
    }
}
