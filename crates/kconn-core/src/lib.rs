//! Core domain model for the Kafka Connect console
//!
//! This crate holds the types shared by the console's service crates:
//!
//! - **Domain model**: normalized [`Connector`] and [`Task`] values built from
//!   the Kafka Connect REST API's loosely shaped payloads
//! - **Connection settings**: [`ConnectConfig`], supplied by the caller for
//!   every operation (the core keeps no session state)
//! - **Error taxonomy**: [`ConnectError`], the single closed enumeration every
//!   layer above the transport matches on
//! - **Health statistics**: [`DashboardStats`] and the pure fold that
//!   computes it
//!
//! All entities are request-scoped: constructed fresh from one API call,
//! never cached or mutated in place.

pub mod config;
pub mod errors;
pub mod stats;
pub mod types;

pub use config::{ConnectConfig, DEFAULT_CLUSTER_PATH};
pub use errors::ConnectError;
pub use stats::aggregate;
pub use types::{
    Connector, ConnectorStatus, ConnectorType, DashboardStats, ImportResult, Task, TaskState,
};
