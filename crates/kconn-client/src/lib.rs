//! Kafka Connect REST client
//!
//! This crate is the engine behind the console: it talks to the Kafka
//! Connect REST API, normalizes its inconsistent response shapes into the
//! `kconn-core` domain model, and orchestrates bulk export/import.
//!
//! # Usage
//!
//! The entry point is [`ConnectClient`], built from a per-session
//! [`kconn_core::ConnectConfig`]:
//!
//! ```ignore
//! use kconn_client::ConnectClient;
//! use kconn_core::ConnectConfig;
//!
//! let client = ConnectClient::new(ConnectConfig::new("http://localhost:8083"))?;
//!
//! // Verify the endpoint before anything else
//! client.test_connection().await?;
//!
//! // One call returns the normalized connector list plus health counters
//! let overview = client.get_connectors().await?;
//! println!("{} connectors, {} failed", overview.stats.total_connectors,
//!     overview.stats.failed_connectors);
//! ```
//!
//! All operations are single-flight sequential pipelines issued on demand;
//! nothing polls in the background and no state is cached across calls.

pub mod client;
pub mod repository;
pub mod transfer;

pub use client::{ConnectClient, Payload};
pub use repository::ConnectorOverview;
pub use transfer::{parse_import_payload, render_export, ImportItem};
