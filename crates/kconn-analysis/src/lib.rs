//! AI error-explanation boundary
//!
//! The console can hand a connector's error message to a text-generation
//! service and show the returned prose next to the failure. The engine never
//! interprets that prose; this crate only defines the collaborator seam and
//! a thin service that validates input and normalizes failures.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// Prose returned by the analyzer for one error message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorAnalysis {
    pub solutions: String,
}

/// Analysis errors
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Error message is required.")]
    EmptyMessage,

    /// The collaborator failed; the cause stays in the logs, the user sees a
    /// generic message
    #[error("An unexpected error occurred during analysis. Please try again later.")]
    Failed(String),
}

/// The opaque collaborator: takes a raw error message, returns solutions
/// prose. Implementations live outside the engine.
#[async_trait]
pub trait ErrorAnalyzer: Send + Sync {
    async fn analyze(&self, error_message: &str) -> anyhow::Result<ErrorAnalysis>;
}

/// Validating wrapper around an [`ErrorAnalyzer`]
pub struct AnalysisService<A> {
    analyzer: A,
}

impl<A: ErrorAnalyzer> AnalysisService<A> {
    pub fn new(analyzer: A) -> Self {
        Self { analyzer }
    }

    /// Runs the analyzer on a non-empty error message
    pub async fn get_error_analysis(
        &self,
        error_message: &str,
    ) -> Result<ErrorAnalysis, AnalysisError> {
        if error_message.trim().is_empty() {
            return Err(AnalysisError::EmptyMessage);
        }

        match self.analyzer.analyze(error_message).await {
            Ok(analysis) => Ok(analysis),
            Err(err) => {
                error!(%err, "error analysis failed");
                Err(AnalysisError::Failed(err.to_string()))
            }
        }
    }
}
