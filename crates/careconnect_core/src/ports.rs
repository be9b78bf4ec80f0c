//! crates/careconnect_core/src/ports.rs
//!
//! Defines the service contracts (traits) the core depends on.
//! These traits form the boundary of the hexagonal architecture, so the core stays
//! independent of the concrete AI provider and of where preferences are kept.

use async_trait::async_trait;

use crate::analysis::{HealthAnalysis, MoodAnalysis};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for port operations that are not analysis requests.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

/// Why an analysis produced no result.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// The request never got a usable response: transport failure, a server error
    /// or rate limiting. Asking again later may succeed.
    #[error("Analysis service unreachable: {0}")]
    Network(String),
    /// The service refused the request itself (bad key, unknown model, invalid
    /// request). Repeating it unchanged will fail the same way.
    #[error("Analysis service rejected the request: {0}")]
    Rejected(String),
    /// A response arrived but was empty or did not match the declared schema.
    #[error("Analysis response did not match the expected schema: {0}")]
    Schema(String),
    /// Blank input; no request was sent.
    #[error("Nothing to analyze")]
    EmptyInput,
}

impl AnalysisError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, AnalysisError::Network(_))
    }
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait HealthAnalysisService: Send + Sync {
    /// Preliminary check of free-text symptoms. One request, no retry.
    async fn analyze_symptoms(&self, symptoms: &str) -> AnalysisResult<HealthAnalysis>;

    /// Emotional state and stress level from a free-text transcript.
    async fn analyze_mood(&self, transcript: &str) -> AnalysisResult<MoodAnalysis>;
}

#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Reads a stored value. A missing key is `Ok(None)`.
    async fn get(&self, key: &str) -> PortResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> PortResult<()>;
}
