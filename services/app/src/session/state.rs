//! services/app/src/session/state.rs
//!
//! Defines the shared application state handed to every session.

use crate::adapters::{FilePreferenceStore, MemoryPreferenceStore, OpenAiHealthAdapter};
use crate::config::Config;
use async_trait::async_trait;
use careconnect_core::{
    analysis::{HealthAnalysis, MoodAnalysis},
    directory::DoctorDirectory,
    ports::{AnalysisError, AnalysisResult, HealthAnalysisService, PreferenceStore},
};
use std::sync::Arc;
use tracing::warn;

//=========================================================================================
// AppState (Shared Across All Sessions)
//=========================================================================================

/// The shared application state, created once at startup.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<DoctorDirectory>,
    pub analysis: Arc<dyn HealthAnalysisService>,
    pub preferences: Arc<dyn PreferenceStore>,
}

impl AppState {
    /// Wires the real adapters from configuration.
    ///
    /// Without an API key the analysis port is replaced by one that always reports
    /// the request as rejected, so the rest of the app keeps working.
    pub fn from_config(config: &Config) -> Self {
        let analysis: Arc<dyn HealthAnalysisService> = match config.require_api_key() {
            Ok(api_key) => {
                let client = OpenAiHealthAdapter::client_for(&config.analysis_api_base, api_key);
                Arc::new(OpenAiHealthAdapter::new(client, config.analysis_model.clone()))
            }
            Err(e) => {
                warn!("{}; AI checks will report the service as unavailable", e);
                Arc::new(UnconfiguredAnalysis)
            }
        };

        let preferences = Arc::new(FilePreferenceStore::new(config.preferences_path.clone()));

        Self {
            directory: Arc::new(DoctorDirectory::demo()),
            analysis,
            preferences,
        }
    }

    /// State with the demo directory, in-memory preferences and the given analysis port.
    pub fn with_analysis(analysis: Arc<dyn HealthAnalysisService>) -> Self {
        Self {
            directory: Arc::new(DoctorDirectory::demo()),
            analysis,
            preferences: Arc::new(MemoryPreferenceStore::new()),
        }
    }
}

/// Stands in for the analysis service when no API key is configured.
struct UnconfiguredAnalysis;

#[async_trait]
impl HealthAnalysisService for UnconfiguredAnalysis {
    async fn analyze_symptoms(&self, _symptoms: &str) -> AnalysisResult<HealthAnalysis> {
        Err(AnalysisError::Rejected("no API key configured".to_string()))
    }

    async fn analyze_mood(&self, _transcript: &str) -> AnalysisResult<MoodAnalysis> {
        Err(AnalysisError::Rejected("no API key configured".to_string()))
    }
}
