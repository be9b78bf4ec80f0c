//! services/app/src/adapters/health_llm.rs
//!
//! This module contains the adapter for the health analysis LLM.
//! It implements the `HealthAnalysisService` port from the `core` crate by calling an
//! OpenAI-compatible chat completions endpoint (Gemini's by default) with a JSON schema
//! attached to the request.

use async_openai::{
    config::OpenAIConfig,
    error::{ApiError, OpenAIError},
    Client,
};
use async_trait::async_trait;
use careconnect_core::{
    analysis::{parse_analysis, AnalysisKind, HealthAnalysis, MoodAnalysis, MoodCheck, SymptomCheck},
    ports::{AnalysisError, AnalysisResult, HealthAnalysisService},
};
use serde::Deserialize;
use serde_json::json;
use std::time::Instant;
use tracing::{info, warn};

//=========================================================================================
// Wire Types
//=========================================================================================

// Only the part of the chat completion reply we read.
#[derive(Deserialize)]
struct CompletionReply {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `HealthAnalysisService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiHealthAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiHealthAdapter {
    /// Creates a new `OpenAiHealthAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }

    /// Builds a client for the given endpoint and key.
    pub fn client_for(api_base: &str, api_key: &str) -> Client<OpenAIConfig> {
        let config = OpenAIConfig::new()
            .with_api_base(api_base)
            .with_api_key(api_key);
        Client::with_config(config)
    }

    /// Sends one request for an analysis kind and validates the reply.
    async fn run<K: AnalysisKind>(&self, input: &str) -> AnalysisResult<K::Output> {
        if input.trim().is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        let request = json!({
            "model": self.model,
            "n": 1,
            "messages": [
                { "role": "user", "content": K::prompt(input) }
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": K::NAME,
                    "schema": K::schema(),
                }
            }
        });

        let start = Instant::now();
        let reply: CompletionReply = self
            .client
            .chat()
            .create_byot(request)
            .await
            .map_err(|e| {
                let err = classify_error(e);
                warn!(kind = K::NAME, error = %err, "Analysis request failed");
                err
            })?;
        info!(kind = K::NAME, elapsed = ?start.elapsed(), "Analysis response received");

        // Extract the text content from the first choice in the response.
        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                AnalysisError::Schema("Analysis LLM returned no text content.".to_string())
            })?;

        parse_analysis(&content).inspect_err(|err| {
            warn!(kind = K::NAME, error = %err, "Analysis response rejected");
        })
    }
}

// Error types and codes (OpenAI and Gemini spellings) that mean the request itself
// was refused. Sending it again unchanged gets the same answer.
const REJECTED_KINDS: &[&str] = &[
    "invalid_request_error",
    "authentication_error",
    "permission_error",
    "not_found_error",
    "insufficient_quota",
    "invalid_api_key",
    "model_not_found",
    "INVALID_ARGUMENT",
    "UNAUTHENTICATED",
    "PERMISSION_DENIED",
    "NOT_FOUND",
];

/// Maps a client error onto the retry distinction the port exposes.
///
/// Server errors and exhausted rate-limit retries arrive as `ApiError`s with no
/// refusal marker and stay retryable; an undecodable body is a schema failure.
fn classify_error(err: OpenAIError) -> AnalysisError {
    match err {
        OpenAIError::JSONDeserialize(..) => AnalysisError::Schema(err.to_string()),
        OpenAIError::ApiError(api) if is_refusal(&api) => AnalysisError::Rejected(api.to_string()),
        OpenAIError::InvalidArgument(msg) => AnalysisError::Rejected(msg),
        other => AnalysisError::Network(other.to_string()),
    }
}

fn is_refusal(api: &ApiError) -> bool {
    [api.r#type.as_deref(), api.code.as_deref()]
        .into_iter()
        .flatten()
        .any(|kind| REJECTED_KINDS.contains(&kind))
}

//=========================================================================================
// `HealthAnalysisService` Trait Implementation
//=========================================================================================

#[async_trait]
impl HealthAnalysisService for OpenAiHealthAdapter {
    async fn analyze_symptoms(&self, symptoms: &str) -> AnalysisResult<HealthAnalysis> {
        self.run::<SymptomCheck>(symptoms).await
    }

    async fn analyze_mood(&self, transcript: &str) -> AnalysisResult<MoodAnalysis> {
        self.run::<MoodCheck>(transcript).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Nothing listens on port 9 locally, so the request fails at the transport layer.
    fn unreachable_adapter() -> OpenAiHealthAdapter {
        let client = OpenAiHealthAdapter::client_for("http://127.0.0.1:9/v1", "test-key");
        OpenAiHealthAdapter::new(client, "test-model".to_string())
    }

    #[tokio::test]
    async fn blank_input_sends_nothing() {
        let adapter = unreachable_adapter();
        assert_eq!(adapter.analyze_symptoms("  ").await, Err(AnalysisError::EmptyInput));
        assert_eq!(adapter.analyze_mood("").await, Err(AnalysisError::EmptyInput));
    }

    fn api_error(kind: Option<&str>, code: Option<&str>) -> OpenAIError {
        OpenAIError::ApiError(ApiError {
            message: "upstream said no".to_string(),
            r#type: kind.map(str::to_string),
            param: None,
            code: code.map(str::to_string),
        })
    }

    #[test]
    fn refused_requests_are_not_retryable() {
        let bad_key = classify_error(api_error(Some("invalid_request_error"), Some("invalid_api_key")));
        assert!(matches!(bad_key, AnalysisError::Rejected(_)));
        assert!(!bad_key.is_retryable());

        let unknown_model = classify_error(api_error(None, Some("model_not_found")));
        assert!(matches!(unknown_model, AnalysisError::Rejected(_)));

        let gemini_auth = classify_error(api_error(Some("UNAUTHENTICATED"), None));
        assert!(matches!(gemini_auth, AnalysisError::Rejected(_)));

        let client_side = classify_error(OpenAIError::InvalidArgument("bad args".to_string()));
        assert!(matches!(client_side, AnalysisError::Rejected(_)));
    }

    #[test]
    fn server_and_rate_limit_errors_stay_retryable() {
        // What the client builds from a 5xx body.
        let server = classify_error(api_error(None, None));
        assert!(server.is_retryable());

        let rate_limited = classify_error(api_error(Some("requests"), Some("rate_limit_exceeded")));
        assert!(rate_limited.is_retryable());
    }

    #[test]
    fn undecodable_body_is_a_schema_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = classify_error(OpenAIError::JSONDeserialize(json_err, "{".to_string()));
        assert!(matches!(err, AnalysisError::Schema(_)));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn unreachable_service_is_a_network_error() {
        let adapter = unreachable_adapter();
        let err = adapter.analyze_symptoms("fever and headache").await.unwrap_err();
        assert!(err.is_retryable(), "expected a network error, got {:?}", err);
    }
}
