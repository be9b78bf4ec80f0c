//! crates/careconnect_core/src/analysis.rs
//!
//! Payloads returned by the AI analysis port, the prompts and JSON schemas that
//! request them, and the parser that validates a raw model reply.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

use crate::ports::{AnalysisError, AnalysisResult};

/// Matches a reply wrapped in a Markdown code fence, with or without a language tag.
static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*```[A-Za-z]*\s*(.*?)\s*```\s*$").expect("code fence pattern is valid")
});

//=========================================================================================
// Payloads
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthAnalysis {
    pub possible_causes: Vec<String>,
    pub recommendation: String,
    pub urgency: String,
    pub disclaimer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Low,
    Medium,
    High,
    Unknown,
}

impl HealthAnalysis {
    /// Classifies the free-text urgency the model returned.
    pub fn urgency_level(&self) -> Urgency {
        let urgency = self.urgency.to_ascii_lowercase();
        if urgency.contains("high") || urgency.contains("urgent") || urgency.contains("emergency") {
            Urgency::High
        } else if urgency.contains("medium") || urgency.contains("moderate") {
            Urgency::Medium
        } else if urgency.contains("low") {
            Urgency::Low
        } else {
            Urgency::Unknown
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodAnalysis {
    pub mood: String,
    /// Scale of 1-10, kept as text.
    #[serde(deserialize_with = "string_or_number")]
    pub stress_level: String,
    pub advice: String,
}

// Models sometimes emit the stress level as a bare number.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Level {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Level::deserialize(deserializer)? {
        Level::Text(text) => text,
        Level::Number(number) => number.to_string(),
    })
}

//=========================================================================================
// Requests
//=========================================================================================

/// What the port needs to know to request one kind of analysis.
pub trait AnalysisKind {
    type Output: DeserializeOwned;

    /// Schema name sent alongside the JSON schema.
    const NAME: &'static str;

    fn prompt(input: &str) -> String;

    fn schema() -> Value;
}

pub struct SymptomCheck;

impl AnalysisKind for SymptomCheck {
    type Output = HealthAnalysis;

    const NAME: &'static str = "health_analysis";

    fn prompt(symptoms: &str) -> String {
        format!(
            "Perform a preliminary health check for these symptoms: {}.\n\
             Return the analysis in a helpful, supportive tone.\n\
             IMPORTANT: Include a clear medical disclaimer that this is not professional medical advice.",
            symptoms.trim()
        )
    }

    fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "possibleCauses": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "List of possible common conditions"
                },
                "recommendation": {
                    "type": "string",
                    "description": "Short immediate action to take"
                },
                "urgency": {
                    "type": "string",
                    "description": "How urgent it is to see a doctor (Low, Medium, High)"
                },
                "disclaimer": {
                    "type": "string",
                    "description": "Standard medical disclaimer"
                }
            },
            "required": ["possibleCauses", "recommendation", "urgency", "disclaimer"]
        })
    }
}

pub struct MoodCheck;

impl AnalysisKind for MoodCheck {
    type Output = MoodAnalysis;

    const NAME: &'static str = "mood_analysis";

    fn prompt(transcript: &str) -> String {
        format!(
            "Analyze the following patient's voice transcript and determine their emotional state and stress level: \"{}\".",
            transcript.trim()
        )
    }

    fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "mood": { "type": "string" },
                "stressLevel": { "type": "string", "description": "Scale of 1-10" },
                "advice": { "type": "string" }
            },
            "required": ["mood", "stressLevel", "advice"]
        })
    }
}

//=========================================================================================
// Parsing
//=========================================================================================

/// Validates a raw model reply against the payload type.
///
/// Surrounding whitespace and a single Markdown code fence are tolerated. An empty
/// reply, malformed JSON or a missing/mistyped field is a schema failure.
pub fn parse_analysis<T: DeserializeOwned>(raw: &str) -> AnalysisResult<T> {
    let body = match CODE_FENCE.captures(raw) {
        Some(captures) => captures.get(1).map_or("", |m| m.as_str()),
        None => raw.trim(),
    };

    if body.is_empty() {
        return Err(AnalysisError::Schema("empty response".to_string()));
    }

    serde_json::from_str(body).map_err(|e| AnalysisError::Schema(e.to_string()))
}
