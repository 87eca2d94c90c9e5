//! The root cause analysis record and its JSON Schema.
//!
//! `RootCauseAnalysis` is the only data shape the model is asked to emit.
//! Field doc comments double as the schema descriptions embedded in the
//! system prompt, so the prompt and the validator cannot drift apart.

use schemars::schema::RootSchema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Structured RCA report produced from a single incident log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RootCauseAnalysis {
    /// A short, professional title for the incident.
    pub title: String,
    /// Estimated severity (Low, Medium, High, Critical).
    pub severity: String,
    /// A 2-sentence executive summary of what happened.
    pub summary: String,
    /// The technical reason for the failure (e.g., Deadlock, Timeout).
    pub root_cause: String,
    /// A list of specific lines from the log that prove the root cause.
    pub evidence: Vec<String>,
    /// Recommended steps to fix the issue.
    pub remediation: Vec<String>,
}

impl RootCauseAnalysis {
    /// JSON Schema for the record, derived from the type definition.
    pub fn json_schema() -> RootSchema {
        schemars::schema_for!(RootCauseAnalysis)
    }

    /// Field names in declaration order, as listed in the schema.
    pub fn field_names() -> Vec<String> {
        Self::json_schema()
            .schema
            .object
            .map(|object| object.properties.keys().cloned().collect())
            .unwrap_or_default()
    }
}
