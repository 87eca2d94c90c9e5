//! Prompt construction
//!
//! The system instruction embeds the JSON Schema of [`RootCauseAnalysis`]
//! and names its fields. Both come from the record type itself.

use crate::record::RootCauseAnalysis;
use crate::Result;

/// Lead-in placed before the raw log text in the user message
pub const USER_LEAD_IN: &str = "Here is the log data:\n\n";

/// Instructions built once per process and reused for every request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompts {
    system: String,
}

impl Prompts {
    /// Build the system instruction from the record schema
    pub fn new() -> Result<Self> {
        let schema = serde_json::to_string(&RootCauseAnalysis::json_schema())?;
        let fields = RootCauseAnalysis::field_names().join(", ");

        let system = format!(
            "\nYou are a Principal Site Reliability Engineer. Analyze the input log and generate a Root Cause Analysis report.\n\
             \n\
             CRITICAL INSTRUCTION:\n\
             Output valid JSON only.\n\
             Do NOT return the schema definition.\n\
             Do NOT use the key \"properties\".\n\
             You must output a single JSON object where the keys are the field names ({fields}) and the values are the analysis from the log.\n\
             \n\
             Target JSON Structure:\n\
             {schema}\n"
        );

        Ok(Prompts { system })
    }

    /// System instruction
    pub fn system(&self) -> &str {
        &self.system
    }

    /// User message carrying the log text
    pub fn user(&self, log: &str) -> String {
        format!("{}{}", USER_LEAD_IN, log)
    }
}
