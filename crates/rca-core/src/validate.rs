//! Structural validation of model replies

use serde_json::Value;
use tracing::warn;

use crate::error::{RcaError, SchemaViolation};
use crate::record::RootCauseAnalysis;
use crate::Result;

/// Parse a raw model reply into a [`RootCauseAnalysis`].
///
/// The reply must be a JSON object carrying all six keys with the right
/// primitive shapes. Unknown keys are ignored and a repeated key keeps its
/// last value. There is no repair or second attempt: any mismatch returns
/// [`RcaError::Validation`] carrying the raw reply.
pub fn validate_response(raw: &str) -> Result<RootCauseAnalysis> {
    let value: Value =
        serde_json::from_str(raw).map_err(|err| schema_violation(err.to_string(), raw))?;
    if !value.is_object() {
        return Err(schema_violation("expected a JSON object".to_string(), raw));
    }
    serde_json::from_value(value).map_err(|err| schema_violation(err.to_string(), raw))
}

fn schema_violation(message: String, raw: &str) -> RcaError {
    warn!(error = %message, "model reply failed schema validation");
    RcaError::Validation(SchemaViolation {
        message,
        raw: raw.to_string(),
    })
}
