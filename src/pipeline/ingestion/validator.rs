use serde_json::Value;

use crate::domain::RawRecord;
use crate::error::{PipelineError, Result};

/// Confirms a raw payload is well-formed before anything enters the pipeline.
///
/// Validation is all-or-nothing: a malformed container rejects the whole
/// batch. Field-level problems are not this stage's concern; they are
/// absorbed later by standardization and the quality gate.
pub struct RecordValidator;

impl RecordValidator {
    /// Structurally parse a payload into raw claim records.
    ///
    /// Accepts either a top-level JSON array of objects or an object with a
    /// `claims` array; the upstream drop produces both shapes.
    pub fn validate(payload: &[u8]) -> Result<Vec<RawRecord>> {
        let value: Value = serde_json::from_slice(payload).map_err(|e| {
            PipelineError::Validation {
                message: format!("malformed JSON payload: {}", e),
            }
        })?;

        let items = match value {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove("claims") {
                Some(Value::Array(items)) => items,
                Some(_) => {
                    return Err(PipelineError::Validation {
                        message: "'claims' is not an array".to_string(),
                    })
                }
                None => {
                    return Err(PipelineError::Validation {
                        message: "payload object has no 'claims' array".to_string(),
                    })
                }
            },
            other => {
                return Err(PipelineError::Validation {
                    message: format!("payload must be an array or object, got {}", type_name(&other)),
                })
            }
        };

        let mut records = Vec::with_capacity(items.len());
        for (idx, item) in items.into_iter().enumerate() {
            match item {
                Value::Object(map) => records.push(map),
                other => {
                    return Err(PipelineError::Validation {
                        message: format!("record {} is not an object, got {}", idx, type_name(&other)),
                    })
                }
            }
        }

        Ok(records)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_top_level_array() {
        let payload = br#"[{"claim_id": "C1"}, {"claim_id": "C2"}]"#;
        let records = RecordValidator::validate(payload).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn accepts_claims_envelope() {
        let payload = br#"{"claims": [{"claim_id": "C1"}]}"#;
        let records = RecordValidator::validate(payload).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = RecordValidator::validate(b"{not json").unwrap_err();
        assert!(matches!(err, PipelineError::Validation { .. }));
    }

    #[test]
    fn rejects_non_object_record() {
        let err = RecordValidator::validate(br#"[{"claim_id": "C1"}, 42]"#).unwrap_err();
        match err {
            PipelineError::Validation { message } => assert!(message.contains("record 1")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_scalar_payload() {
        let err = RecordValidator::validate(b"\"just a string\"").unwrap_err();
        assert!(matches!(err, PipelineError::Validation { .. }));
    }

    #[test]
    fn empty_array_is_a_valid_empty_batch() {
        let records = RecordValidator::validate(b"[]").unwrap();
        assert!(records.is_empty());
    }
}
