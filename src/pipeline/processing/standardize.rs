use chrono::NaiveDate;
use serde_json::Value;

use crate::domain::{ClaimRecord, ClaimStatus, FieldIssue, RawRecord};

/// Date pattern the upstream system emits; anything else is a missing date.
const CLAIM_DATE_FORMAT: &str = "%Y-%m-%d";

/// Normalizes raw fields into the canonical claim record.
///
/// Standardization is total: it always returns a `ClaimRecord`, with fields
/// it could not parse marked missing and tallied as `FieldIssue`s.
/// Correctness enforcement belongs to the quality gate, not here.
pub struct Standardizer;

impl Standardizer {
    pub fn standardize(raw: &RawRecord) -> ClaimRecord {
        let mut issues = Vec::new();

        let claim_id = trimmed_string(raw, "claim_id");
        let customer_id = trimmed_string(raw, "customer_id");
        let store_id = trimmed_string(raw, "store_id");
        let description = trimmed_string(raw, "description");

        let status = match trimmed_string(raw, "status") {
            Some(s) => ClaimStatus::from_raw(&s),
            None => ClaimStatus::Other("UNKNOWN".to_string()),
        };

        let claim_amount = parse_amount(raw, &mut issues);
        let claim_date = parse_date(raw, &mut issues);

        ClaimRecord {
            claim_id,
            customer_id,
            store_id,
            description,
            status,
            claim_amount,
            claim_date,
            field_issues: issues,
        }
    }
}

/// Trim a string field; blank-after-trim and non-string values count as absent.
fn trimmed_string(raw: &RawRecord, field: &str) -> Option<String> {
    raw.get(field)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse the claim amount from a JSON number or a numeric string.
/// Unparsable values become missing with an issue; absent stays absent.
fn parse_amount(raw: &RawRecord, issues: &mut Vec<FieldIssue>) -> Option<f64> {
    match raw.get("claim_amount") {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(amount) => Some(amount),
            Err(_) => {
                issues.push(FieldIssue {
                    field: "claim_amount".to_string(),
                    reason: format!("unparsable amount '{}'", s.trim()),
                });
                None
            }
        },
        Some(other) => {
            issues.push(FieldIssue {
                field: "claim_amount".to_string(),
                reason: format!("unexpected amount value {}", other),
            });
            None
        }
    }
}

fn parse_date(raw: &RawRecord, issues: &mut Vec<FieldIssue>) -> Option<NaiveDate> {
    match raw.get("claim_date").and_then(|v| v.as_str()) {
        None => None,
        Some(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match NaiveDate::parse_from_str(trimmed, CLAIM_DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(_) => {
                    issues.push(FieldIssue {
                        field: "claim_date".to_string(),
                        reason: format!("date '{}' does not match yyyy-MM-dd", trimmed),
                    });
                    None
                }
            }
        }
    }
}
