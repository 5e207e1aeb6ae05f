use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One claim as received from the upstream drop: a decoded JSON object with
/// no type guarantees. Discarded after standardization.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// Claim lifecycle status, case-normalized to upper during standardization.
/// Unknown statuses are preserved rather than rejected; the risk engine
/// assigns them a fallback weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ClaimStatus {
    Pending,
    Approved,
    Rejected,
    Closed,
    Other(String),
}

impl ClaimStatus {
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "PENDING" => ClaimStatus::Pending,
            "APPROVED" => ClaimStatus::Approved,
            "REJECTED" => ClaimStatus::Rejected,
            "CLOSED" => ClaimStatus::Closed,
            other => ClaimStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ClaimStatus::Pending => "PENDING",
            ClaimStatus::Approved => "APPROVED",
            ClaimStatus::Rejected => "REJECTED",
            ClaimStatus::Closed => "CLOSED",
            ClaimStatus::Other(s) => s,
        }
    }
}

impl From<ClaimStatus> for String {
    fn from(status: ClaimStatus) -> Self {
        status.as_str().to_string()
    }
}

impl From<String> for ClaimStatus {
    fn from(raw: String) -> Self {
        ClaimStatus::from_raw(&raw)
    }
}

/// Priority class derived from claim amount alone (inclusive upper bounds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

/// A per-field parse outcome recorded during standardization instead of
/// raising. Tallied by the quality gate, never aborts the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldIssue {
    /// The field that failed to parse
    pub field: String,
    /// What the standardizer saw
    pub reason: String,
}

/// The canonical claim record produced by standardization. Standardization
/// is total: missing or unparsable fields become `None` plus a `FieldIssue`,
/// so every raw record yields exactly one `ClaimRecord`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub claim_id: Option<String>,
    pub customer_id: Option<String>,
    pub store_id: Option<String>,
    pub description: Option<String>,
    pub status: ClaimStatus,
    /// Negative amounts are retained and flagged in the quality report,
    /// never clamped.
    pub claim_amount: Option<f64>,
    pub claim_date: Option<NaiveDate>,
    /// Per-field parse outcomes collected during standardization
    pub field_issues: Vec<FieldIssue>,
}

/// A claim record enriched with technical columns and business-risk signals,
/// ready for promotion to the next layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedRecord {
    /// The standardized claim this enrichment was derived from
    pub claim: ClaimRecord,
    /// When this record entered the pipeline
    pub ingestion_timestamp: DateTime<Utc>,
    /// Calendar date of ingestion
    pub processing_date: NaiveDate,
    /// Deterministic content fingerprint over claim_id|customer_id|claim_amount
    pub record_hash: String,
    /// Binary quality flag: exactly 1.0 or exactly 0.5
    pub data_quality_score: f64,
    pub priority: Priority,
    pub risk_score: f64,
    /// Whether this claim needs expedited human review
    pub requires_escalation: bool,
}

/// Per-batch quality aggregate computed once by the quality gate and
/// immutable afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchQualityReport {
    pub total_records: u64,
    pub null_claim_ids: u64,
    pub null_amounts: u64,
    pub negative_amounts: u64,
    /// (total - null_claim_ids - null_amounts - negative_amounts) / total * 100,
    /// rounded to 2 decimals; 0 for an empty batch
    pub quality_percentage: f64,
    /// Identifiers of the records that contributed to any counter above,
    /// surfaced so a rejected batch is auditable
    pub flagged_claim_ids: Vec<String>,
}

/// Terminal state of a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BatchStatus {
    Promoted,
    Rejected,
}

/// Structured outcome of one batch, reported to the sink and the scheduler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    pub batch_id: Uuid,
    pub status: BatchStatus,
    pub report: BatchQualityReport,
    pub enriched_records: Vec<EnrichedRecord>,
    /// Container-level validation errors; non-empty only for structural rejects
    pub errors: Vec<String>,
    pub received_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}
