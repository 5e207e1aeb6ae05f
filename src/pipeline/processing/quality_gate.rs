use crate::domain::{BatchQualityReport, EnrichedRecord};

/// Quality gate decision for a whole batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Batch meets the quality threshold and is promoted to the next layer
    Promote,
    /// Batch fails the threshold and is held for operator decision
    Reject,
}

/// Configuration for the batch quality gate.
#[derive(Debug, Clone)]
pub struct QualityGateConfig {
    /// Minimum quality percentage (0-100) required for promotion
    pub quality_threshold: f64,
}

impl Default for QualityGateConfig {
    fn default() -> Self {
        Self {
            quality_threshold: 80.0,
        }
    }
}

/// Aggregates per-batch quality statistics and decides whether the batch may
/// be promoted. The report is computed once per batch and immutable after.
pub struct BatchQualityGate {
    pub config: QualityGateConfig,
}

impl BatchQualityGate {
    pub fn new(config: QualityGateConfig) -> Self {
        Self { config }
    }

    /// Pure aggregation over the enriched batch. The counters are
    /// independent: a record missing both its id and its amount contributes
    /// to both tallies, exactly as the percentage formula expects.
    pub fn evaluate(&self, batch: &[EnrichedRecord]) -> BatchQualityReport {
        let total_records = batch.len() as u64;
        let mut null_claim_ids = 0u64;
        let mut null_amounts = 0u64;
        let mut negative_amounts = 0u64;
        let mut flagged_claim_ids = Vec::new();

        for (idx, record) in batch.iter().enumerate() {
            let mut flagged = false;

            if record.claim.claim_id.is_none() {
                null_claim_ids += 1;
                flagged = true;
            }
            match record.claim.claim_amount {
                None => {
                    null_amounts += 1;
                    flagged = true;
                }
                Some(amount) if amount < 0.0 => {
                    negative_amounts += 1;
                    flagged = true;
                }
                Some(_) => {}
            }

            if flagged {
                flagged_claim_ids.push(
                    record
                        .claim
                        .claim_id
                        .clone()
                        .unwrap_or_else(|| format!("record[{}]", idx)),
                );
            }
        }

        let quality_percentage = if total_records == 0 {
            0.0
        } else {
            // counters are independent, so a record with several defects can
            // push this below zero; the gate still rejects it correctly
            let clean = total_records as i64
                - null_claim_ids as i64
                - null_amounts as i64
                - negative_amounts as i64;
            round2(clean as f64 / total_records as f64 * 100.0)
        };

        BatchQualityReport {
            total_records,
            null_claim_ids,
            null_amounts,
            negative_amounts,
            quality_percentage,
            flagged_claim_ids,
        }
    }

    /// Promote iff the batch quality percentage meets the configured
    /// threshold. A rejected batch keeps its full report; nothing is dropped.
    pub fn decide(&self, report: &BatchQualityReport) -> GateDecision {
        if report.quality_percentage >= self.config.quality_threshold {
            GateDecision::Promote
        } else {
            GateDecision::Reject
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
