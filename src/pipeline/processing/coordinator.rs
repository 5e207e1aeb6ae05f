use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::PipelineConfig;
use crate::domain::{BatchQualityReport, BatchResult, BatchStatus, EnrichedRecord};
use crate::error::PipelineError;
use crate::observability::metrics;
use crate::pipeline::ingestion::validator::RecordValidator;
use crate::pipeline::processing::fingerprint::Fingerprinter;
use crate::pipeline::processing::quality_gate::{BatchQualityGate, GateDecision, QualityGateConfig};
use crate::pipeline::processing::risk::RiskEngine;
use crate::pipeline::processing::standardize::Standardizer;

/// Stage progression for one batch. Transitions are strictly sequential for
/// a batch; independent batches share no mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Received,
    Validated,
    Standardized,
    Enriched,
    QualityChecked,
    Promoted,
    Rejected,
}

/// Sequences validation, per-record transformation, and the quality gate
/// over one batch, and reports a structured result.
///
/// A validator failure short-circuits straight to `Rejected` with no partial
/// processing. Per-record issues never abort the batch; only the aggregate
/// gate decision selects the terminal state. No I/O happens here; the only
/// commit points are owned by the caller, after a `Promoted` result.
pub struct BatchCoordinator;

impl BatchCoordinator {
    pub fn process_batch(
        payload: &[u8],
        as_of: DateTime<Utc>,
        config: &PipelineConfig,
    ) -> BatchResult {
        let batch_id = Uuid::new_v4();
        let mut state = BatchState::Received;
        debug!(%batch_id, ?state, "batch received");

        let raw_records = match RecordValidator::validate(payload) {
            Ok(records) => {
                state = BatchState::Validated;
                metrics::validator::payload_accepted(records.len());
                debug!(%batch_id, ?state, records = records.len(), "payload validated");
                records
            }
            Err(err) => {
                // Structurally invalid payloads are never partially processed
                state = BatchState::Rejected;
                metrics::validator::payload_rejected();
                warn!(%batch_id, ?state, error = %err, "payload rejected at validation");
                return Self::structural_reject(batch_id, as_of, err);
            }
        };

        let as_of_date = as_of.date_naive();
        let mut enriched = Vec::with_capacity(raw_records.len());
        for raw in &raw_records {
            let claim = Standardizer::standardize(raw);
            metrics::standardize::record_processed(claim.field_issues.len());

            let record_hash = Fingerprinter::fingerprint(&claim);
            let data_quality_score = Fingerprinter::quality_score(&claim);
            let risk = RiskEngine::assess(&claim, as_of_date);

            enriched.push(EnrichedRecord {
                claim,
                ingestion_timestamp: as_of,
                processing_date: as_of_date,
                record_hash,
                data_quality_score,
                priority: risk.priority,
                risk_score: risk.risk_score,
                requires_escalation: risk.requires_escalation,
            });
        }
        state = BatchState::Standardized;
        debug!(%batch_id, ?state, "records standardized");
        state = BatchState::Enriched;
        debug!(%batch_id, ?state, "records enriched");

        // Full-batch barrier: the gate sees every enrichment result at once
        let gate = BatchQualityGate::new(QualityGateConfig {
            quality_threshold: config.quality_threshold,
        });
        let report = gate.evaluate(&enriched);
        let decision = gate.decide(&report);
        state = BatchState::QualityChecked;
        debug!(%batch_id, ?state, quality = report.quality_percentage, "quality gate evaluated");

        let status = match decision {
            GateDecision::Promote => {
                state = BatchState::Promoted;
                metrics::batch::promoted(report.total_records);
                BatchStatus::Promoted
            }
            GateDecision::Reject => {
                state = BatchState::Rejected;
                metrics::batch::rejected(report.total_records);
                warn!(
                    %batch_id,
                    quality = report.quality_percentage,
                    threshold = config.quality_threshold,
                    flagged = report.flagged_claim_ids.len(),
                    "batch held below quality threshold"
                );
                BatchStatus::Rejected
            }
        };
        metrics::batch::quality_percentage(report.quality_percentage);
        info!(%batch_id, ?state, total = report.total_records, "batch complete");

        BatchResult {
            batch_id,
            status,
            report,
            enriched_records: enriched,
            errors: Vec::new(),
            received_at: as_of,
            completed_at: Utc::now(),
        }
    }

    fn structural_reject(batch_id: Uuid, as_of: DateTime<Utc>, err: PipelineError) -> BatchResult {
        BatchResult {
            batch_id,
            status: BatchStatus::Rejected,
            report: BatchQualityReport {
                total_records: 0,
                null_claim_ids: 0,
                null_amounts: 0,
                negative_amounts: 0,
                quality_percentage: 0.0,
                flagged_claim_ids: Vec::new(),
            },
            enriched_records: Vec::new(),
            errors: vec![err.to_string()],
            received_at: as_of,
            completed_at: Utc::now(),
        }
    }
}
