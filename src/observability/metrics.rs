//! Metrics for the claims pipeline, following Prometheus naming conventions.

use std::fmt;

use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::info;

/// Enum representing all metric names used in the system.
/// This eliminates magic strings and provides compile-time safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Validator metrics
    ValidatorPayloadsAccepted,
    ValidatorPayloadsRejected,
    ValidatorRecordsExtracted,

    // Standardize metrics
    StandardizeRecordsProcessed,
    StandardizeFieldIssues,

    // Batch / quality gate metrics
    BatchPromoted,
    BatchRejected,
    BatchRecords,
    BatchQualityPercentage,

    // Sink metrics
    SinkRowsAppended,
    SinkProceduresInvoked,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::ValidatorPayloadsAccepted => "claims_validator_payloads_accepted_total",
            MetricName::ValidatorPayloadsRejected => "claims_validator_payloads_rejected_total",
            MetricName::ValidatorRecordsExtracted => "claims_validator_records_extracted_total",

            MetricName::StandardizeRecordsProcessed => "claims_standardize_records_processed_total",
            MetricName::StandardizeFieldIssues => "claims_standardize_field_issues_total",

            MetricName::BatchPromoted => "claims_batch_promoted_total",
            MetricName::BatchRejected => "claims_batch_rejected_total",
            MetricName::BatchRecords => "claims_batch_records",
            MetricName::BatchQualityPercentage => "claims_batch_quality_percentage",

            MetricName::SinkRowsAppended => "claims_sink_rows_appended_total",
            MetricName::SinkProceduresInvoked => "claims_sink_procedures_invoked_total",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Install the Prometheus recorder. Safe to skip in tests; recording into an
/// uninstalled recorder is a no-op.
pub fn init() -> anyhow::Result<()> {
    PrometheusBuilder::new().install_recorder()?;
    info!("Metrics system initialized");
    Ok(())
}

pub mod validator {
    use super::MetricName;

    pub fn payload_accepted(record_count: usize) {
        ::metrics::counter!(MetricName::ValidatorPayloadsAccepted.as_str()).increment(1);
        ::metrics::counter!(MetricName::ValidatorRecordsExtracted.as_str())
            .increment(record_count as u64);
    }

    pub fn payload_rejected() {
        ::metrics::counter!(MetricName::ValidatorPayloadsRejected.as_str()).increment(1);
    }
}

pub mod standardize {
    use super::MetricName;

    pub fn record_processed(issue_count: usize) {
        ::metrics::counter!(MetricName::StandardizeRecordsProcessed.as_str()).increment(1);
        if issue_count > 0 {
            ::metrics::counter!(MetricName::StandardizeFieldIssues.as_str())
                .increment(issue_count as u64);
        }
    }
}

pub mod batch {
    use super::MetricName;

    pub fn promoted(record_count: u64) {
        ::metrics::counter!(MetricName::BatchPromoted.as_str()).increment(1);
        ::metrics::histogram!(MetricName::BatchRecords.as_str()).record(record_count as f64);
    }

    pub fn rejected(record_count: u64) {
        ::metrics::counter!(MetricName::BatchRejected.as_str()).increment(1);
        ::metrics::histogram!(MetricName::BatchRecords.as_str()).record(record_count as f64);
    }

    pub fn quality_percentage(value: f64) {
        ::metrics::histogram!(MetricName::BatchQualityPercentage.as_str()).record(value);
    }
}

pub mod sink {
    use super::MetricName;

    pub fn rows_appended(count: usize) {
        ::metrics::counter!(MetricName::SinkRowsAppended.as_str()).increment(count as u64);
    }

    pub fn procedure_invoked() {
        ::metrics::counter!(MetricName::SinkProceduresInvoked.as_str()).increment(1);
    }
}
