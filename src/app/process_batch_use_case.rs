use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::app::ports::{SinkPort, TransportPort};
use crate::config::PipelineConfig;
use crate::domain::{BatchResult, BatchStatus};
use crate::observability::metrics;
use crate::pipeline::processing::coordinator::BatchCoordinator;

/// Use case driving one batch end to end: fetch the payload through the
/// transport port, run the coordinator, and commit promoted batches through
/// the sink port.
///
/// The sink write and the gold procedure are the only commit points and both
/// are batch-atomic: a rejected batch never touches the sink. External I/O
/// errors propagate unchanged, wrapped with batch and stage context.
pub struct ProcessBatchUseCase {
    transport: Box<dyn TransportPort>,
    sink: Box<dyn SinkPort>,
    config: PipelineConfig,
}

impl ProcessBatchUseCase {
    pub fn new(
        transport: Box<dyn TransportPort>,
        sink: Box<dyn SinkPort>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            transport,
            sink,
            config,
        }
    }

    pub async fn run(&self, identifier: &str, as_of: DateTime<Utc>) -> Result<BatchResult> {
        let payload = self
            .transport
            .fetch(identifier)
            .await
            .with_context(|| format!("transport fetch stage, payload '{}'", identifier))?;

        let result = BatchCoordinator::process_batch(&payload, as_of, &self.config);

        if result.status == BatchStatus::Promoted {
            let timeout = Duration::from_secs(self.config.sink_timeout_secs);

            let ack = tokio::time::timeout(
                timeout,
                self.sink
                    .append_rows(&self.config.sink_table, &result.enriched_records),
            )
            .await
            .map_err(|_| anyhow!("sink append timed out after {:?}", timeout))?
            .with_context(|| {
                format!(
                    "sink append stage, batch {}, table '{}'",
                    result.batch_id, self.config.sink_table
                )
            })?;
            metrics::sink::rows_appended(ack.affected_rows as usize);

            tokio::time::timeout(timeout, self.sink.invoke_procedure(&self.config.gold_procedure))
                .await
                .map_err(|_| anyhow!("procedure invocation timed out after {:?}", timeout))?
                .with_context(|| {
                    format!(
                        "gold procedure stage, batch {}, procedure '{}'",
                        result.batch_id, self.config.gold_procedure
                    )
                })?;
            metrics::sink::procedure_invoked();

            info!(
                batch_id = %result.batch_id,
                rows = ack.affected_rows,
                table = %self.config.sink_table,
                "batch promoted and committed"
            );
        }

        Ok(result)
    }
}
