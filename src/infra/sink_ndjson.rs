use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use crate::app::ports::{SinkAck, SinkPort};
use crate::domain::EnrichedRecord;
use crate::error::SinkError;

/// File-based implementation of `SinkPort`.
///
/// Appends promoted rows as NDJSON, one file per logical table, under a data
/// directory. Procedure invocations are recorded to a log file; the real
/// warehouse executor is an external collaborator.
pub struct NdjsonSink {
    base_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl NdjsonSink {
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir).map_err(|e| SinkError::Append {
            table: base_dir.display().to_string(),
            message: format!("cannot create sink directory: {}", e),
        })?;
        Ok(Self {
            base_dir,
            write_lock: Mutex::new(()),
        })
    }

    fn table_path(&self, table: &str) -> PathBuf {
        self.base_dir.join(format!("{}.ndjson", table))
    }
}

#[async_trait]
impl SinkPort for NdjsonSink {
    async fn append_rows(
        &self,
        table: &str,
        rows: &[EnrichedRecord],
    ) -> Result<SinkAck, SinkError> {
        let map_err = |e: std::io::Error| SinkError::Append {
            table: table.to_string(),
            message: e.to_string(),
        };

        let _guard = self.write_lock.lock().expect("sink write lock poisoned");
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.table_path(table))
            .map_err(map_err)?;
        let mut writer = BufWriter::new(file);

        for row in rows {
            let line = serde_json::to_string(row).map_err(|e| SinkError::Append {
                table: table.to_string(),
                message: format!("serialization failed: {}", e),
            })?;
            writeln!(writer, "{}", line).map_err(map_err)?;
        }
        writer.flush().map_err(map_err)?;

        info!(table, rows = rows.len(), "rows appended to sink");
        Ok(SinkAck {
            affected_rows: rows.len() as u64,
        })
    }

    async fn invoke_procedure(&self, name: &str) -> Result<SinkAck, SinkError> {
        let _guard = self.write_lock.lock().expect("sink write lock poisoned");
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.base_dir.join("procedure_invocations.log"))
            .map_err(|e| SinkError::Procedure {
                name: name.to_string(),
                message: e.to_string(),
            })?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{} {}", chrono::Utc::now().to_rfc3339(), name).map_err(|e| {
            SinkError::Procedure {
                name: name.to_string(),
                message: e.to_string(),
            }
        })?;
        writer.flush().map_err(|e| SinkError::Procedure {
            name: name.to_string(),
            message: e.to_string(),
        })?;

        info!(procedure = name, "procedure invocation recorded");
        Ok(SinkAck { affected_rows: 0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClaimRecord, ClaimStatus, Priority};
    use chrono::{NaiveDate, Utc};

    fn enriched(id: &str) -> EnrichedRecord {
        EnrichedRecord {
            claim: ClaimRecord {
                claim_id: Some(id.to_string()),
                customer_id: Some("CU-1".to_string()),
                store_id: None,
                description: None,
                status: ClaimStatus::Approved,
                claim_amount: Some(250.0),
                claim_date: NaiveDate::from_ymd_opt(2024, 6, 10),
                field_issues: Vec::new(),
            },
            ingestion_timestamp: Utc::now(),
            processing_date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            record_hash: "abc123".to_string(),
            data_quality_score: 1.0,
            priority: Priority::Medium,
            risk_score: 0.2,
            requires_escalation: false,
        }
    }

    #[tokio::test]
    async fn appends_one_line_per_row() {
        let dir = tempfile::tempdir().unwrap();
        let sink = NdjsonSink::new(dir.path()).unwrap();

        let ack = sink
            .append_rows("claims_enriched", &[enriched("CLM-1"), enriched("CLM-2")])
            .await
            .unwrap();
        assert_eq!(ack.affected_rows, 2);

        let content =
            std::fs::read_to_string(dir.path().join("claims_enriched.ndjson")).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["claim"]["claim_id"], "CLM-1");
    }

    #[tokio::test]
    async fn records_procedure_invocations() {
        let dir = tempfile::tempdir().unwrap();
        let sink = NdjsonSink::new(dir.path()).unwrap();

        sink.invoke_procedure("sp_silver_to_gold_transformation")
            .await
            .unwrap();

        let log =
            std::fs::read_to_string(dir.path().join("procedure_invocations.log")).unwrap();
        assert!(log.contains("sp_silver_to_gold_transformation"));
    }
}
