use async_trait::async_trait;

use crate::domain::EnrichedRecord;
use crate::error::{SinkError, TransportError};

/// Acknowledgement from the sink collaborator.
#[derive(Clone, Debug)]
pub struct SinkAck {
    pub affected_rows: u64,
}

/// Supplies raw byte payloads by identifier. Delivery is guaranteed before
/// the core proceeds; failures are retryable by the caller.
#[async_trait]
pub trait TransportPort: Send + Sync {
    async fn fetch(&self, identifier: &str) -> Result<Vec<u8>, TransportError>;
}

/// Downstream warehouse seam: append rows to a logical table and invoke a
/// named procedure. Both are retryable with backoff; the policy lives with
/// the caller, not here.
#[async_trait]
pub trait SinkPort: Send + Sync {
    async fn append_rows(&self, table: &str, rows: &[EnrichedRecord])
        -> Result<SinkAck, SinkError>;

    async fn invoke_procedure(&self, name: &str) -> Result<SinkAck, SinkError>;
}
