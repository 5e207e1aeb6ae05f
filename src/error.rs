use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("payload validation failed: {message}")]
    Validation { message: String },

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("sink error: {0}")]
    Sink(#[from] SinkError),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failure fetching a raw payload from the transport collaborator.
/// Retryable by the caller; the core surfaces it unchanged.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("payload not found: {0}")]
    NotFound(String),

    #[error("transport I/O failed for {identifier}: {source}")]
    Io {
        identifier: String,
        #[source]
        source: std::io::Error,
    },
}

/// Failure writing to the downstream sink. Retryable with backoff by the
/// caller; backoff policy is external to this core.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("append to table '{table}' failed: {message}")]
    Append { table: String, message: String },

    #[error("procedure '{name}' invocation failed: {message}")]
    Procedure { name: String, message: String },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
