pub mod config;
pub mod error;
pub mod logging;

// Domain data shapes shared across layers
pub mod domain;

// Pipeline stages: ingestion validation and per-record processing
pub mod pipeline;

// Application layer (use cases) and infrastructure adapters
pub mod app;
pub mod infra;

// Observability: metrics and monitoring
pub mod observability;
