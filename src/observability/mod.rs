// Observability: metrics and monitoring for the claims pipeline

pub mod metrics;

pub use metrics::init;
