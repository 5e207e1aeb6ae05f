pub mod coordinator;
pub mod fingerprint;
pub mod quality_gate;
pub mod risk;
pub mod standardize;
