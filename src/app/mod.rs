pub mod ports;
pub mod process_batch_use_case;
