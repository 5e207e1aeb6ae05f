pub mod sink_ndjson;
pub mod transport_fs;
