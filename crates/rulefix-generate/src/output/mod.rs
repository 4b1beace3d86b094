pub mod atomic;
pub mod jsonl;

pub use atomic::write_bytes_atomic;
pub use jsonl::{WrittenFile, encode_records, write_records_jsonl, write_stats_json};
