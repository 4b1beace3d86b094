use std::path::Path;

use serde::Serialize;
use sha2::{Digest, Sha256};

use rulefix_core::RuleRecord;

use crate::errors::GenerationError;
use crate::output::atomic::write_bytes_atomic;

/// Size and content hash of a written artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub bytes: u64,
    pub sha256: String,
}

impl WrittenFile {
    fn of(data: &[u8]) -> Self {
        Self {
            bytes: data.len() as u64,
            sha256: hex::encode(Sha256::digest(data)),
        }
    }
}

/// Encode records as compact JSON, one object per line.
pub fn encode_records<'a>(
    records: impl IntoIterator<Item = &'a RuleRecord>,
) -> Result<Vec<u8>, GenerationError> {
    let mut buffer = Vec::new();
    for record in records {
        serde_json::to_writer(&mut buffer, record)?;
        buffer.push(b'\n');
    }
    Ok(buffer)
}

/// Write a fixture file in one atomic step.
pub fn write_records_jsonl<'a>(
    path: &Path,
    records: impl IntoIterator<Item = &'a RuleRecord>,
) -> Result<WrittenFile, GenerationError> {
    let data = encode_records(records)?;
    write_bytes_atomic(path, &data)?;
    Ok(WrittenFile::of(&data))
}

/// Write a value as two-space indented JSON.
pub fn write_stats_json<T: Serialize>(
    path: &Path,
    value: &T,
) -> Result<WrittenFile, GenerationError> {
    let data = serde_json::to_vec_pretty(value)?;
    write_bytes_atomic(path, &data)?;
    Ok(WrittenFile::of(&data))
}
