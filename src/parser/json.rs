use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::types::RawDocument;

/// Read a radar document stored as a single JSON object.
pub async fn parse_json_radar(path: &Path) -> Result<RawDocument> {
    let bytes = tokio::fs::read(path).await?;
    debug!("parse_json_radar: path={} bytes_len={}", path.display(), bytes.len());
    parse_json_bytes(&bytes)
}

pub fn parse_json_bytes(bytes: &[u8]) -> Result<RawDocument> {
    Ok(serde_json::from_slice(bytes)?)
}
