use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::types::RawDocument;

/// Read a radar document stored as a single YAML mapping.
pub async fn parse_yaml_radar(path: &Path) -> Result<RawDocument> {
    let bytes = tokio::fs::read(path).await?;
    debug!("parse_yaml_radar: path={} bytes_len={}", path.display(), bytes.len());
    parse_yaml_bytes(&bytes)
}

pub fn parse_yaml_bytes(bytes: &[u8]) -> Result<RawDocument> {
    Ok(serde_yaml::from_slice(bytes)?)
}
