use crate::app::ports::ReaderPort;
use crate::error::Result;
use crate::parser::Format;
use crate::types::RawDocument;
use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

/// Filesystem implementation of ReaderPort
/// Dispatches to the CSV, JSON or YAML reader for the selected format
pub struct FormatReader;

#[async_trait]
impl ReaderPort for FormatReader {
    async fn read(&self, format: Format, path: &Path) -> Result<RawDocument> {
        debug!("FormatReader: reading {} as {}", path.display(), format);
        format.read(path).await
    }
}
