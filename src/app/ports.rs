use std::path::Path;

use async_trait::async_trait;

use crate::error::{RadarError, Result};
use crate::parser::Format;
use crate::types::{RadarDocument, RawDocument};

/// Reads one source file in the given format.
#[async_trait]
pub trait ReaderPort: Send + Sync {
    async fn read(&self, format: Format, path: &Path) -> Result<RawDocument>;
}

/// Checks a normalized document; returns it (possibly augmented) or rejects it.
pub trait ValidatorPort: Send + Sync {
    fn validate(&self, doc: RadarDocument) -> Result<RadarDocument>;
}

/// Operator-visible channel for documents that failed to parse.
pub trait DiagnosticsPort: Send + Sync {
    fn report(&self, path: &Path, error: &RadarError);
}
