use crate::app::ports::DiagnosticsPort;
use crate::error::RadarError;
use std::path::Path;
use tracing::error;

/// Reports parse failures as tracing error events
/// The console layer writes these to stderr
pub struct TracingDiagnostics;

impl DiagnosticsPort for TracingDiagnostics {
    fn report(&self, path: &Path, err: &RadarError) {
        error!(
            file_path = %path.display(),
            error_kind = err.kind(),
            error = %err,
            "failed to parse radar document"
        );
    }
}
