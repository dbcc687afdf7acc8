pub mod diagnostics_adapter;
pub mod reader_adapter;

pub use diagnostics_adapter::TracingDiagnostics;
pub use reader_adapter::FormatReader;
