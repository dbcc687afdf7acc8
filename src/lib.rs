pub mod config;
pub mod constants;
pub mod error;
pub mod normalize;
pub mod observability;
pub mod parser;
pub mod sources;
pub mod types;
pub mod validator;

// Application use cases and the ports they depend on
pub mod app;
// Filesystem and tracing implementations of the ports
pub mod infra;

pub use app::ParseUseCase;
pub use error::{RadarError, Result};
pub use types::{Entry, ParsedDocument, RadarDocument};
