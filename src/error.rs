use thiserror::Error;

#[derive(Error, Debug)]
pub enum RadarError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML deserialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("Invalid radar document: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

impl RadarError {
    /// Misconfiguration that escapes the empty-document fallback.
    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, RadarError::UnsupportedFormat(_))
    }

    /// Short label used for metrics and diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            RadarError::UnsupportedFormat(_) => "unsupported_format",
            RadarError::Io(_) => "io",
            RadarError::Json(_) => "json",
            RadarError::Yaml(_) => "yaml",
            RadarError::Csv(_) => "csv",
            RadarError::Toml(_) => "toml",
            RadarError::Glob(_) => "glob",
            RadarError::Validation(_) => "validation",
            RadarError::Schema(_) => "schema",
            RadarError::Config(_) => "config",
            RadarError::MissingField(_) => "missing_field",
        }
    }
}

pub type Result<T> = std::result::Result<T, RadarError>;
