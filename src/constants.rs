/// Quadrant keys and built-in defaults shared across the codebase

pub const Q1: &str = "q1";
pub const Q2: &str = "q2";
pub const Q3: &str = "q3";
pub const Q4: &str = "q4";

/// Pattern an alias key must match to be treated as a canonical quadrant key
pub const QUADRANT_KEY_PATTERN: &str = "^q[1-4]$";

// q3 defaults to "Q4", not "Q3"; set quadrantTitles.q3 to override.
pub const DEFAULT_QUADRANT_TITLES: [(&str, &str); 4] =
    [(Q1, "Q1"), (Q2, "Q2"), (Q3, "Q4"), (Q4, "Q4")];

// Supported source file extensions (with leading dot, as reported to users)
pub const CSV_EXTENSION: &str = ".csv";
pub const JSON_EXTENSION: &str = ".json";
pub const YML_EXTENSION: &str = ".yml";
pub const YAML_EXTENSION: &str = ".yaml";

/// Get all supported source file extensions
pub fn get_supported_extensions() -> Vec<&'static str> {
    vec![CSV_EXTENSION, JSON_EXTENSION, YML_EXTENSION, YAML_EXTENSION]
}

/// Default config file looked up by the CLI
pub const DEFAULT_CONFIG_PATH: &str = "radar.toml";

/// Schema bundled with the crate and used when no schema path is configured
pub const RADAR_SCHEMA_V1: &str = include_str!("../schemas/radar.v1.json");
