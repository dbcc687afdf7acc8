use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::DEFAULT_CONFIG_PATH;
use crate::error::{RadarError, Result};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sources: SourcesConfig,
    pub logging: LoggingConfig,
    pub validation: ValidationConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Glob patterns used when the CLI is given none
    pub patterns: Vec<String>,
    /// Base directory the patterns are resolved against
    pub cwd: PathBuf,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            patterns: ["**/*.csv", "**/*.json", "**/*.yml", "**/*.yaml"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
            cwd: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: PathBuf,
    pub level: String,
    /// Also write JSON logs to a daily rolling file under `dir`
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("logs"),
            level: "info".to_string(),
            file: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Schema file replacing the bundled radar schema
    pub schema: Option<PathBuf>,
}

impl Config {
    /// Load `radar.toml` from the working directory, falling back to defaults when absent.
    pub fn load() -> Result<Self> {
        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        if default_path.exists() {
            Self::load_from(default_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            RadarError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        Self::from_toml(&config_content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}
