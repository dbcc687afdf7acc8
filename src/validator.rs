use std::path::Path;

use jsonschema::JSONSchema;
use once_cell::sync::Lazy;
use serde_json::Value;
use tracing::{debug, warn};

use crate::app::ports::ValidatorPort;
use crate::constants::RADAR_SCHEMA_V1;
use crate::error::{RadarError, Result};
use crate::types::RadarDocument;

static BUNDLED_SCHEMA: Lazy<std::result::Result<Value, String>> =
    Lazy::new(|| serde_json::from_str(RADAR_SCHEMA_V1).map_err(|e| e.to_string()));

/// Validates normalized documents against a JSON Schema.
pub struct SchemaValidator {
    compiled: JSONSchema,
}

impl SchemaValidator {
    /// Validator for the schema bundled with the crate (radar v1).
    pub fn bundled() -> Result<Self> {
        match &*BUNDLED_SCHEMA {
            Ok(schema) => Self::compile(schema),
            Err(e) => Err(RadarError::Schema(format!("bundled schema is not JSON: {}", e))),
        }
    }

    /// Validator for a schema file on disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| {
            RadarError::Schema(format!("Failed to read schema '{}': {}", path.display(), e))
        })?;
        let schema: Value = serde_json::from_str(&data)?;
        // jsonschema 0.17 expects a schema with 'static lifetime; the schema lives for the process
        let schema_static: &'static Value = Box::leak(Box::new(schema));
        Self::compile(schema_static)
    }

    fn compile(schema: &'static Value) -> Result<Self> {
        let compiled = JSONSchema::options()
            .compile(schema)
            .map_err(|e| RadarError::Schema(format!("Failed to compile JSON Schema: {}", e)))?;
        Ok(Self { compiled })
    }

    /// Validate an arbitrary JSON instance, collecting every violation.
    pub fn check(&self, instance: &Value) -> Result<()> {
        match self.compiled.validate(instance) {
            Ok(()) => Ok(()),
            Err(errors) => {
                let messages: Vec<String> = errors
                    .map(|error| format!("{} at {}", error, error.instance_path))
                    .collect();
                warn!("SchemaValidator: rejected document violations={}", messages.len());
                Err(RadarError::Validation(messages))
            }
        }
    }
}

impl ValidatorPort for SchemaValidator {
    fn validate(&self, doc: RadarDocument) -> Result<RadarDocument> {
        let instance = serde_json::to_value(&doc)?;
        self.check(&instance)?;
        debug!("SchemaValidator: accepted document entries={}", doc.data.len());
        Ok(doc)
    }
}
