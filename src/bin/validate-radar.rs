use anyhow::{Context, Result};
use clap::Parser;
use radar_parser::error::RadarError;
use radar_parser::validator::SchemaValidator;
use serde_json::Value;
use std::{fs, path::PathBuf};

/// Validate a normalized radar document JSON file against the radar schema.
#[derive(Parser, Debug)]
#[command(name = "validate-radar", version, about = "Validate normalized radar JSON against schema")]
struct Cli {
    /// Path to the radar JSON file to validate
    path: PathBuf,

    /// Optional path to a schema file (defaults to the bundled radar.v1 schema)
    #[arg(long)]
    schema: Option<PathBuf>,
}

fn load_json(path: &PathBuf) -> Result<Value> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let json: Value = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse JSON in {}", path.display()))?;
    Ok(json)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let validator = match &args.schema {
        Some(schema) => SchemaValidator::from_file(schema),
        None => SchemaValidator::bundled(),
    }
    .context("Failed to compile JSON Schema")?;

    let instance = load_json(&args.path)?;

    match validator.check(&instance) {
        Ok(()) => {
            println!("valid");
            Ok(())
        }
        Err(RadarError::Validation(errors)) => {
            eprintln!("invalid:");
            for error in errors {
                eprintln!("- {}", error);
            }
            std::process::exit(1)
        }
        Err(e) => Err(e.into()),
    }
}
