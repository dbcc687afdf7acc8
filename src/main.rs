use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use radar_parser::app::ParseUseCase;
use radar_parser::config::Config;
use radar_parser::infra::{FormatReader, TracingDiagnostics};
use radar_parser::observability;
use radar_parser::sources::get_sources;
use radar_parser::types::ParsedDocument;
use radar_parser::validator::SchemaValidator;

#[derive(Parser)]
#[command(name = "radar_parser")]
#[command(about = "Read and normalize tech-radar documents")]
#[command(version = "0.1.0")]
struct Cli {
    /// Config file (defaults to ./radar.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse radar files and print the normalized documents
    Parse {
        /// Source files (.csv, .json, .yml, .yaml)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// List source files matching glob patterns
    Sources {
        /// Glob patterns; prefix with ! to exclude. Defaults to [sources] patterns
        patterns: Vec<String>,
        /// Base directory for relative patterns
        #[arg(long)]
        cwd: Option<PathBuf>,
    },
    /// Discover sources and parse all of them
    Build {
        /// Glob patterns; prefix with ! to exclude. Defaults to [sources] patterns
        patterns: Vec<String>,
        /// Base directory for relative patterns
        #[arg(long)]
        cwd: Option<PathBuf>,
    },
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    config.context("Failed to load configuration")
}

fn build_use_case(config: &Config) -> Result<ParseUseCase> {
    let validator = match &config.validation.schema {
        Some(schema) => SchemaValidator::from_file(schema)
            .with_context(|| format!("Failed to load schema {}", schema.display()))?,
        None => SchemaValidator::bundled().context("Failed to compile bundled schema")?,
    };
    Ok(ParseUseCase::new(
        Box::new(FormatReader),
        Box::new(validator),
        Box::new(TracingDiagnostics),
    ))
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}

async fn discover(config: &Config, patterns: Vec<String>, cwd: Option<PathBuf>) -> Result<Vec<PathBuf>> {
    let patterns = if patterns.is_empty() {
        config.sources.patterns.clone()
    } else {
        patterns
    };
    let cwd = cwd.unwrap_or_else(|| config.sources.cwd.clone());
    get_sources(&patterns, &cwd)
        .await
        .with_context(|| format!("Failed to discover sources under {}", cwd.display()))
}

#[derive(serde::Serialize)]
struct BuiltDocument<'a> {
    file: &'a Path,
    document: &'a ParsedDocument,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    let _guard = observability::init_logging(&config.logging).context("Failed to initialize logging")?;

    match cli.command {
        Commands::Parse { files } => {
            let use_case = Arc::new(build_use_case(&config)?);
            if let [single] = files.as_slice() {
                let document = use_case.parse(single).await?;
                print_json(&document, cli.pretty)?;
            } else {
                let documents = use_case.parse_batch(&files).await?;
                print_json(&documents, cli.pretty)?;
            }
        }
        Commands::Sources { patterns, cwd } => {
            for path in discover(&config, patterns, cwd).await? {
                println!("{}", path.display());
            }
        }
        Commands::Build { patterns, cwd } => {
            let files = discover(&config, patterns, cwd).await?;
            if files.is_empty() {
                warn!("No radar sources matched");
            }
            let use_case = Arc::new(build_use_case(&config)?);
            let documents = use_case.parse_batch(&files).await?;

            let failed = documents.iter().filter(|d| d.is_empty()).count();
            info!("Built {} radar documents, {} failed", documents.len(), failed);

            let built: Vec<BuiltDocument> = files
                .iter()
                .zip(documents.iter())
                .map(|(file, document)| BuiltDocument { file, document })
                .collect();
            print_json(&built, cli.pretty)?;
        }
    }
    Ok(())
}
