use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::{RadarError, Result};

/// Initializes logging: human-readable output on stderr and, when enabled,
/// JSON lines in a daily rolling file.
///
/// `RUST_LOG` takes precedence over the configured level. Keep the returned
/// guard alive until exit so buffered file logs are flushed.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let directive = format!("radar_parser={}", config.level);
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("warn").add_directive(
            directive
                .parse()
                .map_err(|e| RadarError::Config(format!("Invalid log level '{}': {}", config.level, e)))?,
        ),
    };

    let (file_layer, guard) = if config.file {
        fs::create_dir_all(&config.dir)?;
        let file_appender = tracing_appender::rolling::daily(&config.dir, "radar_parser.log");
        let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
        (Some(fmt::layer().json().with_writer(non_blocking_writer)), Some(guard))
    } else {
        (None, None)
    };

    let console_layer = fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| RadarError::Config(format!("Failed to install tracing subscriber: {}", e)))?;

    Ok(guard)
}
