//! Glob-based discovery of radar source files.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::observability::metrics;

/// Absolute paths of regular files matching `patterns` under `cwd`.
///
/// Patterns starting with `!` exclude matches of the others. Results keep
/// glob enumeration order and are deduplicated across patterns.
pub async fn get_sources<S: AsRef<str>>(patterns: &[S], cwd: &Path) -> Result<Vec<PathBuf>> {
    let patterns: Vec<String> = patterns.iter().map(|p| p.as_ref().to_string()).collect();
    let cwd = cwd.to_path_buf();
    tokio::task::spawn_blocking(move || find_sources(&patterns, &cwd))
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?
}

/// Blocking body of [`get_sources`].
pub fn find_sources<S: AsRef<str>>(patterns: &[S], cwd: &Path) -> Result<Vec<PathBuf>> {
    let base = if cwd.is_absolute() {
        cwd.to_path_buf()
    } else {
        std::env::current_dir()?.join(cwd)
    };

    let (negated, positive): (Vec<&str>, Vec<&str>) = patterns
        .iter()
        .map(|p| p.as_ref())
        .partition(|p| p.starts_with('!'));

    let excludes = negated
        .iter()
        .map(|p| Pattern::new(&absolute_pattern(&base, &p[1..])))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for pattern in positive {
        let full = absolute_pattern(&base, pattern);
        debug!("get_sources: expanding pattern={}", full);
        for entry in glob::glob(&full)? {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    warn!("get_sources: skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if !path.is_file() {
                continue;
            }
            if excludes.iter().any(|ex| ex.matches_path(&path)) {
                continue;
            }
            if seen.insert(path.clone()) {
                out.push(path);
            }
        }
    }

    info!("get_sources: found files count={}", out.len());
    metrics::sources::discovered(out.len());
    Ok(out)
}

fn absolute_pattern(base: &Path, pattern: &str) -> String {
    if Path::new(pattern).is_absolute() {
        pattern.to_string()
    } else {
        let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
        format!("{}/{}", base.display().to_string().trim_end_matches('/'), pattern)
    }
}
