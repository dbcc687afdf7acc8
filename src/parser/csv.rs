use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{RadarError, Result};
use crate::types::{RawDocument, RawEntry};

const REQUIRED_COLUMNS: [&str; 3] = ["name", "ring", "quadrant"];

/// Read a radar document stored as CSV: one header row, then one entry per record.
pub async fn parse_csv_radar(path: &Path) -> Result<RawDocument> {
    let bytes = tokio::fs::read(path).await?;
    debug!("parse_csv_radar: path={} bytes_len={}", path.display(), bytes.len());
    let doc = parse_csv_bytes(&bytes)?;
    info!("parse_csv_radar: extracted entries count={}", doc.data.len());
    Ok(doc)
}

pub fn parse_csv_bytes(bytes: &[u8]) -> Result<RawDocument> {
    let mut rdr = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(::csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(bytes);

    let headers = rdr.headers()?.clone();
    let mut data = Vec::new();

    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        // Empty cells are left out so they read the same as a missing column.
        let fields: Map<String, Value> = headers
            .iter()
            .zip(record.iter())
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(header, cell)| (header.to_string(), Value::String(cell.to_string())))
            .collect();

        for column in REQUIRED_COLUMNS {
            if !fields.contains_key(column) {
                return Err(RadarError::MissingField(format!("{} (row {})", column, row + 1)));
            }
        }

        let entry: RawEntry = serde_json::from_value(Value::Object(fields))?;
        data.push(entry);
    }

    Ok(RawDocument {
        data,
        ..RawDocument::default()
    })
}
