//! Metrics for the radar parser.
//!
//! Recording goes through the `metrics` facade; without an installed
//! recorder every call is a no-op.

use std::fmt;

/// All metric names used in the crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    ParserDocumentsParsed,
    ParserDocumentsFailed,
    ParserDuration,
    NormalizeEntries,
    SourcesDiscovered,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::ParserDocumentsParsed => "radar_parser_documents_parsed_total",
            MetricName::ParserDocumentsFailed => "radar_parser_documents_failed_total",
            MetricName::ParserDuration => "radar_parser_duration_seconds",
            MetricName::NormalizeEntries => "radar_normalize_entries_total",
            MetricName::SourcesDiscovered => "radar_sources_discovered_total",
        }
    }

    pub fn all_metrics() -> impl Iterator<Item = MetricName> {
        use MetricName::*;
        [
            ParserDocumentsParsed,
            ParserDocumentsFailed,
            ParserDuration,
            NormalizeEntries,
            SourcesDiscovered,
        ]
        .into_iter()
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub mod parser {
    use super::MetricName;

    /// Record a document that parsed and validated
    pub fn document_parsed(format: &'static str) {
        ::metrics::counter!(MetricName::ParserDocumentsParsed.as_str(), "format" => format).increment(1);
    }

    /// Record a document that fell back to the empty document
    pub fn document_failed(format: &'static str, error_kind: &'static str) {
        ::metrics::counter!(
            MetricName::ParserDocumentsFailed.as_str(),
            "format" => format,
            "error" => error_kind
        )
        .increment(1);
    }

    pub fn duration(secs: f64) {
        ::metrics::histogram!(MetricName::ParserDuration.as_str()).record(secs);
    }
}

pub mod normalize {
    use super::MetricName;

    pub fn entries_normalized(count: usize) {
        ::metrics::counter!(MetricName::NormalizeEntries.as_str()).increment(count as u64);
    }
}

pub mod sources {
    use super::MetricName;

    pub fn discovered(count: usize) {
        ::metrics::counter!(MetricName::SourcesDiscovered.as_str()).increment(count as u64);
    }
}
