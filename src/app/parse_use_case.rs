use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinSet;
use tracing::{debug, info, instrument};

use crate::app::ports::{DiagnosticsPort, ReaderPort, ValidatorPort};
use crate::error::{RadarError, Result};
use crate::infra::{FormatReader, TracingDiagnostics};
use crate::normalize::normalize_entries;
use crate::observability::metrics;
use crate::parser::Format;
use crate::types::{EmptyDocument, ParsedDocument, RadarDocument};
use crate::validator::SchemaValidator;

/// Use case for turning one radar source file into a validated document
pub struct ParseUseCase {
    reader: Box<dyn ReaderPort>,
    validator: Box<dyn ValidatorPort>,
    diagnostics: Box<dyn DiagnosticsPort>,
}

impl ParseUseCase {
    pub fn new(
        reader: Box<dyn ReaderPort>,
        validator: Box<dyn ValidatorPort>,
        diagnostics: Box<dyn DiagnosticsPort>,
    ) -> Self {
        Self {
            reader,
            validator,
            diagnostics,
        }
    }

    /// Create a use case with the filesystem readers, the bundled schema and tracing diagnostics
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(
            Box::new(FormatReader),
            Box::new(SchemaValidator::bundled()?),
            Box::new(TracingDiagnostics),
        ))
    }

    /// Read, normalize and validate `path` as `format`.
    ///
    /// Every failure is returned as-is; see [`ParseUseCase::parse`] for the
    /// empty-document fallback.
    #[instrument(skip(self, path, format), fields(path = %path.display(), format = %format))]
    pub async fn try_parse(&self, format: Format, path: &Path) -> Result<RadarDocument> {
        let raw = self.reader.read(format, path).await?;
        debug!("read raw document entries={}", raw.data.len());

        let doc = normalize_entries(raw);
        metrics::normalize::entries_normalized(doc.data.len());

        self.validator.validate(doc)
    }

    /// Parse one file, never failing on a bad document.
    ///
    /// An unsupported extension is returned as an error before anything is
    /// read. Any other failure is reported to the diagnostics port and comes
    /// back as [`ParsedDocument::Empty`].
    pub async fn parse(&self, path: impl AsRef<Path>) -> Result<ParsedDocument> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let started = Instant::now();

        let outcome = match self.try_parse(format, path).await {
            Ok(doc) => {
                info!(
                    "Parsed radar document {} entries={}",
                    path.display(),
                    doc.data.len()
                );
                metrics::parser::document_parsed(format.as_str());
                ParsedDocument::Document(doc)
            }
            Err(e) => {
                self.diagnostics.report(path, &e);
                metrics::parser::document_failed(format.as_str(), e.kind());
                ParsedDocument::Empty(EmptyDocument {})
            }
        };

        metrics::parser::duration(started.elapsed().as_secs_f64());
        Ok(outcome)
    }

    /// Parse several files concurrently, keeping input order in the output.
    ///
    /// A path with an unsupported extension is reported to the diagnostics
    /// port and becomes [`ParsedDocument::Empty`] without being read; the
    /// rest of the batch is unaffected.
    pub async fn parse_batch(self: &Arc<Self>, paths: &[PathBuf]) -> Result<Vec<ParsedDocument>> {
        let mut results: Vec<Option<ParsedDocument>> = vec![None; paths.len()];
        let mut set = JoinSet::new();

        for (idx, path) in paths.iter().enumerate() {
            if let Err(e) = Format::from_path(path) {
                self.diagnostics.report(path, &e);
                metrics::parser::document_failed("unknown", e.kind());
                results[idx] = Some(ParsedDocument::Empty(EmptyDocument {}));
                continue;
            }
            let use_case = Arc::clone(self);
            let path = path.clone();
            set.spawn(async move { (idx, use_case.parse(path).await) });
        }

        while let Some(joined) = set.join_next().await {
            let (idx, parsed) =
                joined.map_err(|e| RadarError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
            results[idx] = Some(parsed?);
        }

        Ok(results
            .into_iter()
            .map(|r| r.unwrap_or(ParsedDocument::Empty(EmptyDocument {})))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawDocument;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingReader {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ReaderPort for FailingReader {
        async fn read(&self, _format: Format, _path: &Path) -> Result<RawDocument> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(RadarError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no such radar",
            )))
        }
    }

    struct StaticReader {
        doc: serde_json::Value,
    }

    #[async_trait]
    impl ReaderPort for StaticReader {
        async fn read(&self, _format: Format, _path: &Path) -> Result<RawDocument> {
            Ok(serde_json::from_value(self.doc.clone())?)
        }
    }

    struct AcceptAll;

    impl ValidatorPort for AcceptAll {
        fn validate(&self, doc: RadarDocument) -> Result<RadarDocument> {
            Ok(doc)
        }
    }

    struct RejectAll;

    impl ValidatorPort for RejectAll {
        fn validate(&self, _doc: RadarDocument) -> Result<RadarDocument> {
            Err(RadarError::Validation(vec!["rejected".to_string()]))
        }
    }

    struct MockDiagnostics {
        pub reports: Arc<std::sync::Mutex<Vec<(PathBuf, String)>>>,
    }

    impl MockDiagnostics {
        pub fn new() -> Self {
            Self {
                reports: Arc::new(std::sync::Mutex::new(Vec::new())),
            }
        }
    }

    impl DiagnosticsPort for MockDiagnostics {
        fn report(&self, path: &Path, error: &RadarError) {
            self.reports
                .lock()
                .unwrap()
                .push((path.to_path_buf(), error.to_string()));
        }
    }

    #[tokio::test]
    async fn test_unsupported_extension_is_not_read() {
        let calls = Arc::new(AtomicUsize::new(0));
        let diagnostics = MockDiagnostics::new();
        let reports = diagnostics.reports.clone();
        let use_case = ParseUseCase::new(
            Box::new(FailingReader { calls: calls.clone() }),
            Box::new(AcceptAll),
            Box::new(diagnostics),
        );

        let err = use_case.parse("radar.xyz").await.unwrap_err();
        assert!(err.is_unsupported_format());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(reports.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reader_failure_yields_empty_document() {
        let calls = Arc::new(AtomicUsize::new(0));
        let diagnostics = MockDiagnostics::new();
        let reports = diagnostics.reports.clone();
        let use_case = ParseUseCase::new(
            Box::new(FailingReader { calls: calls.clone() }),
            Box::new(AcceptAll),
            Box::new(diagnostics),
        );

        let parsed = use_case.parse("/radars/broken.json").await.unwrap();
        assert!(parsed.is_empty());
        assert_eq!(serde_json::to_value(&parsed).unwrap(), json!({}));

        let reports = reports.lock().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].0, PathBuf::from("/radars/broken.json"));
        assert!(reports[0].1.contains("no such radar"));
    }

    #[tokio::test]
    async fn test_validation_rejection_yields_empty_document() {
        let diagnostics = MockDiagnostics::new();
        let reports = diagnostics.reports.clone();
        let use_case = ParseUseCase::new(
            Box::new(StaticReader {
                doc: json!({"data": [{"name": "Rust", "ring": "Adopt", "quadrant": "q1"}]}),
            }),
            Box::new(RejectAll),
            Box::new(diagnostics),
        );

        assert!(use_case.parse("radar.yaml").await.unwrap().is_empty());
        assert!(reports.lock().unwrap()[0].1.contains("rejected"));
    }

    #[tokio::test]
    async fn test_try_parse_returns_normalized_document() {
        let use_case = ParseUseCase::new(
            Box::new(StaticReader {
                doc: json!({
                    "data": [
                        {"name": "Rust", "ring": "Adopt", "quadrant": "Languages", "moved": "2"},
                        {"name": "Bazel", "ring": "Assess", "quadrant": "tools"}
                    ],
                    "quadrantAliases": {"q1": "languages", "q2": ["tools"]},
                    "quadrantTitles": {"q2": "Tools"}
                }),
            }),
            Box::new(AcceptAll),
            Box::new(MockDiagnostics::new()),
        );

        let doc = use_case.try_parse(Format::Json, Path::new("radar.json")).await.unwrap();
        assert_eq!(doc.data[0].name, "Bazel");
        assert_eq!(doc.data[0].quadrant, "q2");
        assert_eq!(doc.data[0].quadrant_title, Some(json!("Tools")));
        assert_eq!(doc.data[1].ring, "adopt");
        assert_eq!(doc.data[1].moved, 2.0);
    }

    #[tokio::test]
    async fn test_parse_batch_keeps_order_and_isolates_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        let bad = dir.path().join("bad.json");
        std::fs::write(&good, r#"{"data":[{"name":"Rust","ring":"Adopt","quadrant":"q1"}]}"#).unwrap();
        std::fs::write(&bad, "{ not json").unwrap();

        let use_case = Arc::new(ParseUseCase::new(
            Box::new(FormatReader),
            Box::new(AcceptAll),
            Box::new(MockDiagnostics::new()),
        ));

        let results = use_case.parse_batch(&[bad.clone(), good.clone()]).await.unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_empty());
        assert_eq!(results[1].as_document().unwrap().data[0].name, "Rust");
    }

    #[tokio::test]
    async fn test_parse_batch_reports_unsupported_files_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        let readme = dir.path().join("README.md");
        std::fs::write(&good, r#"{"data":[{"name":"Rust","ring":"Adopt","quadrant":"q1"}]}"#).unwrap();
        std::fs::write(&readme, "# radar").unwrap();

        let diagnostics = MockDiagnostics::new();
        let reports = diagnostics.reports.clone();
        let use_case = Arc::new(ParseUseCase::new(
            Box::new(FormatReader),
            Box::new(AcceptAll),
            Box::new(diagnostics),
        ));

        let results = use_case.parse_batch(&[readme.clone(), good]).await.unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_empty());
        assert_eq!(results[1].as_document().unwrap().data[0].name, "Rust");

        let reports = reports.lock().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].0, readme);
        assert_eq!(reports[0].1, "Unsupported format: .md");

        // a single-file parse still refuses the extension
        drop(reports);
        assert!(use_case.parse(&readme).await.unwrap_err().is_unsupported_format());
    }
}
