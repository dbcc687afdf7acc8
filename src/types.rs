use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Quadrant alias declarations; values are a label, a list of labels, or
/// anything else under keys that are not quadrant keys. Keeps document order.
pub type QuadrantAliases = Map<String, Value>;
/// Quadrant key -> display title, in document order.
pub type QuadrantTitles = Map<String, Value>;

/// Entry as produced by a reader, before normalization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEntry {
    pub name: String,
    pub ring: String,
    pub quadrant: String,
    #[serde(default)]
    pub moved: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Document as produced by a reader, before normalization
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    pub data: Vec<RawEntry>,
    #[serde(default)]
    pub meta: Map<String, Value>,
    #[serde(default)]
    pub quadrant_aliases: Option<QuadrantAliases>,
    #[serde(default)]
    pub quadrant_titles: Option<QuadrantTitles>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Normalized radar entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub name: String,
    pub ring: String,
    pub quadrant: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quadrant_title: Option<Value>,
    #[serde(serialize_with = "serialize_moved")]
    pub moved: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// Largest magnitude at which every integer is exactly representable as f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Whole deltas are written as integers (`1`, not `1.0`).
fn serialize_moved<S: Serializer>(moved: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if moved.fract() == 0.0 && moved.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*moved as i64)
    } else {
        serializer.serialize_f64(*moved)
    }
}

/// Normalized radar document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarDocument {
    pub data: Vec<Entry>,
    pub meta: Map<String, Value>,
    pub quadrant_aliases: QuadrantAliases,
    pub quadrant_titles: QuadrantTitles,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Serializes as `{}`; stands in for a document that failed to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EmptyDocument {}

/// Outcome of a parse call at the outer boundary
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParsedDocument {
    Document(RadarDocument),
    Empty(EmptyDocument),
}

impl ParsedDocument {
    pub fn is_empty(&self) -> bool {
        matches!(self, ParsedDocument::Empty(_))
    }

    pub fn as_document(&self) -> Option<&RadarDocument> {
        match self {
            ParsedDocument::Document(doc) => Some(doc),
            ParsedDocument::Empty(_) => None,
        }
    }

    pub fn into_document(self) -> Option<RadarDocument> {
        match self {
            ParsedDocument::Document(doc) => Some(doc),
            ParsedDocument::Empty(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_document_defaults_missing_mappings() {
        let raw: RawDocument = serde_json::from_value(json!({
            "data": [{"name": "Rust", "ring": "Adopt", "quadrant": "q1", "description": "fast"}]
        }))
        .unwrap();

        assert!(raw.meta.is_empty());
        assert!(raw.quadrant_aliases.is_none());
        assert!(raw.quadrant_titles.is_none());
        assert!(raw.data[0].moved.is_none());
        assert_eq!(raw.data[0].extra["description"], json!("fast"));
    }

    #[test]
    fn test_raw_entry_requires_ring() {
        let res: std::result::Result<RawDocument, _> = serde_json::from_value(json!({
            "data": [{"name": "Rust", "quadrant": "q1"}]
        }));
        assert!(res.is_err());
    }

    #[test]
    fn test_mappings_keep_document_order_and_any_value() {
        let raw: RawDocument = serde_json::from_str(
            r#"{"data": [], "quadrantAliases": {"q3": "shared", "q1": ["shared"], "legacy": 7},
                "quadrantTitles": {"q2": "Tools", "q1": {"short": "L"}}}"#,
        )
        .unwrap();

        let aliases = raw.quadrant_aliases.unwrap();
        let keys: Vec<&str> = aliases.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["q3", "q1", "legacy"]);
        assert_eq!(aliases["legacy"], json!(7));

        let titles = raw.quadrant_titles.unwrap();
        let keys: Vec<&str> = titles.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["q2", "q1"]);
        assert_eq!(titles["q1"], json!({"short": "L"}));
    }

    #[test]
    fn test_empty_document_serializes_as_empty_object() {
        let parsed = ParsedDocument::Empty(EmptyDocument {});
        assert_eq!(serde_json::to_value(&parsed).unwrap(), json!({}));
        assert!(parsed.is_empty());
        assert!(parsed.into_document().is_none());
    }

    #[test]
    fn test_entry_omits_missing_quadrant_title() {
        let entry = Entry {
            name: "Rust".into(),
            ring: "adopt".into(),
            quadrant: "unknown".into(),
            quadrant_title: None,
            moved: 0.0,
            extra: Map::new(),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.get("quadrantTitle").is_none());
        assert_eq!(serde_json::to_string(&value["moved"]).unwrap(), "0");
    }

    #[test]
    fn test_moved_serializes_whole_numbers_as_integers() {
        let entry = |moved: f64| Entry {
            name: "Rust".into(),
            ring: "adopt".into(),
            quadrant: "q1".into(),
            quadrant_title: Some(json!("Q1")),
            moved,
            extra: Map::new(),
        };

        let out = serde_json::to_string(&entry(1.0)).unwrap();
        assert!(out.contains(r#""moved":1"#) && !out.contains("1.0"), "{}", out);
        assert!(serde_json::to_string(&entry(-2.0)).unwrap().contains(r#""moved":-2"#));
        assert!(serde_json::to_string(&entry(-0.0)).unwrap().contains(r#""moved":0"#));
        assert!(serde_json::to_string(&entry(0.5)).unwrap().contains(r#""moved":0.5"#));

        let back: Entry = serde_json::from_str(&serde_json::to_string(&entry(3.0)).unwrap()).unwrap();
        assert_eq!(back.moved, 3.0);
    }
}
