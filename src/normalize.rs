//! Normalization of raw radar documents.
//!
//! Turns reader output into the canonical shape: alias table keyed by
//! alternate label, complete quadrant titles, lowercase rings, resolved
//! quadrants, numeric `moved` and entries sorted by name.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::constants::{DEFAULT_QUADRANT_TITLES, QUADRANT_KEY_PATTERN};
use crate::types::{Entry, QuadrantAliases, QuadrantTitles, RadarDocument, RawDocument, RawEntry};

static QUADRANT_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(QUADRANT_KEY_PATTERN).expect("quadrant key pattern is valid"));

/// Labels declared by one alias value; a scalar counts as a one-element list.
///
/// Numbers and booleans are used in their text form; null and nested
/// objects or lists declare nothing.
fn alias_labels(value: &Value) -> Vec<String> {
    fn label(value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    match value {
        Value::Array(values) => values.iter().filter_map(label).collect(),
        other => label(other).into_iter().collect(),
    }
}

/// Build the lookup table alternate label -> quadrant key.
///
/// Values under `q1`..`q4` become keys pointing back at their quadrant; any
/// other key is copied through as-is. Declarations are applied in document
/// order, so a label declared twice keeps the later quadrant.
pub fn normalize_quadrant_aliases(aliases: &QuadrantAliases) -> QuadrantAliases {
    aliases.iter().fold(QuadrantAliases::new(), |mut m, (key, value)| {
        if QUADRANT_KEY.is_match(key) {
            for label in alias_labels(value) {
                m.insert(label, Value::String(key.clone()));
            }
        } else {
            m.insert(key.clone(), value.clone());
        }
        m
    })
}

/// Merge caller titles over the built-in defaults.
///
/// Defaults keep their q1..q4 positions; caller-only keys follow in document
/// order.
pub fn normalize_quadrant_titles(titles: &QuadrantTitles) -> QuadrantTitles {
    let mut merged: QuadrantTitles = DEFAULT_QUADRANT_TITLES
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect();
    merged.extend(titles.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// Resolve a quadrant label through the alias table.
///
/// Unknown labels come back lowercased rather than rejected. Only non-empty
/// string targets resolve; pass-through lists or numbers are ignored.
pub fn get_quadrant(quadrant: &str, aliases: &QuadrantAliases) -> String {
    let low = quadrant.to_lowercase();
    match aliases.get(&low).and_then(Value::as_str) {
        Some(key) if !key.is_empty() => key.to_string(),
        _ => low,
    }
}

/// Integer literal with a `0x`, `0o` or `0b` prefix (case-insensitive).
fn parse_prefixed_integer(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    s[2..].chars().try_fold(0f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

/// Numeric `moved` delta; anything that is not a finite number becomes 0.
pub fn coerce_moved(moved: Option<&Value>) -> f64 {
    let n = match moved {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                parse_prefixed_integer(s)
                    .or_else(|| s.parse::<f64>().ok())
                    .unwrap_or(0.0)
            }
        }
        Some(Value::Bool(true)) => 1.0,
        _ => 0.0,
    };
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

fn normalize_entry(entry: RawEntry, aliases: &QuadrantAliases, titles: &QuadrantTitles) -> Entry {
    let quadrant = get_quadrant(&entry.quadrant, aliases);
    let quadrant_title = titles.get(&quadrant).cloned();
    Entry {
        moved: coerce_moved(entry.moved.as_ref()),
        name: entry.name,
        ring: entry.ring.to_lowercase(),
        quadrant,
        quadrant_title,
        extra: entry.extra,
    }
}

/// Normalize every entry of a raw document and sort them by name.
///
/// Names compare by UTF-16 code unit, so uppercase sorts before lowercase,
/// and the sort is stable for equal names.
#[instrument(skip(doc), fields(entries = doc.data.len()))]
pub fn normalize_entries(doc: RawDocument) -> RadarDocument {
    let quadrant_aliases = normalize_quadrant_aliases(&doc.quadrant_aliases.unwrap_or_default());
    let quadrant_titles = normalize_quadrant_titles(&doc.quadrant_titles.unwrap_or_default());

    let mut data: Vec<Entry> = doc
        .data
        .into_iter()
        .map(|entry| normalize_entry(entry, &quadrant_aliases, &quadrant_titles))
        .collect();
    data.sort_by(|a, b| a.name.encode_utf16().cmp(b.name.encode_utf16()));

    debug!(aliases = quadrant_aliases.len(), "normalized radar entries");

    RadarDocument {
        data,
        meta: doc.meta,
        quadrant_aliases,
        quadrant_titles,
        extra: doc.extra,
    }
}
