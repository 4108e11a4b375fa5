// xregscan - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.
//
// These types are the shared vocabulary across all layers.

use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashMap;

// =============================================================================
// Log line
// =============================================================================

/// One line of the input log.
///
/// `raw` is the exact byte slice from the input, terminator included, so the
/// filtered copy can be written back unchanged. `text` is the lossily decoded
/// form used for matching; invalid UTF-8 becomes U+FFFD.
#[derive(Debug, Clone)]
pub struct LogLine<'a> {
    pub raw: &'a [u8],
    pub text: Cow<'a, str>,
}

impl<'a> LogLine<'a> {
    pub fn new(raw: &'a [u8]) -> Self {
        Self {
            raw,
            text: String::from_utf8_lossy(raw),
        }
    }
}

// =============================================================================
// Dedup key
// =============================================================================

/// The value deciding whether two marker lines describe the same error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DedupKey {
    /// Lower-cased DUT and REF hex literals, `0x` prefix included.
    HexPair {
        dut: String,
        #[serde(rename = "ref")]
        reference: String,
    },

    /// The full stripped line, used when no DUT/REF pair could be extracted.
    RawLine { text: String },
}

impl DedupKey {
    /// Build a hex-pair key, normalising both literals to lower case.
    pub fn hex_pair(dut: &str, reference: &str) -> Self {
        Self::HexPair {
            dut: dut.to_ascii_lowercase(),
            reference: reference.to_ascii_lowercase(),
        }
    }

    pub fn raw_line(text: &str) -> Self {
        Self::RawLine {
            text: text.to_string(),
        }
    }

    pub fn is_hex_pair(&self) -> bool {
        matches!(self, Self::HexPair { .. })
    }
}

// =============================================================================
// Entry / ResultSet
// =============================================================================

/// A unique mismatch with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Number of input lines that produced `key`. Always >= 1.
    pub count: usize,

    /// Text of the first line that produced `key`, terminator stripped.
    pub line: String,

    pub key: DedupKey,
}

/// Unique entries in first-occurrence order.
///
/// Backed by a `Vec` for ordering plus a key -> position index for O(1)
/// lookups while recording.
#[derive(Debug, Default)]
pub struct ResultSet {
    entries: Vec<Entry>,
    index: HashMap<DedupKey, usize>,

    /// Total input lines seen by the scan.
    pub lines_scanned: usize,

    /// Input lines that contained the marker.
    pub marker_lines: usize,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one marker line under `key`.
    ///
    /// The first line for a key becomes its representative; later lines only
    /// bump the count.
    pub fn record(&mut self, key: DedupKey, line: &str) {
        self.marker_lines += 1;
        if let Some(&pos) = self.index.get(&key) {
            self.entries[pos].count += 1;
            return;
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push(Entry {
            count: 1,
            line: line.to_string(),
            key,
        });
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, key: &DedupKey) -> Option<&Entry> {
        self.index.get(key).map(|&pos| &self.entries[pos])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries keyed by the raw-line fallback.
    pub fn raw_line_entries(&self) -> usize {
        self.entries.iter().filter(|e| !e.key.is_hex_pair()).count()
    }
}

// =============================================================================
// Report format
// =============================================================================

/// Output format of the unique-entry report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// One `<line>` or `[<count>] <line>` per entry.
    #[default]
    Text,
    Json,
    Csv,
}

impl ReportFormat {
    /// Parse a format name, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_first_line_and_counts() {
        let mut set = ResultSet::new();
        set.record(DedupKey::hex_pair("0x5", "0xA"), "first");
        set.record(DedupKey::hex_pair("0X5", "0Xa"), "second");
        assert_eq!(set.len(), 1);
        assert_eq!(set.entries()[0].count, 2);
        assert_eq!(set.entries()[0].line, "first");
        assert_eq!(set.marker_lines, 2);
    }

    #[test]
    fn test_record_preserves_insertion_order() {
        let mut set = ResultSet::new();
        set.record(DedupKey::hex_pair("0x2", "0x3"), "b");
        set.record(DedupKey::hex_pair("0x1", "0x3"), "a");
        set.record(DedupKey::hex_pair("0x2", "0x3"), "b again");
        let lines: Vec<_> = set.entries().iter().map(|e| e.line.as_str()).collect();
        assert_eq!(lines, vec!["b", "a"]);
    }

    #[test]
    fn test_raw_line_never_equals_hex_pair() {
        let raw = DedupKey::raw_line("0x1");
        let hex = DedupKey::hex_pair("0x1", "0x1");
        assert_ne!(raw, hex);
        assert!(!raw.is_hex_pair());
    }

    #[test]
    fn test_get_by_key() {
        let mut set = ResultSet::new();
        set.record(DedupKey::raw_line("x"), "x");
        assert_eq!(set.get(&DedupKey::raw_line("x")).map(|e| e.count), Some(1));
        assert!(set.get(&DedupKey::raw_line("y")).is_none());
    }

    #[test]
    fn test_log_line_decodes_lossily() {
        let line = LogLine::new(b"bad \xff byte\n");
        assert!(line.text.contains('\u{FFFD}'));
        assert_eq!(line.raw, b"bad \xff byte\n");
    }

    #[test]
    fn test_report_format_parse() {
        assert_eq!(ReportFormat::parse("JSON"), Some(ReportFormat::Json));
        assert_eq!(ReportFormat::parse("text"), Some(ReportFormat::Text));
        assert_eq!(ReportFormat::parse("xml"), None);
    }

    #[test]
    fn test_dedup_key_serialises_with_kind_tag() {
        let json = serde_json::to_string(&DedupKey::hex_pair("0x5", "0xA")).unwrap();
        assert_eq!(json, r#"{"kind":"hex_pair","dut":"0x5","ref":"0xa"}"#);
    }
}
