// xregscan - core/classify.rs
//
// Line classifier and deduplicator.
// Single linear pass over the input: marker test, DUT/REF extraction,
// first-occurrence-ordered accumulation.
// Core layer: pure logic, no I/O.

use crate::core::model::{DedupKey, LogLine, ResultSet};
use crate::util::constants::{DUT_REF_PATTERN, XREG_MISMATCH_MARKER};
use crate::util::logging::preview;
use regex::Regex;
use std::sync::OnceLock;

fn dut_ref_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // The pattern is a compile-time constant covered by the unit tests below.
    RE.get_or_init(|| Regex::new(DUT_REF_PATTERN).expect("DUT_REF_PATTERN: invalid regex"))
}

/// Strip one trailing line terminator (`\n` or `\r\n`).
///
/// Any other trailing whitespace is left in place.
pub fn strip_terminator(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(rest) => rest.strip_suffix('\r').unwrap_or(rest),
        None => line,
    }
}

/// True if `text` contains the xreg mismatch marker.
pub fn is_marker_line(text: &str) -> bool {
    text.contains(XREG_MISMATCH_MARKER)
}

/// Derive the dedup key for a stripped marker line.
///
/// Falls back to the whole line when no `DUT = 0x.., REF = 0x..` pair is
/// present, so malformed lines still surface in the report.
pub fn extract_key(line: &str) -> DedupKey {
    match dut_ref_regex().captures(line) {
        Some(caps) => DedupKey::hex_pair(&caps[1], &caps[2]),
        None => DedupKey::raw_line(line),
    }
}

/// Scan `lines` and collect unique mismatch entries in first-seen order.
///
/// Lines without the marker are counted in `lines_scanned` and otherwise
/// ignored.
pub fn extract_unique_lines<'a, I>(lines: I) -> ResultSet
where
    I: IntoIterator<Item = &'a str>,
{
    let mut results = ResultSet::new();

    for raw in lines {
        results.lines_scanned += 1;
        let line = strip_terminator(raw);
        if !is_marker_line(line) {
            continue;
        }

        let key = extract_key(line);
        if !key.is_hex_pair() {
            tracing::debug!(
                line = preview(line),
                "Marker line without DUT/REF pair; keying by full text"
            );
        }
        results.record(key, line);
    }

    tracing::debug!(
        lines = results.lines_scanned,
        matched = results.marker_lines,
        unique = results.len(),
        "Classification complete"
    );

    results
}

/// Convenience wrapper over [`extract_unique_lines`] for decoded input lines.
pub fn classify_log_lines(lines: &[LogLine<'_>]) -> ResultSet {
    extract_unique_lines(lines.iter().map(|l| l.text.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const M: &str = XREG_MISMATCH_MARKER;

    fn lines_of(items: &[String]) -> Vec<&str> {
        items.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_strip_terminator_variants() {
        assert_eq!(strip_terminator("abc\n"), "abc");
        assert_eq!(strip_terminator("abc\r\n"), "abc");
        assert_eq!(strip_terminator("abc"), "abc");
        assert_eq!(strip_terminator("abc  \n"), "abc  ");
        assert_eq!(strip_terminator("\tabc"), "\tabc");
    }

    #[test]
    fn test_extract_key_with_spaces() {
        let key = extract_key(&format!("t=1 {M} DUT = 0x5, REF = 0xA"));
        assert_eq!(key, DedupKey::hex_pair("0x5", "0xa"));
    }

    #[test]
    fn test_extract_key_upper_case_prefix() {
        let key = extract_key(&format!("t=2 {M} DUT=0X5,REF=0XA"));
        assert_eq!(
            key,
            DedupKey::HexPair {
                dut: "0x5".to_string(),
                reference: "0xa".to_string()
            }
        );
    }

    #[test]
    fn test_extract_key_missing_ref_falls_back() {
        let line = format!("{M} DUT = 0x5");
        assert_eq!(extract_key(&line), DedupKey::raw_line(&line));
    }

    #[test]
    fn test_extract_key_non_hex_falls_back() {
        let line = format!("{M} DUT = 0xZZ, REF = 0x1");
        assert_eq!(extract_key(&line), DedupKey::raw_line(&line));
    }

    #[test]
    fn test_extract_key_other_separator_falls_back() {
        let line = format!("{M} DUT = 0x5; REF = 0x1");
        assert_eq!(extract_key(&line), DedupKey::raw_line(&line));
    }

    #[test]
    fn test_widths_are_distinct_keys() {
        let a = extract_key(&format!("{M} DUT = 0x0, REF = 0x1"));
        let b = extract_key(&format!("{M} DUT = 0x00, REF = 0x1"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_scenario_collapses_case_variants() {
        let input = vec![
            format!("t=1 {M} DUT = 0x5, REF = 0xA\n"),
            format!("t=2 {M} DUT=0X5,REF=0XA\n"),
            "t=3 some other log line\n".to_string(),
        ];
        let results = extract_unique_lines(lines_of(&input));
        assert_eq!(results.len(), 1);
        let entry = &results.entries()[0];
        assert_eq!(entry.count, 2);
        assert_eq!(entry.line, format!("t=1 {M} DUT = 0x5, REF = 0xA"));
        assert_eq!(results.lines_scanned, 3);
        assert_eq!(results.marker_lines, 2);
    }

    #[test]
    fn test_malformed_line_gets_own_entry() {
        let malformed = format!("{M} (malformed)");
        let input = vec![
            format!("{M} DUT = 0x1, REF = 0x2"),
            malformed.clone(),
            format!("{M} DUT = 0x1, REF = 0x2"),
        ];
        let results = extract_unique_lines(lines_of(&input));
        assert_eq!(results.len(), 2);
        let entry = results.get(&DedupKey::raw_line(&malformed)).unwrap();
        assert_eq!(entry.count, 1);
        assert_eq!(entry.line, malformed);
        assert_eq!(results.raw_line_entries(), 1);
    }

    #[test]
    fn test_raw_lines_differing_in_prefix_stay_separate() {
        let input = vec![format!("t=1 {M} oops"), format!("t=2 {M} oops")];
        let results = extract_unique_lines(lines_of(&input));
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_same_pair_different_context_merges() {
        let input = vec![
            format!("[hart 0] pc=0x80000000 {M} DUT = 0xdead, REF = 0xbeef"),
            format!("[hart 3] pc=0x80000010 {M} DUT = 0xDEAD, REF = 0xBEEF"),
        ];
        let results = extract_unique_lines(lines_of(&input));
        assert_eq!(results.len(), 1);
        assert_eq!(results.entries()[0].count, 2);
        assert!(results.entries()[0].line.starts_with("[hart 0]"));
    }

    #[test]
    fn test_first_seen_order_not_count_order() {
        let input = vec![
            format!("{M} DUT = 0x1, REF = 0x2"),
            format!("{M} DUT = 0x3, REF = 0x4"),
            format!("{M} DUT = 0x3, REF = 0x4"),
            format!("{M} DUT = 0x3, REF = 0x4"),
        ];
        let results = extract_unique_lines(lines_of(&input));
        let counts: Vec<_> = results.entries().iter().map(|e| e.count).collect();
        assert_eq!(counts, vec![1, 3]);
    }

    #[test]
    fn test_every_marker_line_lands_in_exactly_one_entry() {
        let input = vec![
            format!("{M} DUT = 0x1, REF = 0x2"),
            format!("{M} bad"),
            "plain".to_string(),
            format!("{M} DUT = 0x1, REF = 0x2"),
            format!("{M} DUT = 0x2, REF = 0x1"),
        ];
        let results = extract_unique_lines(lines_of(&input));
        let total: usize = results.entries().iter().map(|e| e.count).sum();
        assert_eq!(total, 4);
        assert_eq!(total, results.marker_lines);
    }

    #[test]
    fn test_near_miss_marker_is_ignored() {
        let input = vec!["GVM error: DUT and REF xreg mismatc DUT = 0x1, REF = 0x2".to_string()];
        assert!(extract_unique_lines(lines_of(&input)).is_empty());
    }

    #[test]
    fn test_empty_input() {
        let results = extract_unique_lines(Vec::<&str>::new());
        assert!(results.is_empty());
        assert_eq!(results.lines_scanned, 0);
    }

    #[test]
    fn test_classify_log_lines_uses_decoded_text() {
        let mut bytes = b"\xff ".to_vec();
        bytes.extend_from_slice(format!("{M} DUT = 0x1, REF = 0x2\n").as_bytes());
        let lines = vec![LogLine::new(&bytes)];
        let results = classify_log_lines(&lines);
        assert_eq!(results.len(), 1);
        assert_eq!(
            results.entries()[0].line,
            format!("\u{FFFD} {M} DUT = 0x1, REF = 0x2")
        );
    }
}
