// xregscan - core/report.rs
//
// Rendering of the unique-entry report as plain text, JSON, or CSV.
// Core layer: writes to any Write trait object.

use crate::core::model::{DedupKey, ReportFormat, ResultSet};
use crate::util::error::ReportError;
use std::io::Write;
use std::path::Path;

/// Write the report in the requested format. Returns the number of entries
/// written.
///
/// `counts` only affects the text format; JSON and CSV always carry counts.
/// `sink` names the destination in error messages.
pub fn write_report<W: Write>(
    results: &ResultSet,
    format: ReportFormat,
    counts: bool,
    writer: W,
    sink: &Path,
) -> Result<usize, ReportError> {
    match format {
        ReportFormat::Text => write_text(results, counts, writer, sink),
        ReportFormat::Json => write_json(results, writer, sink),
        ReportFormat::Csv => write_csv(results, writer, sink),
    }
}

/// One line per entry: `<line>` or `[<count>] <line>`, newline-terminated.
pub fn write_text<W: Write>(
    results: &ResultSet,
    counts: bool,
    mut writer: W,
    sink: &Path,
) -> Result<usize, ReportError> {
    let io_err = |source| ReportError::Io {
        path: sink.to_path_buf(),
        source,
    };

    for entry in results.entries() {
        if counts {
            writeln!(writer, "[{}] {}", entry.count, entry.line).map_err(io_err)?;
        } else {
            writeln!(writer, "{}", entry.line).map_err(io_err)?;
        }
    }
    writer.flush().map_err(io_err)?;
    Ok(results.len())
}

/// Pretty-printed JSON array of entries.
pub fn write_json<W: Write>(
    results: &ResultSet,
    mut writer: W,
    sink: &Path,
) -> Result<usize, ReportError> {
    serde_json::to_writer_pretty(&mut writer, results.entries()).map_err(|e| {
        ReportError::Json {
            path: sink.to_path_buf(),
            source: e,
        }
    })?;
    writeln!(writer)
        .and_then(|_| writer.flush())
        .map_err(|e| ReportError::Io {
            path: sink.to_path_buf(),
            source: e,
        })?;
    Ok(results.len())
}

/// CSV with columns: count, dut, ref, line. Raw-line entries leave dut/ref empty.
pub fn write_csv<W: Write>(
    results: &ResultSet,
    writer: W,
    sink: &Path,
) -> Result<usize, ReportError> {
    let csv_err = |source| ReportError::Csv {
        path: sink.to_path_buf(),
        source,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["count", "dut", "ref", "line"])
        .map_err(csv_err)?;

    for entry in results.entries() {
        let (dut, reference) = match &entry.key {
            DedupKey::HexPair { dut, reference } => (dut.as_str(), reference.as_str()),
            DedupKey::RawLine { .. } => ("", ""),
        };
        csv_writer
            .write_record([
                entry.count.to_string().as_str(),
                dut,
                reference,
                entry.line.as_str(),
            ])
            .map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| ReportError::Io {
        path: sink.to_path_buf(),
        source: e,
    })?;

    Ok(results.len())
}
