// xregscan - app/run.rs
//
// Run orchestration. Acquires the input and every requested sink before
// producing any output, then classifies, renders, and flushes.
//
// Resource order (each failure is fatal with its own exit code):
//   1. input read   -> XregError::InputOpen
//   2. report sink  -> XregError::ReportOpen
//   3. filter sink  -> XregError::FilterOpen
// Sinks are truncated only after all three steps succeed.

use crate::core::classify;
use crate::core::filter::{self, FilterStats};
use crate::core::model::ReportFormat;
use crate::core::report;
use crate::platform::fs::{self, InputSource, OutputSink};
use crate::util::error::{Result, XregError};
use std::path::PathBuf;

/// Everything a single run needs, resolved from CLI flags and config.toml.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: InputSource,
    pub report: OutputSink,
    pub counts: bool,
    pub format: ReportFormat,
    /// Destination for the filtered log; `None` disables the filter pass.
    pub filtered: Option<PathBuf>,
}

impl RunOptions {
    /// Sink for the filtered log. Always a file: `-` is a file name here,
    /// not stdout.
    pub fn filter_sink(&self) -> Option<OutputSink> {
        self.filtered.clone().map(OutputSink::File)
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub lines_scanned: usize,
    pub marker_lines: usize,
    pub unique_entries: usize,
    pub raw_line_entries: usize,
    /// Present when a filtered copy was written.
    pub filter: Option<FilterStats>,
}

/// Execute one extraction run.
pub fn run(options: &RunOptions) -> Result<RunSummary> {
    let input_path = options.input.display_path();
    let bytes = fs::read_input(&options.input).map_err(|e| XregError::InputOpen {
        path: input_path.clone(),
        source: e,
    })?;

    let report_path = options.report.display_path();
    let report_handle = options.report.open().map_err(|e| XregError::ReportOpen {
        path: report_path.clone(),
        source: e,
    })?;

    let filter_sink = options.filter_sink();
    let filter_handle = match &filter_sink {
        Some(sink) => Some(sink.open().map_err(|e| XregError::FilterOpen {
            path: sink.display_path(),
            source: e,
        })?),
        None => None,
    };

    let mut report_writer = report_handle.into_writer().map_err(|e| XregError::Io {
        path: report_path.clone(),
        operation: "truncate report",
        source: e,
    })?;
    let mut filter_writer = match (&filter_sink, filter_handle) {
        (Some(sink), Some(handle)) => Some(handle.into_writer().map_err(|e| XregError::Io {
            path: sink.display_path(),
            operation: "truncate filtered log",
            source: e,
        })?),
        _ => None,
    };

    let lines = fs::split_lines(&bytes);
    let results = classify::classify_log_lines(&lines);

    report::write_report(
        &results,
        options.format,
        options.counts,
        &mut report_writer,
        &report_path,
    )?;

    let filter = match (&filter_sink, filter_writer.as_mut()) {
        (Some(sink), Some(writer)) => {
            let stats = filter::write_filtered(&lines, writer).map_err(|e| XregError::Io {
                path: sink.display_path(),
                operation: "write filtered log",
                source: e,
            })?;
            tracing::info!(
                path = %sink.display_path().display(),
                kept = stats.kept,
                removed = stats.removed,
                "Filtered log written"
            );
            Some(stats)
        }
        _ => None,
    };

    let summary = RunSummary {
        lines_scanned: results.lines_scanned,
        marker_lines: results.marker_lines,
        unique_entries: results.len(),
        raw_line_entries: results.raw_line_entries(),
        filter,
    };

    tracing::info!(
        input = %input_path.display(),
        report = %report_path.display(),
        format = options.format.label(),
        lines = summary.lines_scanned,
        matched = summary.marker_lines,
        unique = summary.unique_entries,
        unkeyed = summary.raw_line_entries,
        "Extraction complete"
    );

    Ok(summary)
}
