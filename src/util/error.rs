// xregscan - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Every fatal error maps to a distinct process exit code.

use super::constants;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for a single xregscan run.
/// Errors are categorised by the resource that produced them.
#[derive(Debug)]
pub enum XregError {
    /// The input log could not be opened or read.
    InputOpen { path: PathBuf, source: io::Error },

    /// The report destination could not be created.
    ReportOpen { path: PathBuf, source: io::Error },

    /// The filtered-log destination could not be created.
    FilterOpen { path: PathBuf, source: io::Error },

    /// Rendering the report failed after its sink was opened.
    Report(ReportError),

    /// I/O error on an already-open sink.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl XregError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InputOpen { .. } => constants::EXIT_INPUT_OPEN,
            Self::ReportOpen { .. } => constants::EXIT_REPORT_OPEN,
            Self::FilterOpen { .. } => constants::EXIT_FILTER_OPEN,
            Self::Report(_) | Self::Io { .. } => constants::EXIT_WRITE_FAILED,
        }
    }
}

impl fmt::Display for XregError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputOpen { path, source } => {
                write!(f, "Cannot open input log '{}': {source}", path.display())
            }
            Self::ReportOpen { path, source } => {
                write!(f, "Cannot open report output '{}': {source}", path.display())
            }
            Self::FilterOpen { path, source } => write!(
                f,
                "Cannot open filtered log output '{}': {source}",
                path.display()
            ),
            Self::Report(e) => write!(f, "Report error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for XregError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InputOpen { source, .. } => Some(source),
            Self::ReportOpen { source, .. } => Some(source),
            Self::FilterOpen { source, .. } => Some(source),
            Self::Report(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Report errors
// ---------------------------------------------------------------------------

/// Errors raised while rendering the unique-entry report.
#[derive(Debug)]
pub enum ReportError {
    /// I/O error writing the report.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Report I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV report error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON report error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ReportError> for XregError {
    fn from(e: ReportError) -> Self {
        Self::Report(e)
    }
}

/// Convenience type alias for xregscan results.
pub type Result<T> = std::result::Result<T, XregError>;
