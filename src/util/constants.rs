// xregscan - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "xregscan";

/// Application identifier used for the config directory.
pub const APP_ID: &str = "xregscan";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Marker and extraction
// =============================================================================

/// Literal substring identifying a register-mismatch diagnostic line.
pub const XREG_MISMATCH_MARKER: &str = "GVM error: DUT and REF xreg mismatch";

/// Pattern capturing the DUT and REF hex literals on a marker line.
///
/// Unanchored; anything before `DUT` (timestamps, hart ids) is ignored.
/// The `0x` prefix is accepted in either case and lower-cased with the digits.
pub const DUT_REF_PATTERN: &str =
    r"DUT\s*=\s*(0[xX][0-9A-Fa-f]+)\s*,\s*REF\s*=\s*(0[xX][0-9A-Fa-f]+)";

/// Path argument meaning "standard input" (input) or "standard output" (sinks).
pub const STDIO_SENTINEL: &str = "-";

// =============================================================================
// Exit codes
// =============================================================================

/// Successful run, including a run with zero matching lines.
pub const EXIT_SUCCESS: i32 = 0;

/// A sink was opened but writing or flushing it failed.
pub const EXIT_WRITE_FAILED: i32 = 1;

/// The input log could not be opened or read.
pub const EXIT_INPUT_OPEN: i32 = 2;

/// The report destination could not be opened for writing.
pub const EXIT_REPORT_OPEN: i32 = 3;

/// The filtered-log destination could not be opened for writing.
pub const EXIT_FILTER_OPEN: i32 = 4;

// =============================================================================
// Logging
// =============================================================================

/// Default log level. Kept quiet because stdout may carry the report.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Recognised values for `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Maximum length of a log line included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
