// xregscan - platform/config.rs
//
// Config directory resolution and config.toml loading with startup
// validation. Uses the `directories` crate for XDG (Linux), AppData
// (Windows), Library (macOS) compliance.

use crate::core::model::ReportFormat;
use crate::util::constants;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Default location of config.toml for this platform.
///
/// Falls back to the current directory if platform dirs cannot be determined;
/// the fallback is reported as a warning because logging is not yet
/// initialised when this runs.
pub fn default_config_path() -> (PathBuf, Option<String>) {
    match ProjectDirs::from("", "", constants::APP_ID) {
        Some(dirs) => (dirs.config_dir().join(constants::CONFIG_FILE_NAME), None),
        None => (
            PathBuf::from(".").join(constants::CONFIG_FILE_NAME),
            Some(
                "Could not determine platform directories; looking for config.toml \
                 in the current directory."
                    .to_string(),
            ),
        ),
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[report]` section.
    pub report: ReportSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[report]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ReportSection {
    /// Prefix report lines with occurrence counts.
    pub counts: Option<bool>,
    /// Report format: "text", "json" or "csv".
    pub format: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Default for `--counts`.
    pub counts: bool,
    /// Default for `--format`.
    pub format: ReportFormat,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

/// Load and validate config.toml at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// A missing file yields defaults with no warnings. An unreadable or
/// unparseable file yields defaults plus a warning; the run still proceeds.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            warnings.push(format!(
                "Could not read config file '{}': {e}. Using defaults.",
                config_path.display()
            ));
            return (AppConfig::default(), warnings);
        }
    };

    let (config, mut parse_warnings) = parse_config(&content);
    for w in &mut parse_warnings {
        *w = format!("{}: {w}", config_path.display());
    }
    warnings.append(&mut parse_warnings);
    (config, warnings)
}

/// Validate config.toml content. Separated from [`load_config`] for testing.
pub fn parse_config(content: &str) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    let raw: RawConfig = match toml::from_str(content) {
        Ok(r) => r,
        Err(e) => {
            warnings.push(format!("failed to parse config: {e}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    let mut config = AppConfig::default();

    // -- Report: counts --
    if let Some(counts) = raw.report.counts {
        config.counts = counts;
    }

    // -- Report: format --
    if let Some(ref name) = raw.report.format {
        match ReportFormat::parse(name) {
            Some(format) => config.format = format,
            None => warnings.push(format!(
                "[report] format = \"{name}\" is not recognised. \
                 Expected \"text\", \"json\" or \"csv\". Using default (text).",
            )),
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default ({}).",
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    (config, warnings)
}
