// xregscan - core/filter.rs
//
// Filtered-log pass: reproduces the input with every marker line removed.
// Independent of deduplication; only the marker substring test is used.
// Core layer: writes to any Write trait object.

use crate::core::classify::is_marker_line;
use crate::core::model::LogLine;
use std::io::{self, Write};

/// Line counts from one filter pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    /// Lines written through unchanged.
    pub kept: usize,
    /// Marker lines dropped.
    pub removed: usize,
}

/// Write every non-marker line of `lines` to `writer`, byte for byte.
///
/// Terminators are preserved exactly as read, including a missing final
/// newline.
pub fn write_filtered<W: Write>(lines: &[LogLine<'_>], mut writer: W) -> io::Result<FilterStats> {
    let mut stats = FilterStats::default();
    for line in lines {
        if is_marker_line(&line.text) {
            stats.removed += 1;
        } else {
            writer.write_all(line.raw)?;
            stats.kept += 1;
        }
    }
    writer.flush()?;
    Ok(stats)
}
