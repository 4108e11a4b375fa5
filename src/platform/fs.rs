// xregscan - platform/fs.rs
//
// Input acquisition and output sink opening.
// "-" selects stdin for the input and stdout for the report.

use crate::core::model::LogLine;
use crate::util::constants::STDIO_SENTINEL;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Where the input log comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// Interpret a CLI path argument; `-` means stdin.
    pub fn from_arg(arg: &Path) -> Self {
        if arg == Path::new(STDIO_SENTINEL) {
            Self::Stdin
        } else {
            Self::File(arg.to_path_buf())
        }
    }

    /// Path used in messages. Stdin is shown as `<stdin>`.
    pub fn display_path(&self) -> PathBuf {
        match self {
            Self::Stdin => PathBuf::from("<stdin>"),
            Self::File(p) => p.clone(),
        }
    }
}

/// Where a report or filtered copy is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    Stdout,
    File(PathBuf),
}

impl OutputSink {
    /// Interpret an optional CLI path; absent or `-` means stdout.
    pub fn from_arg(arg: Option<&Path>) -> Self {
        match arg {
            Some(p) if p != Path::new(STDIO_SENTINEL) => Self::File(p.to_path_buf()),
            _ => Self::Stdout,
        }
    }

    pub fn display_path(&self) -> PathBuf {
        match self {
            Self::Stdout => PathBuf::from("<stdout>"),
            Self::File(p) => p.clone(),
        }
    }

    /// Open the sink for writing without discarding existing content.
    ///
    /// A missing file is created empty. Truncation is deferred to
    /// [`OpenedSink::into_writer`] so a run that aborts while opening a later
    /// sink leaves earlier destinations untouched.
    pub fn open(&self) -> io::Result<OpenedSink> {
        match self {
            Self::Stdout => Ok(OpenedSink::Stdout),
            Self::File(path) => {
                let file = OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(false)
                    .open(path)?;
                Ok(OpenedSink::File(file))
            }
        }
    }
}

/// A sink that has been opened but not yet written to.
#[derive(Debug)]
pub enum OpenedSink {
    Stdout,
    File(File),
}

impl OpenedSink {
    /// Truncate the sink and wrap it in a buffered writer.
    pub fn into_writer(self) -> io::Result<Box<dyn Write>> {
        match self {
            Self::Stdout => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
            Self::File(file) => {
                file.set_len(0)?;
                Ok(Box::new(BufWriter::new(file)))
            }
        }
    }
}

/// Read the whole input into memory as raw bytes.
///
/// Decoding happens per line in [`split_lines`] so invalid UTF-8 never
/// aborts the read.
pub fn read_input(source: &InputSource) -> io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    match source {
        InputSource::Stdin => {
            io::stdin().lock().read_to_end(&mut bytes)?;
        }
        InputSource::File(path) => {
            File::open(path)?.read_to_end(&mut bytes)?;
        }
    }
    tracing::debug!(
        source = %source.display_path().display(),
        bytes = bytes.len(),
        "Input read"
    );
    Ok(bytes)
}

/// Split buffered input into lines, each keeping its `\n` terminator.
///
/// A final line without a terminator is kept as-is; empty input yields no
/// lines.
pub fn split_lines(bytes: &[u8]) -> Vec<LogLine<'_>> {
    bytes
        .split_inclusive(|b| *b == b'\n')
        .map(LogLine::new)
        .collect()
}
