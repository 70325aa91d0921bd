//! Trace input sources.
//!
//! A trace comes either from a file named on the command line or from piped
//! stdin. Both yield raw lines; parsing happens downstream so line numbers
//! stay with the replay loop.

use crate::model::error::InputError;
use std::io::BufRead;
use std::path::PathBuf;

pub mod file;
pub mod stdin;

pub use file::FileSource;
pub use stdin::StdinSource;

/// Unified input source for JSONL traces.
///
/// Sum type enforces exactly one variant.
#[derive(Debug)]
pub enum InputSource {
    /// Trace file given on the command line.
    File(FileSource),
    /// Trace piped to stdin.
    Stdin(StdinSource<std::io::Stdin>),
}

impl InputSource {
    /// Next line of the trace, without its line terminator.
    ///
    /// Returns `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` for I/O errors.
    pub fn next_line(&mut self) -> Result<Option<String>, InputError> {
        match self {
            InputSource::File(f) => f.next_line(),
            InputSource::Stdin(s) => s.next_line(),
        }
    }

    /// Human-readable origin, for logging.
    pub fn describe(&self) -> String {
        match self {
            InputSource::File(f) => f.path().display().to_string(),
            InputSource::Stdin(_) => "<stdin>".to_string(),
        }
    }
}

/// Detect and create appropriate input source.
///
/// # Logic:
/// 1. If file path is provided: open it as a FileSource
/// 2. If stdin is piped: use StdinSource
/// 3. Else: return InputError::NoInput
///
/// # Errors
///
/// Returns `InputError::NoInput` if no file is provided and stdin is a terminal.
/// Returns `InputError::FileNotFound` if file does not exist.
/// Returns `InputError::Io` for I/O errors opening the file.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) => Ok(InputSource::File(FileSource::new(path)?)),
        None => Ok(InputSource::Stdin(StdinSource::new()?)),
    }
}

/// Read one line into a fresh string, stripping `\n` or `\r\n`.
pub(crate) fn read_line_trimmed<R: BufRead>(reader: &mut R) -> Result<Option<String>, InputError> {
    let mut buffer = String::new();
    if reader.read_line(&mut buffer)? == 0 {
        return Ok(None);
    }
    let trimmed_len = buffer.trim_end_matches(['\n', '\r']).len();
    buffer.truncate(trimmed_len);
    Ok(Some(buffer))
}
