//! Stdin-based trace source for piped input.
//!
//! Refuses an interactive terminal so the replay never blocks waiting for a
//! user who forgot to pipe a trace.

use crate::model::error::InputError;
use std::io::{BufReader, IsTerminal, Read};

/// Stdin source for piped JSONL input (`cat trace.jsonl | pageturn ...`).
///
/// Generic over the reader so tests can feed it a byte slice.
#[derive(Debug)]
pub struct StdinSource<R: Read> {
    reader: BufReader<R>,
    complete: bool,
}

impl StdinSource<std::io::Stdin> {
    /// Create a new StdinSource from the process's stdin.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NoInput` if stdin is a TTY (interactive terminal).
    pub fn new() -> Result<Self, InputError> {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(InputError::NoInput);
        }
        Ok(Self::from_reader(stdin))
    }
}

impl<R: Read> StdinSource<R> {
    /// Create a source over any reader, bypassing the TTY check.
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            complete: false,
        }
    }

    /// Next line from the stream. Blocks until a line or EOF arrives.
    ///
    /// Sets the `complete` flag when EOF is reached.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` for I/O errors.
    pub fn next_line(&mut self) -> Result<Option<String>, InputError> {
        if self.complete {
            return Ok(None);
        }
        let line = super::read_line_trimmed(&mut self.reader)?;
        if line.is_none() {
            self.complete = true;
        }
        Ok(line)
    }

    /// Check if EOF has been reached (no more data will arrive).
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}
