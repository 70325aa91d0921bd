//! Error types for pageturn.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via `?` and
//! `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned by the replay binary
//!   - [`InputError`] - Trace file/stdin reading failures
//!   - [`ParseError`] - Malformed trace lines
//!   - [`ConfigError`](crate::config::ConfigError) - Config file failures
//!   - [`LoggingError`](crate::logging::LoggingError) - Subscriber installation failures
//! - [`RendererError`] - A renderer motion call that did not happen
//!
//! # Error Recovery Strategy
//!
//! Nothing in the navigation engine is fatal to the reading session. A renderer call that
//! fails is logged and dropped at the dispatch boundary; the worst outcome is a missed page
//! turn, which the user recovers from by repeating the input. Malformed trace lines are
//! skipped. Only input, configuration and logging setup errors abort the replay binary.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::logging::LoggingError;

/// Top-level error for the replay binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read the trace input.
    #[error("Failed to read input: {0}")]
    InputRead(#[from] InputError),

    /// Failed to parse a trace line.
    ///
    /// The replay loop handles these per line and never propagates them; the variant
    /// exists so callers that want strict parsing can use `?`.
    #[error("Failed to parse trace event: {0}")]
    Parse(#[from] ParseError),

    /// Config file exists but could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// The `--session` argument was empty.
    #[error("Invalid session id: {0}")]
    Session(#[from] crate::model::InvalidSessionId),

    /// Writing replay output failed (e.g. broken stdout pipe).
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Errors encountered when reading trace input from files or stdin.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified trace file does not exist at the given path.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use pageturn::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.jsonl")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.jsonl"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// No input source was provided and stdin is an interactive terminal.
    ///
    /// # Examples
    ///
    /// ```
    /// use pageturn::model::error::InputError;
    ///
    /// let msg = InputError::NoInput.to_string();
    /// assert!(msg.contains("file path or pipe data to stdin"));
    /// ```
    #[error("No input source: provide a file path or pipe data to stdin")]
    NoInput,

    /// Generic I/O error reading from the input source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors encountered when parsing JSONL trace lines.
///
/// Non-fatal: the replay loop logs the line number and skips the line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A trace line is not valid JSON.
    ///
    /// # Examples
    ///
    /// ```
    /// use pageturn::model::error::ParseError;
    ///
    /// let err = ParseError::InvalidJson {
    ///     line: 42,
    ///     message: "expected value at line 1 column 1".to_string()
    /// };
    /// assert!(err.to_string().contains("line 42"));
    /// ```
    #[error("Invalid JSON at line {line}: {message}")]
    InvalidJson {
        /// 1-based line number in the trace.
        line: usize,
        /// Parser message from `serde_json`.
        message: String,
    },

    /// Valid JSON that matches no trace event shape.
    #[error("Unrecognised trace event at line {line}: {message}")]
    UnknownEvent {
        /// 1-based line number in the trace.
        line: usize,
        /// What `serde` objected to.
        message: String,
    },
}

/// A renderer motion call that did not take effect.
///
/// Produced by [`Renderer`](crate::renderer::Renderer) implementations. The dispatcher
/// never propagates it: it logs at `warn` and treats the navigation as a no-op.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RendererError {
    /// The renderer does not implement this operation.
    #[error("renderer does not support {operation}")]
    Unsupported {
        /// Name of the renderer operation, e.g. `"nextSection"`.
        operation: &'static str,
    },

    /// The renderer implements the operation but it failed.
    #[error("renderer {operation} failed: {reason}")]
    Failed {
        /// Name of the renderer operation.
        operation: &'static str,
        /// Failure description from the renderer.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_error_converts_to_app_error() {
        fn read() -> Result<(), InputError> {
            Err(InputError::NoInput)
        }
        fn run() -> Result<(), AppError> {
            read()?;
            Ok(())
        }

        let err = run().unwrap_err();
        assert!(matches!(err, AppError::InputRead(InputError::NoInput)));
        assert!(err.to_string().starts_with("Failed to read input"));
    }

    #[test]
    fn io_error_converts_to_input_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: InputError = io.into();
        assert!(matches!(err, InputError::Io(_)));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn renderer_error_messages_name_the_operation() {
        let unsupported = RendererError::Unsupported {
            operation: "prevSection",
        };
        let failed = RendererError::Failed {
            operation: "goLeft",
            reason: "view detached".to_string(),
        };

        assert_eq!(
            unsupported.to_string(),
            "renderer does not support prevSection"
        );
        assert_eq!(failed.to_string(), "renderer goLeft failed: view detached");
    }

    #[test]
    fn parse_error_reports_line_number() {
        let err = ParseError::UnknownEvent {
            line: 7,
            message: "unknown variant `hover`".to_string(),
        };
        assert!(err.to_string().contains("line 7"));
    }
}
