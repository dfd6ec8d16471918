//! Error types for serp-view.
//!
//! The taxonomy is narrow. The view-state core itself can only
//! fail on caller contract violations ([`ViewError::InvalidArgument`]).
//! Everything else here belongs to the shell: loading settings, reading the
//! command script, initialising logging.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned from `main`
//!   - [`ConfigError`] - Settings file / app-data loading failures
//!   - [`ScriptError`] - Malformed NDJSON command lines (non-fatal, reported and skipped)
//!   - [`LoggingError`] - Tracing subscriber initialisation failures
//!   - `std::io::Error` - Reading the script or writing output
//!
//! # Tolerated conditions
//!
//! Two conditions are never errors: a malformed but present override list in
//! the server app-data (accepted as-is), and a results event delivered after
//! the view has been torn down (silently dropped).

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::model::InvalidDocumentRef;
use thiserror::Error;

/// Top-level application error.
///
/// Domain errors convert via `From`, so `main` can use `?` throughout.
#[derive(Debug, Error)]
pub enum AppError {
    /// Settings file or app-data could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialised.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Reading the script or writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by view-state operations.
///
/// Only programmer contract violations end up here. They are signalled to
/// the caller and leave the view state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// An operation received an argument outside its contract.
    ///
    /// The canonical case is opening a document without a usable reference,
    /// which would otherwise leave the view in a "document opened but
    /// unidentified" state.
    ///
    /// # Examples
    ///
    /// ```
    /// use serp_view::model::ViewError;
    ///
    /// let err = ViewError::InvalidArgument {
    ///     operation: "open_document",
    ///     reason: "no document reference".to_string(),
    /// };
    /// assert!(err.to_string().contains("open_document"));
    /// ```
    #[error("Invalid argument to {operation}: {reason}")]
    InvalidArgument {
        /// Name of the rejected operation.
        operation: &'static str,
        /// What was wrong with the argument.
        reason: String,
    },
}

impl ViewError {
    /// The `open_document` family rejected a missing or empty reference.
    pub fn missing_document(operation: &'static str) -> Self {
        ViewError::InvalidArgument {
            operation,
            reason: "document reference is absent".to_string(),
        }
    }
}

impl From<InvalidDocumentRef> for ViewError {
    fn from(err: InvalidDocumentRef) -> Self {
        ViewError::InvalidArgument {
            operation: "open_document",
            reason: err.to_string(),
        }
    }
}

/// A command script line that could not be understood.
///
/// Non-fatal: the driver reports the line and continues with the next one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// The line is not valid JSON, or not a known command.
    ///
    /// # Examples
    ///
    /// ```
    /// use serp_view::model::ScriptError;
    ///
    /// let err = ScriptError::InvalidCommand {
    ///     line: 3,
    ///     message: "unknown variant `jump`".to_string(),
    /// };
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    #[error("Invalid command at line {line}: {message}")]
    InvalidCommand {
        /// 1-based line number in the script.
        line: usize,
        /// Parser message.
        message: String,
    },
}
