//! Error and warning types for export operations
//!
//! Two tiers: [`ExportError`] aborts an operation (bad configuration, unparsable input),
//! while [`Warning`] records a case that was skipped so the export could carry on with a
//! partial but valid document. Warnings are always handed back to the caller.

use serde::Serialize;
use std::fmt;

/// Errors that stop an operation before it produces output
#[derive(Debug, Clone, PartialEq)]
pub enum ExportError {
    /// Rule pack not found in registry
    PackNotFound(String),
    /// Error while reading the input document
    ParseError(String),
    /// Error while producing HTML or markdown text
    SerializationError(String),
    /// A page selection string could not be understood
    InvalidSelection(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::PackNotFound(name) => write!(f, "Rule pack '{name}' not found"),
            ExportError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ExportError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            ExportError::InvalidSelection(msg) => write!(f, "Invalid page selection: {msg}"),
        }
    }
}

impl std::error::Error for ExportError {}

/// A non-fatal problem encountered while exporting
///
/// The three variants follow the failure taxonomy of the pipeline:
/// something that should resolve does not, something supplied is malformed,
/// or the fragment bookkeeping saw a state it should never reach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Warning {
    /// A reference or selection points at nothing (absent footnote, empty page range)
    MissingTarget { what: String, target: String },
    /// A selector or escape pattern could not be parsed and was ignored
    MalformedSelector { selector: String, reason: String },
    /// A fragment group or reference chain was in an impossible state; only that unit was skipped
    InvariantViolation { context: String, reason: String },
}

impl Warning {
    pub fn missing_target(what: impl Into<String>, target: impl Into<String>) -> Self {
        Warning::MissingTarget {
            what: what.into(),
            target: target.into(),
        }
    }

    pub fn malformed_selector(selector: impl Into<String>, reason: impl Into<String>) -> Self {
        Warning::MalformedSelector {
            selector: selector.into(),
            reason: reason.into(),
        }
    }

    pub fn invariant(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Warning::InvariantViolation {
            context: context.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::MissingTarget { what, target } => {
                write!(f, "missing {what} '{target}', skipped")
            }
            Warning::MalformedSelector { selector, reason } => {
                write!(f, "ignored malformed selector '{selector}': {reason}")
            }
            Warning::InvariantViolation { context, reason } => {
                write!(f, "skipped {context}: {reason}")
            }
        }
    }
}
