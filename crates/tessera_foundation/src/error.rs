//! Error types for Tessera.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! Only programmer mistakes and typed-payload mismatches are errors. Looking
//! up something that is absent, removed, or deleted is not an error; those
//! paths return `None` or `false`.

use std::fmt;

use thiserror::Error;

use crate::types::Type;

/// The main error type for Tessera operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: Type, actual: Type) -> Self {
        Self::new(ErrorKind::TypeMismatch { expected, actual })
    }

    /// Creates an invalid-use error for an operation on an absent receiver.
    #[must_use]
    pub fn invalid_use(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidUse(message.into()))
    }

    /// Returns true if this error signals a programming mistake.
    #[must_use]
    pub const fn is_invalid_use(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidUse(_))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A payload did not hold the variant the caller asked for.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected type.
        expected: Type,
        /// The actual type encountered.
        actual: Type,
    },

    /// A mutating operation or a name lookup was invoked on an absent
    /// receiver. Fatal to the call, never to the process.
    #[error("invalid use: {0}")]
    InvalidUse(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Attribute name the failing operation targeted.
    pub attribute: Option<String>,
    /// Operation that failed, such as `set` or `payload_as`.
    pub operation: Option<&'static str>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the attribute name.
    #[must_use]
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    /// Sets the operation name.
    #[must_use]
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        self.operation = Some(operation);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.operation, &self.attribute) {
            (Some(op), Some(attr)) => write!(f, "in {op} of {attr:?}"),
            (Some(op), None) => write!(f, "in {op}"),
            (None, Some(attr)) => write!(f, "on {attr:?}"),
            (None, None) => Ok(()),
        }
    }
}
