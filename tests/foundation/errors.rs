//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use tessera_foundation::{Error, ErrorContext, ErrorKind, Type};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_type_mismatch() {
    let err = Error::type_mismatch(Type::Int, Type::String);
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
    assert!(!err.is_invalid_use());
    assert_eq!(err.to_string(), "type mismatch: expected int, got string");
}

#[test]
fn error_invalid_use() {
    let err = Error::invalid_use("set on an absent entity");
    assert!(err.is_invalid_use());
    assert_eq!(err.to_string(), "invalid use: set on an absent entity");
}

#[test]
fn error_is_std_error() {
    fn takes_error(_: &dyn std::error::Error) {}
    takes_error(&Error::invalid_use("x"));
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn context_is_optional() {
    let err = Error::invalid_use("x");
    assert!(err.context.is_none());
}

#[test]
fn context_builder() {
    let err = Error::type_mismatch(Type::Float, Type::Nil).with_context(
        ErrorContext::new()
            .with_attribute("velocity")
            .with_operation("payload_as"),
    );
    let ctx = err.context.as_ref().unwrap();
    assert_eq!(ctx.attribute.as_deref(), Some("velocity"));
    assert_eq!(ctx.operation, Some("payload_as"));
    assert_eq!(ctx.to_string(), "in payload_as of \"velocity\"");
}

#[test]
fn context_display_partial() {
    assert_eq!(ErrorContext::new().with_operation("set").to_string(), "in set");
    assert_eq!(ErrorContext::new().with_attribute("hp").to_string(), "on \"hp\"");
    assert_eq!(ErrorContext::new().to_string(), "");
}
