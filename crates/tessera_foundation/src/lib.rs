//! Core types, values, and persistent collections for Tessera.
//!
//! This crate provides:
//! - [`Value`] - The payload type carried by every prop
//! - [`EntityId`] - Namespace-scoped entity identifiers
//! - [`Type`] - Variant descriptors for typed payload access
//! - [`Error`] - Rich error types with context
//! - Persistent collections ([`LtVec`], [`LtMap`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod entity;
pub mod error;
pub mod types;
pub mod value;

pub use collections::{LtMap, LtVec};
pub use entity::EntityId;
pub use error::{Error, ErrorContext, ErrorKind};
pub use types::Type;
pub use value::Value;

/// Result type for Tessera operations.
pub type Result<T> = std::result::Result<T, Error>;
