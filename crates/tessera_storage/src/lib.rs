//! Concurrent entity/attribute storage for Tessera.
//!
//! This crate provides:
//! - [`Entity`] - A handle to a table of named props
//! - [`Prop`] - A named payload attached to at most one entity
//! - [`Namespace`] - An isolated scope issuing entities and indexing their props
//! - [`Bucket`] / [`PropIndex`] - Per-name prop sequences for batch sweeps
//! - [`OptionalEntity`] / [`OptionalProp`] - Null-safe chaining over `Option`
//!
//! Every type is `Send + Sync`; any operation may run on any thread,
//! including from inside a sweep callback.

#![recursion_limit = "256"]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod absent;
pub mod bucket;
pub mod config;
pub mod entity;
pub mod index;
pub mod namespace;
pub mod prop;

pub use absent::{OptionalEntity, OptionalProp};
pub use bucket::{Bucket, SweepStats};
pub use config::{DEFAULT_COMPACTION_THRESHOLD, NamespaceConfig};
pub use entity::Entity;
pub use index::PropIndex;
pub use namespace::Namespace;
pub use prop::Prop;
