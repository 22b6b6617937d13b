//! Tessera - Concurrent entity/attribute store for simulations
//!
//! This crate re-exports all layers of the Tessera system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: tessera_storage    - Entities, props, namespaces, sweep buckets
//! Layer 0: tessera_foundation - Core types (Value, EntityId, Error)
//! ```

pub use tessera_foundation as foundation;
pub use tessera_storage as storage;
