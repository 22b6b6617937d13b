//! Integration tests for Layer 1: Storage
//!
//! Tests for entities, props, namespaces, sweeps, compaction, and concurrent use.

#![recursion_limit = "256"]

mod absent;
mod compaction;
mod concurrency;

/// Routes library logs to the test harness. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}
