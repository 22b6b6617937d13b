//! Example simulations built on Tessera.
//!
//! Each module drives a small simulation through the public API the way an
//! application would: one sweep per system per tick.

mod tags;
