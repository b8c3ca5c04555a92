//! # Memory Management
//!
//! Pre-allocated storage for transient objects that churn every frame.
//! Capacity is fixed at construction; the per-frame path never grows it.

mod pool;

pub use pool::{SlotHandle, SlotPool};
