//! Test utilities and fixtures for Mycelium development.
//!
//! Provides a [`StepFixture`] that owns everything a [`StepContext`]
//! borrows, grid statistics for convergence assertions, bound checks for
//! the field invariants, FNV-1a hashing for determinism checks, and
//! misbehaving propagators for exercising the engine's error path.
//!
//! [`StepContext`]: mycelium_propagator::StepContext

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod hash;
pub mod stats;

pub use fixtures::{FailingPropagator, PoisonPropagator, StepFixture};
pub use hash::{fnv1a_bytes, store_hash};
pub use stats::{check_bounds, mean, nonzero_count, variance};
