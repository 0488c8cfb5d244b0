//! Propagator trait and step context for the Mycelium simulator.
//!
//! The [`Propagator`] trait defines the `&self` step function; all
//! mutable state (grids, agents, RNG) is lent through [`StepContext`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod context;
pub mod propagator;

pub use context::{StepContext, StepEvents};
pub use propagator::Propagator;
