//! Field and agent storage for the Mycelium simulator.
//!
//! [`FieldStore`] owns the four simulation grids. The substrate and
//! activator grids are double-buffered through [`PingPong`] so the
//! reaction-diffusion sweep never observes a partially updated neighbour.
//! [`Colony`] owns the flat collection of growth agents, and
//! [`WaveTables`] holds the per-column and per-row phase tables that are
//! regenerated whenever the grid is resized.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod colony;
pub mod pingpong;
pub mod store;
pub mod waves;

pub use colony::{Branch, Colony};
pub use pingpong::PingPong;
pub use store::{CompositeView, FieldStore, ReactionBuffers};
pub use waves::WaveTables;
