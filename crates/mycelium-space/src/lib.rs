//! Toroidal grid topology for the Mycelium simulator.
//!
//! Every grid access in the simulator goes through [`Torus2D`]: integer
//! and floating-point coordinates are wrapped modulo the grid extent on
//! both axes, so there is no special-cased boundary anywhere.
//!
//! # Contents
//!
//! - [`Torus2D`]: dimensions, wrapping, flat indexing, toroidal distance
//! - [`stencil`]: the 8-neighbour offset table used by the Laplacian
//! - [`region`]: disk footprints (Euclidean and Manhattan) for stamping

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod region;
pub mod stencil;
pub mod torus;

pub use error::SpaceError;
pub use region::{disk, DiskCell, Metric};
pub use stencil::{Neighbourhood, DIAGONAL, ORTHOGONAL};
pub use torus::Torus2D;
