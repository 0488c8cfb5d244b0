//! Frame-driven engine for the Mycelium growth simulator.
//!
//! Owns the grids, the branch colony, the seeded RNG and the propagator
//! pipeline, and exposes [`Engine::render`] as the single per-frame entry
//! point. Configuration lives in [`EngineConfig`]; per-frame timing and
//! events in [`StepMetrics`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod engine;
pub mod metrics;

pub use config::{ConfigError, EngineConfig};
pub use engine::{Engine, VisualMetadata, METADATA};
pub use metrics::StepMetrics;
