//! Mycelium: a procedural growth simulator for character-cell terminals.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Mycelium sub-crates. A Gray-Scott reaction-diffusion system supplies
//! a nutrient landscape, wandering branch agents climb its gradient and
//! leave luminous trails, and a compositor turns the grids into a frame of
//! coloured glyphs.
//!
//! # Quick start
//!
//! ```rust
//! use mycelium::prelude::*;
//!
//! let mut engine = Engine::new(EngineConfig::default()).unwrap();
//! let frame = engine.render(40, 12, 0.0);
//! assert_eq!((frame.width(), frame.height()), (40, 12));
//! assert_eq!(engine.current_tick(), TickId(1));
//!
//! // Zero-size viewports render nothing and leave state alone.
//! assert!(engine.render(0, 12, 0.08).is_empty());
//! assert_eq!(engine.current_tick(), TickId(1));
//! ```
//!
//! Custom pipelines plug in through [`Propagator`](prelude::Propagator):
//!
//! ```rust
//! use mycelium::prelude::*;
//!
//! struct Extinguish;
//! impl Propagator for Extinguish {
//!     fn name(&self) -> &str { "extinguish" }
//!     fn writes(&self) -> FieldSet { [GLOW].into_iter().collect() }
//!     fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError> {
//!         ctx.store_mut().field_mut(GLOW).fill(0.0);
//!         Ok(())
//!     }
//! }
//!
//! let mut engine =
//!     Engine::with_pipeline(EngineConfig::default(), vec![Box::new(Extinguish)]).unwrap();
//! engine.render(16, 8, 0.0);
//! assert!(engine.store().field(GLOW).iter().all(|&g| g == 0.0));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `mycelium-core` | IDs, grid definitions, error types |
//! | [`space`] | `mycelium-space` | Toroidal grid, stencils, disk regions |
//! | [`arena`] | `mycelium-arena` | Grid store, colony, wave tables |
//! | [`propagator`] | `mycelium-propagator` | Propagator trait and step context |
//! | [`propagators`] | `mycelium-propagators` | Reaction-diffusion, growth, spores |
//! | [`render`] | `mycelium-render` | Compositor, frames, colour |
//! | [`engine`] | `mycelium-engine` | Engine, configuration, metrics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and IDs (`mycelium-core`).
pub use mycelium_core as types;

/// Toroidal grid geometry (`mycelium-space`).
///
/// [`space::Torus2D`] for wrapped indexing, the 3x3 stencil weights and
/// [`space::disk`] for stamping circular footprints.
pub use mycelium_space as space;

/// Grid storage and simulation state (`mycelium-arena`).
pub use mycelium_arena as arena;

/// Propagator trait and step context (`mycelium-propagator`).
///
/// The [`propagator::Propagator`] trait is the extension point for custom
/// per-tick logic.
pub use mycelium_propagator as propagator;

/// The standard propagators (`mycelium-propagators`).
///
/// [`propagators::ReactionDiffusion`], [`propagators::GrowthAgents`] and
/// [`propagators::SporeBurst`].
pub use mycelium_propagators as propagators;

/// Glyph and colour compositing (`mycelium-render`).
pub use mycelium_render as render;

/// The simulation engine (`mycelium-engine`).
pub use mycelium_engine as engine;

/// Common imports for typical Mycelium usage.
///
/// ```rust
/// use mycelium::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mycelium_core::{
        FieldId, FieldSet, TickId, ACTIVATOR, FIELD_DEFS, GLOW, SUBSTRATE, VEIN,
    };

    // Errors
    pub use mycelium_core::{PropagatorError, StepError};

    // State
    pub use mycelium_arena::{Branch, Colony, FieldStore};

    // Propagator
    pub use mycelium_propagator::{Propagator, StepContext};

    // Render
    pub use mycelium_render::{Cell, Frame, Rgb};

    // Engine
    pub use mycelium_engine::{ConfigError, Engine, EngineConfig, StepMetrics};
}
