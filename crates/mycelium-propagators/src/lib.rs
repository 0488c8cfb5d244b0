//! The per-tick propagators of the Mycelium growth simulator.
//!
//! # Pipeline order (each tick)
//!
//! 1. [`ReactionDiffusion`]: two Gray-Scott sweeps over `U`/`V`, then a
//!    scheduled [`NutrientSeeder`] patch.
//! 2. [`GrowthAgents`]: steer, move and deposit every branch; split,
//!    expire and replace.
//! 3. [`SporeBurst`]: on its schedule, a radial burst around one branch.
//!
//! Every propagator is configured by a serde-friendly parameter struct
//! whose `Default` carries the reference constants and whose `validate()`
//! reports the first bad value.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod growth;
pub mod nutrient;
pub mod reaction_diffusion;
pub mod spore;
mod stamp;

pub use growth::{deposit, sample_gradient, GrowthAgents, GrowthParams};
pub use nutrient::{NutrientSeeder, SeedParams};
pub use reaction_diffusion::{ReactionDiffusion, ReactionParams};
pub use spore::{SporeBurst, SporeParams};
