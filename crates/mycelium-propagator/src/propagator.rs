//! The [`Propagator`] trait.
//!
//! Propagators are stateless operators executed in a fixed order each
//! tick. They declare the grids they write so the engine can scan those
//! grids for non-finite values after each step.

use crate::context::StepContext;
use mycelium_core::{FieldSet, PropagatorError};

/// A stateless operator in the engine's per-tick pipeline.
///
/// # Contract
///
/// - `step()` MUST be deterministic given the context's RNG state.
/// - `&self`: propagators are stateless; mutable state goes through the
///   grids, the colony and the RNG lent by [`StepContext`].
/// - A degenerate (zero-size) store must be treated as a no-op.
///
/// # Examples
///
/// A minimal propagator that clears the glow buffer:
///
/// ```
/// use mycelium_core::{FieldSet, PropagatorError, GLOW};
/// use mycelium_propagator::{Propagator, StepContext};
///
/// struct Extinguish;
///
/// impl Propagator for Extinguish {
///     fn name(&self) -> &str { "extinguish" }
///
///     fn writes(&self) -> FieldSet { [GLOW].into_iter().collect() }
///
///     fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError> {
///         ctx.store_mut().field_mut(GLOW).fill(0.0);
///         Ok(())
///     }
/// }
///
/// assert_eq!(Extinguish.name(), "extinguish");
/// ```
pub trait Propagator: Send + 'static {
    /// Human-readable name for error reporting and metrics.
    fn name(&self) -> &str;

    /// Grids this propagator may modify.
    fn writes(&self) -> FieldSet;

    /// Execute the propagator for one tick.
    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError>;
}
