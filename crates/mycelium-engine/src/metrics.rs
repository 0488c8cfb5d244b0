//! Per-tick metrics for the engine.
//!
//! [`StepMetrics`] captures timing and population data for a single
//! rendered frame.

/// Timing and event data collected during one frame.
///
/// All durations are in microseconds. The engine fills these after each
/// `render()`; [`Engine::last_metrics`](crate::Engine::last_metrics)
/// returns the most recent set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Tick this frame advanced to.
    pub tick: u64,
    /// Wall-clock time for the propagator pipeline, in microseconds.
    pub total_us: u64,
    /// Per-propagator execution times: `(name, microseconds)`.
    pub propagator_us: Vec<(String, u64)>,
    /// Time spent compositing the frame, in microseconds.
    pub composite_us: u64,
    /// Live branches after the tick.
    pub branch_count: usize,
    /// Branches spawned this tick, including expiry replacements.
    pub spawned: u32,
    /// Branches that expired this tick.
    pub expired: u32,
    /// Branches that split this tick.
    pub splits: u32,
    /// Whether a spore burst fired.
    pub spore_burst: bool,
    /// Whether a nutrient reseed fired.
    pub reseeded: bool,
    /// Whether the grids were rebuilt for new dimensions before this tick.
    pub reset: bool,
}
