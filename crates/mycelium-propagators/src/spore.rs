//! Periodic spore bursts around a random live branch.

use mycelium_core::{FieldSet, PropagatorError, ACTIVATOR, GLOW, SUBSTRATE, VEIN};
use mycelium_propagator::{Propagator, StepContext};
use mycelium_space::{disk, Metric};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::stamp::{cap, cell_of, check_non_negative, for_each_wrapped};

/// Parameters for [`SporeBurst`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SporeParams {
    /// Burst when `tick % interval == phase`. Zero disables bursts.
    pub interval: u64,
    /// Phase within `interval`.
    pub phase: u64,
    /// Smallest burst radius.
    pub min_radius: u32,
    /// Largest radius is `max(min_radius + 1, min(w, h) / radius_divisor)`.
    pub radius_divisor: u32,
    /// Glow added at the centre, scaled by falloff.
    pub glow: f32,
    /// Activator added at the centre, scaled by falloff.
    pub activator: f32,
    /// Substrate removed at the centre, scaled by falloff.
    pub substrate: f32,
    /// Vein added at the centre, scaled by falloff.
    pub vein: f32,
}

impl Default for SporeParams {
    fn default() -> Self {
        Self {
            interval: 120,
            phase: 0,
            min_radius: 2,
            radius_divisor: 5,
            glow: 0.7,
            activator: 0.18,
            substrate: 0.07,
            vein: 0.12,
        }
    }
}

impl SporeParams {
    /// Check the radius divisor and amounts.
    pub fn validate(&self) -> Result<(), String> {
        if self.radius_divisor == 0 {
            return Err("radius_divisor must be >= 1".into());
        }
        check_non_negative("glow", self.glow)?;
        check_non_negative("activator", self.activator)?;
        check_non_negative("substrate", self.substrate)?;
        check_non_negative("vein", self.vein)
    }

    /// Inclusive radius range for a `width x height` grid.
    pub fn radius_range(&self, width: u32, height: u32) -> (u32, u32) {
        let max = (self.min_radius + 1).max(width.min(height) / self.radius_divisor.max(1));
        (self.min_radius, max)
    }
}

/// Stamps a Euclidean disk of energy into all four grids, centred on a
/// branch chosen uniformly at random, on a fixed tick schedule.
#[derive(Clone, Debug, Default)]
pub struct SporeBurst {
    params: SporeParams,
}

impl SporeBurst {
    /// Create an emitter with the given parameters.
    pub fn new(params: SporeParams) -> Self {
        Self { params }
    }

    /// The emitter's parameters.
    pub fn params(&self) -> &SporeParams {
        &self.params
    }

    /// Burst unconditionally. Returns the centre and radius, or `None` when
    /// there is no branch or the grid is degenerate.
    pub fn burst(&self, ctx: &mut StepContext<'_>) -> Option<((i32, i32), u32)> {
        let space = ctx.space()?;
        let (store, colony, rng) = ctx.parts();
        let origin = colony.choose(rng)?.position();
        let centre = cell_of(&space, origin.0, origin.1);
        let (lo, hi) = self.params.radius_range(space.width(), space.height());
        let radius = rng.random_range(lo..=hi);

        let p = &self.params;
        let footprint = disk(radius, Metric::Euclidean);
        for_each_wrapped(&space, centre, &footprint, radius, |idx, f| {
            store.raise(GLOW, idx, p.glow * f, cap(GLOW));
            store.raise(ACTIVATOR, idx, p.activator * f, cap(ACTIVATOR));
            store.lower(SUBSTRATE, idx, p.substrate * f, 0.0);
            store.raise(VEIN, idx, p.vein * f, cap(VEIN));
        });
        Some((centre, radius))
    }
}

impl Propagator for SporeBurst {
    fn name(&self) -> &str {
        "spore_burst"
    }

    fn writes(&self) -> FieldSet {
        [SUBSTRATE, ACTIVATOR, GLOW, VEIN].into_iter().collect()
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError> {
        let tick = ctx.tick_id();
        if !tick.on_schedule(self.params.interval, self.params.phase) {
            return Ok(());
        }
        if let Some(((cx, cy), radius)) = self.burst(ctx) {
            tracing::trace!(%tick, cx, cy, radius, "spore burst");
            ctx.events_mut().spore_burst = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mycelium_arena::Branch;
    use mycelium_core::TickId;
    use mycelium_test_utils::{check_bounds, nonzero_count, StepFixture};

    #[test]
    fn radius_range_matches_grid() {
        let p = SporeParams::default();
        assert_eq!(p.radius_range(40, 20), (2, 4));
        assert_eq!(p.radius_range(8, 8), (2, 3));
    }

    #[test]
    fn no_branch_no_burst() {
        let mut fx = StepFixture::new(10, 10, 4, 0);
        fx.tick = TickId(119);
        fx.tick(&SporeBurst::default(), 0.08).unwrap();
        assert_eq!(nonzero_count(fx.store.field(GLOW)), 0);
    }

    #[test]
    fn burst_stamps_all_grids_around_branch() {
        let mut fx = StepFixture::new(40, 20, 4, 8);
        fx.colony.push(Branch::new(0.5, 0.5, 1.0, 0.0, 0.2));
        fx.tick = TickId(120);
        let spore = SporeBurst::default();
        let mut ctx = fx.ctx();
        spore.step(&mut ctx).unwrap();
        assert!(ctx.events().spore_burst);

        assert!((fx.store.get(GLOW, 0, 0) - 0.7).abs() < 1e-6);
        assert!((fx.store.get(ACTIVATOR, 0, 0) - 0.18).abs() < 1e-6);
        assert!((fx.store.get(SUBSTRATE, 0, 0) - 0.93).abs() < 1e-6);
        assert!((fx.store.get(VEIN, 0, 0) - 0.12).abs() < 1e-6);
        // Wrapped neighbours across both edges.
        assert!(fx.store.get(GLOW, -1, -1) > 0.0);
        assert!(fx.store.get(GLOW, 2, 0) > 0.0);
        assert_eq!(fx.store.get(GLOW, 10, 10), 0.0);
        check_bounds(&fx.store).unwrap();
    }

    #[test]
    fn off_schedule_ticks_do_nothing() {
        let mut fx = StepFixture::new(10, 10, 4, 0);
        fx.colony.push(Branch::new(5.0, 5.0, 1.0, 0.0, 0.2));
        for _ in 0..119 {
            fx.tick(&SporeBurst::default(), 0.08).unwrap();
        }
        assert_eq!(nonzero_count(fx.store.field(GLOW)), 0);
        fx.tick(&SporeBurst::default(), 0.08).unwrap();
        assert!(nonzero_count(fx.store.field(GLOW)) > 0);
    }

    #[test]
    fn repeated_bursts_respect_caps() {
        let mut fx = StepFixture::new(12, 12, 1, 1);
        fx.colony.push(Branch::new(6.0, 6.0, 1.0, 0.0, 0.2));
        let spore = SporeBurst::new(SporeParams {
            interval: 1,
            ..SporeParams::default()
        });
        for _ in 0..50 {
            fx.tick(&spore, 0.08).unwrap();
        }
        assert_eq!(fx.store.get(GLOW, 6, 6), 1.8);
        assert_eq!(fx.store.get(ACTIVATOR, 6, 6), 1.4);
        assert_eq!(fx.store.get(SUBSTRATE, 6, 6), 0.0);
        check_bounds(&fx.store).unwrap();
    }
}
