//! Nutrient patches that keep the reaction from dying out.
//!
//! The Gray-Scott reaction on its own is dissipative: left alone it settles
//! into a flat field. [`NutrientSeeder`] stamps a disk of fresh activator
//! (and slightly depleted substrate) somewhere in the inner part of the
//! grid. The engine calls it a few times after every reset, and
//! [`ReactionDiffusion`](crate::ReactionDiffusion) calls it on a fixed
//! tick schedule.

use mycelium_arena::FieldStore;
use mycelium_core::{ACTIVATOR, SUBSTRATE};
use mycelium_space::{disk, Metric};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::stamp::{check_non_negative, check_range};

/// Patch centres are drawn from `[floor(0.2 n), floor(0.8 n)]` per axis.
const INNER_LO: f32 = 0.2;
const INNER_HI: f32 = 0.8;

/// Parameters for [`NutrientSeeder`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedParams {
    /// Reseed when `tick % interval == phase`. Zero disables reseeding.
    pub interval: u64,
    /// Phase within `interval` at which reseeding fires.
    pub phase: u64,
    /// Per-cell activator gain, drawn uniformly from this range.
    pub activator_gain: (f32, f32),
    /// Per-cell substrate loss, drawn uniformly from this range.
    pub substrate_loss: (f32, f32),
    /// Activator never rises above this inside a patch.
    pub activator_cap: f32,
    /// Substrate never falls below this inside a patch.
    pub substrate_floor: f32,
    /// Smallest patch radius.
    pub min_radius: u32,
    /// Largest radius is `max(min_radius + 1, min(w, h) / radius_divisor)`.
    pub radius_divisor: u32,
}

impl Default for SeedParams {
    fn default() -> Self {
        Self {
            interval: 90,
            phase: 10,
            activator_gain: (0.2, 0.6),
            substrate_loss: (0.05, 0.1),
            activator_cap: 1.0,
            substrate_floor: 0.2,
            min_radius: 2,
            radius_divisor: 8,
        }
    }
}

impl SeedParams {
    /// Check ranges and scalars.
    pub fn validate(&self) -> Result<(), String> {
        check_range("activator_gain", self.activator_gain)?;
        check_range("substrate_loss", self.substrate_loss)?;
        check_non_negative("activator_gain", self.activator_gain.0)?;
        check_non_negative("substrate_loss", self.substrate_loss.0)?;
        check_non_negative("activator_cap", self.activator_cap)?;
        check_non_negative("substrate_floor", self.substrate_floor)?;
        if self.radius_divisor == 0 {
            return Err("radius_divisor must be >= 1".into());
        }
        Ok(())
    }

    /// Inclusive radius range for a `width x height` grid.
    pub fn radius_range(&self, width: u32, height: u32) -> (u32, u32) {
        let max = (self.min_radius + 1).max(width.min(height) / self.radius_divisor.max(1));
        (self.min_radius, max)
    }
}

/// Stamps nutrient patches into `U`/`V`.
#[derive(Clone, Debug, Default)]
pub struct NutrientSeeder {
    params: SeedParams,
}

impl NutrientSeeder {
    /// Create a seeder with the given parameters.
    pub fn new(params: SeedParams) -> Self {
        Self { params }
    }

    /// The seeder's parameters.
    pub fn params(&self) -> &SeedParams {
        &self.params
    }

    /// Whether the reseed schedule fires on `tick`.
    pub fn due(&self, tick: mycelium_core::TickId) -> bool {
        tick.on_schedule(self.params.interval, self.params.phase)
    }

    /// Stamp one patch at a random centre in the inner 60% of the grid.
    ///
    /// Patch cells are clipped to the grid rather than wrapped. Returns
    /// the patch centre and radius, or `None` for a degenerate store.
    pub fn seed_patch<R: Rng + ?Sized>(
        &self,
        store: &mut FieldStore,
        rng: &mut R,
    ) -> Option<(u32, u32, u32)> {
        let space = *store.space()?;
        let (w, h) = (space.width(), space.height());
        let p = &self.params;

        let cx = rng.random_range(inner_lo(w)..=inner_hi(w));
        let cy = rng.random_range(inner_lo(h)..=inner_hi(h));
        let (r_lo, r_hi) = p.radius_range(w, h);
        let radius = rng.random_range(r_lo..=r_hi);

        for cell in disk(radius, Metric::Euclidean) {
            let x = cx as i64 + cell.dx as i64;
            let y = cy as i64 + cell.dy as i64;
            if x < 0 || y < 0 || x >= w as i64 || y >= h as i64 {
                continue;
            }
            let idx = y as usize * w as usize + x as usize;
            let gain = rng.random_range(p.activator_gain.0..=p.activator_gain.1);
            let loss = rng.random_range(p.substrate_loss.0..=p.substrate_loss.1);
            store.raise(ACTIVATOR, idx, gain, p.activator_cap);
            store.lower(SUBSTRATE, idx, loss, p.substrate_floor);
        }
        Some((cx, cy, radius))
    }
}

fn inner_lo(n: u32) -> u32 {
    (n as f32 * INNER_LO) as u32
}

fn inner_hi(n: u32) -> u32 {
    ((n as f32 * INNER_HI) as u32).max(inner_lo(n))
}
