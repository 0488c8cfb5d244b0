//! Gray-Scott reaction-diffusion on the substrate/activator pair.
//!
//! Each tick runs `sub_iterations` explicit Euler sweeps. A sweep reads
//! the published `U`/`V`, writes the scratch pair, and the store swaps
//! them, so no cell ever observes a half-updated neighbour.
//!
//! The feed and kill rates drift globally with time and vary locally with
//! a travelling wave built from the store's [`WaveTables`], which keeps the
//! growth regime moving across the grid instead of freezing into a static
//! Turing pattern.

use mycelium_arena::{ReactionBuffers, WaveTables};
use mycelium_core::{FieldSet, PropagatorError, ACTIVATOR, SUBSTRATE};
use mycelium_propagator::{Propagator, StepContext};
use mycelium_space::{Neighbourhood, Torus2D};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::nutrient::NutrientSeeder;
use crate::stamp::{cap, check_non_negative};

const FEED_DRIFT_FREQ: f64 = 0.05;
const KILL_DRIFT_FREQ: f64 = 0.04;
const PHASE_RATE: f64 = 0.07;
const PHASE_PER_ITERATION: f64 = 0.9;
const KILL_WAVE_STRETCH: f32 = 1.2;

/// Parameters for [`ReactionDiffusion`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionParams {
    /// Substrate diffusion rate.
    pub du: f32,
    /// Activator diffusion rate.
    pub dv: f32,
    /// Base feed rate.
    pub feed: f32,
    /// Base kill rate.
    pub kill: f32,
    /// Euler time step.
    pub dt: f32,
    /// Laplacian weight of the four orthogonal neighbours.
    pub ortho_weight: f32,
    /// Laplacian weight of the four diagonal neighbours.
    pub diag_weight: f32,
    /// Sweeps per tick.
    pub sub_iterations: u32,
    /// Amplitude of the global `sin(0.05 t)` feed drift.
    pub feed_drift: f32,
    /// Amplitude of the global `cos(0.04 t)` kill drift.
    pub kill_drift: f32,
    /// Amplitude of the local travelling-wave feed modulation.
    pub feed_wave: f32,
    /// Amplitude of the local travelling-wave kill modulation.
    pub kill_wave: f32,
    /// Clamp ceiling for `U`.
    pub substrate_max: f32,
    /// Clamp ceiling for `V`.
    pub activator_max: f32,
}

impl Default for ReactionParams {
    fn default() -> Self {
        Self {
            du: 0.16,
            dv: 0.08,
            feed: 0.035,
            kill: 0.062,
            dt: 1.0,
            ortho_weight: 0.5,
            diag_weight: 0.2,
            sub_iterations: 2,
            feed_drift: 0.005,
            kill_drift: 0.006,
            feed_wave: 0.006,
            kill_wave: 0.004,
            substrate_max: 1.2,
            activator_max: 1.4,
        }
    }
}

impl ReactionParams {
    /// Check every rate is finite and non-negative and the clamp ceilings
    /// lie inside the grids' declared bounds.
    pub fn validate(&self) -> Result<(), String> {
        for (name, v) in [
            ("du", self.du),
            ("dv", self.dv),
            ("feed", self.feed),
            ("kill", self.kill),
            ("dt", self.dt),
            ("ortho_weight", self.ortho_weight),
            ("diag_weight", self.diag_weight),
            ("feed_drift", self.feed_drift),
            ("kill_drift", self.kill_drift),
            ("feed_wave", self.feed_wave),
            ("kill_wave", self.kill_wave),
        ] {
            check_non_negative(name, v)?;
        }
        if !(self.substrate_max > 0.0 && self.substrate_max <= cap(SUBSTRATE)) {
            return Err(format!(
                "substrate_max must be in (0, {}], got {}",
                cap(SUBSTRATE),
                self.substrate_max
            ));
        }
        if !(self.activator_max > 0.0 && self.activator_max <= cap(ACTIVATOR)) {
            return Err(format!(
                "activator_max must be in (0, {}], got {}",
                cap(ACTIVATOR),
                self.activator_max
            ));
        }
        Ok(())
    }

    /// Global `(feed, kill)` at animation time `t`.
    pub fn base_rates(&self, t: f64) -> (f32, f32) {
        (
            self.feed + self.feed_drift * (t * FEED_DRIFT_FREQ).sin() as f32,
            self.kill + self.kill_drift * (t * KILL_DRIFT_FREQ).cos() as f32,
        )
    }
}

/// Gray-Scott stepper with optional periodic nutrient reseeding.
///
/// Writes `U` and `V`. Expects the context's wave tables to match the grid.
#[derive(Clone, Debug, Default)]
pub struct ReactionDiffusion {
    params: ReactionParams,
    reseed: Option<NutrientSeeder>,
}

/// Per-sweep constants shared by every cell.
struct Sweep<'w> {
    waves: &'w WaveTables,
    feed_base: f32,
    kill_base: f32,
    /// Feed phase offset, reduced modulo `TAU`.
    feed_shift: f32,
    /// Kill phase offset, already stretched by `KILL_WAVE_STRETCH`.
    kill_shift: f32,
}

impl<'w> Sweep<'w> {
    fn new(waves: &'w WaveTables, rates: (f32, f32), t: f64, iteration: u32) -> Self {
        let shift = t * PHASE_RATE + iteration as f64 * PHASE_PER_ITERATION;
        Self {
            waves,
            feed_base: rates.0,
            kill_base: rates.1,
            feed_shift: shift.rem_euclid(TAU) as f32,
            kill_shift: (shift * KILL_WAVE_STRETCH as f64).rem_euclid(TAU) as f32,
        }
    }
}

impl ReactionDiffusion {
    /// A stepper with no reseeding.
    pub fn new(params: ReactionParams) -> Self {
        Self {
            params,
            reseed: None,
        }
    }

    /// Attach a seeder fired on its own tick schedule after the sweeps.
    pub fn with_reseed(mut self, seeder: NutrientSeeder) -> Self {
        self.reseed = Some(seeder);
        self
    }

    /// The stepper's parameters.
    pub fn params(&self) -> &ReactionParams {
        &self.params
    }

    fn sweep(&self, ctx: &mut StepContext<'_>, space: &Torus2D, sweep: &Sweep<'_>) {
        let p = &self.params;
        let width = space.width() as usize;
        let ReactionBuffers {
            u: u_now,
            v: v_now,
            u_next,
            v_next,
        } = ctx.store_mut().reaction_buffers();

        for y in 0..space.height() as usize {
            let wave_y = sweep.waves.drift_y[y];
            for x in 0..width {
                let n = Neighbourhood::of(space, x, y);
                let u = u_now[n.centre];
                let v = v_now[n.centre];
                let lap_u = n.laplacian(u_now, p.ortho_weight, p.diag_weight);
                let lap_v = n.laplacian(v_now, p.ortho_weight, p.diag_weight);

                let local = sweep.waves.drift_x[x] + wave_y;
                let feed = sweep.feed_base + p.feed_wave * (sweep.feed_shift + local).sin();
                let kill = sweep.kill_base
                    + p.kill_wave * (sweep.kill_shift + local * KILL_WAVE_STRETCH).cos();

                let react = u * v * v;
                let du = p.du * lap_u - react + feed * (1.0 - u);
                let dv = p.dv * lap_v + react - (feed + kill) * v;

                u_next[n.centre] = (u + du * p.dt).clamp(0.0, p.substrate_max);
                v_next[n.centre] = (v + dv * p.dt).clamp(0.0, p.activator_max);
            }
        }
    }
}

impl Propagator for ReactionDiffusion {
    fn name(&self) -> &str {
        "reaction_diffusion"
    }

    fn writes(&self) -> FieldSet {
        [SUBSTRATE, ACTIVATOR].into_iter().collect()
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError> {
        let Some(space) = ctx.space() else {
            return Ok(());
        };
        let waves = ctx.waves();
        if !waves.fits(space.width(), space.height()) {
            return Err(PropagatorError::ExecutionFailed {
                reason: format!(
                    "wave tables do not cover a {}x{} grid",
                    space.width(),
                    space.height()
                ),
            });
        }

        let t = ctx.time();
        let rates = self.params.base_rates(t);
        for iteration in 0..self.params.sub_iterations {
            let sweep = Sweep::new(waves, rates, t, iteration);
            self.sweep(ctx, &space, &sweep);
            ctx.store_mut().swap_reaction();
        }

        if let Some(seeder) = &self.reseed {
            if seeder.due(ctx.tick_id()) {
                let tick = ctx.tick_id();
                let (store, _, rng) = ctx.parts();
                if let Some((cx, cy, radius)) = seeder.seed_patch(store, rng) {
                    tracing::trace!(%tick, cx, cy, radius, "nutrient reseed");
                    ctx.events_mut().reseeded = true;
                }
            }
        }
        Ok(())
    }
}
