//! Gradient-following growth agents.
//!
//! Every tick each [`Branch`] in the colony steers toward rising activator,
//! takes a fixed-length step, and leaves glow and vein behind it. Branches
//! periodically nourish and enrich the field around them, split once they
//! are old enough, and are replaced by a fresh spawn when they expire, so
//! the population stays within `[1, branch_limit]`.

use mycelium_arena::{Branch, Colony, FieldStore};
use mycelium_core::{FieldSet, PropagatorError, ACTIVATOR, GLOW, SUBSTRATE, VEIN};
use mycelium_propagator::{Propagator, StepContext};
use mycelium_space::{disk, DiskCell, Metric, Torus2D};
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::stamp::{cap, cell_of, check_non_negative, check_range, for_each_wrapped};

/// Headings shorter than this are left unnormalised.
const MIN_NORM: f32 = 1e-5;

/// Main deposit at the new position: `base + gain * burst`.
const MAIN_GLOW: (f32, f32) = (0.18, 0.55);
const MAIN_VEIN: (f32, f32) = (0.26, 0.4);
/// Trailing deposit, `TRAIL_OFFSET` headings behind the new position.
const TRAIL_OFFSET: f32 = 0.45;
const TRAIL_DEPOSIT: (f32, f32) = (0.05, 0.12);
/// Occasional side deposit, `SIDE_OFFSET` headings to the right.
const SIDE_OFFSET: f32 = 0.6;
const SIDE_DEPOSIT: (f32, f32) = (0.07, 0.18);

/// Nourishment: `V += 0.08 b` capped at 1.2, `U -= 0.04 b`.
const NOURISH_GAIN: f32 = 0.08;
const NOURISH_LOSS: f32 = 0.04;
const NOURISH_CAP: f32 = 1.2;

/// Enrichment intensity is `ENRICH_BASE + burst`, scaled by falloff.
const ENRICH_BASE: f32 = 0.8;
const ENRICH_V: (f32, f32) = (0.09, 1.3);
const ENRICH_U: f32 = 0.04;
const ENRICH_VEIN: (f32, f32) = (0.05, 1.4);

/// Parameters for [`GrowthAgents`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthParams {
    /// Population ceiling.
    pub branch_limit: usize,
    /// Display cell height over width; vertical motion is stretched by it.
    pub aspect: f32,
    /// Distance moved per tick, in grid units.
    pub step: f32,
    /// Weight of the previous heading in the blend.
    pub inertia: f32,
    /// Weight of the activator gradient in the blend.
    pub gradient_gain: f32,
    /// Half-widths of the uniform heading noise, `(x, y)`.
    pub noise: (f32, f32),
    /// Burst affinity range for spawned branches.
    pub burst: (f32, f32),
    /// Burst affinity range for split children.
    pub child_burst: (f32, f32),
    /// Branches older than this expire.
    pub max_age: u32,
    /// Branches older than this may split.
    pub split_age: u32,
    /// Per-tick split probability once old enough.
    pub split_chance: f64,
    /// Per-tick probability of an extra side deposit.
    pub side_chance: f64,
    /// Nourish every this many ticks of age. Zero disables.
    pub nourish_every: u32,
    /// Enrich every this many ticks of age. Zero disables.
    pub enrich_every: u32,
    /// Manhattan radius of an enrichment patch.
    pub enrich_radius: u32,
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            branch_limit: 22,
            aspect: 1.8,
            step: 0.6,
            inertia: 0.65,
            gradient_gain: 0.55,
            noise: (0.1, 0.08),
            burst: (0.12, 0.35),
            child_burst: (0.1, 0.28),
            max_age: 450,
            split_age: 120,
            split_chance: 0.02,
            side_chance: 0.08,
            nourish_every: 7,
            enrich_every: 45,
            enrich_radius: 3,
        }
    }
}

impl GrowthParams {
    /// Check scalars, ranges and probabilities.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.aspect.is_finite() && self.aspect > 0.0) {
            let aspect = self.aspect;
            return Err(format!("aspect must be finite and > 0, got {aspect}"));
        }
        check_non_negative("step", self.step)?;
        check_non_negative("inertia", self.inertia)?;
        check_non_negative("gradient_gain", self.gradient_gain)?;
        check_non_negative("noise.x", self.noise.0)?;
        check_non_negative("noise.y", self.noise.1)?;
        check_range("burst", self.burst)?;
        check_range("child_burst", self.child_burst)?;
        check_non_negative("burst", self.burst.0)?;
        check_non_negative("child_burst", self.child_burst.0)?;
        for (name, p) in [
            ("split_chance", self.split_chance),
            ("side_chance", self.side_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(format!("{name} must be in [0, 1], got {p}"));
            }
        }
        Ok(())
    }
}

/// Per-tick tallies reported through [`StepEvents`](mycelium_propagator::StepEvents).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Tally {
    spawned: u32,
    expired: u32,
    splits: u32,
}

/// Advances the colony one tick. Writes `U`, `V`, glow and vein.
#[derive(Clone, Debug)]
pub struct GrowthAgents {
    params: GrowthParams,
    enrich_footprint: Vec<DiskCell>,
}

impl Default for GrowthAgents {
    fn default() -> Self {
        Self::new(GrowthParams::default())
    }
}

impl GrowthAgents {
    /// Create the growth pass.
    pub fn new(params: GrowthParams) -> Self {
        let enrich_footprint = disk(params.enrich_radius, Metric::Manhattan);
        Self {
            params,
            enrich_footprint,
        }
    }

    /// The pass's parameters.
    pub fn params(&self) -> &GrowthParams {
        &self.params
    }

    /// A fresh branch at a uniformly random position and heading.
    pub fn spawn<R: Rng + ?Sized>(&self, space: &Torus2D, rng: &mut R) -> Branch {
        let x = rng.random_range(0.0..=(space.width() - 1) as f32);
        let y = rng.random_range(0.0..=(space.height() - 1) as f32);
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let burst = rng.random_range(self.params.burst.0..=self.params.burst.1);
        Branch::new(x, y, angle.cos(), angle.sin() / self.params.aspect, burst)
    }

    /// Spawn a branch into `colony`. Returns `false` when the colony is full.
    pub fn spawn_into<R: Rng + ?Sized>(
        &self,
        colony: &mut Colony,
        space: &Torus2D,
        rng: &mut R,
    ) -> bool {
        if !colony.has_headroom() {
            return false;
        }
        let branch = self.spawn(space, rng);
        colony.push(branch)
    }

    /// A child at the parent's position, heading rotated a quarter turn.
    fn child_of<R: Rng + ?Sized>(&self, parent: &Branch, rng: &mut R) -> Branch {
        let burst = rng.random_range(self.params.child_burst.0..=self.params.child_burst.1);
        Branch::new(parent.x, parent.y, parent.dy, -parent.dx, burst)
    }

    /// Move one branch and apply its deposits, nourishment and enrichment.
    pub fn advance_branch<R: Rng + ?Sized>(
        &self,
        branch: &mut Branch,
        store: &mut FieldStore,
        space: &Torus2D,
        rng: &mut R,
    ) {
        let p = &self.params;
        let (gx, gy) = sample_gradient(store.field(ACTIVATOR), space, branch.x, branch.y);

        let jitter_x = rng.random_range(-p.noise.0..=p.noise.0);
        let jitter_y = rng.random_range(-p.noise.1..=p.noise.1);
        branch.dx = branch.dx * p.inertia + p.gradient_gain * gx + jitter_x;
        branch.dy = branch.dy * p.inertia + p.gradient_gain * gy + jitter_y;
        let norm = branch.dx.hypot(branch.dy * p.aspect);
        if norm > MIN_NORM && norm.is_finite() {
            branch.dx /= norm;
            branch.dy /= norm;
        } else if !norm.is_finite() {
            branch.dx = 0.0;
            branch.dy = 0.0;
        }

        (branch.x, branch.y) = space.wrap_position(
            branch.x + branch.dx * p.step,
            branch.y + branch.dy * p.step * p.aspect,
        );
        branch.age = branch.age.saturating_add(1);

        let b = branch.burst;
        deposit(
            store,
            space,
            (branch.x, branch.y),
            MAIN_GLOW.0 + MAIN_GLOW.1 * b,
            MAIN_VEIN.0 + MAIN_VEIN.1 * b,
        );
        deposit(
            store,
            space,
            (
                branch.x - branch.dx * TRAIL_OFFSET,
                branch.y - branch.dy * TRAIL_OFFSET,
            ),
            TRAIL_DEPOSIT.0,
            TRAIL_DEPOSIT.1,
        );
        if rng.random_bool(p.side_chance) {
            deposit(
                store,
                space,
                (
                    branch.x + branch.dy * SIDE_OFFSET,
                    branch.y - branch.dx * SIDE_OFFSET,
                ),
                SIDE_DEPOSIT.0,
                SIDE_DEPOSIT.1,
            );
        }

        if p.nourish_every != 0 && branch.age % p.nourish_every == 0 {
            let idx = space.index_at(branch.x, branch.y);
            store.raise(ACTIVATOR, idx, NOURISH_GAIN * b, NOURISH_CAP);
            store.lower(SUBSTRATE, idx, NOURISH_LOSS * b, 0.0);
        }
        if p.enrich_every != 0 && branch.age % p.enrich_every == 0 {
            self.enrich_patch(store, space, (branch.x, branch.y), ENRICH_BASE + b);
        }
    }

    /// Stronger, localised nourishment: a Manhattan disk around `at` whose
    /// boost falls off linearly with distance.
    pub fn enrich_patch(
        &self,
        store: &mut FieldStore,
        space: &Torus2D,
        at: (f32, f32),
        intensity: f32,
    ) {
        let centre = cell_of(space, at.0, at.1);
        for_each_wrapped(
            space,
            centre,
            &self.enrich_footprint,
            self.params.enrich_radius,
            |idx, falloff| {
                let k = intensity * falloff;
                store.raise(ACTIVATOR, idx, ENRICH_V.0 * k, ENRICH_V.1);
                store.lower(SUBSTRATE, idx, ENRICH_U * k, 0.0);
                store.raise(VEIN, idx, ENRICH_VEIN.0 * k, ENRICH_VEIN.1);
            },
        );
    }
}

/// Central-difference gradient of `field` at the cell containing `(x, y)`.
pub fn sample_gradient(field: &[f32], space: &Torus2D, x: f32, y: f32) -> (f32, f32) {
    if field.len() != space.cell_count() {
        return (0.0, 0.0);
    }
    let (ix, iy) = cell_of(space, x, y);
    let gx = (field[space.index(ix + 1, iy)] - field[space.index(ix - 1, iy)]) * 0.5;
    let gy = (field[space.index(ix, iy + 1)] - field[space.index(ix, iy - 1)]) * 0.5;
    (gx, gy)
}

/// Add glow and vein at the cell containing `at`, capped at their bounds.
pub fn deposit(store: &mut FieldStore, space: &Torus2D, at: (f32, f32), glow: f32, vein: f32) {
    let idx = space.index_at(at.0, at.1);
    store.raise(GLOW, idx, glow, cap(GLOW));
    store.raise(VEIN, idx, vein, cap(VEIN));
}

impl Propagator for GrowthAgents {
    fn name(&self) -> &str {
        "growth"
    }

    fn writes(&self) -> FieldSet {
        [SUBSTRATE, ACTIVATOR, GLOW, VEIN].into_iter().collect()
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError> {
        let Some(space) = ctx.space() else {
            return Ok(());
        };
        let p = &self.params;
        let mut tally = Tally::default();
        let (store, colony, rng) = ctx.parts();

        if colony.is_empty() && self.spawn_into(colony, &space, rng) {
            tally.spawned += 1;
        }

        let limit = colony.limit();
        let current = colony.take();
        let total = current.len();
        let mut survivors = Vec::with_capacity(limit.max(total));
        let mut appended: SmallVec<[Branch; 4]> = SmallVec::new();

        for (i, mut branch) in current.into_iter().enumerate() {
            self.advance_branch(&mut branch, store, &space, rng);

            if branch.age > p.max_age {
                appended.push(self.spawn(&space, rng));
                tally.expired += 1;
                tally.spawned += 1;
                continue;
            }

            survivors.push(branch);
            let population = survivors.len() + (total - i - 1) + appended.len();
            if branch.age > p.split_age && population < limit && rng.random_bool(p.split_chance) {
                appended.push(self.child_of(&branch, rng));
                tally.splits += 1;
            }
        }

        survivors.extend(appended);
        colony.restore(survivors);

        let events = ctx.events_mut();
        events.spawned += tally.spawned;
        events.expired += tally.expired;
        events.splits += tally.splits;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mycelium_test_utils::{check_bounds, StepFixture};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn torus(w: u32, h: u32) -> Torus2D {
        Torus2D::new(w, h).unwrap()
    }

    #[test]
    fn defaults_validate() {
        assert!(GrowthParams::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_probability_and_aspect() {
        let p = GrowthParams {
            split_chance: 1.5,
            ..GrowthParams::default()
        };
        assert!(p.validate().is_err());
        let p = GrowthParams {
            aspect: 0.0,
            ..GrowthParams::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn spawn_lands_on_grid_with_aspect_heading() {
        let agents = GrowthAgents::default();
        let space = torus(40, 20);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..200 {
            let b = agents.spawn(&space, &mut rng);
            assert!((0.0..=39.0).contains(&b.x));
            assert!((0.0..=19.0).contains(&b.y));
            assert!((0.12..=0.35).contains(&b.burst));
            assert_eq!(b.age, 0);
            let visual = b.dx.hypot(b.dy * 1.8);
            assert!((visual - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn spawn_into_respects_limit() {
        let agents = GrowthAgents::default();
        let space = torus(10, 10);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut colony = Colony::new(2);
        assert!(agents.spawn_into(&mut colony, &space, &mut rng));
        assert!(agents.spawn_into(&mut colony, &space, &mut rng));
        assert!(!agents.spawn_into(&mut colony, &space, &mut rng));
        assert_eq!(colony.len(), 2);
    }

    #[test]
    fn gradient_points_uphill_and_wraps() {
        let space = torus(5, 5);
        let mut field = vec![0.0f32; 25];
        field[space.index(1, 0)] = 1.0;
        let (gx, gy) = sample_gradient(&field, &space, 0.4, 0.9);
        assert_eq!((gx, gy), (0.5, 0.0));

        field[space.index(4, 0)] = 1.0;
        field[space.index(1, 0)] = 0.0;
        let (gx, _) = sample_gradient(&field, &space, 0.0, 0.0);
        assert_eq!(gx, -0.5);

        field.fill(0.0);
        field[space.index(0, 4)] = 0.6;
        let (_, gy) = sample_gradient(&field, &space, 0.0, 0.0);
        assert!((gy + 0.3).abs() < 1e-7);
    }

    #[test]
    fn deposit_wraps_negative_positions() {
        let mut store = FieldStore::new();
        store.resize(4, 3);
        let space = *store.space().unwrap();
        deposit(&mut store, &space, (-0.2, -0.2), 0.5, 0.25);
        assert_eq!(store.get(GLOW, 3, 2), 0.5);
        assert_eq!(store.get(VEIN, 3, 2), 0.25);
        deposit(&mut store, &space, (3.9, 2.9), 5.0, 5.0);
        assert_eq!(store.get(GLOW, 3, 2), 1.8);
        assert_eq!(store.get(VEIN, 3, 2), 1.6);
    }

    #[test]
    fn enrich_patch_is_manhattan_with_falloff() {
        let agents = GrowthAgents::default();
        let mut store = FieldStore::new();
        store.resize(12, 12);
        let space = *store.space().unwrap();
        agents.enrich_patch(&mut store, &space, (6.5, 6.5), 1.0);

        assert!((store.get(ACTIVATOR, 6, 6) - 0.09).abs() < 1e-6);
        assert!((store.get(VEIN, 6, 6) - 0.05).abs() < 1e-6);
        assert!((store.get(SUBSTRATE, 6, 6) - 0.96).abs() < 1e-6);
        assert!((store.get(ACTIVATOR, 9, 6) - 0.09 * 0.25).abs() < 1e-6);
        assert!(store.get(ACTIVATOR, 8, 8) == 0.0);
        assert!(store.get(ACTIVATOR, 7, 8) > 0.0);
    }

    #[test]
    fn expired_branch_is_replaced() {
        let mut fx = StepFixture::new(20, 10, 4, 9);
        let mut old = Branch::new(5.0, 5.0, 1.0, 0.0, 0.2);
        old.age = 450;
        fx.colony.push(old);
        let mut ctx = fx.ctx();
        GrowthAgents::default().step(&mut ctx).unwrap();
        let events = ctx.events();
        assert_eq!(events.expired, 1);
        assert_eq!(events.spawned, 1);
        assert_eq!(fx.colony.len(), 1);
        assert_eq!(fx.colony.branches()[0].age, 0);
    }

    #[test]
    fn old_branch_splits_with_rotated_heading() {
        let mut fx = StepFixture::new(30, 30, 4, 2);
        let mut parent = Branch::new(15.0, 15.0, 1.0, 0.0, 0.2);
        parent.age = 200;
        fx.colony.push(parent);
        let agents = GrowthAgents::new(GrowthParams {
            split_chance: 1.0,
            noise: (0.0, 0.0),
            ..GrowthParams::default()
        });
        fx.tick(&agents, 0.08).unwrap();
        assert_eq!(fx.colony.len(), 2);
        let (p, c) = (fx.colony.branches()[0], fx.colony.branches()[1]);
        assert_eq!(c.age, 0);
        assert_eq!((c.x, c.y), (p.x, p.y));
        assert_eq!((c.dx, c.dy), (p.dy, -p.dx));
        assert!((0.1..=0.28).contains(&c.burst));
    }

    #[test]
    fn split_respects_limit() {
        let mut fx = StepFixture::new(30, 30, 3, 2);
        for i in 0..3 {
            let mut b = Branch::new(5.0 + i as f32 * 5.0, 15.0, 1.0, 0.0, 0.2);
            b.age = 200;
            fx.colony.push(b);
        }
        let agents = GrowthAgents::new(GrowthParams {
            split_chance: 1.0,
            ..GrowthParams::default()
        });
        for _ in 0..10 {
            fx.tick(&agents, 0.08).unwrap();
            assert_eq!(fx.colony.len(), 3);
        }
    }

    #[test]
    fn empty_colony_gets_a_branch() {
        let mut fx = StepFixture::new(10, 10, 5, 0);
        fx.tick(&GrowthAgents::default(), 0.08).unwrap();
        assert_eq!(fx.colony.len(), 1);
    }

    #[test]
    fn nourish_and_enrich_fire_on_age() {
        let mut fx = StepFixture::new(30, 30, 2, 4);
        let mut b = Branch::new(15.0, 15.0, 1.0, 0.0, 0.3);
        b.age = 44;
        fx.colony.push(b);
        let agents = GrowthAgents::new(GrowthParams {
            noise: (0.0, 0.0),
            side_chance: 0.0,
            ..GrowthParams::default()
        });
        fx.tick(&agents, 0.08).unwrap();
        let moved = fx.colony.branches()[0];
        assert_eq!(moved.age, 45);
        let (cx, cy) = (moved.x.floor() as i32, moved.y.floor() as i32);
        let v = fx.store.get(ACTIVATOR, cx, cy);
        assert!((v - 0.09 * 1.1).abs() < 1e-6, "v = {v}");
        assert!(fx.store.get(VEIN, cx + 3, cy) > 0.0);
        check_bounds(&fx.store).unwrap();
    }
}
