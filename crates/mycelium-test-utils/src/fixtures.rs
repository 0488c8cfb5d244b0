//! Reusable propagator test fixtures.
//!
//! - [`StepFixture`]: owns a store, colony, wave tables and seeded RNG and
//!   hands out [`StepContext`]s over them.
//! - [`PoisonPropagator`]: writes NaN into a grid after N clean calls.
//! - [`FailingPropagator`]: returns an error after N clean calls.

use mycelium_arena::{Colony, FieldStore, WaveTables};
use mycelium_core::{FieldId, FieldSet, PropagatorError, TickId};
use mycelium_propagator::{Propagator, StepContext};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Owned backing state for a [`StepContext`].
pub struct StepFixture {
    pub store: FieldStore,
    pub colony: Colony,
    pub waves: WaveTables,
    pub rng: ChaCha8Rng,
    pub tick: TickId,
    pub time: f64,
}

impl StepFixture {
    /// A freshly reset `width x height` store with wave tables drawn from
    /// `seed`, an empty colony of capacity `branch_limit`, at tick 0.
    pub fn new(width: u32, height: u32, branch_limit: usize, seed: u64) -> Self {
        let mut store = FieldStore::new();
        store.resize(width, height);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let waves = match store.space() {
            Some(space) => WaveTables::generate(space, &mut rng),
            None => WaveTables::default(),
        };
        Self {
            store,
            colony: Colony::new(branch_limit),
            waves,
            rng,
            tick: TickId(0),
            time: 0.0,
        }
    }

    /// Borrow everything as a step context for the current tick and time.
    pub fn ctx(&mut self) -> StepContext<'_> {
        StepContext::new(
            &mut self.store,
            &mut self.colony,
            &self.waves,
            &mut self.rng,
            self.tick,
            self.time,
        )
    }

    /// Advance the tick counter and time, then run `prop` once.
    pub fn tick(&mut self, prop: &dyn Propagator, dt: f64) -> Result<(), PropagatorError> {
        self.tick = self.tick.next();
        self.time += dt;
        let mut ctx = self.ctx();
        prop.step(&mut ctx)
    }
}

/// Writes NaN into one cell of `field` once `clean_calls` calls have passed.
pub struct PoisonPropagator {
    pub field: FieldId,
    pub clean_calls: usize,
    calls: AtomicUsize,
}

impl PoisonPropagator {
    pub fn new(field: FieldId, clean_calls: usize) -> Self {
        Self {
            field,
            clean_calls,
            calls: AtomicUsize::new(0),
        }
    }
}

impl Propagator for PoisonPropagator {
    fn name(&self) -> &str {
        "poison"
    }

    fn writes(&self) -> FieldSet {
        [self.field].into_iter().collect()
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError> {
        let n = self.calls.fetch_add(1, Ordering::Relaxed);
        if n >= self.clean_calls {
            if let Some(cell) = ctx.store_mut().field_mut(self.field).first_mut() {
                *cell = f32::NAN;
            }
        }
        Ok(())
    }
}

/// Fails with `ExecutionFailed` once `clean_calls` calls have passed.
pub struct FailingPropagator {
    pub clean_calls: usize,
    calls: AtomicUsize,
}

impl FailingPropagator {
    pub fn new(clean_calls: usize) -> Self {
        Self {
            clean_calls,
            calls: AtomicUsize::new(0),
        }
    }
}

impl Propagator for FailingPropagator {
    fn name(&self) -> &str {
        "failing"
    }

    fn writes(&self) -> FieldSet {
        FieldSet::empty()
    }

    fn step(&self, _ctx: &mut StepContext<'_>) -> Result<(), PropagatorError> {
        let n = self.calls.fetch_add(1, Ordering::Relaxed);
        if n >= self.clean_calls {
            return Err(PropagatorError::ExecutionFailed {
                reason: format!("deliberate failure on call {n}"),
            });
        }
        Ok(())
    }
}
