//! Execution context passed to propagators during a tick.

use mycelium_arena::{Colony, FieldStore, WaveTables};
use mycelium_core::TickId;
use mycelium_space::Torus2D;
use rand_chacha::ChaCha8Rng;

/// Notable events recorded while a tick runs, surfaced in engine metrics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepEvents {
    /// A nutrient patch was seeded this tick.
    pub reseeded: bool,
    /// A spore burst fired this tick.
    pub spore_burst: bool,
    /// Branches spawned to replace expired ones.
    pub spawned: u32,
    /// Branches that expired.
    pub expired: u32,
    /// Child branches created by splitting.
    pub splits: u32,
}

/// Execution context passed to each propagator's `step()` method.
///
/// Lends the field store, the colony, the wave tables and the engine's
/// seeded RNG for the duration of one tick, together with the tick id
/// and the caller-supplied time value.
pub struct StepContext<'a> {
    store: &'a mut FieldStore,
    colony: &'a mut Colony,
    waves: &'a WaveTables,
    rng: &'a mut ChaCha8Rng,
    tick_id: TickId,
    time: f64,
    events: StepEvents,
}

impl<'a> StepContext<'a> {
    /// Construct a new step context.
    ///
    /// Typically called by the engine, not by propagators directly.
    /// For testing, use the fixture in `mycelium-test-utils`.
    pub fn new(
        store: &'a mut FieldStore,
        colony: &'a mut Colony,
        waves: &'a WaveTables,
        rng: &'a mut ChaCha8Rng,
        tick_id: TickId,
        time: f64,
    ) -> Self {
        Self {
            store,
            colony,
            waves,
            rng,
            tick_id,
            time,
            events: StepEvents::default(),
        }
    }

    /// The grids, read-only.
    pub fn store(&self) -> &FieldStore {
        self.store
    }

    /// The grids, mutable.
    pub fn store_mut(&mut self) -> &mut FieldStore {
        self.store
    }

    /// Topology of the current grid, or `None` when it is degenerate.
    pub fn space(&self) -> Option<Torus2D> {
        self.store.space().copied()
    }

    /// The live branches, read-only.
    pub fn colony(&self) -> &Colony {
        self.colony
    }

    /// The live branches, mutable.
    pub fn colony_mut(&mut self) -> &mut Colony {
        self.colony
    }

    /// Per-column and per-row phase tables for the current grid.
    ///
    /// The returned borrow outlives `self`, so it can be held across
    /// mutable access to the store.
    pub fn waves(&self) -> &'a WaveTables {
        self.waves
    }

    /// The engine's seeded RNG.
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        self.rng
    }

    /// Borrow the store, colony and RNG at the same time.
    pub fn parts(&mut self) -> (&mut FieldStore, &mut Colony, &mut ChaCha8Rng) {
        (&mut *self.store, &mut *self.colony, &mut *self.rng)
    }

    /// Current tick id.
    pub fn tick_id(&self) -> TickId {
        self.tick_id
    }

    /// Caller-supplied animation time for this tick.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Events recorded so far this tick.
    pub fn events(&self) -> StepEvents {
        self.events
    }

    /// Record events.
    pub fn events_mut(&mut self) -> &mut StepEvents {
        &mut self.events
    }
}
