//! The frame-driven engine.
//!
//! [`Engine::render`] is the single entry point: given the display size
//! and a non-decreasing time value it advances the simulation one tick and
//! returns the composited [`Frame`]. A size change rebuilds all state.

use std::time::Instant;

use mycelium_arena::{Colony, FieldStore, WaveTables};
use mycelium_core::{FieldSet, PropagatorError, StepError, TickId};
use mycelium_propagator::{Propagator, StepContext};
use mycelium_propagators::{GrowthAgents, NutrientSeeder, ReactionDiffusion, SporeBurst};
use mycelium_render::{Compositor, Frame};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{ConfigError, EngineConfig};
use crate::metrics::StepMetrics;

/// Descriptive metadata for the visual.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisualMetadata {
    /// Display name.
    pub name: &'static str,
    /// Author.
    pub author: &'static str,
    /// Version string.
    pub version: &'static str,
    /// One-line description.
    pub description: &'static str,
}

/// Metadata for the mycelium visual.
pub const METADATA: VisualMetadata = VisualMetadata {
    name: "Mycelium Observatory",
    author: "sat",
    version: "1.2",
    description: "Living procedural mycelium with bioluminescence and gradient-seeking branches",
};

/// The simulation engine: grids, colony, RNG and the propagator pipeline.
///
/// Not thread-safe; one caller drives it, one frame at a time.
pub struct Engine {
    config: EngineConfig,
    store: FieldStore,
    colony: Colony,
    waves: WaveTables,
    rng: ChaCha8Rng,
    seeder: NutrientSeeder,
    spawner: GrowthAgents,
    propagators: Vec<Box<dyn Propagator>>,
    compositor: Compositor,
    dims: Option<(u32, u32)>,
    tick: TickId,
    last_metrics: StepMetrics,
}

impl Engine {
    /// Build an engine with the standard pipeline: reaction-diffusion with
    /// reseeding, growth, then spore bursts.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let propagators: Vec<Box<dyn Propagator>> = vec![
            Box::new(
                ReactionDiffusion::new(config.reaction.clone())
                    .with_reseed(NutrientSeeder::new(config.seeding.clone())),
            ),
            Box::new(GrowthAgents::new(config.growth.clone())),
            Box::new(SporeBurst::new(config.spores.clone())),
        ];
        Self::with_pipeline(config, propagators)
    }

    /// Build an engine running `propagators` in order each tick.
    ///
    /// Resets still stamp nutrient patches and spawn branches per `config`.
    pub fn with_pipeline(
        config: EngineConfig,
        propagators: Vec<Box<dyn Propagator>>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            store: FieldStore::new(),
            colony: Colony::new(config.growth.branch_limit),
            waves: WaveTables::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            seeder: NutrientSeeder::new(config.seeding.clone()),
            spawner: GrowthAgents::new(config.growth.clone()),
            propagators,
            compositor: Compositor::new(config.compositor.clone()),
            dims: None,
            tick: TickId(0),
            last_metrics: StepMetrics::default(),
            config,
        })
    }

    /// Advance one tick at `width x height` and composite the frame.
    ///
    /// Zero dimensions return an empty frame and leave state untouched.
    /// A failing step is a defect: debug builds panic, release builds log
    /// the error, sanitise the grids and keep going.
    pub fn render(&mut self, width: u32, height: u32, time: f64) -> Frame {
        if width == 0 || height == 0 {
            return Frame::empty();
        }
        if let Err(e) = self.step(width, height, time) {
            if cfg!(debug_assertions) {
                panic!("step failed: {e}");
            }
            tracing::error!(error = %e, tick = %self.tick, "step failed");
            self.sanitize();
        }
        if self.store.is_empty() {
            return Frame::empty();
        }

        let start = Instant::now();
        let frame = self.compositor.compose(&mut self.store, &self.waves, time);
        self.last_metrics.composite_us = start.elapsed().as_micros() as u64;
        frame
    }

    /// Advance the simulation one tick without compositing.
    ///
    /// Rebuilds state first if the dimensions changed. On error the grids
    /// may hold the failing propagator's partial output.
    pub fn step(&mut self, width: u32, height: u32, time: f64) -> Result<StepMetrics, StepError> {
        if width == 0 || height == 0 {
            return Ok(StepMetrics {
                tick: self.tick.0,
                ..StepMetrics::default()
            });
        }
        let reset = self.ensure_state(width, height);
        if self.store.is_empty() {
            return Ok(StepMetrics::default());
        }

        let start = Instant::now();
        self.tick = self.tick.next();
        let mut propagator_us = Vec::with_capacity(self.propagators.len());
        let mut ctx = StepContext::new(
            &mut self.store,
            &mut self.colony,
            &self.waves,
            &mut self.rng,
            self.tick,
            time,
        );

        for prop in &self.propagators {
            let prop_start = Instant::now();
            let fail = |reason| StepError::PropagatorFailed {
                name: prop.name().to_string(),
                reason,
            };
            prop.step(&mut ctx).map_err(fail)?;
            if self.config.nan_check {
                scan_writes(ctx.store(), prop.writes()).map_err(fail)?;
            }
            let elapsed = prop_start.elapsed().as_micros() as u64;
            propagator_us.push((prop.name().to_string(), elapsed));
        }
        let events = ctx.events();

        let metrics = StepMetrics {
            tick: self.tick.0,
            total_us: start.elapsed().as_micros() as u64,
            propagator_us,
            composite_us: 0,
            branch_count: self.colony.len(),
            spawned: events.spawned,
            expired: events.expired,
            splits: events.splits,
            spore_burst: events.spore_burst,
            reseeded: events.reseeded,
            reset,
        };
        self.last_metrics = metrics.clone();
        Ok(metrics)
    }

    /// Reseed the RNG and force the next call to rebuild all state.
    pub fn reset(&mut self, seed: u64) {
        self.config.seed = seed;
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self.dims = None;
        self.tick = TickId(0);
        self.last_metrics = StepMetrics::default();
        tracing::debug!(seed, "engine reset");
    }

    /// Replace non-finite cells and clamp every grid into its bounds.
    /// Returns the number of cells changed.
    pub fn sanitize(&mut self) -> usize {
        let fixed = self.store.sanitize();
        if fixed > 0 {
            tracing::warn!(fixed, tick = %self.tick, "sanitised grids");
        }
        fixed
    }

    /// The grids.
    pub fn store(&self) -> &FieldStore {
        &self.store
    }

    /// The live branches.
    pub fn colony(&self) -> &Colony {
        &self.colony
    }

    /// Ticks since the last reset.
    pub fn current_tick(&self) -> TickId {
        self.tick
    }

    /// Metrics from the most recent frame.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// The configuration the engine was built with, with the current seed.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Descriptive metadata for the visual.
    pub fn metadata(&self) -> VisualMetadata {
        METADATA
    }

    /// Rebuild all state if `(width, height)` differs from the current
    /// size. Returns whether a rebuild happened.
    fn ensure_state(&mut self, width: u32, height: u32) -> bool {
        if self.dims == Some((width, height)) {
            return false;
        }
        self.dims = Some((width, height));
        self.tick = TickId(0);
        self.store.resize(width, height);
        self.colony.clear();

        let Some(space) = self.store.space().copied() else {
            self.waves = WaveTables::default();
            tracing::warn!(width, height, "grid too large, rendering nothing");
            return true;
        };
        self.waves = WaveTables::generate(&space, &mut self.rng);
        for _ in 0..self.config.initial_patches {
            self.seeder.seed_patch(&mut self.store, &mut self.rng);
        }
        for _ in 0..self.config.initial_branches {
            if !self.spawner.spawn_into(&mut self.colony, &space, &mut self.rng) {
                break;
            }
        }
        let branches = self.colony.len();
        tracing::debug!(width, height, branches, "state rebuilt");
        true
    }
}

/// First non-finite cell in any of `fields`.
fn scan_writes(store: &FieldStore, fields: FieldSet) -> Result<(), PropagatorError> {
    for field_id in &fields {
        if let Some(idx) = store.first_non_finite(field_id) {
            return Err(PropagatorError::NanDetected {
                field_id,
                cell_index: Some(idx),
            });
        }
    }
    Ok(())
}
