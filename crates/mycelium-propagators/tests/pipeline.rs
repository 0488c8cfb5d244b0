//! Integration tests for the full propagator pipeline.
//!
//! These drive reaction-diffusion, growth and spore bursts together through
//! a `StepFixture`, the same order the engine runs them in.

use mycelium_core::{ACTIVATOR, GLOW, VEIN};
use mycelium_propagator::Propagator;
use mycelium_propagators::{
    GrowthAgents, GrowthParams, NutrientSeeder, ReactionDiffusion, ReactionParams, SporeBurst,
};
use mycelium_test_utils::{check_bounds, nonzero_count, store_hash, variance, StepFixture};
use proptest::prelude::*;

const DT: f64 = 0.08;

fn pipeline(growth: GrowthParams) -> Vec<Box<dyn Propagator>> {
    vec![
        Box::new(
            ReactionDiffusion::new(ReactionParams::default())
                .with_reseed(NutrientSeeder::default()),
        ),
        Box::new(GrowthAgents::new(growth)),
        Box::new(SporeBurst::default()),
    ]
}

fn seeded_fixture(width: u32, height: u32, growth: &GrowthParams, seed: u64) -> StepFixture {
    let mut fx = StepFixture::new(width, height, growth.branch_limit, seed);
    let seeder = NutrientSeeder::default();
    let agents = GrowthAgents::new(growth.clone());
    for _ in 0..12 {
        seeder.seed_patch(&mut fx.store, &mut fx.rng);
    }
    if let Some(space) = fx.store.space().copied() {
        for _ in 0..12 {
            agents.spawn_into(&mut fx.colony, &space, &mut fx.rng);
        }
    }
    fx
}

fn run_tick(fx: &mut StepFixture, props: &[Box<dyn Propagator>]) {
    fx.tick = fx.tick.next();
    fx.time += DT;
    let mut ctx = fx.ctx();
    for p in props {
        p.step(&mut ctx).unwrap();
    }
}

#[test]
fn single_branch_moves_one_step_and_deposits() {
    let mut fx = StepFixture::new(30, 30, 22, 77);
    fx.colony
        .push(mycelium_arena::Branch::new(10.0, 10.0, 0.0, 0.0, 0.2));
    let space = *fx.store.space().unwrap();

    fx.tick(&GrowthAgents::default(), DT).unwrap();

    let b = fx.colony.branches()[0];
    let moved = space.distance((10.0, 10.0), b.position());
    assert!((moved - 0.6).abs() < 1e-3, "moved {moved}");
    let (x, y) = (b.x.floor() as i32, b.y.floor() as i32);
    assert!(fx.store.get(GLOW, x, y) > 0.0);
    assert!(fx.store.get(VEIN, x, y) > 0.0);
}

#[test]
fn unforced_field_dissipates() {
    let mut fx = StepFixture::new(24, 24, 1, 3);
    for y in 9..15 {
        for x in 9..15 {
            fx.store.set(ACTIVATOR, x, y, 0.02);
        }
    }
    let rd = ReactionDiffusion::new(ReactionParams {
        feed_drift: 0.0,
        kill_drift: 0.0,
        feed_wave: 0.0,
        kill_wave: 0.0,
        ..ReactionParams::default()
    });

    let mut last = variance(fx.store.field(ACTIVATOR));
    for tick in 0..60 {
        fx.tick(&rd, DT).unwrap();
        let now = variance(fx.store.field(ACTIVATOR));
        assert!(now < last, "variance rose at tick {tick}: {last} -> {now}");
        last = now;
    }
}

#[test]
fn long_run_grows_and_stays_bounded() {
    let growth = GrowthParams::default();
    let mut fx = seeded_fixture(40, 20, &growth, 42);
    let props = pipeline(growth.clone());
    for _ in 0..2000 {
        run_tick(&mut fx, &props);
        let n = fx.colony.len();
        assert!((1..=growth.branch_limit).contains(&n), "population {n}");
    }
    check_bounds(&fx.store).unwrap();
    assert!(nonzero_count(fx.store.field(VEIN)) > 0);
}

#[test]
fn same_seed_same_grids() {
    let run = |seed: u64| {
        let growth = GrowthParams::default();
        let mut fx = seeded_fixture(32, 16, &growth, seed);
        let props = pipeline(growth);
        for _ in 0..150 {
            run_tick(&mut fx, &props);
        }
        store_hash(&fx.store)
    };
    assert_eq!(run(9), run(9));
    assert_ne!(run(9), run(10));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn grids_stay_in_bounds(seed in any::<u64>(), w in 1u32..24, h in 1u32..16) {
        let growth = GrowthParams::default();
        let mut fx = seeded_fixture(w, h, &growth, seed);
        let props = pipeline(growth);
        for _ in 0..130 {
            run_tick(&mut fx, &props);
            prop_assert!(check_bounds(&fx.store).is_ok());
        }
    }

    #[test]
    fn population_stays_within_limit(seed in any::<u64>(), limit in 1usize..6) {
        let growth = GrowthParams {
            branch_limit: limit,
            max_age: 20,
            split_age: 2,
            split_chance: 0.5,
            ..GrowthParams::default()
        };
        let mut fx = seeded_fixture(12, 8, &growth, seed);
        let props = pipeline(growth);
        for _ in 0..300 {
            run_tick(&mut fx, &props);
            prop_assert!((1..=limit).contains(&fx.colony.len()));
        }
    }
}
