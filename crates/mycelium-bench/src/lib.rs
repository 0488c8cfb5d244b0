//! Benchmark profiles for the Mycelium growth simulator.
//!
//! - [`reference_profile`]: 80x24, a standard terminal
//! - [`stress_profile`]: 320x96, a maximised terminal on a large display
//! - [`warmed_engine`]: an engine already run past its startup transient

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use mycelium_engine::{ConfigError, Engine, EngineConfig};
use mycelium_propagators::GrowthParams;

/// Grid size of the reference profile.
pub const REFERENCE_DIMS: (u32, u32) = (80, 24);

/// Grid size of the stress profile.
pub const STRESS_DIMS: (u32, u32) = (320, 96);

/// Time advanced per frame, matching the terminal driver.
pub const FRAME_DT: f64 = 0.08;

/// Default configuration with the given seed.
pub fn reference_profile(seed: u64) -> EngineConfig {
    EngineConfig {
        seed,
        ..EngineConfig::default()
    }
}

/// Reference configuration with four times the branch budget, to keep
/// agent density comparable on the larger grid.
pub fn stress_profile(seed: u64) -> EngineConfig {
    let base = GrowthParams::default();
    EngineConfig {
        seed,
        initial_branches: (base.branch_limit * 2) as u32,
        growth: GrowthParams {
            branch_limit: base.branch_limit * 4,
            ..base
        },
        ..EngineConfig::default()
    }
}

/// Build an engine and render `frames` frames at `dims`.
pub fn warmed_engine(
    config: EngineConfig,
    dims: (u32, u32),
    frames: u64,
) -> Result<Engine, ConfigError> {
    let mut engine = Engine::new(config)?;
    for frame in 0..frames {
        engine.render(dims.0, dims.1, frame as f64 * FRAME_DT);
    }
    Ok(engine)
}
