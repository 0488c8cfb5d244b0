//! Engine configuration, validation, and error types.
//!
//! [`EngineConfig`] groups the parameter structs of every propagator plus
//! the engine-level knobs. Every field has a default, and the whole tree
//! derives serde with `#[serde(default)]`, so a partial JSON document only
//! overrides what it names. [`validate()`](EngineConfig::validate) runs
//! before an [`Engine`](crate::Engine) is built.

use std::error::Error;
use std::fmt;

use mycelium_propagators::{GrowthParams, ReactionParams, SeedParams, SporeParams};
use mycelium_render::CompositorParams;
use serde::{Deserialize, Serialize};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`EngineConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A parameter group rejected one of its values.
    InvalidParameter {
        /// Parameter group, e.g. `"reaction"`.
        name: String,
        /// Description of the rejected value.
        reason: String,
    },
    /// `growth.branch_limit` is zero.
    BranchLimitZero,
    /// A schedule interval that must fire is zero.
    NonPositiveInterval {
        /// The offending interval.
        name: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter { name, reason } => {
                write!(f, "invalid {name} parameter: {reason}")
            }
            Self::BranchLimitZero => write!(f, "branch_limit must be at least 1"),
            Self::NonPositiveInterval { name } => {
                write!(f, "{name} must be at least 1")
            }
        }
    }
}

impl Error for ConfigError {}

// ── EngineConfig ───────────────────────────────────────────────────

/// Complete configuration for an [`Engine`](crate::Engine).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// RNG seed. Same seed and same call sequence give identical frames.
    pub seed: u64,
    /// Nutrient patches stamped after every reset.
    pub initial_patches: u32,
    /// Branches spawned after every reset, capped by the branch limit.
    pub initial_branches: u32,
    /// Scan each propagator's written grids for non-finite values.
    pub nan_check: bool,
    /// Gray-Scott stepper.
    pub reaction: ReactionParams,
    /// Nutrient patches and reseed schedule.
    pub seeding: SeedParams,
    /// Branch agents.
    pub growth: GrowthParams,
    /// Spore bursts.
    pub spores: SporeParams,
    /// Glyph and colour mapping.
    pub compositor: CompositorParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 1337,
            initial_patches: 12,
            initial_branches: 12,
            nan_check: true,
            reaction: ReactionParams::default(),
            seeding: SeedParams::default(),
            growth: GrowthParams::default(),
            spores: SporeParams::default(),
            compositor: CompositorParams::default(),
        }
    }
}

impl EngineConfig {
    /// Validate all parameter groups.
    ///
    /// Reseed and spore intervals may be zero (the schedule never fires);
    /// the sub-iteration count may not.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Population must be able to hold at least one branch.
        if self.growth.branch_limit == 0 {
            return Err(ConfigError::BranchLimitZero);
        }
        // 2. At least one sweep per tick.
        if self.reaction.sub_iterations == 0 {
            return Err(ConfigError::NonPositiveInterval {
                name: "reaction.sub_iterations".into(),
            });
        }
        // 3. Each group checks its own values.
        let groups: [(&str, Result<(), String>); 5] = [
            ("reaction", self.reaction.validate()),
            ("seeding", self.seeding.validate()),
            ("growth", self.growth.validate()),
            ("spores", self.spores.validate()),
            ("compositor", self.compositor.validate()),
        ];
        for (name, result) in groups {
            result.map_err(|reason| ConfigError::InvalidParameter {
                name: name.into(),
                reason,
            })?;
        }
        Ok(())
    }
}
