//! Strongly-typed identifiers.

use std::fmt;

/// Identifies one of the simulation grids.
///
/// The store owns a fixed set of grids; `FieldId(n)` indexes
/// [`FIELD_DEFS`](crate::FIELD_DEFS).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(pub u32);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for FieldId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Monotonically increasing tick counter.
///
/// Incremented once per rendered frame and reset to zero whenever the
/// grid is resized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl TickId {
    /// The tick that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Whether this tick lands on the given schedule (`tick % interval == phase`).
    ///
    /// An interval of zero never fires.
    pub fn on_schedule(self, interval: u64, phase: u64) -> bool {
        interval != 0 && self.0 % interval == phase % interval
    }
}

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
