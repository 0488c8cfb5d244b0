//! Grid descriptors and the [`FieldSet`] bitset.

use crate::id::FieldId;

/// Substrate concentration `U`.
pub const SUBSTRATE: FieldId = FieldId(0);
/// Activator concentration `V`.
pub const ACTIVATOR: FieldId = FieldId(1);
/// Transient luminous energy deposited by branches and spores.
pub const GLOW: FieldId = FieldId(2);
/// Persistent trail density left behind by branches.
pub const VEIN: FieldId = FieldId(3);

/// Static description of a simulation grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldDef {
    /// Identifier of the grid.
    pub id: FieldId,
    /// Human-readable name for debugging and logging.
    pub name: &'static str,
    /// Inclusive `(min, max)` range every cell must stay within.
    pub bounds: (f32, f32),
}

impl FieldDef {
    /// Clamp `value` into this grid's bounds. Non-finite input maps to the
    /// lower bound.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_finite() {
            value.clamp(self.bounds.0, self.bounds.1)
        } else {
            self.bounds.0
        }
    }

    /// Whether `value` is finite and inside the bounds.
    pub fn admits(&self, value: f32) -> bool {
        value.is_finite() && value >= self.bounds.0 && value <= self.bounds.1
    }
}

/// Descriptors for every grid, indexed by `FieldId.0`.
///
/// The glow and vein maxima are the soft caps applied by every deposit.
pub const FIELD_DEFS: [FieldDef; 4] = [
    FieldDef {
        id: SUBSTRATE,
        name: "substrate",
        bounds: (0.0, 1.2),
    },
    FieldDef {
        id: ACTIVATOR,
        name: "activator",
        bounds: (0.0, 1.4),
    },
    FieldDef {
        id: GLOW,
        name: "glow",
        bounds: (0.0, 1.8),
    },
    FieldDef {
        id: VEIN,
        name: "vein",
        bounds: (0.0, 1.6),
    },
];

impl FieldId {
    /// Look up the static descriptor for this grid.
    pub fn def(self) -> Option<&'static FieldDef> {
        FIELD_DEFS.get(self.0 as usize)
    }
}

/// A set of grid ids stored as a bitmask.
///
/// Used by propagators to declare which grids they write, so the engine
/// knows which grids to scan for non-finite values after each step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FieldSet {
    bits: u64,
}

impl FieldSet {
    /// Create an empty set.
    pub fn empty() -> Self {
        Self { bits: 0 }
    }

    /// The set of every grid in [`FIELD_DEFS`].
    pub fn all() -> Self {
        FIELD_DEFS.iter().map(|d| d.id).collect()
    }

    /// Insert a grid id. Ids of 64 or more are ignored.
    pub fn insert(&mut self, field: FieldId) {
        if field.0 < 64 {
            self.bits |= 1u64 << field.0;
        }
    }

    /// Check whether the set contains a grid id.
    pub fn contains(&self, field: FieldId) -> bool {
        field.0 < 64 && self.bits & (1u64 << field.0) != 0
    }

    /// Return the union of two sets (`self | other`).
    pub fn union(&self, other: &Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Returns `true` if the set contains no grids.
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Returns the number of grids in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Iterate over the ids in ascending order.
    pub fn iter(&self) -> FieldSetIter {
        FieldSetIter { bits: self.bits }
    }
}

impl FromIterator<FieldId> for FieldSet {
    fn from_iter<I: IntoIterator<Item = FieldId>>(iter: I) -> Self {
        let mut set = Self::empty();
        for field in iter {
            set.insert(field);
        }
        set
    }
}

impl IntoIterator for &FieldSet {
    type Item = FieldId;
    type IntoIter = FieldSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over ids in a [`FieldSet`], yielding them in ascending order.
pub struct FieldSetIter {
    bits: u64,
}

impl Iterator for FieldSetIter {
    type Item = FieldId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let bit = self.bits.trailing_zeros();
        self.bits &= self.bits - 1;
        Some(FieldId(bit))
    }
}
