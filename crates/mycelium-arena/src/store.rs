//! The four simulation grids and their toroidal accessors.

use mycelium_core::{FieldId, ACTIVATOR, FIELD_DEFS, GLOW, SUBSTRATE, VEIN};
use mycelium_space::Torus2D;

use crate::pingpong::PingPong;

/// Initial substrate concentration after a reset.
pub const SUBSTRATE_REST: f32 = 1.0;

/// Owner of the substrate, activator, glow and vein grids.
///
/// A store with a zero dimension has no topology; every read returns 0.0
/// and every write is a no-op.
#[derive(Clone, Debug, Default)]
pub struct FieldStore {
    space: Option<Torus2D>,
    substrate: PingPong,
    activator: PingPong,
    glow: Vec<f32>,
    vein: Vec<f32>,
}

/// Split borrow handed to the reaction-diffusion sweep: published `U`/`V`
/// for reading, scratch `U`/`V` for writing.
pub struct ReactionBuffers<'a> {
    /// Published substrate.
    pub u: &'a [f32],
    /// Published activator.
    pub v: &'a [f32],
    /// Scratch substrate.
    pub u_next: &'a mut [f32],
    /// Scratch activator.
    pub v_next: &'a mut [f32],
}

/// Split borrow handed to the compositor: field values for reading and the
/// decay buffers for in-place decay.
pub struct CompositeView<'a> {
    /// Published substrate.
    pub u: &'a [f32],
    /// Published activator.
    pub v: &'a [f32],
    /// Glow buffer.
    pub glow: &'a mut [f32],
    /// Vein buffer.
    pub vein: &'a mut [f32],
}

impl FieldStore {
    /// An empty store with no topology.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reinitialise every grid for a `width x height` torus.
    ///
    /// `U` is set to 1.0 everywhere and `V`, glow and vein to 0.0. A zero
    /// dimension leaves the store empty.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.space = Torus2D::new(width, height).ok();
        let len = self.space.map_or(0, |s| s.cell_count());
        self.substrate.reset(len, SUBSTRATE_REST);
        self.activator.reset(len, 0.0);
        self.glow.clear();
        self.glow.resize(len, 0.0);
        self.vein.clear();
        self.vein.resize(len, 0.0);
    }

    /// The grid topology, or `None` for a degenerate store.
    pub fn space(&self) -> Option<&Torus2D> {
        self.space.as_ref()
    }

    /// `(width, height)`, or `(0, 0)` for a degenerate store.
    pub fn dims(&self) -> (u32, u32) {
        self.space.map_or((0, 0), |s| (s.width(), s.height()))
    }

    /// Whether the store has no cells.
    pub fn is_empty(&self) -> bool {
        self.space.is_none()
    }

    /// Number of cells per grid.
    pub fn cell_count(&self) -> usize {
        self.glow.len()
    }

    /// Read-only view of a grid. Unknown ids yield an empty slice.
    pub fn field(&self, id: FieldId) -> &[f32] {
        match id {
            SUBSTRATE => self.substrate.front(),
            ACTIVATOR => self.activator.front(),
            GLOW => &self.glow,
            VEIN => &self.vein,
            _ => &[],
        }
    }

    /// Mutable view of a grid. Unknown ids yield an empty slice.
    pub fn field_mut(&mut self, id: FieldId) -> &mut [f32] {
        match id {
            SUBSTRATE => self.substrate.front_mut(),
            ACTIVATOR => self.activator.front_mut(),
            GLOW => &mut self.glow,
            VEIN => &mut self.vein,
            _ => &mut [],
        }
    }

    /// Value at the wrapped coordinate `(x, y)`.
    pub fn get(&self, id: FieldId, x: i32, y: i32) -> f32 {
        match self.space {
            Some(s) => self.field(id).get(s.index(x, y)).copied().unwrap_or(0.0),
            None => 0.0,
        }
    }

    /// Overwrite the value at the wrapped coordinate `(x, y)`.
    pub fn set(&mut self, id: FieldId, x: i32, y: i32, value: f32) {
        if let Some(s) = self.space {
            if let Some(cell) = self.field_mut(id).get_mut(s.index(x, y)) {
                *cell = value;
            }
        }
    }

    /// `cell = min(cap, cell + amount)` at flat index `idx`.
    #[inline]
    pub fn raise(&mut self, id: FieldId, idx: usize, amount: f32, cap: f32) {
        if let Some(cell) = self.field_mut(id).get_mut(idx) {
            *cell = (*cell + amount).min(cap);
        }
    }

    /// `cell = max(floor, cell - amount)` at flat index `idx`.
    #[inline]
    pub fn lower(&mut self, id: FieldId, idx: usize, amount: f32, floor: f32) {
        if let Some(cell) = self.field_mut(id).get_mut(idx) {
            *cell = (*cell - amount).max(floor);
        }
    }

    /// Split borrow for one reaction-diffusion sweep.
    pub fn reaction_buffers(&mut self) -> ReactionBuffers<'_> {
        let (u, u_next) = self.substrate.split();
        let (v, v_next) = self.activator.split();
        ReactionBuffers {
            u,
            v,
            u_next,
            v_next,
        }
    }

    /// Publish the scratch `U`/`V` written by the last sweep.
    pub fn swap_reaction(&mut self) {
        self.substrate.swap();
        self.activator.swap();
    }

    /// Split borrow for compositing.
    pub fn composite_view(&mut self) -> CompositeView<'_> {
        CompositeView {
            u: self.substrate.front(),
            v: self.activator.front(),
            glow: &mut self.glow,
            vein: &mut self.vein,
        }
    }

    /// Index of the first non-finite cell in a grid.
    pub fn first_non_finite(&self, id: FieldId) -> Option<usize> {
        self.field(id).iter().position(|v| !v.is_finite())
    }

    /// Replace non-finite cells with the lower bound and clamp every grid
    /// into its declared range. Returns the number of cells changed.
    pub fn sanitize(&mut self) -> usize {
        let mut fixed = 0;
        for def in &FIELD_DEFS {
            for cell in self.field_mut(def.id) {
                let clamped = def.clamp(*cell);
                if clamped.to_bits() != cell.to_bits() {
                    *cell = clamped;
                    fixed += 1;
                }
            }
        }
        fixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_resets_all_grids() {
        let mut store = FieldStore::new();
        store.resize(6, 4);
        store.set(ACTIVATOR, 1, 1, 0.9);
        store.set(GLOW, 2, 2, 0.5);
        store.resize(8, 5);
        assert_eq!(store.dims(), (8, 5));
        assert_eq!(store.cell_count(), 40);
        assert!(store.field(SUBSTRATE).iter().all(|&u| u == 1.0));
        for id in [ACTIVATOR, GLOW, VEIN] {
            assert!(store.field(id).iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn degenerate_store_is_inert() {
        let mut store = FieldStore::new();
        store.resize(0, 10);
        assert!(store.is_empty());
        assert_eq!(store.dims(), (0, 0));
        store.set(ACTIVATOR, 0, 0, 1.0);
        assert_eq!(store.get(ACTIVATOR, 0, 0), 0.0);
        assert!(store.field(SUBSTRATE).is_empty());
        assert_eq!(store.sanitize(), 0);
    }

    #[test]
    fn toroidal_reads_and_writes() {
        let mut store = FieldStore::new();
        store.resize(5, 3);
        store.set(VEIN, -1, 1, 0.25);
        assert_eq!(store.get(VEIN, 4, 1), 0.25);
        store.set(GLOW, 2, 3, 0.5);
        assert_eq!(store.get(GLOW, 2, 0), 0.5);
        assert_eq!(store.get(GLOW, 7, -3), 0.5);
    }

    #[test]
    fn raise_and_lower_respect_limits() {
        let mut store = FieldStore::new();
        store.resize(2, 2);
        store.raise(GLOW, 0, 5.0, 1.8);
        assert_eq!(store.field(GLOW)[0], 1.8);
        store.lower(SUBSTRATE, 1, 3.0, 0.2);
        assert_eq!(store.field(SUBSTRATE)[1], 0.2);
        // Out of range indices are ignored.
        store.raise(GLOW, 99, 1.0, 1.8);
    }

    #[test]
    fn reaction_swap_publishes_scratch() {
        let mut store = FieldStore::new();
        store.resize(2, 1);
        {
            let buf = store.reaction_buffers();
            buf.u_next.copy_from_slice(&[0.3, 0.4]);
            buf.v_next.copy_from_slice(&[0.1, 0.2]);
            assert_eq!(buf.u, &[1.0, 1.0]);
        }
        store.swap_reaction();
        assert_eq!(store.field(SUBSTRATE), &[0.3, 0.4]);
        assert_eq!(store.field(ACTIVATOR), &[0.1, 0.2]);
    }

    #[test]
    fn sanitize_repairs_non_finite_and_out_of_range() {
        let mut store = FieldStore::new();
        store.resize(3, 1);
        store.field_mut(ACTIVATOR)[0] = f32::NAN;
        store.field_mut(ACTIVATOR)[1] = 9.0;
        store.field_mut(GLOW)[2] = -1.0;
        assert_eq!(store.first_non_finite(ACTIVATOR), Some(0));
        assert_eq!(store.sanitize(), 3);
        assert_eq!(store.field(ACTIVATOR), &[0.0, 1.4, 0.0]);
        assert_eq!(store.field(GLOW)[2], 0.0);
        assert_eq!(store.first_non_finite(ACTIVATOR), None);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn set_is_visible_at_every_wrapped_alias(
                w in 1u32..16,
                h in 1u32..16,
                x in -500i32..500,
                y in -500i32..500,
                kx in -20i32..20,
                ky in -20i32..20,
                value in 0.0f32..1.0,
            ) {
                let mut store = FieldStore::new();
                store.resize(w, h);
                store.set(VEIN, x, y, value);
                let (ax, ay) = (x + kx * w as i32, y + ky * h as i32);
                prop_assert_eq!(store.get(VEIN, ax, ay), value);
                let (cx, cy) = (x.rem_euclid(w as i32), y.rem_euclid(h as i32));
                prop_assert_eq!(store.get(VEIN, cx, cy), value);
                let written = store.field(VEIN).iter().filter(|&&v| v != 0.0).count();
                prop_assert!(written <= 1);
            }

            #[test]
            fn double_swap_restores_published_grids(
                u in proptest::collection::vec(0.0f32..1.2, 1..32),
                v_seed in 0.0f32..1.4,
            ) {
                let mut store = FieldStore::new();
                store.resize(u.len() as u32, 1);
                store.field_mut(SUBSTRATE).copy_from_slice(&u);
                store.field_mut(ACTIVATOR).fill(v_seed);
                {
                    let buf = store.reaction_buffers();
                    buf.u_next.fill(0.5);
                    buf.v_next.fill(0.25);
                }
                store.swap_reaction();
                prop_assert!(store.field(SUBSTRATE).iter().all(|&x| x == 0.5));
                store.swap_reaction();
                prop_assert_eq!(store.field(SUBSTRATE), &u[..]);
                prop_assert!(store.field(ACTIVATOR).iter().all(|&x| x == v_seed));
            }
        }
    }
}
