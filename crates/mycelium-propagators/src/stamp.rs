//! Shared helpers for stamping energy into the grids.

use mycelium_core::FieldId;
use mycelium_space::{DiskCell, Torus2D};

/// Upper bound declared for a grid. Unknown ids are unbounded.
pub(crate) fn cap(id: FieldId) -> f32 {
    id.def().map_or(f32::MAX, |d| d.bounds.1)
}

/// Lattice cell containing the continuous point `(x, y)`, wrapped.
pub(crate) fn cell_of(space: &Torus2D, x: f32, y: f32) -> (i32, i32) {
    let idx = space.index_at(x, y);
    let w = space.width() as usize;
    ((idx % w) as i32, (idx / w) as i32)
}

/// Visit every cell of `footprint` centred on `(cx, cy)` with its wrapped
/// flat index and linear falloff.
pub(crate) fn for_each_wrapped(
    space: &Torus2D,
    (cx, cy): (i32, i32),
    footprint: &[DiskCell],
    radius: u32,
    mut visit: impl FnMut(usize, f32),
) {
    for cell in footprint {
        let falloff = cell.falloff(radius);
        if falloff <= 0.0 {
            continue;
        }
        visit(space.index(cx + cell.dx, cy + cell.dy), falloff);
    }
}

/// Validate an inclusive `[lo, hi]` range parameter.
pub(crate) fn check_range(name: &str, (lo, hi): (f32, f32)) -> Result<(), String> {
    if !lo.is_finite() || !hi.is_finite() {
        return Err(format!("{name} must be finite, got ({lo}, {hi})"));
    }
    if lo > hi {
        return Err(format!("{name} is inverted: {lo} > {hi}"));
    }
    Ok(())
}

/// Validate a non-negative finite scalar parameter.
pub(crate) fn check_non_negative(name: &str, value: f32) -> Result<(), String> {
    if !value.is_finite() || value < 0.0 {
        return Err(format!("{name} must be finite and >= 0, got {value}"));
    }
    Ok(())
}
