//! Grid statistics and invariant checks.

use mycelium_arena::FieldStore;
use mycelium_core::FIELD_DEFS;

/// Arithmetic mean, accumulated in `f64`. Empty input yields 0.0.
pub fn mean(values: &[f32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64
}

/// Population variance, accumulated in `f64`. Empty input yields 0.0.
pub fn variance(values: &[f32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values
        .iter()
        .map(|&v| {
            let d = v as f64 - m;
            d * d
        })
        .sum::<f64>()
        / values.len() as f64
}

/// Number of cells whose value is not exactly zero.
pub fn nonzero_count(values: &[f32]) -> usize {
    values.iter().filter(|&&v| v != 0.0).count()
}

/// Verify every cell of every grid is finite and inside its declared
/// bounds. Returns a description of the first violation.
pub fn check_bounds(store: &FieldStore) -> Result<(), String> {
    for def in &FIELD_DEFS {
        if let Some((i, v)) = store
            .field(def.id)
            .iter()
            .enumerate()
            .find(|(_, v)| !def.admits(**v))
        {
            return Err(format!(
                "{} cell {i} = {v} outside [{}, {}]",
                def.name, def.bounds.0, def.bounds.1
            ));
        }
    }
    Ok(())
}
