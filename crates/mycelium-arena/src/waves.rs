//! Per-column and per-row phase tables.
//!
//! The drift tables carry a random jitter plus a linear ramp and feed the
//! spatial modulation of the feed/kill rates. The column/row tables are
//! smooth sinusoids used by the compositor's travelling wave.

use mycelium_space::Torus2D;
use rand::Rng;

/// Ramp slope of the column drift table.
const DRIFT_X_SLOPE: f32 = 0.12;
/// Ramp slope of the row drift table.
const DRIFT_Y_SLOPE: f32 = 0.17;
/// Angular frequency of the column wave.
const COLUMN_FREQ: f32 = 0.11;
/// Angular frequency of the row wave.
const ROW_FREQ: f32 = 0.09;

/// Precomputed phase tables for one grid size.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WaveTables {
    /// `U(-1, 1) + 0.12 x` per column.
    pub drift_x: Vec<f32>,
    /// `U(-1, 1) + 0.17 y` per row.
    pub drift_y: Vec<f32>,
    /// `sin(0.11 x)` per column.
    pub column: Vec<f32>,
    /// `cos(0.09 y)` per row.
    pub row: Vec<f32>,
}

impl WaveTables {
    /// Build the tables for `space`, drawing the drift jitter from `rng`.
    pub fn generate<R: Rng + ?Sized>(space: &Torus2D, rng: &mut R) -> Self {
        let width = space.width() as usize;
        let height = space.height() as usize;
        let drift_x = (0..width)
            .map(|x| rng.random_range(-1.0f32..1.0) + x as f32 * DRIFT_X_SLOPE)
            .collect();
        let drift_y = (0..height)
            .map(|y| rng.random_range(-1.0f32..1.0) + y as f32 * DRIFT_Y_SLOPE)
            .collect();
        let column = (0..width).map(|x| (x as f32 * COLUMN_FREQ).sin()).collect();
        let row = (0..height).map(|y| (y as f32 * ROW_FREQ).cos()).collect();
        Self {
            drift_x,
            drift_y,
            column,
            row,
        }
    }

    /// Whether the tables match a `width x height` grid.
    pub fn fits(&self, width: u32, height: u32) -> bool {
        self.drift_x.len() == width as usize
            && self.column.len() == width as usize
            && self.drift_y.len() == height as usize
            && self.row.len() == height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn tables_match_dimensions() {
        let space = Torus2D::new(12, 7).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let waves = WaveTables::generate(&space, &mut rng);
        assert!(waves.fits(12, 7));
        assert!(!waves.fits(7, 12));
        assert!(!WaveTables::default().fits(12, 7));
    }

    #[test]
    fn drift_tracks_ramp_within_jitter() {
        let space = Torus2D::new(30, 30).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let waves = WaveTables::generate(&space, &mut rng);
        for (x, &d) in waves.drift_x.iter().enumerate() {
            assert!((d - x as f32 * 0.12).abs() <= 1.0);
        }
        for (y, &d) in waves.drift_y.iter().enumerate() {
            assert!((d - y as f32 * 0.17).abs() <= 1.0);
        }
        assert_eq!(waves.column[0], 0.0);
        assert_eq!(waves.row[0], 1.0);
    }

    #[test]
    fn same_seed_same_tables() {
        let space = Torus2D::new(9, 4).unwrap();
        let a = WaveTables::generate(&space, &mut ChaCha8Rng::seed_from_u64(5));
        let b = WaveTables::generate(&space, &mut ChaCha8Rng::seed_from_u64(5));
        assert_eq!(a, b);
    }
}
