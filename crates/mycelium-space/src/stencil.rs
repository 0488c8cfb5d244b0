//! Neighbour offset tables for the 9-point stencil.

use crate::torus::Torus2D;

/// Orthogonal offsets as `(dx, dy)`: left, right, up, down.
pub const ORTHOGONAL: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Diagonal offsets as `(dx, dy)`: up-left, up-right, down-left, down-right.
pub const DIAGONAL: [(i32, i32); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

/// Flat indices of the eight wrapped neighbours of one cell.
///
/// Built once per row by the reaction-diffusion sweep; the centre index is
/// kept alongside so a single lookup feeds the whole stencil.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighbourhood {
    /// The cell itself.
    pub centre: usize,
    /// Left, right, up, down.
    pub orthogonal: [usize; 4],
    /// Up-left, up-right, down-left, down-right.
    pub diagonal: [usize; 4],
}

impl Neighbourhood {
    /// Resolve the neighbourhood of `(x, y)` on `torus`.
    pub fn of(torus: &Torus2D, x: usize, y: usize) -> Self {
        let (x, y) = (x as i32, y as i32);
        Self {
            centre: torus.index(x, y),
            orthogonal: ORTHOGONAL.map(|(dx, dy)| torus.index(x + dx, y + dy)),
            diagonal: DIAGONAL.map(|(dx, dy)| torus.index(x + dx, y + dy)),
        }
    }

    /// Weighted 9-point Laplacian of `field` at this cell.
    ///
    /// `ortho_weight * sum(orthogonal) + diag_weight * sum(diagonal)
    ///  - 4 * (ortho_weight + diag_weight) * centre`
    #[inline]
    pub fn laplacian(&self, field: &[f32], ortho_weight: f32, diag_weight: f32) -> f32 {
        let ortho: f32 = self.orthogonal.iter().map(|&i| field[i]).sum();
        let diag: f32 = self.diagonal.iter().map(|&i| field[i]).sum();
        let centre_weight = 4.0 * (ortho_weight + diag_weight);
        ortho * ortho_weight + diag * diag_weight - field[self.centre] * centre_weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_neighbourhood() {
        let t = Torus2D::new(5, 5).unwrap();
        let n = Neighbourhood::of(&t, 2, 2);
        assert_eq!(n.centre, 12);
        assert_eq!(n.orthogonal, [11, 13, 7, 17]);
        assert_eq!(n.diagonal, [6, 8, 16, 18]);
    }

    #[test]
    fn corner_neighbourhood_wraps() {
        let t = Torus2D::new(4, 3).unwrap();
        let n = Neighbourhood::of(&t, 0, 0);
        // left = (3,0), right = (1,0), up = (0,2), down = (0,1)
        assert_eq!(n.orthogonal, [3, 1, 8, 4]);
        // up-left = (3,2), up-right = (1,2), down-left = (3,1), down-right = (1,1)
        assert_eq!(n.diagonal, [11, 9, 7, 5]);
    }

    #[test]
    fn laplacian_of_constant_is_zero() {
        let t = Torus2D::new(6, 4).unwrap();
        let field = vec![0.7f32; t.cell_count()];
        for y in 0..4 {
            for x in 0..6 {
                let lap = Neighbourhood::of(&t, x, y).laplacian(&field, 0.5, 0.2);
                assert!(lap.abs() < 1e-6, "lap at ({x},{y}) = {lap}");
            }
        }
    }

    #[test]
    fn laplacian_of_spike() {
        let t = Torus2D::new(5, 5).unwrap();
        let mut field = vec![0.0f32; 25];
        field[12] = 1.0;
        let centre = Neighbourhood::of(&t, 2, 2).laplacian(&field, 0.5, 0.2);
        assert!((centre + 2.8).abs() < 1e-6);
        let side = Neighbourhood::of(&t, 3, 2).laplacian(&field, 0.5, 0.2);
        assert!((side - 0.5).abs() < 1e-6);
        let corner = Neighbourhood::of(&t, 3, 3).laplacian(&field, 0.5, 0.2);
        assert!((corner - 0.2).abs() < 1e-6);
    }
}
