//! Two-dimensional periodic grid.

use crate::error::SpaceError;

/// A `width x height` grid whose edges connect to the opposite edges.
///
/// Cells are stored row-major: `(x, y)` lives at `y * width + x`. Every
/// coordinate accepted by this type is wrapped, so `(-1, y)` and
/// `(width - 1, y)` name the same cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Torus2D {
    width: u32,
    height: u32,
}

impl Torus2D {
    /// Largest accepted extent on either axis; coordinates use `i32`.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Create a torus with `width * height` cells.
    ///
    /// Returns `Err(SpaceError::EmptySpace)` if either dimension is 0, or
    /// `Err(SpaceError::DimensionTooLarge)` if either exceeds `i32::MAX`.
    pub fn new(width: u32, height: u32) -> Result<Self, SpaceError> {
        if width == 0 || height == 0 {
            return Err(SpaceError::EmptySpace);
        }
        if width > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "width",
                value: width,
                max: Self::MAX_DIM,
            });
        }
        if height > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "height",
                value: height,
                max: Self::MAX_DIM,
            });
        }
        Ok(Self { width, height })
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// The smaller of the two dimensions.
    pub fn min_dim(&self) -> u32 {
        self.width.min(self.height)
    }

    /// Wrap a column index into `[0, width)`.
    #[inline]
    pub fn wrap_x(&self, x: i32) -> usize {
        wrap_axis(x, self.width)
    }

    /// Wrap a row index into `[0, height)`.
    #[inline]
    pub fn wrap_y(&self, y: i32) -> usize {
        wrap_axis(y, self.height)
    }

    /// Flat index of the wrapped cell `(x, y)`.
    #[inline]
    pub fn index(&self, x: i32, y: i32) -> usize {
        self.wrap_y(y) * self.width as usize + self.wrap_x(x)
    }

    /// Flat index of the cell containing the continuous point `(x, y)`.
    ///
    /// The point is floored onto the lattice, then wrapped.
    #[inline]
    pub fn index_at(&self, x: f32, y: f32) -> usize {
        self.index(floor_i32(x), floor_i32(y))
    }

    /// Wrap a continuous position into `[0, width) x [0, height)`.
    pub fn wrap_position(&self, x: f32, y: f32) -> (f32, f32) {
        (wrap_coord(x, self.width), wrap_coord(y, self.height))
    }

    /// Shortest displacement from `a` to `b` on the torus, per axis.
    pub fn displacement(&self, a: (f32, f32), b: (f32, f32)) -> (f32, f32) {
        (
            shortest_delta(b.0 - a.0, self.width as f32),
            shortest_delta(b.1 - a.1, self.height as f32),
        )
    }

    /// Euclidean length of the shortest path from `a` to `b` on the torus.
    pub fn distance(&self, a: (f32, f32), b: (f32, f32)) -> f32 {
        let (dx, dy) = self.displacement(a, b);
        dx.hypot(dy)
    }
}

#[inline]
fn wrap_axis(v: i32, len: u32) -> usize {
    let n = len as i64;
    (v as i64).rem_euclid(n) as usize
}

#[inline]
fn floor_i32(v: f32) -> i32 {
    if v.is_finite() {
        v.floor() as i32
    } else {
        0
    }
}

fn wrap_coord(v: f32, len: u32) -> f32 {
    if !v.is_finite() {
        return 0.0;
    }
    let n = len as f32;
    let w = v.rem_euclid(n);
    // rem_euclid can round up to exactly `n` for tiny negative inputs.
    if w >= n {
        0.0
    } else {
        w
    }
}

fn shortest_delta(d: f32, len: f32) -> f32 {
    let d = d.rem_euclid(len);
    if d > len * 0.5 {
        d - len
    } else {
        d
    }
}
