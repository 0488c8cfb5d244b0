//! Disk footprints for stamping energy into the grid.
//!
//! A footprint is a list of offsets relative to a centre cell together with
//! their distance under the chosen [`Metric`]. Callers translate and wrap
//! the offsets through [`Torus2D::index`](crate::Torus2D::index).

/// Distance metric used to bound a disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    /// `sqrt(dx^2 + dy^2) <= radius`.
    Euclidean,
    /// `|dx| + |dy| <= radius`.
    Manhattan,
}

impl Metric {
    /// Distance of the offset `(dx, dy)` from the origin.
    pub fn distance(self, dx: i32, dy: i32) -> f32 {
        match self {
            Self::Euclidean => ((dx * dx + dy * dy) as f32).sqrt(),
            Self::Manhattan => (dx.abs() + dy.abs()) as f32,
        }
    }

    fn contains(self, dx: i32, dy: i32, radius: i32) -> bool {
        match self {
            Self::Euclidean => dx * dx + dy * dy <= radius * radius,
            Self::Manhattan => dx.abs() + dy.abs() <= radius,
        }
    }
}

/// One cell of a disk footprint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiskCell {
    /// Horizontal offset from the centre.
    pub dx: i32,
    /// Vertical offset from the centre.
    pub dy: i32,
    /// Distance from the centre under the footprint's metric.
    pub distance: f32,
}

impl DiskCell {
    /// Linear falloff `1 - distance / (radius + 1)`, in `(0, 1]` for cells
    /// inside the disk.
    pub fn falloff(&self, radius: u32) -> f32 {
        1.0 - self.distance / (radius as f32 + 1.0)
    }
}

/// All offsets within `radius` of the origin, row-major from `(-r, -r)`.
pub fn disk(radius: u32, metric: Metric) -> Vec<DiskCell> {
    let r = radius as i32;
    let mut cells = Vec::with_capacity(((2 * r + 1) * (2 * r + 1)) as usize);
    for dy in -r..=r {
        for dx in -r..=r {
            if metric.contains(dx, dy, r) {
                cells.push(DiskCell {
                    dx,
                    dy,
                    distance: metric.distance(dx, dy),
                });
            }
        }
    }
    cells
}
