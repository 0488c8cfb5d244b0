//! The rendered glyph grid.

use std::fmt::Write as _;

use crate::color::Rgb;

/// Resets all SGR attributes.
pub const RESET: &str = "\x1b[0m";

/// One output cell: a glyph and an optional foreground colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Glyph from the density ramp.
    pub glyph: char,
    /// Foreground colour, or `None` to print the glyph uncoloured.
    pub color: Option<Rgb>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            glyph: ' ',
            color: None,
        }
    }
}

/// A `height x width` grid of cells, row-major.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Frame {
    /// A frame with no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A frame of blank cells.
    pub fn blank(width: usize, height: usize) -> Self {
        if width == 0 || height == 0 {
            return Self::empty();
        }
        Self {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        }
    }

    /// Build a frame from row-major cells. Returns `None` if the cell count
    /// does not match the dimensions.
    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Option<Self> {
        if width.checked_mul(height)? != cells.len() {
            return None;
        }
        if cells.is_empty() {
            return Some(Self::empty());
        }
        Some(Self {
            width,
            height,
            cells,
        })
    }

    /// Cells per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the frame has no rows.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cell at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x)
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1))
    }

    /// The glyphs alone, one string per row.
    pub fn to_plain_rows(&self) -> Vec<String> {
        self.rows().map(|row| row.iter().map(|c| c.glyph).collect()).collect()
    }

    /// One pre-composited string per row: each coloured glyph is preceded
    /// by its truecolour escape and every row ends with [`RESET`].
    pub fn to_ansi_rows(&self) -> Vec<String> {
        self.rows()
            .map(|row| {
                let mut line = String::with_capacity(row.len() * 20 + RESET.len());
                for cell in row {
                    if let Some(color) = cell.color {
                        let _ = write!(line, "{color}");
                    }
                    line.push(cell.glyph);
                }
                line.push_str(RESET);
                line
            })
            .collect()
    }
}
