//! Responsive layout
//!
//! Maps a container box onto padding, the two clue bands and the cell grid:
//!
//! ```text
//! +-----------------------------------------+
//! | padding                                 |
//! |   +--------+----------------------+     |
//! |   |        |  column clue band    |     |
//! |   +--------+----------------------+     |
//! |   | row    |                      |     |
//! |   | clue   |  rows x columns      |     |
//! |   | band   |  cells               |     |
//! |   +--------+----------------------+     |
//! +-----------------------------------------+
//! ```
//!
//! A clue slot is half a cell on its axis. One `cell_size` is chosen so both
//! axes fit; the non-binding axis is under-filled.

use crate::model::{CellPos, GridDims};
use serde::{Deserialize, Serialize};

/// Gap kept free on every side of the surface
pub const DEFAULT_PADDING: f64 = 5.0;

/// Heavy separators go on every n-th row/column boundary
pub const DEFAULT_SEPARATOR_INTERVAL: usize = 5;

/// Axis-aligned rectangle in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Straight line segment in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Pixel geometry of one puzzle inside one container box.
///
/// A pure function of the box, the padding and the grid dimensions; cheap to
/// copy and never stored beyond the next resize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub padding: f64,
    pub cell_size: f64,
    /// Width of the row clue band left of the grid
    pub row_clues_band: f64,
    /// Height of the column clue band above the grid
    pub column_clues_band: f64,
    pub dims: GridDims,
}

impl Geometry {
    /// Lay out `dims` inside a `height` x `width` box.
    ///
    /// Empty grids and boxes too small for the padding give a zero cell size.
    ///
    /// Each axis is fitted against the clue band that lies along it: height
    /// against the column clues stacked above the grid, width against the row
    /// clues to its left. Pairing height with the row clue count instead would
    /// let wide row bands overflow the box horizontally.
    pub fn compute(height: f64, width: f64, dims: GridDims, padding: f64) -> Self {
        let cell_size = if dims.rows == 0 || dims.columns == 0 {
            0.0
        } else {
            // height = 2 * padding + (max_column_clues / 2) * cell + rows * cell
            // width  = 2 * padding + (max_row_clues / 2) * cell + columns * cell
            let by_height = (height - 2.0 * padding)
                / (dims.rows as f64 + dims.max_column_clues as f64 / 2.0);
            let by_width = (width - 2.0 * padding)
                / (dims.columns as f64 + dims.max_row_clues as f64 / 2.0);
            let size = by_height.min(by_width);
            if size.is_finite() && size > 0.0 {
                size
            } else {
                0.0
            }
        };
        let glyph = cell_size / 2.0;
        Self {
            padding,
            cell_size,
            row_clues_band: glyph * dims.max_row_clues as f64,
            column_clues_band: glyph * dims.max_column_clues as f64,
            dims,
        }
    }

    /// Nothing can be drawn or hit
    pub fn is_degenerate(&self) -> bool {
        self.cell_size <= 0.0
    }

    /// Size of one clue slot
    pub fn clue_glyph_size(&self) -> f64 {
        self.cell_size / 2.0
    }

    pub fn font_size(&self) -> f64 {
        self.clue_glyph_size()
    }

    /// Top-left corner of the cell grid
    pub fn grid_origin(&self) -> (f64, f64) {
        (
            self.padding + self.row_clues_band,
            self.padding + self.column_clues_band,
        )
    }

    pub fn grid_width(&self) -> f64 {
        self.dims.columns as f64 * self.cell_size
    }

    pub fn grid_height(&self) -> f64 {
        self.dims.rows as f64 * self.cell_size
    }

    /// Total (height, width) used, padding included
    pub fn extent(&self) -> (f64, f64) {
        let (x, y) = self.grid_origin();
        (
            y + self.grid_height() + self.padding,
            x + self.grid_width() + self.padding,
        )
    }

    pub fn cell_top_left(&self, row: usize, column: usize) -> (f64, f64) {
        let (x, y) = self.grid_origin();
        (
            x + column as f64 * self.cell_size,
            y + row as f64 * self.cell_size,
        )
    }

    pub fn cell_rect(&self, pos: CellPos) -> Rect {
        let (x, y) = self.cell_top_left(pos.row, pos.column);
        Rect::new(x, y, self.cell_size, self.cell_size)
    }

    /// Center of the `n`-th of `len` clues above `column`.
    ///
    /// Clues are bottom-aligned against the grid: shorter lists leave empty
    /// slots at the top of the band.
    pub fn column_clue_position(&self, column: usize, n: usize, len: usize) -> (f64, f64) {
        let offset = self.dims.max_column_clues.saturating_sub(len);
        let (x, _) = self.cell_top_left(0, column);
        (
            x + 0.5 * self.cell_size,
            self.padding + (offset + n) as f64 * self.clue_glyph_size() + 0.5 * self.clue_glyph_size(),
        )
    }

    /// Center of the `n`-th of `len` clues left of `row`, right-aligned
    /// against the grid
    pub fn row_clue_position(&self, row: usize, n: usize, len: usize) -> (f64, f64) {
        let offset = self.dims.max_row_clues.saturating_sub(len);
        let (_, y) = self.cell_top_left(row, 0);
        (
            self.padding + (offset + n) as f64 * self.clue_glyph_size() + 0.5 * self.clue_glyph_size(),
            y + 0.5 * self.cell_size,
        )
    }

    /// Cell under a surface point, the inverse of [`Geometry::cell_top_left`]
    pub fn cell_at(&self, x: f64, y: f64) -> Option<CellPos> {
        if self.is_degenerate() {
            return None;
        }
        let (origin_x, origin_y) = self.grid_origin();
        let row = index_along(y, origin_y, self.cell_size, self.dims.rows)?;
        let column = index_along(x, origin_x, self.cell_size, self.dims.columns)?;
        Some(CellPos::new(row, column))
    }

    /// Crosshair highlight for a hovered cell: the row's stripe through the
    /// row clue band and the column's stripe through the column clue band
    pub fn hover_bands(&self, pos: CellPos) -> [Rect; 2] {
        let (x, y) = self.cell_top_left(pos.row, pos.column);
        [
            Rect::new(self.padding, y, self.row_clues_band, self.cell_size),
            Rect::new(x, self.padding, self.cell_size, self.column_clues_band),
        ]
    }

    /// Heavy separator segments on every `interval`-th boundary, starting with
    /// the outer top and left edges.
    ///
    /// Vertical separators run from the top padding through the clue band to
    /// the bottom of the grid; horizontal ones from the left padding to the
    /// right edge of the grid.
    pub fn separators(&self, interval: usize) -> Vec<Segment> {
        if self.is_degenerate() || interval == 0 {
            return Vec::new();
        }
        let (origin_x, origin_y) = self.grid_origin();
        let bottom = origin_y + self.grid_height();
        let right = origin_x + self.grid_width();

        let vertical = (0..=self.dims.columns).step_by(interval).map(|column| {
            let (x, _) = self.cell_top_left(0, column);
            Segment {
                x1: x,
                y1: self.padding,
                x2: x,
                y2: bottom,
            }
        });
        let horizontal = (0..=self.dims.rows).step_by(interval).map(|row| {
            let (_, y) = self.cell_top_left(row, 0);
            Segment {
                x1: self.padding,
                y1: y,
                x2: right,
                y2: y,
            }
        });
        vertical.chain(horizontal).collect()
    }
}

/// Index of the `size`-wide slot starting at `origin` that contains `coord`.
///
/// The floor estimate is corrected against the slot starts as
/// [`Geometry::cell_top_left`] computes them, so rounding can never put a
/// slot's own top-left corner into its neighbour.
fn index_along(coord: f64, origin: f64, size: f64, count: usize) -> Option<usize> {
    let estimate = ((coord - origin) / size).floor();
    if !estimate.is_finite() || estimate < -1.0 || estimate > count as f64 {
        return None;
    }
    let start = |i: i64| origin + i as f64 * size;
    let mut index = estimate as i64;
    if coord < start(index) {
        index -= 1;
    } else if coord >= start(index + 1) {
        index += 1;
    }
    if index >= 0 && (index as usize) < count {
        Some(index as usize)
    } else {
        None
    }
}
