//! Puzzle model: clue structure and per-cell color state

use serde::{Deserialize, Serialize};
use std::fmt;

/// Color used for clues that carry no `color` attribute
pub const DEFAULT_CLUE_COLOR: &str = "black";

/// Opaque color token as written in the puzzle description
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(DEFAULT_CLUE_COLOR)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Color {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

/// One run-length constraint on a row or column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    /// Number of consecutive cells
    pub count: u32,
    /// Color of the run
    pub color: Color,
}

impl Clue {
    pub fn new(count: u32, color: impl Into<Color>) -> Self {
        Self {
            count,
            color: color.into(),
        }
    }
}

/// A grid cell; `None` means unfilled
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub color: Option<Color>,
}

impl Cell {
    pub fn is_filled(&self) -> bool {
        self.color.is_some()
    }
}

/// Row/column address of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    pub row: usize,
    pub column: usize,
}

impl CellPos {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// The counts the layout engine needs from a puzzle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDims {
    pub rows: usize,
    pub columns: usize,
    /// Longest clue list over all rows
    pub max_row_clues: usize,
    /// Longest clue list over all columns
    pub max_column_clues: usize,
}

/// A nonogram: fixed clues plus the player's coloring
///
/// Clues never change after construction. The only way to change the grid is
/// [`Puzzle::set_color`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    row_clues: Vec<Vec<Clue>>,
    column_clues: Vec<Vec<Clue>>,
    state: Vec<Vec<Cell>>,
}

impl Puzzle {
    /// Create a puzzle with an all-unfilled grid sized from the clue lists
    pub fn new(row_clues: Vec<Vec<Clue>>, column_clues: Vec<Vec<Clue>>) -> Self {
        let state = vec![vec![Cell::default(); column_clues.len()]; row_clues.len()];
        Self {
            row_clues,
            column_clues,
            state,
        }
    }

    pub fn rows(&self) -> usize {
        self.row_clues.len()
    }

    pub fn columns(&self) -> usize {
        self.column_clues.len()
    }

    pub fn row_clues(&self) -> &[Vec<Clue>] {
        &self.row_clues
    }

    pub fn column_clues(&self) -> &[Vec<Clue>] {
        &self.column_clues
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.state.get(row).and_then(|cells| cells.get(column))
    }

    /// Color of a cell, `None` when unfilled or out of range
    pub fn color_at(&self, row: usize, column: usize) -> Option<&Color> {
        self.cell(row, column).and_then(|cell| cell.color.as_ref())
    }

    pub fn dims(&self) -> GridDims {
        GridDims {
            rows: self.rows(),
            columns: self.columns(),
            max_row_clues: self.row_clues.iter().map(Vec::len).max().unwrap_or(0),
            max_column_clues: self.column_clues.iter().map(Vec::len).max().unwrap_or(0),
        }
    }

    /// Set a cell's color.
    ///
    /// Out-of-range addresses and writes of the color already present are
    /// no-ops. Returns whether the grid changed.
    pub fn set_color(&mut self, row: usize, column: usize, color: Option<Color>) -> bool {
        if row >= self.rows() || column >= self.columns() {
            return false;
        }
        let cell = &mut self.state[row][column];
        if cell.color == color {
            return false;
        }
        cell.color = color;
        true
    }

    /// Number of cells holding a color
    pub fn filled_count(&self) -> usize {
        self.state.iter().flatten().filter(|cell| cell.is_filled()).count()
    }

    /// Colors for a color picker: the eraser (`None`) first, then each
    /// distinct clue color in first-seen order, columns before rows
    pub fn palette(&self) -> Vec<Option<Color>> {
        let mut palette: Vec<Option<Color>> = vec![None];
        for clue in self.column_clues.iter().chain(&self.row_clues).flatten() {
            if !palette.iter().flatten().any(|seen| *seen == clue.color) {
                palette.push(Some(clue.color.clone()));
            }
        }
        palette
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> Puzzle {
        Puzzle::new(
            vec![
                vec![Clue::new(2, "red")],
                vec![Clue::new(1, "black"), Clue::new(1, "blue")],
            ],
            vec![vec![Clue::new(1, "black")], vec![Clue::new(1, "red")]],
        )
    }

    #[test]
    fn test_new_puzzle_is_unfilled() {
        let puzzle = two_by_two();
        assert_eq!(puzzle.rows(), 2);
        assert_eq!(puzzle.columns(), 2);
        assert_eq!(puzzle.filled_count(), 0);
        assert!(puzzle.cell(1, 1).is_some());
        assert!(puzzle.cell(2, 0).is_none());
    }

    #[test]
    fn test_dims() {
        let dims = two_by_two().dims();
        assert_eq!(
            dims,
            GridDims {
                rows: 2,
                columns: 2,
                max_row_clues: 2,
                max_column_clues: 1,
            }
        );
        assert_eq!(Puzzle::new(vec![], vec![]).dims(), GridDims::default());
    }

    #[test]
    fn test_set_color_is_idempotent() {
        let mut puzzle = two_by_two();
        assert!(puzzle.set_color(0, 1, Some(Color::new("red"))));
        let once = puzzle.clone();
        assert!(!puzzle.set_color(0, 1, Some(Color::new("red"))));
        assert_eq!(puzzle, once);
        assert_eq!(puzzle.color_at(0, 1), Some(&Color::new("red")));
    }

    #[test]
    fn test_set_color_out_of_range() {
        let mut puzzle = two_by_two();
        let before = puzzle.clone();
        assert!(!puzzle.set_color(2, 0, Some(Color::new("red"))));
        assert!(!puzzle.set_color(0, 2, Some(Color::new("red"))));
        assert!(!puzzle.set_color(usize::MAX, usize::MAX, None));
        assert_eq!(puzzle, before);
    }

    #[test]
    fn test_erase() {
        let mut puzzle = two_by_two();
        puzzle.set_color(1, 0, Some(Color::new("blue")));
        assert_eq!(puzzle.filled_count(), 1);
        assert!(puzzle.set_color(1, 0, None));
        assert_eq!(puzzle.filled_count(), 0);
    }

    #[test]
    fn test_palette_order() {
        let palette = two_by_two().palette();
        assert_eq!(
            palette,
            vec![
                None,
                Some(Color::new("black")),
                Some(Color::new("red")),
                Some(Color::new("blue")),
            ]
        );
    }
}
