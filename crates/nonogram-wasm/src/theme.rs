//! Color themes for the canvas grid

use nonogram_core::RenderStyle;
use serde::Serialize;

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn as_css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Color theme for the grid.
///
/// Clue and cell colors come from the puzzle itself, so every theme keeps a
/// light background they stay readable on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theme {
    /// Canvas background
    pub background: Color,
    /// Unfilled cell background
    pub empty_cell: Color,
    /// Thin cell borders and the empty-cell cross
    pub cell_border: Color,
    /// Heavy separators every few rows/columns
    pub separator: Color,
    /// Crosshair behind the hovered row/column clues
    pub hover_band: Color,
    /// Outline around the hovered cell
    pub hover_outline: Color,
    /// Stroke widths: cell border, separator, hover outline
    pub line_widths: (f64, f64, f64),
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    /// Light theme (default)
    pub fn light() -> Self {
        Self {
            background: Color::new(255, 255, 255),
            empty_cell: Color::new(255, 255, 255),
            cell_border: Color::new(0, 0, 0),
            separator: Color::new(0, 0, 0),
            hover_band: Color::new(211, 211, 211),
            hover_outline: Color::new(0, 0, 255),
            line_widths: (1.0, 3.0, 4.0),
        }
    }

    /// Warm paper theme
    pub fn paper() -> Self {
        Self {
            background: Color::new(246, 240, 225),
            empty_cell: Color::new(252, 248, 238),
            cell_border: Color::new(110, 100, 85),
            separator: Color::new(60, 50, 40),
            hover_band: Color::new(225, 210, 175),
            hover_outline: Color::new(200, 90, 30),
            line_widths: (1.0, 3.0, 4.0),
        }
    }

    /// High contrast theme
    pub fn high_contrast() -> Self {
        Self {
            background: Color::new(255, 255, 255),
            empty_cell: Color::new(255, 255, 255),
            cell_border: Color::new(0, 0, 0),
            separator: Color::new(0, 0, 0),
            hover_band: Color::new(255, 230, 0),
            hover_outline: Color::new(255, 0, 128),
            line_widths: (1.5, 4.0, 5.0),
        }
    }

    /// Look up a theme by name, falling back to the default
    pub fn named(name: &str) -> Self {
        match name {
            "paper" => Self::paper(),
            "high_contrast" => Self::high_contrast(),
            _ => Self::light(),
        }
    }

    /// Render style for the core frame
    pub fn style(&self) -> RenderStyle {
        let (cell_line_width, separator_width, hover_outline_width) = self.line_widths;
        RenderStyle {
            empty_cell: self.empty_cell.as_css(),
            cell_border: self.cell_border.as_css(),
            hover_band: self.hover_band.as_css(),
            hover_outline: self.hover_outline.as_css(),
            separator: self.separator.as_css(),
            cell_line_width,
            separator_width,
            hover_outline_width,
            ..RenderStyle::default()
        }
    }
}
