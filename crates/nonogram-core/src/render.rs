//! Frame rendering against an abstract 2D surface
//!
//! [`render_frame`] issues the draw calls for one frame in a fixed order so
//! later layers sit on top of earlier ones:
//!
//! 1. clear
//! 2. hover crosshair in the clue bands
//! 3. column clues
//! 4. per row: row clues, then the row's cells
//! 5. heavy separators
//! 6. hover cell outline

use crate::layout::{Geometry, Rect, Segment, DEFAULT_SEPARATOR_INTERVAL};
use crate::model::{CellPos, Color, Puzzle};
use serde::{Deserialize, Serialize};

/// Colors and stroke widths used for a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    /// Fill of unfilled cells
    pub empty_cell: String,
    /// Thin cell outline and the empty-cell cross
    pub cell_border: String,
    pub hover_band: String,
    pub hover_outline: String,
    pub separator: String,
    pub cell_line_width: f64,
    pub separator_width: f64,
    pub hover_outline_width: f64,
    /// Draw a heavy separator every n rows/columns; 0 disables them
    pub separator_interval: usize,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            empty_cell: "white".to_string(),
            cell_border: "black".to_string(),
            hover_band: "lightgrey".to_string(),
            hover_outline: "blue".to_string(),
            separator: "black".to_string(),
            cell_line_width: 1.0,
            separator_width: 3.0,
            hover_outline_width: 4.0,
            separator_interval: DEFAULT_SEPARATOR_INTERVAL,
        }
    }
}

/// Something a frame can be drawn on.
///
/// Colors are CSS-style tokens; the clue colors from the puzzle are passed
/// through unchanged. Text is centered on `(x, y)`.
pub trait Surface {
    /// Wipe the whole surface
    fn clear(&mut self);

    fn fill_rect(&mut self, rect: Rect, color: &str);

    fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f64);

    fn line(&mut self, segment: Segment, color: &str, line_width: f64);

    fn text(&mut self, text: &str, x: f64, y: f64, color: &str, font_size: f64);

    /// Draw one grid cell: a filled, outlined square, with a diagonal cross
    /// when the cell is unfilled
    fn draw_cell(&mut self, rect: Rect, color: Option<&Color>, style: &RenderStyle) {
        let fill = color.map_or(style.empty_cell.as_str(), Color::as_str);
        self.fill_rect(rect, fill);
        self.stroke_rect(rect, &style.cell_border, style.cell_line_width);
        if color.is_none() {
            let Rect {
                x,
                y,
                width: size,
                ..
            } = rect;
            let (near, far) = (0.25 * size, 0.75 * size);
            self.line(
                Segment {
                    x1: x + near,
                    y1: y + near,
                    x2: x + far,
                    y2: y + far,
                },
                &style.cell_border,
                style.cell_line_width,
            );
            self.line(
                Segment {
                    x1: x + near,
                    y1: y + far,
                    x2: x + far,
                    y2: y + near,
                },
                &style.cell_border,
                style.cell_line_width,
            );
        }
    }
}

/// Draw one frame of `puzzle`.
///
/// With degenerate geometry only the clear is issued.
pub fn render_frame<S: Surface + ?Sized>(
    surface: &mut S,
    puzzle: &Puzzle,
    geometry: &Geometry,
    hover: Option<CellPos>,
    style: &RenderStyle,
) {
    surface.clear();
    if geometry.is_degenerate() {
        return;
    }

    if let Some(pos) = hover {
        for band in geometry.hover_bands(pos) {
            surface.fill_rect(band, &style.hover_band);
        }
    }

    let font_size = geometry.font_size();
    for (column, clues) in puzzle.column_clues().iter().enumerate() {
        for (n, clue) in clues.iter().enumerate() {
            let (x, y) = geometry.column_clue_position(column, n, clues.len());
            surface.text(&clue.count.to_string(), x, y, clue.color.as_str(), font_size);
        }
    }

    for (row, clues) in puzzle.row_clues().iter().enumerate() {
        for (n, clue) in clues.iter().enumerate() {
            let (x, y) = geometry.row_clue_position(row, n, clues.len());
            surface.text(&clue.count.to_string(), x, y, clue.color.as_str(), font_size);
        }
        for column in 0..puzzle.columns() {
            let rect = geometry.cell_rect(CellPos::new(row, column));
            surface.draw_cell(rect, puzzle.color_at(row, column), style);
        }
    }

    for segment in geometry.separators(style.separator_interval) {
        surface.line(segment, &style.separator, style.separator_width);
    }

    if let Some(pos) = hover {
        surface.stroke_rect(
            geometry.cell_rect(pos),
            &style.hover_outline,
            style.hover_outline_width,
        );
    }
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear,
    FillRect {
        rect: Rect,
        color: String,
    },
    StrokeRect {
        rect: Rect,
        color: String,
        line_width: f64,
    },
    Line {
        segment: Segment,
        color: String,
        line_width: f64,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        color: String,
        font_size: f64,
    },
    Cell {
        rect: Rect,
        color: Option<Color>,
    },
}

/// Surface that records draw calls instead of drawing.
///
/// Cells are kept as single [`DrawCommand::Cell`] entries so hosts replaying a
/// frame can use their own cell primitive.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.commands)
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            color: color.to_string(),
        });
    }

    fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f64) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            color: color.to_string(),
            line_width,
        });
    }

    fn line(&mut self, segment: Segment, color: &str, line_width: f64) {
        self.commands.push(DrawCommand::Line {
            segment,
            color: color.to_string(),
            line_width,
        });
    }

    fn text(&mut self, text: &str, x: f64, y: f64, color: &str, font_size: f64) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            color: color.to_string(),
            font_size,
        });
    }

    fn draw_cell(&mut self, rect: Rect, color: Option<&Color>, _style: &RenderStyle) {
        self.commands.push(DrawCommand::Cell {
            rect,
            color: color.cloned(),
        });
    }
}
