use crate::app::App;
use crate::theme::{css_color, Theme};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use nonogram_core::{Color as CellColor, Rect, RenderStyle, Segment, Surface};
use std::io::{self, Write};
use std::ops::Range;

/// Layout units per terminal row. A terminal cell is roughly twice as tall as
/// it is wide, so one column is one unit and one row is two.
pub const ROW_UNITS: f64 = 2.0;

/// Rows below the grid: the palette bar and the status line
pub const FOOTER_ROWS: u16 = 2;

/// Strokes thinner than this have no character-grid rendition
const HEAVY_LINE: f64 = 2.0;

/// Width of one palette entry in the bar, e.g. `1 ██ `
const PALETTE_ENTRY_WIDTH: u16 = 6;

/// Center of a terminal cell in surface coordinates
pub fn surface_point(column: u16, row: u16) -> (f64, f64) {
    (column as f64 + 0.5, (row as f64 + 0.5) * ROW_UNITS)
}

/// Terminal columns of each palette entry, in palette order
pub fn palette_spans(entries: usize) -> Vec<Range<u16>> {
    (0..entries)
        .map(|i| {
            let start = 1 + i as u16 * PALETTE_ENTRY_WIDTH;
            start..start + PALETTE_ENTRY_WIDTH
        })
        .collect()
}

/// Indices whose centers fall inside `[start, end)`
fn centers(start: f64, end: f64, unit: f64, limit: u16) -> Range<u16> {
    let clamp = |v: f64| v.ceil().clamp(0.0, limit as f64) as u16;
    clamp(start / unit - 0.5)..clamp(end / unit - 0.5)
}

/// First index whose center lies past a boundary
fn boundary(coord: f64, unit: f64, limit: u16) -> Option<u16> {
    if limit == 0 || !coord.is_finite() {
        return None;
    }
    let index = (coord / unit - 0.5).ceil().max(0.0) as u16;
    Some(index.min(limit - 1))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

/// A character buffer the core frame is drawn into before it is flushed to
/// the terminal
pub struct TerminalSurface<'a> {
    theme: &'a Theme,
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl<'a> TerminalSurface<'a> {
    pub fn new(theme: &'a Theme, width: u16, height: u16) -> Self {
        Self {
            theme,
            width,
            height,
            glyphs: vec![Self::blank(theme); width as usize * height as usize],
        }
    }

    fn blank(theme: &Theme) -> Glyph {
        Glyph {
            ch: ' ',
            fg: theme.fg,
            bg: theme.bg,
        }
    }

    pub fn glyph(&self, column: u16, row: u16) -> Option<&Glyph> {
        if column < self.width && row < self.height {
            self.glyphs
                .get(row as usize * self.width as usize + column as usize)
        } else {
            None
        }
    }

    fn glyph_mut(&mut self, column: u16, row: u16) -> Option<&mut Glyph> {
        if column < self.width && row < self.height {
            self.glyphs
                .get_mut(row as usize * self.width as usize + column as usize)
        } else {
            None
        }
    }

    #[cfg(test)]
    fn row_text(&self, row: u16) -> String {
        (0..self.width)
            .filter_map(|column| self.glyph(column, row).map(|g| g.ch))
            .collect()
    }

    fn span(&self, rect: Rect) -> (Range<u16>, Range<u16>) {
        (
            centers(rect.x, rect.x + rect.width, 1.0, self.width),
            centers(rect.y, rect.y + rect.height, ROW_UNITS, self.height),
        )
    }

    /// Write `text` starting at `column`; returns the column after it
    pub fn put_str(&mut self, column: u16, row: u16, text: &str, fg: Color, bg: Option<Color>) -> u16 {
        let mut column = column;
        for ch in text.chars() {
            if let Some(glyph) = self.glyph_mut(column, row) {
                glyph.ch = ch;
                glyph.fg = fg;
                if let Some(bg) = bg {
                    glyph.bg = bg;
                }
            }
            column = column.saturating_add(1);
        }
        column
    }

    /// Queue the whole buffer to `out`, switching colors only when they change
    pub fn flush<W: Write>(&self, out: &mut W) -> io::Result<()> {
        queue!(out, Hide)?;
        let mut current: Option<(Color, Color)> = None;
        for row in 0..self.height {
            queue!(out, MoveTo(0, row))?;
            for column in 0..self.width {
                let Some(glyph) = self.glyph(column, row) else {
                    continue;
                };
                if current != Some((glyph.fg, glyph.bg)) {
                    queue!(
                        out,
                        SetForegroundColor(glyph.fg),
                        SetBackgroundColor(glyph.bg)
                    )?;
                    current = Some((glyph.fg, glyph.bg));
                }
                queue!(out, Print(glyph.ch))?;
            }
        }
        queue!(out, ResetColor, Show)?;
        Ok(())
    }
}

impl Surface for TerminalSurface<'_> {
    fn clear(&mut self) {
        let blank = Self::blank(self.theme);
        self.glyphs.fill(blank);
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        let bg = css_color(color).unwrap_or(self.theme.bg);
        let (columns, rows) = self.span(rect);
        for row in rows {
            for column in columns.clone() {
                if let Some(glyph) = self.glyph_mut(column, row) {
                    glyph.ch = ' ';
                    glyph.bg = bg;
                }
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f64) {
        if line_width < HEAVY_LINE {
            return;
        }
        let fg = css_color(color).unwrap_or(self.theme.fg);
        let (columns, rows) = self.span(rect);
        if columns.is_empty() || rows.is_empty() {
            return;
        }
        let (left, right) = (columns.start, columns.end - 1);
        let (top, bottom) = (rows.start, rows.end - 1);
        for row in rows {
            for column in columns.clone() {
                let ch = if top == bottom {
                    // One row tall: bracket the cell
                    match column {
                        c if c == left => '[',
                        c if c == right => ']',
                        _ => continue,
                    }
                } else {
                    match (row == top, row == bottom, column == left, column == right) {
                        (true, _, true, _) => '┏',
                        (true, _, _, true) => '┓',
                        (_, true, true, _) => '┗',
                        (_, true, _, true) => '┛',
                        (true, _, _, _) | (_, true, _, _) => '━',
                        (_, _, true, _) | (_, _, _, true) => '┃',
                        _ => continue,
                    }
                };
                if let Some(glyph) = self.glyph_mut(column, row) {
                    glyph.ch = ch;
                    glyph.fg = fg;
                }
            }
        }
    }

    fn line(&mut self, segment: Segment, color: &str, line_width: f64) {
        if line_width < HEAVY_LINE {
            return;
        }
        let fg = css_color(color).unwrap_or(self.theme.fg);
        let Segment { x1, y1, x2, y2 } = segment;
        if x1 == x2 {
            let Some(column) = boundary(x1, 1.0, self.width) else {
                return;
            };
            for row in centers(y1.min(y2), y1.max(y2), ROW_UNITS, self.height) {
                if let Some(glyph) = self.glyph_mut(column, row) {
                    glyph.ch = if glyph.ch == '━' { '╋' } else { '┃' };
                    glyph.fg = fg;
                }
            }
        } else if y1 == y2 {
            let Some(row) = boundary(y1, ROW_UNITS, self.height) else {
                return;
            };
            for column in centers(x1.min(x2), x1.max(x2), 1.0, self.width) {
                if let Some(glyph) = self.glyph_mut(column, row) {
                    glyph.ch = if glyph.ch == '┃' { '╋' } else { '━' };
                    glyph.fg = fg;
                }
            }
        }
    }

    fn text(&mut self, text: &str, x: f64, y: f64, color: &str, _font_size: f64) {
        if !x.is_finite() || !y.is_finite() || y < 0.0 {
            return;
        }
        let row = (y / ROW_UNITS).floor() as u16;
        let len = text.chars().count() as f64;
        let start = (x - len / 2.0).round();
        let fg = self.theme.clue_color(color);
        for (i, ch) in text.chars().enumerate() {
            let column = start + i as f64;
            if column < 0.0 {
                continue;
            }
            if let Some(glyph) = self.glyph_mut(column as u16, row) {
                glyph.ch = ch;
                glyph.fg = fg;
            }
        }
    }

    /// Cells are solid blocks of color; unfilled cells get a dot in the middle
    fn draw_cell(&mut self, rect: Rect, color: Option<&CellColor>, style: &RenderStyle) {
        let bg = match color {
            Some(color) => css_color(color.as_str()).unwrap_or(self.theme.fg),
            None => css_color(&style.empty_cell).unwrap_or(self.theme.empty_cell),
        };
        let (columns, rows) = self.span(rect);
        for row in rows.clone() {
            for column in columns.clone() {
                if let Some(glyph) = self.glyph_mut(column, row) {
                    glyph.ch = ' ';
                    glyph.bg = bg;
                }
            }
        }
        if color.is_none() && !columns.is_empty() && !rows.is_empty() {
            let cross = css_color(&style.cell_border).unwrap_or(self.theme.cross);
            let column = columns.start + (columns.end - columns.start) / 2;
            let row = rows.start + (rows.end - rows.start) / 2;
            if let Some(glyph) = self.glyph_mut(column, row) {
                glyph.ch = '·';
                glyph.fg = cross;
            }
        }
    }
}

/// Draw the grid, the palette bar and the status line
pub fn render<W: Write>(out: &mut W, app: &mut App) -> io::Result<()> {
    let (width, height) = app.size;
    let mut surface = TerminalSurface::new(&app.theme, width, height);
    app.session.render(&mut surface);

    let footer = height.saturating_sub(FOOTER_ROWS);
    render_palette(&mut surface, app, footer);
    let status = app.status_line();
    surface.put_str(1, footer + 1, &status, app.theme.fg, None);

    surface.flush(out)?;
    app.mark_drawn();
    Ok(())
}

fn render_palette(surface: &mut TerminalSurface<'_>, app: &App, row: u16) {
    let theme = &app.theme;
    for (i, (entry, span)) in app
        .palette
        .iter()
        .zip(palette_spans(app.palette.len()))
        .enumerate()
    {
        let marker = if i == app.selected { '▸' } else { ' ' };
        let column = surface.put_str(span.start, row, &marker.to_string(), theme.selected, None);
        let column = surface.put_str(column, row, &i.to_string(), theme.key, None);
        let swatch = match entry {
            Some(color) => css_color(color.as_str()).unwrap_or(theme.fg),
            None => theme.empty_cell,
        };
        let face = if entry.is_none() { " ·" } else { "  " };
        surface.put_str(column + 1, row, face, theme.cross, Some(swatch));
    }
}
