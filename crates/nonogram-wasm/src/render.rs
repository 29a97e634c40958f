//! Canvas surface for the core frame renderer

use nonogram_core::{Rect, Segment, Surface};
use web_sys::CanvasRenderingContext2d;

/// Draws core frames onto a 2D canvas context.
///
/// Coordinates are logical pixels; the context is expected to be scaled by
/// the device pixel ratio already.
pub struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
    width: f64,
    height: f64,
    background: String,
}

impl<'a> CanvasSurface<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d, width: f64, height: f64, background: String) -> Self {
        Self {
            ctx,
            width,
            height,
            background,
        }
    }
}

impl Surface for CanvasSurface<'_> {
    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
        self.ctx.set_fill_style_str(&self.background);
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f64) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width);
        self.ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn line(&mut self, segment: Segment, color: &str, line_width: f64) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width);
        self.ctx.begin_path();
        self.ctx.move_to(segment.x1, segment.y1);
        self.ctx.line_to(segment.x2, segment.y2);
        self.ctx.stroke();
    }

    fn text(&mut self, text: &str, x: f64, y: f64, color: &str, font_size: f64) {
        self.ctx.set_font(&format!("{}px sans-serif", font_size));
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.set_fill_style_str(color);
        let _ = self.ctx.fill_text(text, x, y);
    }
}
