//! WebAssembly nonogram grid
//!
//! This crate draws a nonogram onto an HTML canvas and turns mouse input into
//! cell paints. The page owns the color picker and the resize observer: it
//! calls [`NonogramGame::resize`] whenever the container box changes and
//! [`NonogramGame::choose_color`] when a swatch is picked.

use nonogram_core::{Buttons, Color, GridConfig, PointerEvent, Session};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent};

mod render;
mod theme;

// WASM tests require wasm-pack test to run
#[cfg(all(test, target_arch = "wasm32"))]
mod tests;

pub use render::CanvasSurface;
pub use theme::Theme;

// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Button mask for a `mousedown`, from the DOM `MouseEvent.button` index
pub fn pressed_button(button: i16) -> Buttons {
    match button {
        0 => Buttons::PRIMARY,
        1 => Buttons::AUXILIARY,
        2 => Buttons::SECONDARY,
        _ => Buttons::empty(),
    }
}

/// The main WASM grid controller
#[wasm_bindgen]
pub struct NonogramGame {
    session: Session,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    theme: Theme,
    /// Container box (height, width) as last passed to `resize`
    container: (f64, f64),
    width: f64,
    height: f64,
    dpr: f64, // Device pixel ratio for crisp rendering
}

#[wasm_bindgen]
impl NonogramGame {
    /// Create a grid for `puzzle_xml` attached to a canvas element
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, puzzle_xml: &str) -> Result<NonogramGame, JsValue> {
        let session = Session::from_xml(puzzle_xml, GridConfig::default())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let document = web_sys::window()
            .ok_or("No window")?
            .document()
            .ok_or("No document")?;

        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("Canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        let ctx = canvas
            .get_context("2d")?
            .ok_or("Failed to get 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let theme = Theme::named(&session.config().theme);
        let mut game = NonogramGame {
            session,
            canvas,
            ctx,
            theme,
            container: (0.0, 0.0),
            width: 0.0,
            height: 0.0,
            dpr: 1.0,
        };
        game.session.set_style(game.theme.style());

        // Start from whatever size the page gave the canvas
        let height = game.canvas.client_height() as f64;
        let width = game.canvas.client_width() as f64;
        game.resize(height, width);
        Ok(game)
    }

    /// The container box changed (height, width in CSS pixels)
    #[wasm_bindgen]
    pub fn resize(&mut self, height: f64, width: f64) {
        self.container = (height, width);
        let (height, width) = self.session.config().layout_box(height.max(0.0), width.max(0.0));
        self.height = height;
        self.width = width;

        // Update dpr in case it changed (e.g., moving to different monitor)
        self.dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);

        // Set actual canvas resolution (scaled by dpr for crisp rendering)
        self.canvas.set_width((width * self.dpr) as u32);
        self.canvas.set_height((height * self.dpr) as u32);

        // Set CSS display size (logical pixels)
        let html_element: &HtmlElement = self.canvas.as_ref();
        let style = html_element.style();
        let _ = style.set_property("width", &format!("{}px", width));
        let _ = style.set_property("height", &format!("{}px", height));

        // Reset and scale context to account for dpr
        let _ = self.ctx.reset_transform();
        let _ = self.ctx.scale(self.dpr, self.dpr);

        self.session.resize(height, width);
        // Resizing the canvas wipes it, so draw right away
        self.render();
    }

    /// Replace the layout settings from a JSON document; missing fields take
    /// their defaults. The theme follows `config.theme`.
    #[wasm_bindgen]
    pub fn set_config_json(&mut self, json: &str) -> Result<(), JsValue> {
        let config = GridConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.theme = Theme::named(&config.theme);
        self.session.set_config(config);
        self.session.set_style(self.theme.style());
        let (height, width) = self.container;
        self.resize(height, width);
        Ok(())
    }

    /// Current theme colors as JSON, for styling the page around the canvas
    #[wasm_bindgen]
    pub fn get_theme_json(&self) -> String {
        serde_json::to_string(&self.theme).unwrap_or_default()
    }

    /// Handle `mousedown`; returns true if a cell changed
    #[wasm_bindgen]
    pub fn handle_mouse_down(&mut self, event: &MouseEvent) -> bool {
        let (x, y) = self.local_position(event);
        let pointer = PointerEvent::new(x, y, pressed_button(event.button()));
        let outcome = self.session.pointer_down(pointer);
        self.tick();
        outcome.painted
    }

    /// Handle `mousemove`; dragging with the primary button paints.
    /// Returns true if a cell changed.
    #[wasm_bindgen]
    pub fn handle_mouse_move(&mut self, event: &MouseEvent) -> bool {
        let (x, y) = self.local_position(event);
        let outcome = self
            .session
            .pointer_move(PointerEvent::from_mask(x, y, event.buttons()));
        self.tick();
        outcome.painted
    }

    /// Handle `mouseleave`
    #[wasm_bindgen]
    pub fn handle_mouse_leave(&mut self) {
        self.session.pointer_leave();
        self.tick();
    }

    /// Colors for the picker as a JS array; `null` is the eraser
    #[wasm_bindgen]
    pub fn palette(&self) -> Result<JsValue, JsValue> {
        let palette: Vec<Option<String>> = self
            .session
            .palette()
            .into_iter()
            .map(|color| color.map(|c| c.to_string()))
            .collect();
        serde_wasm_bindgen::to_value(&palette).map_err(JsValue::from)
    }

    /// Pick the color future clicks paint with; `undefined`/`null` erases
    #[wasm_bindgen]
    pub fn choose_color(&mut self, color: Option<String>) {
        self.session.choose_color(color.map(Color::new));
    }

    #[wasm_bindgen]
    pub fn chosen_color(&self) -> Option<String> {
        self.session.chosen_color().map(|c| c.to_string())
    }

    /// Set the color theme
    #[wasm_bindgen]
    pub fn set_theme(&mut self, theme_name: &str) {
        self.theme = Theme::named(theme_name);
        self.session.set_style(self.theme.style());
        self.tick();
    }

    /// Current grid colors as JSON, row-major, `null` for unfilled
    #[wasm_bindgen]
    pub fn get_grid_json(&self) -> String {
        let puzzle = self.session.puzzle();
        let grid: Vec<Vec<Option<&str>>> = (0..puzzle.rows())
            .map(|row| {
                (0..puzzle.columns())
                    .map(|column| puzzle.color_at(row, column).map(|c| c.as_str()))
                    .collect()
            })
            .collect();
        serde_json::to_string(&grid).unwrap_or_default()
    }

    /// Redraw if anything changed (call from requestAnimationFrame)
    #[wasm_bindgen]
    pub fn tick(&mut self) {
        if self.session.needs_redraw() {
            self.render();
        }
    }

    /// Get current width
    #[wasm_bindgen]
    pub fn get_width(&self) -> f64 {
        self.width
    }

    /// Get current height
    #[wasm_bindgen]
    pub fn get_height(&self) -> f64 {
        self.height
    }

    /// Position of a mouse event relative to the canvas
    fn local_position(&self, event: &MouseEvent) -> (f64, f64) {
        let bounds = self.canvas.get_bounding_client_rect();
        (
            event.client_x() as f64 - bounds.left(),
            event.client_y() as f64 - bounds.top(),
        )
    }

    /// Render the grid to canvas
    fn render(&mut self) {
        let mut surface = CanvasSurface::new(
            &self.ctx,
            self.width,
            self.height,
            self.theme.background.as_css(),
        );
        self.session.render(&mut surface);
    }
}
