//! The owning composition of one puzzle on one surface
//!
//! A [`Session`] owns the puzzle and is the only place that calls
//! [`Puzzle::set_color`]. Everything else sees `&Puzzle`.
//!
//! Changes are tracked with [`Invalidation`] flags instead of redrawing on
//! the spot: resizes and puzzle/config swaps set `GEOMETRY | REDRAW`, color
//! and hover changes set only `REDRAW`. Geometry is recomputed lazily the
//! next time it is needed.

use crate::config::GridConfig;
use crate::interaction::{CellSelect, InteractionController, PointerEvent, PointerOutcome};
use crate::layout::Geometry;
use crate::model::{CellPos, Color, Puzzle};
use crate::parser::{parse_puzzle, ParseResult};
use crate::render::{render_frame, RenderStyle, Surface};
use bitflags::bitflags;
use tracing::debug;

bitflags! {
    /// Pending work before the next frame
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct Invalidation: u8 {
        /// Container box, padding or grid dimensions changed
        const GEOMETRY = 0b01;
        /// Something visible changed
        const REDRAW   = 0b10;
    }
}

pub struct Session {
    puzzle: Puzzle,
    config: GridConfig,
    style: RenderStyle,
    /// Container (height, width) as last reported by the host
    container: (f64, f64),
    geometry: Geometry,
    controller: InteractionController,
    chosen: Option<Color>,
    dirty: Invalidation,
}

impl Session {
    pub fn new(puzzle: Puzzle, config: GridConfig) -> Self {
        let style = RenderStyle {
            separator_interval: config.separator_interval,
            ..RenderStyle::default()
        };
        let geometry = Geometry::compute(0.0, 0.0, puzzle.dims(), config.padding);
        Self {
            puzzle,
            config,
            style,
            container: (0.0, 0.0),
            geometry,
            controller: InteractionController::new(),
            chosen: None,
            dirty: Invalidation::all(),
        }
    }

    /// Parse an XML description and start a session on it
    pub fn from_xml(xml: &str, config: GridConfig) -> ParseResult<Self> {
        Ok(Self::new(parse_puzzle(xml)?, config))
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Swap in a different puzzle; the grid starts unfilled
    pub fn replace_puzzle(&mut self, puzzle: Puzzle) {
        self.puzzle = puzzle;
        self.controller.reset();
        self.dirty |= Invalidation::all();
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GridConfig) {
        self.style.separator_interval = config.separator_interval;
        self.config = config;
        self.dirty |= Invalidation::all();
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Replace the colors and stroke widths; the separator interval stays
    /// owned by the config
    pub fn set_style(&mut self, style: RenderStyle) {
        self.style = RenderStyle {
            separator_interval: self.config.separator_interval,
            ..style
        };
        self.dirty |= Invalidation::REDRAW;
    }

    /// The host's drawable box changed
    pub fn resize(&mut self, height: f64, width: f64) {
        if self.container != (height, width) {
            self.container = (height, width);
            self.dirty |= Invalidation::all();
        }
    }

    pub fn container(&self) -> (f64, f64) {
        self.container
    }

    /// Current geometry, recomputed first if the layout inputs changed
    pub fn geometry(&mut self) -> Geometry {
        if self.dirty.contains(Invalidation::GEOMETRY) {
            let (height, width) = self.config.layout_box(self.container.0, self.container.1);
            self.geometry = Geometry::compute(height, width, self.puzzle.dims(), self.config.padding);
            self.dirty.remove(Invalidation::GEOMETRY);
            debug!(
                height,
                width,
                cell_size = self.geometry.cell_size,
                "geometry recomputed"
            );
        }
        self.geometry
    }

    pub fn hover_cell(&self) -> Option<CellPos> {
        self.controller.hover_cell()
    }

    /// Color applied by future selections; `None` erases
    pub fn choose_color(&mut self, color: Option<Color>) {
        if self.chosen != color {
            self.chosen = color;
            self.dirty |= Invalidation::REDRAW;
        }
    }

    pub fn chosen_color(&self) -> Option<&Color> {
        self.chosen.as_ref()
    }

    /// Colors to offer in a picker, eraser first
    pub fn palette(&self) -> Vec<Option<Color>> {
        self.puzzle.palette()
    }

    pub fn pointer_down(&mut self, event: PointerEvent) -> PointerOutcome {
        let geometry = self.geometry();
        let outcome = self.controller.pointer_down(&geometry, event);
        self.absorb(outcome)
    }

    pub fn pointer_move(&mut self, event: PointerEvent) -> PointerOutcome {
        let geometry = self.geometry();
        let outcome = self.controller.pointer_move(&geometry, event);
        self.absorb(outcome)
    }

    pub fn pointer_leave(&mut self) -> PointerOutcome {
        let outcome = self.controller.pointer_leave();
        self.absorb(outcome)
    }

    /// Apply the chosen color to a selected cell. Returns whether the grid
    /// changed.
    pub fn apply_select(&mut self, select: CellSelect) -> bool {
        let changed = self
            .puzzle
            .set_color(select.row, select.column, self.chosen.clone());
        if changed {
            self.dirty |= Invalidation::REDRAW;
        }
        changed
    }

    fn absorb(&mut self, mut outcome: PointerOutcome) -> PointerOutcome {
        if let Some(select) = outcome.select {
            outcome.painted = self.apply_select(select);
        }
        if outcome.hover_changed {
            self.dirty |= Invalidation::REDRAW;
        }
        outcome
    }

    pub fn invalidation(&self) -> Invalidation {
        self.dirty
    }

    pub fn needs_redraw(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Draw the current frame and clear the pending flags
    pub fn render<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let geometry = self.geometry();
        render_frame(
            surface,
            &self.puzzle,
            &geometry,
            self.controller.hover_cell(),
            &self.style,
        );
        self.dirty = Invalidation::empty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::Buttons;
    use crate::render::{DrawCommand, RecordingSurface};

    const EXAMPLE: &str = r#"<puzzle>
  <clues type="rows">
    <line><count color="red">2</count></line>
    <line><count>1</count><count color="blue">1</count></line>
  </clues>
  <clues type="columns">
    <line><count>1</count></line>
    <line><count color="red">1</count></line>
  </clues>
</puzzle>"#;

    fn session() -> Session {
        let mut session = Session::from_xml(EXAMPLE, GridConfig::default()).unwrap();
        session.resize(100.0, 100.0);
        session.render(&mut RecordingSurface::new());
        session
    }

    #[test]
    fn test_new_session_needs_everything() {
        let session = Session::from_xml(EXAMPLE, GridConfig::default()).unwrap();
        assert_eq!(session.invalidation(), Invalidation::all());
    }

    #[test]
    fn test_resize_invalidates_geometry() {
        let mut session = session();
        assert!(!session.needs_redraw());
        session.resize(100.0, 100.0);
        assert!(!session.needs_redraw());
        session.resize(200.0, 100.0);
        assert_eq!(session.invalidation(), Invalidation::all());
        assert_eq!(session.geometry().cell_size, 30.0);
        assert_eq!(session.invalidation(), Invalidation::REDRAW);
    }

    #[test]
    fn test_click_paints_with_chosen_color() {
        let mut session = session();
        session.choose_color(Some(Color::new("red")));
        session.render(&mut RecordingSurface::new());

        let outcome = session.pointer_down(PointerEvent::new(50.0, 50.0, Buttons::PRIMARY));
        assert_eq!(outcome.select, Some(CellSelect { row: 1, column: 0 }));
        assert!(outcome.painted);
        assert_eq!(session.puzzle().color_at(1, 0), Some(&Color::new("red")));
        assert_eq!(session.invalidation(), Invalidation::REDRAW);

        // Repainting the same color is not a change
        session.render(&mut RecordingSurface::new());
        let outcome = session.pointer_down(PointerEvent::new(50.0, 50.0, Buttons::PRIMARY));
        assert!(!outcome.painted);
        assert!(!session.needs_redraw());
    }

    #[test]
    fn test_eraser() {
        let mut session = session();
        session.choose_color(Some(Color::new("blue")));
        session.pointer_down(PointerEvent::new(80.0, 30.0, Buttons::PRIMARY));
        assert_eq!(session.puzzle().filled_count(), 1);
        session.choose_color(None);
        session.pointer_down(PointerEvent::new(80.0, 30.0, Buttons::PRIMARY));
        assert_eq!(session.puzzle().filled_count(), 0);
    }

    #[test]
    fn test_drag_paints_path() {
        let mut session = session();
        session.choose_color(Some(Color::new("black")));
        for x in [40.0, 50.0, 70.0, 90.0] {
            session.pointer_move(PointerEvent::from_mask(x, 25.0, 1));
        }
        assert_eq!(session.puzzle().filled_count(), 2);
        assert_eq!(session.hover_cell(), Some(CellPos::new(0, 1)));

        session.pointer_leave();
        assert_eq!(session.hover_cell(), None);
    }

    #[test]
    fn test_hover_is_rendered() {
        let mut session = session();
        session.pointer_move(PointerEvent::new(50.0, 50.0, Buttons::empty()));
        let mut surface = RecordingSurface::new();
        session.render(&mut surface);
        assert!(matches!(
            surface.commands().last(),
            Some(DrawCommand::StrokeRect { .. })
        ));
        assert!(!session.needs_redraw());
    }

    #[test]
    fn test_square_surface_config() {
        let mut session = session();
        session.set_config(GridConfig {
            square_surface: true,
            ..GridConfig::default()
        });
        session.resize(100.0, 400.0);
        let g = session.geometry();
        assert_eq!(g.cell_size, 30.0);
        assert_eq!(g.extent().1, 100.0);
    }

    #[test]
    fn test_replace_puzzle_resets_hover() {
        let mut session = session();
        session.pointer_move(PointerEvent::new(50.0, 50.0, Buttons::empty()));
        session.replace_puzzle(Puzzle::new(vec![], vec![]));
        assert_eq!(session.hover_cell(), None);
        assert!(session.geometry().is_degenerate());
    }

    #[test]
    fn test_set_style_keeps_separator_interval() {
        let mut session = session();
        session.set_style(RenderStyle {
            separator_interval: 0,
            hover_outline: "orange".to_string(),
            ..RenderStyle::default()
        });
        assert_eq!(session.style().separator_interval, 5);
        assert_eq!(session.style().hover_outline, "orange");
    }
}
