//! Pointer interaction: hover tracking and cell selection
//!
//! The controller only remembers which cell is under the pointer. Every click
//! and every drag step over a cell is an independent [`CellSelect`]; what to
//! paint is decided by whoever owns the puzzle.

use crate::layout::Geometry;
use crate::model::CellPos;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use tracing::trace;

bitflags! {
    /// Pointer buttons held during an event, laid out like the DOM
    /// `MouseEvent.buttons` mask.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Buttons: u16 {
        const PRIMARY   = 0b001;
        const SECONDARY = 0b010;
        const AUXILIARY = 0b100;
    }
}

/// Pointer position relative to the surface's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    pub buttons: Buttons,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64, buttons: Buttons) -> Self {
        Self { x, y, buttons }
    }

    /// Build from a raw button mask; unknown bits are dropped
    pub fn from_mask(x: f64, y: f64, mask: u16) -> Self {
        Self::new(x, y, Buttons::from_bits_truncate(mask))
    }
}

/// The user wants the chosen color applied to this cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellSelect {
    pub row: usize,
    pub column: usize,
}

impl From<CellPos> for CellSelect {
    fn from(pos: CellPos) -> Self {
        Self {
            row: pos.row,
            column: pos.column,
        }
    }
}

/// What a pointer event produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerOutcome {
    pub select: Option<CellSelect>,
    /// The hover cell changed and the frame should be redrawn
    pub hover_changed: bool,
    /// The select changed a cell's color; set by the puzzle's owner
    pub painted: bool,
}

/// Hover state machine
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    hover: Option<CellPos>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hover_cell(&self) -> Option<CellPos> {
        self.hover
    }

    /// Pointer moved over the surface.
    ///
    /// Hover follows the pointer, and dragging with the primary button held
    /// selects every cell it passes over.
    pub fn pointer_move(&mut self, geometry: &Geometry, event: PointerEvent) -> PointerOutcome {
        let cell = geometry.cell_at(event.x, event.y);
        let hover_changed = self.hover != cell;
        self.hover = cell;
        let select = cell
            .filter(|_| event.buttons.contains(Buttons::PRIMARY))
            .map(CellSelect::from);
        if let Some(select) = select {
            trace!(row = select.row, column = select.column, "drag select");
        }
        PointerOutcome {
            select,
            hover_changed,
            painted: false,
        }
    }

    /// Button pressed; only the primary button selects. Hover is unchanged.
    pub fn pointer_down(&mut self, geometry: &Geometry, event: PointerEvent) -> PointerOutcome {
        if !event.buttons.contains(Buttons::PRIMARY) {
            return PointerOutcome::default();
        }
        let select = geometry.cell_at(event.x, event.y).map(CellSelect::from);
        if let Some(select) = select {
            trace!(row = select.row, column = select.column, "click select");
        }
        PointerOutcome {
            select,
            hover_changed: false,
            painted: false,
        }
    }

    /// Pointer left the surface
    pub fn pointer_leave(&mut self) -> PointerOutcome {
        PointerOutcome {
            select: None,
            hover_changed: self.hover.take().is_some(),
            painted: false,
        }
    }

    /// Forget the hover cell without reporting it, e.g. after the grid changed
    pub fn reset(&mut self) {
        self.hover = None;
    }
}
