use crate::render::{palette_spans, surface_point, FOOTER_ROWS, ROW_UNITS};
use crate::theme::Theme;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use nonogram_core::{Buttons, Color, PointerEvent, Session};
use tracing::debug;

/// Result of handling an input event
pub enum AppAction {
    Continue,
    Quit,
}

/// Application state
pub struct App {
    pub session: Session,
    pub theme: Theme,
    /// Colors offered in the palette bar, eraser first
    pub palette: Vec<Option<Color>>,
    /// Index into `palette` of the chosen color
    pub selected: usize,
    /// Terminal size (columns, rows)
    pub size: (u16, u16),
    /// One-line notice shown in the status line
    pub message: Option<String>,
    /// The footer changed since the last draw
    footer_dirty: bool,
}

impl App {
    pub fn new(session: Session, theme: Theme) -> Self {
        let palette = session.palette();
        let mut app = Self {
            session,
            theme,
            palette,
            selected: 0,
            size: (0, 0),
            message: None,
            footer_dirty: true,
        };
        app.session.set_style(app.theme.style());
        // Start on the first real color rather than the eraser
        let first = if app.palette.len() > 1 { 1 } else { 0 };
        app.select(first);
        app
    }

    /// Rows available to the grid
    fn grid_rows(&self) -> u16 {
        self.size.1.saturating_sub(FOOTER_ROWS)
    }

    /// The terminal was resized
    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.size = (columns, rows);
        let height = self.grid_rows() as f64 * ROW_UNITS;
        self.session.resize(height, columns as f64);
        self.footer_dirty = true;
    }

    /// Choose palette entry `index`; false if there is no such entry
    pub fn select(&mut self, index: usize) -> bool {
        match self.palette.get(index) {
            Some(color) => {
                self.selected = index;
                self.session.choose_color(color.clone());
                self.footer_dirty = true;
                true
            }
            None => false,
        }
    }

    fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.footer_dirty = true;
    }

    /// Dispatch one terminal event
    pub fn handle_event(&mut self, event: Event) -> AppAction {
        match event {
            Event::Key(key) => return self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(columns, rows) => self.resize(columns, rows),
            Event::FocusLost => {
                self.session.pointer_leave();
            }
            _ => {}
        }
        AppAction::Continue
    }

    /// Handle key input
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if key.kind == KeyEventKind::Release {
            return AppAction::Continue;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return AppAction::Quit;
            }
            KeyCode::Char('q') | KeyCode::Esc => return AppAction::Quit,
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let index = c.to_digit(10).unwrap_or(0) as usize;
                if !self.select(index) {
                    self.set_message(format!("No color {}", index));
                }
            }
            KeyCode::Tab if !self.palette.is_empty() => {
                self.select((self.selected + 1) % self.palette.len());
            }
            KeyCode::BackTab if !self.palette.is_empty() => {
                let len = self.palette.len();
                self.select((self.selected + len - 1) % len);
            }
            _ => {}
        }
        AppAction::Continue
    }

    /// Handle mouse input: the grid area forwards pointer events to the
    /// session, the palette bar picks colors
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let grid_rows = self.grid_rows();
        if mouse.row >= grid_rows {
            self.session.pointer_leave();
            if mouse.row == grid_rows && mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                if let Some(index) = palette_spans(self.palette.len())
                    .iter()
                    .position(|span| span.contains(&mouse.column))
                {
                    self.select(index);
                }
            }
            return;
        }

        let (x, y) = surface_point(mouse.column, mouse.row);
        let outcome = match mouse.kind {
            MouseEventKind::Down(button) => self
                .session
                .pointer_down(PointerEvent::new(x, y, buttons(button))),
            MouseEventKind::Drag(button) => self
                .session
                .pointer_move(PointerEvent::new(x, y, buttons(button))),
            MouseEventKind::Moved => self
                .session
                .pointer_move(PointerEvent::new(x, y, Buttons::empty())),
            _ => return,
        };
        if outcome.painted {
            debug!(filled = self.session.puzzle().filled_count(), "cell painted");
            self.message = None;
            self.footer_dirty = true;
        }
    }

    /// Status line text
    pub fn status_line(&self) -> String {
        let puzzle = self.session.puzzle();
        let total = puzzle.rows() * puzzle.columns();
        let mut status = format!("{}/{} filled", puzzle.filled_count(), total);
        if let Some(pos) = self.session.hover_cell() {
            status.push_str(&format!("  row {} col {}", pos.row + 1, pos.column + 1));
        }
        match &self.message {
            Some(message) => status.push_str(&format!("  {}", message)),
            None => status.push_str("  0-9 color  Tab next  q quit"),
        }
        status
    }

    pub fn needs_redraw(&self) -> bool {
        self.footer_dirty || self.session.needs_redraw()
    }

    pub fn mark_drawn(&mut self) {
        self.footer_dirty = false;
    }
}

/// Button mask for a crossterm mouse button
fn buttons(button: MouseButton) -> Buttons {
    match button {
        MouseButton::Left => Buttons::PRIMARY,
        MouseButton::Right => Buttons::SECONDARY,
        MouseButton::Middle => Buttons::AUXILIARY,
    }
}
