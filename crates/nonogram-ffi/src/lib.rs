use nonogram_core::{
    CellPos, CellSelect, Color, GridConfig, PointerEvent, PointerOutcome, RecordingSurface,
    Session, SAMPLE_PUZZLE,
};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

uniffi::setup_scaffolding!();

/// Errors surfaced to the host language
#[derive(Debug, uniffi::Error)]
pub enum NonogramError {
    /// The puzzle XML could not be read
    Parse { message: String },
    /// A config document could not be read
    Config { message: String },
    /// The frame could not be serialized
    Render { message: String },
}

impl fmt::Display for NonogramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NonogramError::Parse { message } => write!(f, "Puzzle error: {}", message),
            NonogramError::Config { message } => write!(f, "Config error: {}", message),
            NonogramError::Render { message } => write!(f, "Render error: {}", message),
        }
    }
}

impl std::error::Error for NonogramError {}

/// A grid cell address
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct GridCell {
    pub row: u32,
    pub column: u32,
}

impl From<CellPos> for GridCell {
    fn from(pos: CellPos) -> Self {
        Self {
            row: pos.row as u32,
            column: pos.column as u32,
        }
    }
}

impl From<CellSelect> for GridCell {
    fn from(select: CellSelect) -> Self {
        Self {
            row: select.row as u32,
            column: select.column as u32,
        }
    }
}

/// What a pointer event did
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct PointerResult {
    /// Cell the event selected, if any
    pub selected: Option<GridCell>,
    /// A cell changed color
    pub painted: bool,
    /// The host should redraw
    pub redraw: bool,
}

impl From<PointerOutcome> for PointerResult {
    fn from(outcome: PointerOutcome) -> Self {
        Self {
            selected: outcome.select.map(GridCell::from),
            painted: outcome.painted,
            redraw: outcome.painted || outcome.hover_changed,
        }
    }
}

/// Layout of the grid inside the current container box
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct GridGeometry {
    pub cell_size: f64,
    pub padding: f64,
    pub origin_x: f64,
    pub origin_y: f64,
    pub width: f64,
    pub height: f64,
    pub rows: u32,
    pub columns: u32,
}

/// One puzzle being painted by a native host
#[derive(uniffi::Object)]
pub struct NonogramSession {
    session: Mutex<Session>,
}

impl NonogramSession {
    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[uniffi::export]
impl NonogramSession {
    /// Start a session on a puzzle XML document
    #[uniffi::constructor]
    pub fn from_xml(xml: String) -> Result<Arc<Self>, NonogramError> {
        let session =
            Session::from_xml(&xml, GridConfig::default()).map_err(|e| NonogramError::Parse {
                message: e.to_string(),
            })?;
        Ok(Arc::new(Self {
            session: Mutex::new(session),
        }))
    }

    /// Start a session on the bundled sample puzzle
    #[uniffi::constructor]
    pub fn sample() -> Result<Arc<Self>, NonogramError> {
        Self::from_xml(SAMPLE_PUZZLE.to_string())
    }

    /// Replace the layout settings from a JSON document; missing fields take
    /// their defaults
    pub fn set_config_json(&self, json: String) -> Result<(), NonogramError> {
        let config = GridConfig::from_json(&json).map_err(|e| NonogramError::Config {
            message: e.to_string(),
        })?;
        self.session().set_config(config);
        Ok(())
    }

    /// The container box changed
    pub fn resize(&self, height: f64, width: f64) {
        self.session().resize(height, width);
    }

    /// `buttons` is a DOM-style mask: 1 primary, 2 secondary, 4 auxiliary
    pub fn pointer_down(&self, x: f64, y: f64, buttons: u16) -> PointerResult {
        self.session()
            .pointer_down(PointerEvent::from_mask(x, y, buttons))
            .into()
    }

    pub fn pointer_move(&self, x: f64, y: f64, buttons: u16) -> PointerResult {
        self.session()
            .pointer_move(PointerEvent::from_mask(x, y, buttons))
            .into()
    }

    pub fn pointer_leave(&self) -> PointerResult {
        self.session().pointer_leave().into()
    }

    pub fn hover_cell(&self) -> Option<GridCell> {
        self.session().hover_cell().map(GridCell::from)
    }

    /// Colors to offer in a picker; `None` is the eraser
    pub fn palette(&self) -> Vec<Option<String>> {
        self.session()
            .palette()
            .into_iter()
            .map(|color| color.map(|c| c.to_string()))
            .collect()
    }

    pub fn choose_color(&self, color: Option<String>) {
        self.session().choose_color(color.map(Color::new));
    }

    pub fn chosen_color(&self) -> Option<String> {
        self.session().chosen_color().map(|c| c.to_string())
    }

    pub fn geometry(&self) -> GridGeometry {
        let geometry = self.session().geometry();
        let (origin_x, origin_y) = geometry.grid_origin();
        let (height, width) = geometry.extent();
        GridGeometry {
            cell_size: geometry.cell_size,
            padding: geometry.padding,
            origin_x,
            origin_y,
            width,
            height,
            rows: geometry.dims.rows as u32,
            columns: geometry.dims.columns as u32,
        }
    }

    /// Color of a cell, `None` when unfilled or out of range
    pub fn cell_color(&self, row: u32, column: u32) -> Option<String> {
        self.session()
            .puzzle()
            .color_at(row as usize, column as usize)
            .map(|c| c.to_string())
    }

    pub fn filled_count(&self) -> u32 {
        self.session().puzzle().filled_count() as u32
    }

    /// Current grid colors as JSON, row-major, `null` for unfilled
    pub fn grid_json(&self) -> String {
        let session = self.session();
        let puzzle = session.puzzle();
        let grid: Vec<Vec<Option<&str>>> = (0..puzzle.rows())
            .map(|row| {
                (0..puzzle.columns())
                    .map(|column| puzzle.color_at(row, column).map(|c| c.as_str()))
                    .collect()
            })
            .collect();
        serde_json::to_string(&grid).unwrap_or_default()
    }

    pub fn needs_redraw(&self) -> bool {
        self.session().needs_redraw()
    }

    /// Draw a frame and return its commands as JSON for the host to replay
    pub fn render_frame_json(&self) -> Result<String, NonogramError> {
        let mut surface = RecordingSurface::new();
        self.session().render(&mut surface);
        surface.to_json().map_err(|e| NonogramError::Render {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_bad_xml_is_an_error() {
        let err = NonogramSession::from_xml("<puzzle>".to_string()).err();
        assert!(matches!(err, Some(NonogramError::Parse { .. })));

        let err = NonogramSession::from_xml("<nothing/>".to_string()).err();
        assert!(err.is_some_and(|e| e.to_string().starts_with("Puzzle error")));
    }

    #[test]
    fn test_geometry_and_click() {
        let session = NonogramSession::from_xml(EXAMPLE.to_string()).unwrap();
        session.resize(100.0, 100.0);
        let geometry = session.geometry();
        assert_eq!(geometry.cell_size, 30.0);
        assert_eq!((geometry.origin_x, geometry.origin_y), (35.0, 20.0));
        assert_eq!((geometry.rows, geometry.columns), (2, 2));

        session.choose_color(Some("red".to_string()));
        let result = session.pointer_down(50.0, 50.0, 1);
        assert_eq!(result.selected, Some(GridCell { row: 1, column: 0 }));
        assert!(result.painted && result.redraw);
        assert_eq!(session.cell_color(1, 0).as_deref(), Some("red"));
        assert_eq!(session.cell_color(9, 9), None);
        assert_eq!(session.grid_json(), r#"[[null,null],["red",null]]"#);
    }

    #[test]
    fn test_hover_and_leave() {
        let session = NonogramSession::from_xml(EXAMPLE.to_string()).unwrap();
        session.resize(100.0, 100.0);
        let result = session.pointer_move(80.0, 30.0, 0);
        assert!(result.redraw && !result.painted);
        assert_eq!(session.hover_cell(), Some(GridCell { row: 0, column: 1 }));
        assert!(session.pointer_leave().redraw);
        assert_eq!(session.hover_cell(), None);
    }

    #[test]
    fn test_palette_and_config() {
        let session = NonogramSession::sample().unwrap();
        let palette = session.palette();
        assert_eq!(palette.first(), Some(&None));
        assert!(palette.contains(&Some("red".to_string())));

        assert!(session.set_config_json(r#"{"padding": 0}"#.to_string()).is_ok());
        assert!(matches!(
            session.set_config_json("not json".to_string()),
            Err(NonogramError::Config { .. })
        ));
    }

    #[test]
    fn test_render_frame_json() {
        let session = NonogramSession::from_xml(EXAMPLE.to_string()).unwrap();
        session.resize(100.0, 100.0);
        assert!(session.needs_redraw());
        let json = session.render_frame_json().unwrap();
        assert!(json.starts_with(r#"[{"op":"clear"}"#));
        assert!(!session.needs_redraw());
    }
}
