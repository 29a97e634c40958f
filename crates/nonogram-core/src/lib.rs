//! Core nonogram engine
//!
//! This crate holds everything the front ends share: the puzzle model, the
//! XML puzzle parser, the responsive layout that maps a container box onto
//! clue bands and cells, the pointer interaction state machine and the
//! ordered draw calls for one frame.
//!
//! Front ends own a [`Session`], forward resize and pointer notifications to
//! it, and call [`Session::render`] with their own [`Surface`].

pub mod config;
pub mod interaction;
pub mod layout;
pub mod model;
pub mod parser;
pub mod render;
pub mod session;

pub use config::GridConfig;
pub use interaction::{Buttons, CellSelect, InteractionController, PointerEvent, PointerOutcome};
pub use layout::{Geometry, Rect, Segment, DEFAULT_PADDING};
pub use model::{CellPos, Cell, Clue, Color, GridDims, Puzzle, DEFAULT_CLUE_COLOR};
pub use parser::{parse_document, parse_puzzle, Axis, DocumentNode, ParseError, ParseResult};
pub use render::{render_frame, DrawCommand, RecordingSurface, RenderStyle, Surface};
pub use session::{Invalidation, Session};

/// Puzzle bundled with the front ends when no file is given
pub const SAMPLE_PUZZLE: &str = include_str!("../puzzles/heart.xml");
