//! End-to-end scenarios: parse, lay out, click, render.

use nonogram_core::{
    parse_puzzle, Buttons, CellPos, Color, DrawCommand, GridConfig, ParseError, PointerEvent,
    RecordingSurface, Session, SAMPLE_PUZZLE,
};

const EXAMPLE: &str = r#"
<puzzle>
  <clues type="rows">
    <line><count color="red">2</count></line>
    <line><count>1</count><count color="blue">1</count></line>
  </clues>
  <clues type="columns">
    <line><count>1</count></line>
    <line><count color="red">1</count></line>
  </clues>
</puzzle>"#;

fn count_draws(commands: &[DrawCommand]) -> (usize, usize) {
    let cells = commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::Cell { .. }))
        .count();
    let clues = commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::Text { .. }))
        .count();
    (cells, clues)
}

#[test]
fn example_in_hundred_pixel_box() {
    let mut session = Session::from_xml(EXAMPLE, GridConfig::default()).unwrap();
    session.resize(100.0, 100.0);

    let geometry = session.geometry();
    assert_eq!(geometry.cell_size, 30.0);
    assert_eq!(geometry.cell_at(50.0, 50.0), Some(CellPos::new(1, 0)));

    session.choose_color(Some(Color::new("red")));
    session.pointer_down(PointerEvent::new(50.0, 50.0, Buttons::PRIMARY));
    assert_eq!(session.puzzle().color_at(1, 0), Some(&Color::new("red")));

    let mut surface = RecordingSurface::new();
    session.render(&mut surface);
    assert_eq!(count_draws(surface.commands()), (4, 5));
}

#[test]
fn parse_dimensions_match_clues() {
    for xml in [EXAMPLE, SAMPLE_PUZZLE] {
        let puzzle = parse_puzzle(xml).unwrap();
        let dims = puzzle.dims();
        assert_eq!(dims.rows, puzzle.row_clues().len());
        assert_eq!(dims.columns, puzzle.column_clues().len());
        for row in 0..dims.rows {
            for column in 0..dims.columns {
                assert!(!puzzle.cell(row, column).unwrap().is_filled());
            }
        }
    }
}

#[test]
fn structure_errors_return_no_puzzle() {
    let cases = [
        ("<clues type=\"rows\"/>", ParseError::MissingPuzzle),
        (
            "<puzzle><clues type=\"columns\"/></puzzle>",
            ParseError::MissingRowClues,
        ),
        (
            "<puzzle><clues type=\"rows\"/><clues type=\"cols\"/></puzzle>",
            ParseError::MissingColumnClues,
        ),
    ];
    for (xml, expected) in cases {
        assert_eq!(parse_puzzle(xml).unwrap_err(), expected, "{xml}");
    }
}

#[test]
fn degenerate_session_draws_nothing() {
    let xml = r#"<puzzle><clues type="rows"/><clues type="columns"><line><count>1</count></line></clues></puzzle>"#;
    let mut session = Session::from_xml(xml, GridConfig::default()).unwrap();
    session.resize(300.0, 300.0);
    assert_eq!(session.geometry().cell_size, 0.0);

    session.choose_color(Some(Color::new("black")));
    let outcome = session.pointer_down(PointerEvent::new(150.0, 150.0, Buttons::PRIMARY));
    assert_eq!(outcome.select, None);

    let mut surface = RecordingSurface::new();
    session.render(&mut surface);
    assert_eq!(count_draws(surface.commands()), (0, 0));
}

#[test]
fn sample_palette() {
    let puzzle = parse_puzzle(SAMPLE_PUZZLE).unwrap();
    let palette: Vec<Option<String>> = puzzle
        .palette()
        .into_iter()
        .map(|c| c.map(|c| c.to_string()))
        .collect();
    assert_eq!(
        palette,
        vec![
            None,
            Some("red".to_string()),
            Some("black".to_string()),
            Some("green".to_string()),
        ]
    );
}

#[test]
fn sample_separators_on_eight_by_seven() {
    let mut session = Session::from_xml(SAMPLE_PUZZLE, GridConfig::default()).unwrap();
    session.resize(600.0, 800.0);
    let mut surface = RecordingSurface::new();
    session.render(&mut surface);
    let heavy = surface
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::Line { line_width, .. } if *line_width == 3.0))
        .count();
    // Columns 0 and 5, rows 0 and 5
    assert_eq!(heavy, 4);
}
