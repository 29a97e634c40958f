//! Basic example of using the nonogram engine

use nonogram_core::{
    Buttons, Color, GridConfig, PointerEvent, RecordingSurface, Session, SAMPLE_PUZZLE,
};

fn main() {
    // Parse the bundled puzzle
    let mut session = match Session::from_xml(SAMPLE_PUZZLE, GridConfig::default()) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    let puzzle = session.puzzle();
    println!("Puzzle: {} rows x {} columns", puzzle.rows(), puzzle.columns());
    for (i, clues) in puzzle.row_clues().iter().enumerate() {
        let text: Vec<String> = clues
            .iter()
            .map(|c| format!("{}{}", c.count, c.color.as_str().chars().next().unwrap_or(' ')))
            .collect();
        println!("  row {:>2}: {}", i, text.join(" "));
    }

    // Lay it out in a 400x600 box
    session.resize(400.0, 600.0);
    let geometry = session.geometry();
    println!("\nCell size: {:.2}", geometry.cell_size);
    println!("Row clue band: {:.2}", geometry.row_clues_band);
    println!("Column clue band: {:.2}", geometry.column_clues_band);

    // Paint the top of the heart by dragging across row 1
    session.choose_color(Some(Color::new("red")));
    let (_, y) = geometry.cell_top_left(1, 0);
    for column in 0..session.puzzle().columns() {
        let (x, _) = geometry.cell_top_left(1, column);
        let event = PointerEvent::new(x + 1.0, y + 1.0, Buttons::PRIMARY);
        session.pointer_move(event);
    }
    println!("\nFilled cells: {}", session.puzzle().filled_count());

    // Record one frame
    let mut surface = RecordingSurface::new();
    session.render(&mut surface);
    println!("Draw calls in frame: {}", surface.commands().len());
}
