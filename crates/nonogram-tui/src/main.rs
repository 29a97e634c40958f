mod app;
mod render;
mod settings;
mod theme;

use app::{App, AppAction};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use nonogram_core::{Session, SAMPLE_PUZZLE};
use settings::Settings;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use theme::Theme;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Paint nonograms in the terminal
#[derive(Debug, Parser)]
#[command(name = "nonogram", version, about)]
struct Cli {
    /// Puzzle XML file; the bundled sample when omitted
    puzzle: Option<PathBuf>,

    /// Color theme (light, dark, high_contrast)
    #[arg(long)]
    theme: Option<String>,

    /// Free space around the grid, in columns
    #[arg(long)]
    padding: Option<f64>,

    /// Lay the grid out in a square
    #[arg(long)]
    square: bool,

    /// Write logs here; RUST_LOG sets the level
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let mut settings = Settings::load();
    if let Some(theme) = cli.theme {
        settings.theme = theme;
    }
    if let Some(padding) = cli.padding {
        settings.padding = padding;
    }
    settings.square_surface |= cli.square;

    let xml = match cli.puzzle.or_else(|| settings.puzzle.clone()) {
        Some(path) => fs::read_to_string(&path)?,
        None => SAMPLE_PUZZLE.to_string(),
    };
    let session = Session::from_xml(&xml, settings.grid_config())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    info!(
        rows = session.puzzle().rows(),
        columns = session.puzzle().columns(),
        "puzzle loaded"
    );
    let app = App::new(session, Theme::named(&settings.theme));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Run the app
    let result = run_app(&mut stdout, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

/// Send tracing output to `path`; the terminal itself is the drawing surface
fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_app(stdout: &mut io::Stdout, mut app: App) -> io::Result<()> {
    let (columns, rows) = terminal::size()?;
    app.resize(columns, rows);

    loop {
        if app.needs_redraw() {
            render::render(stdout, &mut app)?;
            stdout.flush()?;
        }

        if event::poll(Duration::from_millis(100))? {
            match app.handle_event(event::read()?) {
                AppAction::Continue => {}
                AppAction::Quit => break,
            }
        }
    }

    info!(filled = app.session.puzzle().filled_count(), "quit");
    Ok(())
}
