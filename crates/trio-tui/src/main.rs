mod app;
mod batch;
mod render;
mod solve;
mod theme;

use app::App;
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};
use std::process::ExitCode;
use std::time::{Duration, Instant};
use theme::Theme;
use trio_core::RepairParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ThemeChoice {
    Dark,
    Light,
    HighContrast,
}

impl ThemeChoice {
    fn theme(self) -> Theme {
        match self {
            ThemeChoice::Dark => Theme::dark(),
            ThemeChoice::Light => Theme::light(),
            ThemeChoice::HighContrast => Theme::high_contrast(),
        }
    }
}

/// Validate and repair run-of-three puzzle boards.
#[derive(Debug, Parser)]
#[command(name = "trio", version)]
struct Cli {
    /// Read a board from FILE ('-' for stdin), print the result, and exit.
    #[arg(long, value_name = "FILE")]
    grid: Option<String>,

    /// Emit the batch result as JSON.
    #[arg(long, requires = "grid")]
    json: bool,

    /// Attempt budget for the repair search.
    #[arg(long, default_value_t = RepairParams::default().max_attempts)]
    attempts: u64,

    /// Seed the search deterministically instead of using thread entropy.
    #[arg(long)]
    seed: Option<u64>,

    /// Color theme for the interactive screen.
    #[arg(long, value_enum, default_value_t = ThemeChoice::Dark)]
    theme: ThemeChoice,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(path) = &cli.grid {
        return batch::run(path, cli.json, cli.attempts, cli.seed);
    }

    match run_tui(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run_tui(cli: &Cli) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Run the app
    let result = run_app(&mut stdout, cli);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    result
}

fn run_app(stdout: &mut io::Stdout, cli: &Cli) -> io::Result<()> {
    let mut app = App::new(cli.theme.theme(), cli.attempts, cli.seed);
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        // Render
        render::render(stdout, &app)?;
        stdout.flush()?;

        // Handle input with timeout so the worker is drained on time
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Handle Ctrl+C
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break;
                }

                match app.handle_key(key) {
                    app::AppAction::Continue => {}
                    app::AppAction::Quit => break,
                }
            }
        }

        // Tick the message timer and poll the background search
        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
