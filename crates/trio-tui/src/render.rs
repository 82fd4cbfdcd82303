use crate::app::{App, ResultPane, MAX_COLS, MAX_LINES};
use crate::solve::Outcome;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use std::io;

const INPUT_WIDTH: u16 = MAX_COLS as u16 + 2;
const RESULT_WIDTH: u16 = 44;
const PANE_HEIGHT: u16 = MAX_LINES as u16;

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let (term_width, _) = terminal::size()?;
    let theme = &app.theme;

    execute!(
        stdout,
        Hide,
        SetBackgroundColor(theme.bg),
        Clear(ClearType::All)
    )?;

    let total_width = INPUT_WIDTH + 2 + 3 + RESULT_WIDTH + 2;
    let x0 = if term_width > total_width {
        (term_width - total_width) / 2
    } else {
        1
    };
    let y0 = 1;

    execute!(
        stdout,
        MoveTo(x0, y0),
        SetForegroundColor(theme.accent),
        Print("trio - run-of-three board repair")
    )?;

    let panes_y = y0 + 2;
    draw_pane(stdout, app, x0, panes_y, INPUT_WIDTH, "board")?;
    render_input(stdout, app, x0 + 1, panes_y + 1)?;

    let result_x = x0 + INPUT_WIDTH + 2 + 3;
    draw_pane(stdout, app, result_x, panes_y, RESULT_WIDTH, "result")?;
    render_result(stdout, app, result_x + 1, panes_y + 1)?;

    let keys_y = panes_y + PANE_HEIGHT + 3;
    render_keys(stdout, app, x0, keys_y)?;

    if let Some(ref msg) = app.message {
        execute!(
            stdout,
            MoveTo(x0, keys_y + 1),
            SetForegroundColor(theme.info),
            Print(msg)
        )?;
    }

    execute!(stdout, Show)?;
    Ok(())
}

/// Draw a bordered pane with its caption in the top edge.
fn draw_pane(
    stdout: &mut io::Stdout,
    app: &App,
    x: u16,
    y: u16,
    width: u16,
    caption: &str,
) -> io::Result<()> {
    let theme = &app.theme;
    let inner = width as usize;

    let mut top = format!("+- {} ", caption);
    while top.len() < inner + 1 {
        top.push('-');
    }
    top.push('+');

    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.border),
        Print(&top)
    )?;
    for row in 0..PANE_HEIGHT {
        execute!(
            stdout,
            MoveTo(x, y + 1 + row),
            Print("|"),
            MoveTo(x + width + 1, y + 1 + row),
            Print("|")
        )?;
    }
    execute!(
        stdout,
        MoveTo(x, y + 1 + PANE_HEIGHT),
        Print(format!("+{}+", "-".repeat(inner)))
    )?;
    Ok(())
}

fn render_input(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    for row in 0..MAX_LINES {
        let line = app.input.get(row).map(String::as_str).unwrap_or("");
        let chars: Vec<char> = line.chars().collect();
        execute!(stdout, MoveTo(x, y + row as u16))?;

        for col in 0..MAX_COLS {
            let ch = chars.get(col).copied().unwrap_or(' ');
            let under_cursor = app.cursor == (row, col);
            if under_cursor {
                execute!(
                    stdout,
                    SetBackgroundColor(theme.cursor_bg),
                    SetForegroundColor(theme.fg),
                    Print(ch),
                    SetBackgroundColor(theme.bg)
                )?;
            } else {
                execute!(stdout, SetForegroundColor(theme.fg), Print(ch))?;
            }
        }
    }
    Ok(())
}

fn render_result(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let lines: Vec<(String, Color)> = match &app.result {
        ResultPane::Idle => vec![(
            "enter a board, then Ctrl+R".to_string(),
            theme.info,
        )],
        ResultPane::Searching => vec![("searching...".to_string(), theme.info)],
        ResultPane::Finished(outcome) => match outcome {
            Outcome::AlreadyValid(board) => {
                let mut lines = vec![("already valid:".to_string(), theme.success)];
                lines.extend(board_lines(&board.to_string(), theme.fg));
                lines
            }
            Outcome::Repaired { board, was_invalid } => {
                let mut lines = vec![(
                    format!("repaired ({} invalid cells):", was_invalid),
                    theme.success,
                )];
                lines.extend(board_lines(&board.to_string(), theme.fg));
                lines
            }
            Outcome::Exhausted { was_invalid } => vec![
                (
                    "no solution found within the attempt budget.".to_string(),
                    theme.error,
                ),
                (
                    format!("input had {} invalid cells", was_invalid),
                    theme.info,
                ),
            ],
            Outcome::Malformed(err) => vec![(err.to_string(), theme.error)],
        },
    };

    for (row, (text, color)) in lines.iter().enumerate().take(MAX_LINES) {
        execute!(
            stdout,
            MoveTo(x, y + row as u16),
            SetForegroundColor(*color),
            Print(text)
        )?;
    }
    Ok(())
}

fn board_lines(text: &str, color: Color) -> Vec<(String, Color)> {
    text.lines().map(|l| (l.to_string(), color)).collect()
}

fn render_keys(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let bindings = [
        ("Ctrl+R", "repair"),
        ("Ctrl+L", "clear"),
        ("Esc", "quit"),
    ];

    execute!(stdout, MoveTo(x, y))?;
    for (key, label) in bindings {
        execute!(
            stdout,
            SetForegroundColor(theme.key),
            Print(key),
            SetForegroundColor(theme.info),
            Print(format!(" {}   ", label))
        )?;
    }

    let settings = match app.seed {
        Some(seed) => format!("attempts: {}  seed: {}", app.attempts, seed),
        None => format!("attempts: {}", app.attempts),
    };
    execute!(
        stdout,
        SetForegroundColor(theme.info),
        Print(format!("  {}", settings))
    )?;
    Ok(())
}
