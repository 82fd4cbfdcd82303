use crate::solve::{solve_text, Outcome};
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// Most lines the input pane accepts; extra newlines are ignored.
pub const MAX_LINES: usize = 12;
/// Longest line the input pane accepts; extra characters are ignored.
pub const MAX_COLS: usize = 16;

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// What the result pane currently shows.
pub enum ResultPane {
    /// Nothing run yet.
    Idle,
    /// A background search is in flight.
    Searching,
    /// The last finished run.
    Finished(Outcome),
}

/// The main application state
pub struct App {
    /// Free-text edit buffer for the puzzle, one entry per line.
    ///
    /// The board shape is only enforced at parse time, so wrong-length
    /// input stays representable here.
    pub input: Vec<String>,
    /// Cursor as (line, column) into `input`.
    pub cursor: (usize, usize),
    /// Result pane contents.
    pub result: ResultPane,
    /// Message to display
    pub message: Option<String>,
    /// Message timer
    message_timer: u32,
    /// Color theme
    pub theme: Theme,
    /// Attempt budget handed to each search.
    pub attempts: u64,
    /// Fixed seed for reproducible searches, if any.
    pub seed: Option<u64>,
    /// Receiver for the in-flight background search, if any.
    worker: Option<Receiver<Outcome>>,
}

impl App {
    pub fn new(theme: Theme, attempts: u64, seed: Option<u64>) -> Self {
        Self {
            input: vec![String::new()],
            cursor: (0, 0),
            result: ResultPane::Idle,
            message: None,
            message_timer: 0,
            theme,
            attempts,
            seed,
            worker: None,
        }
    }

    /// The input buffer as one string, lines joined by newlines.
    pub fn input_text(&self) -> String {
        self.input.join("\n")
    }

    /// Whether a background search is running.
    pub fn searching(&self) -> bool {
        self.worker.is_some()
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 30; // ~3 seconds at 100ms poll
    }

    /// Update the message timer and drain the background search (called
    /// every tick).
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        if let Some(rx) = &self.worker {
            match rx.try_recv() {
                Ok(outcome) => {
                    self.result = ResultPane::Finished(outcome);
                    self.worker = None;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    self.worker = None;
                    self.result = ResultPane::Idle;
                    self.show_message("search worker died");
                }
            }
        }
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('r') => self.start_search(),
                KeyCode::Char('l') => self.clear(),
                KeyCode::Char('q') => return AppAction::Quit,
                _ => {}
            }
            return AppAction::Continue;
        }

        match key.code {
            KeyCode::Esc => return AppAction::Quit,
            KeyCode::Char(ch) => self.insert_char(ch),
            KeyCode::Enter => self.insert_newline(),
            KeyCode::Backspace => self.delete_backward(),
            KeyCode::Delete => self.delete_forward(),
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.cursor.1 = 0,
            KeyCode::End => self.cursor.1 = self.current_line_len(),
            _ => {}
        }
        AppAction::Continue
    }

    /// Reset both panes.
    pub fn clear(&mut self) {
        self.input = vec![String::new()];
        self.cursor = (0, 0);
        self.result = ResultPane::Idle;
    }

    /// Dispatch the pipeline on a background thread so the event loop
    /// keeps polling while the search runs.
    fn start_search(&mut self) {
        if self.worker.is_some() {
            self.show_message("already searching");
            return;
        }

        let text = self.input_text();
        let attempts = self.attempts;
        let seed = self.seed;
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(solve_text(&text, attempts, seed));
        });
        self.worker = Some(rx);
        self.result = ResultPane::Searching;
    }

    fn current_line_len(&self) -> usize {
        self.input[self.cursor.0].chars().count()
    }

    fn insert_char(&mut self, ch: char) {
        let (line, col) = self.cursor;
        if self.input[line].chars().count() >= MAX_COLS {
            return;
        }
        let byte = byte_index(&self.input[line], col);
        self.input[line].insert(byte, ch);
        self.cursor.1 += 1;
    }

    fn insert_newline(&mut self) {
        if self.input.len() >= MAX_LINES {
            return;
        }
        let (line, col) = self.cursor;
        let byte = byte_index(&self.input[line], col);
        let rest = self.input[line].split_off(byte);
        self.input.insert(line + 1, rest);
        self.cursor = (line + 1, 0);
    }

    fn delete_backward(&mut self) {
        let (line, col) = self.cursor;
        if col > 0 {
            let byte = byte_index(&self.input[line], col - 1);
            self.input[line].remove(byte);
            self.cursor.1 -= 1;
        } else if line > 0 {
            // Join with the previous line.
            let removed = self.input.remove(line);
            let prev_len = self.input[line - 1].chars().count();
            self.input[line - 1].push_str(&removed);
            self.cursor = (line - 1, prev_len);
        }
    }

    fn delete_forward(&mut self) {
        let (line, col) = self.cursor;
        if col < self.current_line_len() {
            let byte = byte_index(&self.input[line], col);
            self.input[line].remove(byte);
        } else if line + 1 < self.input.len() {
            let next = self.input.remove(line + 1);
            self.input[line].push_str(&next);
        }
    }

    fn move_up(&mut self) {
        if self.cursor.0 > 0 {
            self.cursor.0 -= 1;
            self.cursor.1 = self.cursor.1.min(self.current_line_len());
        }
    }

    fn move_down(&mut self) {
        if self.cursor.0 + 1 < self.input.len() {
            self.cursor.0 += 1;
            self.cursor.1 = self.cursor.1.min(self.current_line_len());
        }
    }

    fn move_left(&mut self) {
        if self.cursor.1 > 0 {
            self.cursor.1 -= 1;
        } else if self.cursor.0 > 0 {
            self.cursor.0 -= 1;
            self.cursor.1 = self.current_line_len();
        }
    }

    fn move_right(&mut self) {
        if self.cursor.1 < self.current_line_len() {
            self.cursor.1 += 1;
        } else if self.cursor.0 + 1 < self.input.len() {
            self.cursor = (self.cursor.0 + 1, 0);
        }
    }
}

/// Byte offset of the `col`-th character of `line`.
fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(idx, _)| idx)
        .unwrap_or(line.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(Theme::dark(), 1_000, Some(0))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                press(app, KeyCode::Enter);
            } else {
                press(app, KeyCode::Char(ch));
            }
        }
    }

    #[test]
    fn typing_builds_the_input_text() {
        let mut a = app();
        type_text(&mut a, "AAABBB\nCCCDDD");
        assert_eq!(a.input_text(), "AAABBB\nCCCDDD");
        assert_eq!(a.cursor, (1, 6));
    }

    #[test]
    fn backspace_joins_lines() {
        let mut a = app();
        type_text(&mut a, "AAA\nBBB");
        press(&mut a, KeyCode::Home);
        press(&mut a, KeyCode::Backspace);
        assert_eq!(a.input_text(), "AAABBB");
        assert_eq!(a.cursor, (0, 3));
    }

    #[test]
    fn enter_splits_the_line_at_the_cursor() {
        let mut a = app();
        type_text(&mut a, "AAABBB");
        for _ in 0..3 {
            press(&mut a, KeyCode::Left);
        }
        press(&mut a, KeyCode::Enter);
        assert_eq!(a.input_text(), "AAA\nBBB");
        assert_eq!(a.cursor, (1, 0));
    }

    #[test]
    fn input_is_capped() {
        let mut a = app();
        for _ in 0..(MAX_COLS + 5) {
            press(&mut a, KeyCode::Char('A'));
        }
        assert_eq!(a.input[0].len(), MAX_COLS);

        for _ in 0..(MAX_LINES + 5) {
            press(&mut a, KeyCode::Enter);
        }
        assert_eq!(a.input.len(), MAX_LINES);
    }

    #[test]
    fn ctrl_l_clears_both_panes() {
        let mut a = app();
        type_text(&mut a, "AAABBB\nCCC");
        a.result = ResultPane::Searching;
        a.handle_key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL));
        assert_eq!(a.input_text(), "");
        assert_eq!(a.cursor, (0, 0));
        assert!(matches!(a.result, ResultPane::Idle));
    }

    #[test]
    fn esc_quits() {
        let mut a = app();
        assert!(matches!(
            a.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            AppAction::Quit
        ));
    }

    #[test]
    fn search_result_arrives_through_tick() {
        let mut a = app();
        type_text(&mut a, "AAABBB\nAAABBB\nAAABBB\nCCCDDD\nCCCDDD\nCCCDDD");
        a.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert!(a.searching());

        // The board is already valid, so the worker answers quickly.
        for _ in 0..500 {
            a.tick();
            if !a.searching() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        assert!(matches!(
            a.result,
            ResultPane::Finished(Outcome::AlreadyValid(_))
        ));
    }
}
