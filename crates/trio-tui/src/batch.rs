//! Non-interactive mode: read a board, run the pipeline once, print the
//! result, and map the outcome to an exit code.

use crate::solve::{solve_text, Outcome};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;
use trio_core::{Board, ParseError};

/// Machine-readable form of one batch run, for `--json`.
#[derive(Debug, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
enum Report<'a> {
    Valid { board: &'a Board },
    Repaired { fixed: usize, board: &'a Board },
    NoSolution { invalid: usize },
    FormatError { line: usize },
}

impl<'a> Report<'a> {
    fn from_outcome(outcome: &'a Outcome) -> Self {
        match outcome {
            Outcome::AlreadyValid(board) => Report::Valid { board },
            Outcome::Repaired { board, was_invalid } => Report::Repaired {
                fixed: *was_invalid,
                board,
            },
            Outcome::Exhausted { was_invalid } => Report::NoSolution {
                invalid: *was_invalid,
            },
            Outcome::Malformed(ParseError::BadLine { line }) => {
                Report::FormatError { line: *line }
            }
        }
    }
}

/// Run one board from `path` (`-` for stdin).
///
/// Exit code 0 for a valid result, 1 when the search gave up, 2 for a
/// format or read error.
pub fn run(path: &str, json: bool, attempts: u64, seed: Option<u64>) -> ExitCode {
    let text = match read_input(path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("error: cannot read {}: {}", path, err);
            return ExitCode::from(2);
        }
    };

    let outcome = solve_text(&text, attempts, seed);

    if json {
        let report = Report::from_outcome(&outcome);
        let json = serde_json::to_string_pretty(&report).expect("report should serialize");
        println!("{}", json);
    } else {
        match &outcome {
            Outcome::AlreadyValid(board) => {
                println!("already valid:");
                print!("{}", board);
            }
            Outcome::Repaired { board, .. } => print!("{}", board),
            Outcome::Exhausted { .. } => {
                println!("no solution found within the attempt budget.")
            }
            Outcome::Malformed(err) => eprintln!("error: {}", err),
        }
    }

    match outcome {
        Outcome::AlreadyValid(_) | Outcome::Repaired { .. } => ExitCode::SUCCESS,
        Outcome::Exhausted { .. } => ExitCode::from(1),
        Outcome::Malformed(_) => ExitCode::from(2),
    }
}

fn read_input(path: &str) -> io::Result<String> {
    if path == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        fs::read_to_string(path)
    }
}
