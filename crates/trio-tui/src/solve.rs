//! The parse → validate-or-repair pipeline shared by the interactive
//! screen and batch mode.

use rand::rngs::StdRng;
use rand::SeedableRng;
use trio_core::{is_valid, repair, validate, Board, ParseError, RepairParams};

/// Result of running the pipeline over one board text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The input already satisfied every cell; nothing was touched.
    AlreadyValid(Board),
    /// The search reached a fully valid board within the budget.
    Repaired { board: Board, was_invalid: usize },
    /// The attempt budget ran out before reaching a valid board.
    Exhausted { was_invalid: usize },
    /// The input text is not a well-formed board.
    Malformed(ParseError),
}

/// Parse `input`, validate it, and repair it if needed.
///
/// With `seed` the search runs on a deterministic [`StdRng`], so the same
/// input and seed reproduce the same outcome; otherwise thread entropy is
/// used.
pub fn solve_text(input: &str, max_attempts: u64, seed: Option<u64>) -> Outcome {
    let mut board = match Board::from_text(input) {
        Ok(board) => board,
        Err(err) => return Outcome::Malformed(err),
    };

    if is_valid(&board) {
        return Outcome::AlreadyValid(board);
    }

    let was_invalid = validate(&board).invalid;
    let params = RepairParams {
        max_attempts,
        ..Default::default()
    };
    let solved = match seed {
        Some(seed) => repair(&mut board, &mut StdRng::seed_from_u64(seed), &params),
        None => repair(&mut board, &mut rand::thread_rng(), &params),
    };

    if solved {
        Outcome::Repaired { board, was_invalid }
    } else {
        Outcome::Exhausted { was_invalid }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_TEXT: &str = "AAABBB\nAAABBB\nAAABBB\nCCCDDD\nCCCDDD\nCCCDDD";

    #[test]
    fn valid_input_short_circuits() {
        let outcome = solve_text(VALID_TEXT, 0, Some(0));
        let expected = Board::from_text(VALID_TEXT).unwrap();
        assert_eq!(outcome, Outcome::AlreadyValid(expected));
    }

    #[test]
    fn malformed_input_names_the_line() {
        let outcome = solve_text("AAABBB\nAAAB\nAAABBB", 1_000, Some(0));
        assert_eq!(
            outcome,
            Outcome::Malformed(ParseError::BadLine { line: 2 })
        );
    }

    #[test]
    fn zero_budget_reports_exhaustion_with_the_cost() {
        // One swap from valid: two cells are out of place.
        let text = "DAABBB\nAAABBB\nAAABBB\nCCCDDD\nCCCDDD\nCCCDDA";
        let outcome = solve_text(text, 0, Some(0));
        assert_eq!(outcome, Outcome::Exhausted { was_invalid: 2 });
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let text = "DAABBB\nAAABBB\nAAABBB\nCCCDDD\nCCCDDD\nCCCDDA";
        let first = solve_text(text, 5_000, Some(9));
        let second = solve_text(text, 5_000, Some(9));
        assert_eq!(first, second);
    }

    #[test]
    fn repaired_outcome_is_actually_valid() {
        let text = "DAABBB\nAAABBB\nAAABBB\nCCCDDD\nCCCDDD\nCCCDDA";
        for seed in 0..5 {
            if let Outcome::Repaired { board, was_invalid } =
                solve_text(text, 50_000, Some(seed))
            {
                assert!(is_valid(&board));
                assert_eq!(was_invalid, 2);
                return;
            }
        }
        panic!("no seed repaired a board that is one swap from valid");
    }
}
