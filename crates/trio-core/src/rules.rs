//! The run-of-three rule: every cell must sit in a horizontal or vertical
//! run of at least three identical symbols.

use crate::board::{Board, EMPTY, SIZE};
use serde::{Deserialize, Serialize};

/// Minimum run length for a cell to be satisfied.
const RUN_LEN: usize = 3;

/// Aggregate validity report for a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    /// Every cell sits in a qualifying run.
    pub valid: bool,
    /// Number of cells that do not.
    pub invalid: usize,
}

/// Whether the cell at `(row, col)` sits in a run of at least three
/// identical symbols, horizontally or vertically.
///
/// The run is scanned outward from the cell in both directions, counting
/// the cell itself. The two axes are independent; either qualifies.
/// Diagonals never count and runs do not wrap at the edges. An [`EMPTY`]
/// cell is never satisfied.
pub fn in_qualifying_run(board: &Board, row: usize, col: usize) -> bool {
    let ch = board.get(row, col);
    if ch == EMPTY {
        return false;
    }

    let mut count = 1;
    let mut c = col;
    while c > 0 && board.get(row, c - 1) == ch {
        count += 1;
        c -= 1;
    }
    c = col + 1;
    while c < SIZE && board.get(row, c) == ch {
        count += 1;
        c += 1;
    }
    if count >= RUN_LEN {
        return true;
    }

    count = 1;
    let mut r = row;
    while r > 0 && board.get(r - 1, col) == ch {
        count += 1;
        r -= 1;
    }
    r = row + 1;
    while r < SIZE && board.get(r, col) == ch {
        count += 1;
        r += 1;
    }
    count >= RUN_LEN
}

/// Number of cells not in any qualifying run.
///
/// This is the cost minimized by [`crate::repair`]. Recomputed from
/// scratch over all `SIZE`² cells; each cell scan is O(`SIZE`).
pub fn invalid_cells(board: &Board) -> usize {
    let mut count = 0;
    for row in 0..SIZE {
        for col in 0..SIZE {
            if !in_qualifying_run(board, row, col) {
                count += 1;
            }
        }
    }
    count
}

/// Whether every cell sits in a qualifying run.
pub fn is_valid(board: &Board) -> bool {
    for row in 0..SIZE {
        for col in 0..SIZE {
            if !in_qualifying_run(board, row, col) {
                return false;
            }
        }
    }
    true
}

/// Validity flag and invalid-cell count in one report.
pub fn validate(board: &Board) -> Validation {
    let invalid = invalid_cells(board);
    Validation {
        valid: invalid == 0,
        invalid,
    }
}
