//! Run-of-three grid puzzle engine.
//!
//! A board is a fixed 6×6 grid of symbol characters. A cell is satisfied
//! when it sits inside a horizontal or vertical run of at least three
//! identical symbols; `-` marks an empty cell and is never satisfied.
//! [`repair`] tries to turn an arbitrary board into a fully satisfied one
//! by randomized pair swaps under a hill-climbing acceptance rule.

mod board;
mod repair;
mod rules;

pub use board::{Board, ParseError, EMPTY, SIZE};
pub use repair::{repair, RepairParams};
pub use rules::{in_qualifying_run, invalid_cells, is_valid, validate, Validation};
