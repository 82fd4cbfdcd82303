//! Basic example of validating and repairing a board.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use trio_core::{repair, validate, Board, RepairParams};

fn main() {
    let text = "\
DAABBB
AAABBB
AAABBB
CCCDDD
CCCDDD
CCCDDA";

    let mut board = Board::from_text(text).expect("example board should parse");
    println!("Input board:");
    println!("{}", board);

    let report = validate(&board);
    println!("Valid: {}", report.valid);
    println!("Invalid cells: {}\n", report.invalid);

    if report.valid {
        println!("Nothing to repair.");
        return;
    }

    println!("Repairing...\n");
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    let params = RepairParams {
        max_attempts: 1_000_000,
        ..Default::default()
    };

    if repair(&mut board, &mut rng, &params) {
        println!("Repaired board:");
        println!("{}", board);
    } else {
        println!("No solution found within the attempt budget.");
    }
}
