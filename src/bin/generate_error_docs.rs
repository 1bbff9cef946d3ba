//! Generate error code documentation from the source of truth (error enums).
//!
//! This binary reads the error codes, descriptions, details, and help text
//! directly from the `PuzzleError` and `SolverError` implementations via their
//! `code()`, `description()`, `details()`, and `help()` methods.
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use xwordgen::errors::PuzzleError;
use xwordgen::solver::SolverError;
use xwordgen::variable::{Direction, Variable};

/// Macro to generate error documentation for any error type
/// with `code()`, `description()`, `details()`, `help()`, and `display_detailed()` methods
macro_rules! generate_error_docs {
    ($errors:expr) => {
        for error in $errors {
            println!("### {}: {}\n", error.code(), error.description());
            println!("**Details:** {}\n", error.details());

            if let Some(help_text) = error.help() {
                println!("**How to fix:**");
                println!("```");
                println!("{help_text}");
                println!("```\n");
            }

            println!("**Example error message:**");
            println!("```");
            println!("{error}");
            println!("```\n");

            println!("**Detailed format:**");
            println!("```");
            println!("{}", error.display_detailed());
            println!("```\n");

            println!("---\n");
        }
    };
}

/// One of each `PuzzleError` variant
fn all_puzzle_error_variants() -> Vec<PuzzleError> {
    vec![
        PuzzleError::EmptyStructure,
        PuzzleError::ReadFailure {
            path: "data/structure0.txt".to_string(),
            message: "No such file or directory (os error 2)".to_string(),
        },
    ]
}

/// One of each `SolverError` variant
fn all_solver_error_variants() -> Vec<SolverError> {
    vec![
        SolverError::from(PuzzleError::EmptyStructure),
        SolverError::OverlapOutOfBounds {
            variable: Variable::new(0, 1, Direction::Down, 5),
            index: 3,
            word: "CAT".to_string(),
        },
    ]
}

fn main() {
    println!("# Error Code Reference\n");
    println!("**⚠️ This document is auto-generated from the source code. Do not edit manually.**\n");

    println!("## Table of Contents\n");
    println!("- [Solver Errors (S001–S002)](#solver-errors)");
    println!("- [Puzzle Errors (P001–P002)](#puzzle-errors)\n");

    println!("## Solver Errors\n");
    println!("Top-level errors from the solver. These wrap puzzle-loading errors or indicate an inconsistent puzzle model.\n");
    println!("An unsatisfiable puzzle is not an error: the CLI prints `No solution.`\n");
    generate_error_docs!(all_solver_error_variants());

    println!("## Puzzle Errors\n");
    println!("Errors that occur when reading or parsing the structure file and word list.\n");
    generate_error_docs!(all_puzzle_error_variants());

    println!("## Error Display Formats\n");
    println!("### Simple Format");
    println!("```");
    println!("Error: <message>");
    println!("```\n");
    println!("### Detailed Format (via `display_detailed()`)");
    println!("```");
    println!("<message> (<code>)");
    println!("<help text if available>");
    println!("```");
}
