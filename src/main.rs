use clap::Parser;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use xwordgen::crossword::Crossword;
use xwordgen::grid::letter_grid;
use xwordgen::solver::{self, SolveOptions, SolveStatus, SolverError};

/// Crossword grid filler
#[derive(Parser, Debug)]
#[command(
    author,
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"),
    about,
    long_about = None
)]
struct Cli {
    /// Grid structure file ('_' = fillable cell, anything else = blocked)
    structure: String,

    /// Word list file (one word per line, optionally `word;score`)
    words: String,

    /// Also write the filled grid to this file, as the same text printed to stdout
    /// (no image output)
    output: Option<String>,

    /// Give up after this many seconds
    #[arg(short = 't', long)]
    time_limit: Option<f64>,

    /// Give up after this many search steps
    #[arg(short = 's', long)]
    max_steps: Option<u64>,

    /// Skip scored words below this score
    #[arg(short = 'm', long)]
    min_score: Option<i32>,
}

/// Entry point of the xwordgen CLI.
///
/// Delegates to [`try_main`], printing any error in detailed form before
/// exiting with code 1.
fn main() -> ExitCode {
    let debug_enabled = std::env::var("XWORDGEN_DEBUG").is_ok();
    xwordgen::log::init_logger(debug_enabled);

    match try_main() {
        Ok(code) => code,
        Err(e) => {
            if let Some(solver_err) = e.downcast_ref::<SolverError>() {
                eprintln!("Error: {}", solver_err.display_detailed());
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Core application logic.
///
/// 1. Load the structure and word list.
/// 2. Solve with the requested budget.
/// 3. Print the grid (and save it if an output path was given).
fn try_main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let time_limit = cli
        .time_limit
        .map(Duration::try_from_secs_f64)
        .transpose()
        .map_err(|e| format!("invalid --time-limit: {e}"))?;
    let options = SolveOptions { time_limit, max_steps: cli.max_steps };

    let t_load = Instant::now();
    let crossword = Crossword::load_from_paths(&cli.structure, &cli.words, cli.min_score)
        .map_err(SolverError::from)?;
    let load_secs = t_load.elapsed().as_secs_f64();
    log::debug!("{crossword}");

    let result = solver::solve_with_options(&crossword, &options)?;

    let code = match (&result.status, &result.assignment) {
        (SolveStatus::Solved, Some(assignment)) => {
            log::debug!("{}", solver::assignment_to_string(assignment));
            let grid = letter_grid(&crossword, assignment);
            print!("{grid}");
            if let Some(path) = &cli.output {
                std::fs::write(path, grid.to_string())
                    .map_err(|e| format!("failed to write '{path}': {e}"))?;
            }
            ExitCode::SUCCESS
        }
        (SolveStatus::BudgetExhausted { elapsed, steps }, _) => {
            eprintln!(
                "⚠️  Search budget exhausted after {steps} steps ({:.1}s); no solution found within budget",
                elapsed.as_secs_f64()
            );
            ExitCode::FAILURE
        }
        _ => {
            println!("No solution.");
            ExitCode::SUCCESS
        }
    };

    eprintln!(
        "Loaded {} slots and {} words in {:.3}s; searched {} steps ({} backtracks) in {:.3}s.",
        crossword.variables().len(),
        crossword.vocabulary.len(),
        load_secs,
        result.stats.steps,
        result.stats.backtracks,
        result.stats.elapsed.as_secs_f64()
    );

    Ok(code)
}
