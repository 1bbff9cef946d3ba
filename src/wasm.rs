use crate::grid::letter_grid;
use crate::log::init_logger;
use crate::solver::{solve_text, SolveOptions, SolveStatus, SolverError};
use std::time::Duration;
use wasm_bindgen::prelude::*;

/// Structured error information for JavaScript consumers
#[derive(serde::Serialize)]
struct WasmError {
    /// Error code (e.g., "P001", "S002")
    code: String,
    /// Display message
    message: String,
    /// Short description of error type
    description: String,
    /// Detailed explanation
    details: String,
    /// Optional helpful suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
}

impl From<SolverError> for WasmError {
    fn from(e: SolverError) -> Self {
        // surface the underlying PuzzleError rather than the S001 wrapper
        match &e {
            SolverError::Puzzle(pe) => WasmError {
                code: pe.code().to_string(),
                message: pe.to_string(),
                description: pe.description().to_string(),
                details: pe.details().to_string(),
                help: pe.help().map(ToString::to_string),
            },
            SolverError::OverlapOutOfBounds { .. } => WasmError {
                code: e.code().to_string(),
                message: e.to_string(),
                description: e.description().to_string(),
                details: e.details().to_string(),
                help: e.help().map(ToString::to_string),
            },
        }
    }
}

impl From<WasmError> for JsValue {
    fn from(e: WasmError) -> Self {
        let mut msg = format!("Error {}: {}", e.code, e.message);

        if !e.details.is_empty() {
            msg.push_str(&format!("\n\n{}", e.details));
        }

        if let Some(help) = e.help {
            msg.push_str(&format!("\n\nSuggestion: {help}"));
        }

        js_sys::Error::new(&msg).into()
    }
}

/// Initialize logging and the panic hook.
///
/// This function must be called from JavaScript after the WASM module loads.
#[wasm_bindgen]
pub fn initialize(debug_enabled: bool) {
    console_error_panic_hook::set_once();
    init_logger(debug_enabled);
    log::info!("WASM module initialized");
}

#[derive(serde::Serialize)]
struct WasmEntry {
    row: usize,
    col: usize,
    direction: &'static str,
    word: String,
}

#[derive(serde::Serialize)]
struct WasmSolveResult {
    status: &'static str,
    rows: Vec<String>,
    entries: Vec<WasmEntry>,
}

/// JS entry: (structure: string, words: string, time_limit_ms: number | undefined)
///
/// `words` is the raw word-list text (one word per line, optional `;score`).
/// Returns `{ status, rows, entries }`; `rows` is empty unless `status` is `"solved"`.
#[wasm_bindgen]
pub fn solve_crossword_wasm(
    structure: &str,
    words: &str,
    time_limit_ms: Option<u32>,
) -> Result<JsValue, JsValue> {
    let options = SolveOptions {
        time_limit: time_limit_ms.map(|ms| Duration::from_millis(u64::from(ms))),
        max_steps: None,
    };

    let (crossword, result) = solve_text(structure, words, None, &options).map_err(WasmError::from)?;

    let status = match result.status {
        SolveStatus::Solved => "solved",
        SolveStatus::Unsatisfiable => "unsatisfiable",
        SolveStatus::BudgetExhausted { .. } => "budget_exhausted",
    };

    let (rows, entries) = match &result.assignment {
        Some(assignment) => (
            letter_grid(&crossword, assignment).rows(),
            assignment
                .iter()
                .map(|(var, word)| WasmEntry {
                    row: var.row,
                    col: var.col,
                    direction: var.direction.as_str(),
                    word: word.clone(),
                })
                .collect(),
        ),
        None => (Vec::new(), Vec::new()),
    };

    serde_wasm_bindgen::to_value(&WasmSolveResult { status, rows, entries }).map_err(|e| {
        WasmError {
            code: "WASM001".to_string(),
            message: format!("serialization failed: {e}"),
            description: "Failed to serialize result".to_string(),
            details: "The solver result could not be converted to JavaScript format.".to_string(),
            help: Some("This is an internal error. Please report this issue.".to_string()),
        }
        .into()
    })
}
