//! Error types for loading puzzles, with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each error variant has a unique code (P001-P002) for documentation lookup:
//!
//! - P001: `EmptyStructure` (Structure description has no cells)
//! - P002: `ReadFailure` (Input file could not be read)
//!
//! Solver-level errors (S0xx) live in [`crate::solver::SolverError`] and wrap these.
//!
//! # Examples
//!
//! ```
//! use xwordgen::errors::PuzzleError;
//!
//! let err = PuzzleError::EmptyStructure;
//! assert_eq!(err.code(), "P001");
//! println!("{}", err.display_detailed());
//! ```

/// Errors raised while turning structure/word-list text into a [`crate::crossword::Crossword`].
#[derive(Debug, thiserror::Error)]
pub enum PuzzleError {
    #[error("structure description has no cells")]
    EmptyStructure,

    #[error("failed to read '{path}': {message}")]
    ReadFailure { path: String, message: String },
}

impl PuzzleError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            PuzzleError::EmptyStructure => "P001",
            PuzzleError::ReadFailure { .. } => "P002",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            PuzzleError::EmptyStructure => "Structure description has no cells",
            PuzzleError::ReadFailure { .. } => "Input file could not be read",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            PuzzleError::EmptyStructure => "The structure text was empty or contained only empty lines, so no grid could be built.",
            PuzzleError::ReadFailure { .. } => "The structure file or word-list file could not be opened or was not valid UTF-8.",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            PuzzleError::EmptyStructure => Some("Use one line per grid row, '_' for fillable cells and '#' for blocked cells"),
            PuzzleError::ReadFailure { .. } => Some("Check that the path exists and is readable"),
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}
