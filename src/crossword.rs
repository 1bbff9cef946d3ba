//! The puzzle model: grid structure, slot variables, vocabulary, and the overlap table.
//!
//! Structure text is one line per row. `_` marks a fillable cell; any other character
//! is blocked. Rows shorter than the widest row are padded with blocked cells.
//!
//! # Example
//!
//! ```
//! use xwordgen::crossword::Crossword;
//!
//! let crossword = Crossword::new("___\n_##\n_##", ["CAT", "COW"])?;
//! assert_eq!(crossword.variables().len(), 2);
//! # Ok::<(), xwordgen::errors::PuzzleError>(())
//! ```

use crate::errors::PuzzleError;
use crate::variable::{Direction, Variable};
use crate::word_list::WordList;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Marker for a fillable cell in structure text.
pub const FILLABLE_CELL: char = '_';

static NO_NEIGHBORS: BTreeSet<Variable> = BTreeSet::new();

/// Character positions `(index_in_x, index_in_y)` at which two slots cross.
pub type Overlap = (usize, usize);

/// Immutable description of a puzzle. Built once; never mutated by the solver.
#[derive(Debug, Clone)]
pub struct Crossword {
    pub height: usize,
    pub width: usize,
    /// `structure[row][col]` is true for fillable cells.
    pub structure: Vec<Vec<bool>>,
    pub vocabulary: BTreeSet<String>,
    variables: BTreeSet<Variable>,
    overlaps: HashMap<(Variable, Variable), Option<Overlap>>,
    neighbors: HashMap<Variable, BTreeSet<Variable>>,
}

impl Crossword {
    /// Build a puzzle from structure text and a vocabulary.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::EmptyStructure`] if the structure has no cells.
    pub fn new<I, S>(structure_text: &str, vocabulary: I) -> Result<Self, PuzzleError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let structure = parse_structure(structure_text)?;
        Ok(Self::from_structure(structure, vocabulary.into_iter().map(Into::into).collect()))
    }

    /// Build a puzzle from an already-parsed grid of fillable flags.
    ///
    /// Rows shorter than the widest row are padded with blocked cells.
    #[must_use]
    pub fn from_structure(mut structure: Vec<Vec<bool>>, vocabulary: BTreeSet<String>) -> Self {
        let height = structure.len();
        let width = structure.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut structure {
            row.resize(width, false);
        }

        let variables = find_variables(&structure);
        let overlaps = compute_overlaps(&variables);

        let mut neighbors: HashMap<Variable, BTreeSet<Variable>> =
            variables.iter().map(|&v| (v, BTreeSet::new())).collect();
        for (&(x, y), overlap) in &overlaps {
            if overlap.is_some() {
                neighbors.entry(x).or_default().insert(y);
            }
        }

        Self { height, width, structure, vocabulary, variables, overlaps, neighbors }
    }

    /// Native-only: load the structure file and word-list file from disk.
    ///
    /// # Errors
    ///
    /// Will return a [`PuzzleError`] if either file cannot be read or the structure is empty.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_paths<P, Q>(
        structure_path: P,
        words_path: Q,
        min_score: Option<i32>,
    ) -> Result<Self, PuzzleError>
    where
        P: AsRef<std::path::Path>,
        Q: AsRef<std::path::Path>,
    {
        let structure_path = structure_path.as_ref();
        let structure_text = std::fs::read_to_string(structure_path).map_err(|e| {
            PuzzleError::ReadFailure {
                path: structure_path.display().to_string(),
                message: e.to_string(),
            }
        })?;
        let word_list = WordList::load_from_path(words_path, min_score)?;
        Self::new(&structure_text, word_list.words)
    }

    /// Same as [`Crossword::new`], but runs the words through the word-list normalizer
    /// (uppercase, dedup, optional score filter) first.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::EmptyStructure`] if the structure has no cells.
    pub fn parse(structure_text: &str, words_text: &str, min_score: Option<i32>) -> Result<Self, PuzzleError> {
        let word_list = WordList::parse_from_str(words_text, min_score);
        Self::new(structure_text, word_list.words)
    }

    /// All slots, in canonical (row, col, direction) order.
    #[must_use]
    pub fn variables(&self) -> &BTreeSet<Variable> {
        &self.variables
    }

    /// Where `x` and `y` cross, as `(index_in_x, index_in_y)`.
    ///
    /// `None` for slots that share no cell, for `x == y`, and for unknown slots.
    #[must_use]
    pub fn overlap(&self, x: &Variable, y: &Variable) -> Option<Overlap> {
        self.overlaps.get(&(*x, *y)).copied().flatten()
    }

    /// The full overlap table over ordered pairs of distinct variables.
    #[must_use]
    pub fn overlaps(&self) -> &HashMap<(Variable, Variable), Option<Overlap>> {
        &self.overlaps
    }

    /// Slots sharing a cell with `var`, in canonical order.
    #[must_use]
    pub fn neighbors(&self, var: &Variable) -> &BTreeSet<Variable> {
        self.neighbors.get(var).unwrap_or(&NO_NEIGHBORS)
    }

    /// Number of slots crossing `var`.
    #[must_use]
    pub fn degree(&self, var: &Variable) -> usize {
        self.neighbors(var).len()
    }

    #[must_use]
    pub fn is_fillable(&self, row: usize, col: usize) -> bool {
        self.structure.get(row).and_then(|r| r.get(col)).copied().unwrap_or(false)
    }
}

impl fmt::Display for Crossword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}x{} grid, {} slots, {} words", self.width, self.height, self.variables.len(), self.vocabulary.len())?;
        for v in &self.variables {
            writeln!(f, "  {v} ({} crossings)", self.degree(v))?;
        }
        Ok(())
    }
}

/// Parse structure text into a rectangular grid of fillable flags.
fn parse_structure(text: &str) -> Result<Vec<Vec<bool>>, PuzzleError> {
    let lines: Vec<&str> = text.lines().map(|line| line.trim_end_matches('\r')).collect();
    let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
    if width == 0 {
        return Err(PuzzleError::EmptyStructure);
    }

    // padding happens in `Crossword::from_structure`
    Ok(lines.iter().map(|line| line.chars().map(|c| c == FILLABLE_CELL).collect()).collect())
}

/// Collect every maximal run of two or more fillable cells, in both directions.
fn find_variables(structure: &[Vec<bool>]) -> BTreeSet<Variable> {
    let height = structure.len();
    let width = structure.first().map_or(0, Vec::len);
    let fillable = |row: usize, col: usize| structure[row][col];

    let mut variables = BTreeSet::new();
    for row in 0..height {
        for col in 0..width {
            if !fillable(row, col) {
                continue;
            }

            if col == 0 || !fillable(row, col - 1) {
                let length = (col..width).take_while(|&c| fillable(row, c)).count();
                if length > 1 {
                    variables.insert(Variable::new(row, col, Direction::Across, length));
                }
            }

            if row == 0 || !fillable(row - 1, col) {
                let length = (row..height).take_while(|&r| fillable(r, col)).count();
                if length > 1 {
                    variables.insert(Variable::new(row, col, Direction::Down, length));
                }
            }
        }
    }
    variables
}

fn compute_overlaps(variables: &BTreeSet<Variable>) -> HashMap<(Variable, Variable), Option<Overlap>> {
    let cells: HashMap<Variable, Vec<(usize, usize)>> =
        variables.iter().map(|&v| (v, v.cells())).collect();

    let mut overlaps = HashMap::with_capacity(variables.len() * variables.len());
    for x in variables {
        for y in variables {
            if x == y {
                continue;
            }
            let overlap = cells[x].iter().enumerate().find_map(|(i, cell)| {
                cells[y].iter().position(|other| other == cell).map(|j| (i, j))
            });
            overlaps.insert((*x, *y), overlap);
        }
    }
    overlaps
}
