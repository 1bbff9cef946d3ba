//! Project an assignment onto grid cells and render it as text.

use crate::crossword::Crossword;
use crate::solver::Assignment;
use std::fmt;

/// Printed for blocked cells.
pub const BLOCKED_CELL: char = '█';

/// Letters placed on the grid, plus which cells are fillable at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterGrid {
    /// `letters[row][col]`; `None` for blocked or unassigned cells.
    pub letters: Vec<Vec<Option<char>>>,
    structure: Vec<Vec<bool>>,
}

/// Write every assigned word into the cells of its slot.
///
/// A pure function of the puzzle and the assignment. Slots missing from the
/// assignment leave their cells empty.
#[must_use]
pub fn letter_grid(crossword: &Crossword, assignment: &Assignment) -> LetterGrid {
    let mut letters = vec![vec![None; crossword.width]; crossword.height];
    for (var, word) in assignment {
        for ((row, col), letter) in var.cells().into_iter().zip(word.chars()) {
            if let Some(cell) = letters.get_mut(row).and_then(|r| r.get_mut(col)) {
                *cell = Some(letter);
            }
        }
    }
    LetterGrid { letters, structure: crossword.structure.clone() }
}

impl LetterGrid {
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        self.letters.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// One string per grid row, as rendered by `Display`.
    #[must_use]
    pub fn rows(&self) -> Vec<String> {
        self.structure
            .iter()
            .zip(&self.letters)
            .map(|(fillable_row, letter_row)| {
                fillable_row
                    .iter()
                    .zip(letter_row)
                    .map(|(&fillable, letter)| if fillable { letter.unwrap_or(' ') } else { BLOCKED_CELL })
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for LetterGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
