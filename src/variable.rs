//! Crossword slots: a start cell, a direction, and a length.
//!
//! Identity is the `(row, col, direction)` triple. Two slots starting at the same
//! cell in different directions are distinct, and the length never takes part in
//! equality, hashing, or ordering.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Direction a slot runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    /// Lowercase name, as used in logs and the WASM output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Across => "across",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One slot of the grid.
///
/// Ordering is row-major on the start cell, with `Across` before `Down` for slots
/// sharing a start cell. Everything that iterates variables (domain store, AC-3
/// arc seeding, MRV tie-breaks) relies on this order being fixed.
#[derive(Debug, Clone, Copy)]
pub struct Variable {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub length: usize,
}

impl Variable {
    #[must_use]
    pub fn new(row: usize, col: usize, direction: Direction, length: usize) -> Self {
        debug_assert!(length > 0, "variable length must be positive");
        Self { row, col, direction, length }
    }

    /// Grid cells covered by this slot, in reading order.
    #[must_use]
    pub fn cells(&self) -> Vec<(usize, usize)> {
        (0..self.length)
            .map(|k| match self.direction {
                Direction::Across => (self.row, self.col + k),
                Direction::Down => (self.row + k, self.col),
            })
            .collect()
    }

    fn key(&self) -> (usize, usize, Direction) {
        (self.row, self.col, self.direction)
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Variable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Variable {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}: {}", self.row, self.col, self.direction, self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_cells_across_and_down() {
        let across = Variable::new(1, 2, Direction::Across, 3);
        assert_eq!(across.cells(), vec![(1, 2), (1, 3), (1, 4)]);

        let down = Variable::new(0, 4, Direction::Down, 2);
        assert_eq!(down.cells(), vec![(0, 4), (1, 4)]);
    }

    #[test]
    fn test_identity_ignores_length() {
        let a = Variable::new(0, 0, Direction::Across, 3);
        let b = Variable::new(0, 0, Direction::Across, 5);
        assert_eq!(a, b);

        let set: HashSet<Variable> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_same_start_different_direction_are_distinct() {
        let across = Variable::new(0, 0, Direction::Across, 3);
        let down = Variable::new(0, 0, Direction::Down, 3);
        assert_ne!(across, down);
        assert!(across < down, "Across sorts before Down at the same start cell");
    }

    #[test]
    fn test_ordering_is_row_major() {
        let mut vars = vec![
            Variable::new(2, 0, Direction::Across, 3),
            Variable::new(0, 3, Direction::Down, 3),
            Variable::new(0, 1, Direction::Down, 3),
        ];
        vars.sort();
        let starts: Vec<_> = vars.iter().map(|v| (v.row, v.col)).collect();
        assert_eq!(starts, vec![(0, 1), (0, 3), (2, 0)]);
    }

    #[test]
    fn test_display() {
        let v = Variable::new(0, 1, Direction::Down, 5);
        assert_eq!(v.to_string(), "(0, 1) down: 5");
    }
}
