//! Backtracking search that fills every slot of a [`Crossword`].
//!
//! [`solve`] runs the whole pipeline: node consistency, AC-3 over every arc, then
//! depth-first backtracking with minimum-remaining-values / degree variable
//! selection and least-constraining-value ordering. Domains are frozen once AC-3
//! finishes; each search step extends its own copy of the partial assignment.
//!
//! # Error Handling
//!
//! An unsatisfiable puzzle is a normal outcome (`Ok(None)` / [`SolveStatus::Unsatisfiable`]),
//! not an error. [`SolverError`] is reserved for broken inputs:
//!
//! - S001: `Puzzle` (Puzzle could not be loaded (wraps [`PuzzleError`]))
//! - S002: `OverlapOutOfBounds` (Overlap index past the end of a candidate word)
//!
//! # Examples
//!
//! ```
//! use xwordgen::crossword::Crossword;
//! use xwordgen::solver;
//!
//! let crossword = Crossword::new("___\n_##\n_##", ["CAT", "COW"])?;
//! let assignment = solver::solve(&crossword)?.expect("puzzle is solvable");
//! assert_eq!(assignment.len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Search budget
//!
//! ```
//! use std::time::Duration;
//! use xwordgen::crossword::Crossword;
//! use xwordgen::solver::{self, SolveOptions, SolveStatus};
//!
//! let crossword = Crossword::new("___\n_##\n_##", ["CAT", "COW"])?;
//! let options = SolveOptions { time_limit: Some(Duration::from_secs(5)), max_steps: None };
//! let result = solver::solve_with_options(&crossword, &options)?;
//! match result.status {
//!     SolveStatus::Solved => println!("filled in {} steps", result.stats.steps),
//!     SolveStatus::Unsatisfiable => println!("no fill exists"),
//!     SolveStatus::BudgetExhausted { elapsed, .. } => println!("gave up after {elapsed:?}"),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::consistency::{self, char_at};
use crate::crossword::Crossword;
use crate::domains::Domains;
use crate::errors::PuzzleError;
use crate::variable::Variable;
use instant::Instant;
use log::{debug, info, warn};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::time::Duration;

/// A partial or complete fill: one word per assigned slot.
pub type Assignment = BTreeMap<Variable, String>;

/// How a solver run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveStatus {
    /// Every slot was filled consistently.
    Solved,

    /// No consistent fill exists (a domain emptied, or the search space was exhausted).
    Unsatisfiable,

    /// The step or time budget ran out before the search finished.
    BudgetExhausted { elapsed: Duration, steps: u64 },
}

/// Limits on the search. The default is unlimited.
#[derive(Debug, Clone, Default)]
pub struct SolveOptions {
    /// Wall-clock limit for the whole solve.
    pub time_limit: Option<Duration>,
    /// Maximum number of `backtrack` calls.
    pub max_steps: Option<u64>,
}

/// Counters collected during a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStats {
    /// Number of `backtrack` calls.
    pub steps: u64,
    /// Number of candidate values tried and abandoned.
    pub backtracks: u64,
    /// Sum of all domain sizes once pruning finished.
    pub pruned_domain_size: usize,
    pub elapsed: Duration,
}

/// Result of a solver run (even if it stopped early).
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// The complete assignment, present only when `status` is [`SolveStatus::Solved`].
    pub assignment: Option<Assignment>,
    pub status: SolveStatus,
    pub stats: SearchStats,
}

/// Unified error type for the solver pipeline.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    /// The puzzle itself could not be built.
    #[error("puzzle failure: {0}")]
    Puzzle(#[from] Box<PuzzleError>),

    /// A candidate word is too short for the overlap index of its slot.
    ///
    /// Domains that went through node consistency can't trigger this; it means the
    /// overlap table or the domain store was built inconsistently.
    #[error("overlap index {index} is out of bounds for word \"{word}\" in {variable}")]
    OverlapOutOfBounds { variable: Variable, index: usize, word: String },
}

impl From<PuzzleError> for SolverError {
    fn from(pe: PuzzleError) -> Self {
        SolverError::Puzzle(Box::new(pe))
    }
}

impl SolverError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            SolverError::Puzzle(_) => "S001",
            SolverError::OverlapOutOfBounds { .. } => "S002",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            SolverError::Puzzle(_) => "Puzzle could not be loaded",
            SolverError::OverlapOutOfBounds { .. } => "Overlap index past the end of a candidate word",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            SolverError::Puzzle(_) => "The structure or word list could not be turned into a puzzle. This wraps an underlying PuzzleError (see Puzzle Errors section for specific error codes).",
            SolverError::OverlapOutOfBounds { .. } => "Arc revision looked up the shared letter of two crossing slots, but a candidate word was shorter than the crossing position. Domains are filtered by length before revision, so this indicates an inconsistent overlap table or domain store.",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            SolverError::Puzzle(_) => None, // PuzzleError has its own help
            SolverError::OverlapOutOfBounds { .. } => Some("This is an internal error. Run node consistency before arc consistency."),
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        match self {
            SolverError::Puzzle(pe) => {
                format!("{}\n  caused by: {}", self.code(), pe.display_detailed())
            }
            SolverError::OverlapOutOfBounds { .. } => {
                crate::errors::format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
            }
        }
    }
}

/// Step and wall-clock limits for one search.
struct SearchBudget {
    start: Instant,
    time_limit: Option<Duration>,
    max_steps: Option<u64>,
}

impl SearchBudget {
    fn new(options: &SolveOptions) -> Self {
        Self { start: Instant::now(), time_limit: options.time_limit, max_steps: options.max_steps }
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// True once more than `max_steps` steps were taken or the time limit passed.
    fn expired(&self, steps: u64) -> bool {
        self.max_steps.is_some_and(|max| steps > max)
            || self.time_limit.is_some_and(|limit| self.start.elapsed() >= limit)
    }
}

macro_rules! budget_stop {
    ($solver:expr) => {
        if $solver.budget.expired($solver.stats.steps) {
            $solver.aborted = true;
            return None;
        }
    };
}

/// True iff `assignment` covers exactly the puzzle's variables.
#[must_use]
pub fn assignment_complete(crossword: &Crossword, assignment: &Assignment) -> bool {
    let variables = crossword.variables();
    assignment.len() == variables.len() && variables.iter().all(|v| assignment.contains_key(v))
}

/// Would `x = wx` and `y = wy` be allowed side by side?
///
/// Both words must fit their slots, and crossing slots must agree on the shared letter.
fn pair_consistent(crossword: &Crossword, x: &Variable, wx: &str, y: &Variable, wy: &str) -> bool {
    if wx.chars().count() != x.length || wy.chars().count() != y.length {
        return false;
    }
    match crossword.overlap(x, y) {
        None => true,
        Some((i, j)) => match (char_at(wx, i), char_at(wy, j)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
    }
}

/// True iff every assigned word fits its slot and crossing assigned slots agree.
///
/// Unassigned slots impose nothing.
#[must_use]
pub fn consistent(crossword: &Crossword, assignment: &Assignment) -> bool {
    assignment.iter().all(|(var, word)| {
        word.chars().count() == var.length
            && crossword.neighbors(var).iter().all(|neighbor| {
                assignment
                    .get(neighbor)
                    .map_or(true, |other| pair_consistent(crossword, var, word, neighbor, other))
            })
    })
}

/// Pick the next slot to fill.
///
/// Fewest remaining candidates first; ties go to the slot with the most crossings;
/// remaining ties go to the first slot in (row, col, direction) order.
/// Returns `None` when everything is assigned.
#[must_use]
pub fn select_unassigned_variable(
    crossword: &Crossword,
    domains: &Domains,
    assignment: &Assignment,
) -> Option<Variable> {
    crossword
        .variables()
        .iter()
        .filter(|v| !assignment.contains_key(v))
        .min_by_key(|v| (domains.len_of(v), Reverse(crossword.degree(v))))
        .copied()
}

/// Number of candidates of unassigned neighbors that `var = value` would rule out.
fn ruled_out_count(
    crossword: &Crossword,
    domains: &Domains,
    var: &Variable,
    value: &str,
    assignment: &Assignment,
) -> usize {
    crossword
        .neighbors(var)
        .iter()
        .filter(|neighbor| !assignment.contains_key(neighbor))
        .map(|neighbor| {
            domains
                .words(neighbor)
                .filter(|nv| !pair_consistent(crossword, var, value, neighbor, nv))
                .count()
        })
        .sum()
}

/// Candidates for `var`, least constraining first.
///
/// The sort is stable, so values ruling out equally many neighbor candidates keep
/// alphabetical order.
#[must_use]
pub fn order_domain_values(
    crossword: &Crossword,
    domains: &Domains,
    var: &Variable,
    assignment: &Assignment,
) -> Vec<String> {
    let mut scored: Vec<(usize, &String)> = domains
        .words(var)
        .map(|value| (ruled_out_count(crossword, domains, var, value, assignment), value))
        .collect();
    scored.sort_by_key(|(score, _)| *score);
    scored.into_iter().map(|(_, value)| value.clone()).collect()
}

/// Put an assignment on one line, in slot order, separated with a bullet
#[must_use]
pub fn assignment_to_string(assignment: &Assignment) -> String {
    assignment
        .iter()
        .map(|(var, word)| format!("{var} = {word}"))
        .collect::<Vec<_>>()
        .join(" • ")
}

/// Holds the pruned domain store and budget for one puzzle.
pub struct CrosswordSolver<'a> {
    crossword: &'a Crossword,
    domains: Domains,
    budget: SearchBudget,
    stats: SearchStats,
    aborted: bool,
}

impl<'a> CrosswordSolver<'a> {
    /// A solver with every domain set to the full vocabulary and no budget.
    #[must_use]
    pub fn new(crossword: &'a Crossword) -> Self {
        Self::with_options(crossword, &SolveOptions::default())
    }

    #[must_use]
    pub fn with_options(crossword: &'a Crossword, options: &SolveOptions) -> Self {
        Self {
            crossword,
            domains: Domains::from_vocabulary(crossword),
            budget: SearchBudget::new(options),
            stats: SearchStats::default(),
            aborted: false,
        }
    }

    #[must_use]
    pub fn domains(&self) -> &Domains {
        &self.domains
    }

    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// See [`consistency::enforce_node_consistency`].
    pub fn enforce_node_consistency(&mut self) -> usize {
        consistency::enforce_node_consistency(self.crossword, &mut self.domains)
    }

    /// See [`consistency::ac3`].
    ///
    /// # Errors
    ///
    /// [`SolverError::OverlapOutOfBounds`] if a domain holds words too short for an overlap.
    pub fn ac3(&mut self, initial_arcs: Option<Vec<(Variable, Variable)>>) -> Result<bool, SolverError> {
        consistency::ac3(self.crossword, &mut self.domains, initial_arcs)
    }

    /// Extend `assignment` to a complete, consistent assignment.
    ///
    /// Returns `None` when no extension exists or the budget ran out; the two cases
    /// are told apart by [`SolveResult::status`].
    pub fn backtrack(&mut self, assignment: &Assignment) -> Option<Assignment> {
        self.stats.steps += 1;

        if assignment_complete(self.crossword, assignment) {
            return Some(assignment.clone());
        }

        budget_stop!(self);

        let var = select_unassigned_variable(self.crossword, &self.domains, assignment)?;

        for value in order_domain_values(self.crossword, &self.domains, &var, assignment) {
            let mut extended = assignment.clone();
            extended.insert(var, value);

            if consistent(self.crossword, &extended) {
                if let Some(result) = self.backtrack(&extended) {
                    return Some(result);
                }
                if self.aborted {
                    return None;
                }
            }
            self.stats.backtracks += 1;
        }

        None
    }

    /// Node consistency, AC-3 over every arc, then backtracking from an empty assignment.
    ///
    /// # Errors
    ///
    /// [`SolverError::OverlapOutOfBounds`] if the overlap table and domains disagree.
    pub fn solve(mut self) -> Result<SolveResult, SolverError> {
        let n_vars = self.crossword.variables().len();
        info!("Solving {n_vars} slots with {} candidate words", self.crossword.vocabulary.len());

        self.enforce_node_consistency();
        if self.domains.any_empty() {
            info!("Some slot has no word of the right length");
            return Ok(self.finish(None));
        }

        if !self.ac3(None)? {
            info!("Arc consistency emptied a domain; no fill exists");
            return Ok(self.finish(None));
        }

        self.stats.pruned_domain_size = self.domains.total_size();
        for (var, words) in self.domains.iter() {
            debug!("{var}: {} candidates", words.len());
        }
        info!("Pruning left {} candidates; starting search", self.stats.pruned_domain_size);

        let assignment = self.backtrack(&Assignment::new());
        Ok(self.finish(assignment))
    }

    fn finish(mut self, assignment: Option<Assignment>) -> SolveResult {
        self.stats.elapsed = self.budget.elapsed();
        if self.stats.pruned_domain_size == 0 {
            self.stats.pruned_domain_size = self.domains.total_size();
        }

        let status = if assignment.is_some() {
            SolveStatus::Solved
        } else if self.aborted {
            warn!(
                "Search budget exhausted after {} steps ({:.3}s)",
                self.stats.steps,
                self.stats.elapsed.as_secs_f64()
            );
            SolveStatus::BudgetExhausted { elapsed: self.stats.elapsed, steps: self.stats.steps }
        } else {
            SolveStatus::Unsatisfiable
        };

        info!(
            "Search finished: {status:?} after {} steps, {} backtracks",
            self.stats.steps, self.stats.backtracks
        );

        debug_assert!(
            assignment.as_ref().map_or(true, |a| assignment_complete(self.crossword, a) && consistent(self.crossword, a)),
            "a returned assignment must be complete and consistent"
        );

        SolveResult { assignment, status, stats: self.stats }
    }
}

/// Fill `crossword` with no search budget. `Ok(None)` means no fill exists.
///
/// # Errors
///
/// [`SolverError::OverlapOutOfBounds`] if the overlap table and domains disagree.
pub fn solve(crossword: &Crossword) -> Result<Option<Assignment>, SolverError> {
    Ok(solve_with_options(crossword, &SolveOptions::default())?.assignment)
}

/// Fill `crossword` within the limits in `options`.
///
/// # Errors
///
/// [`SolverError::OverlapOutOfBounds`] if the overlap table and domains disagree.
pub fn solve_with_options(crossword: &Crossword, options: &SolveOptions) -> Result<SolveResult, SolverError> {
    CrosswordSolver::with_options(crossword, options).solve()
}

/// Build a puzzle from structure and word-list text, then solve it.
///
/// # Errors
///
/// [`SolverError::Puzzle`] if the structure is empty, or any error from [`solve_with_options`].
pub fn solve_text(
    structure_text: &str,
    words_text: &str,
    min_score: Option<i32>,
    options: &SolveOptions,
) -> Result<(Crossword, SolveResult), SolverError> {
    let crossword = Crossword::parse(structure_text, words_text, min_score)?;
    let result = solve_with_options(&crossword, options)?;
    Ok((crossword, result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::Direction;
    use std::collections::BTreeSet;

    const CORNER: &str = "___\n_##\n_##";
    // across ends where down begins
    const OFFSET: &str = "___\n##_\n##_";
    // four slots around a 1x2 hole
    const LATTICE: &str = "____\n_##_\n____";

    fn across() -> Variable {
        Variable::new(0, 0, Direction::Across, 3)
    }

    fn down() -> Variable {
        Variable::new(0, 0, Direction::Down, 3)
    }

    fn set(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| (*w).to_string()).collect()
    }

    fn assign(pairs: &[(Variable, &str)]) -> Assignment {
        pairs.iter().map(|(v, w)| (*v, (*w).to_string())).collect()
    }

    #[test]
    fn test_minimal_crossing_uses_same_word() {
        let crossword = Crossword::new(CORNER, ["AAA", "BBB"]).unwrap();
        let assignment = solve(&crossword).unwrap().expect("should be solvable");

        assert_eq!(assignment.len(), 2);
        let a = &assignment[&across()];
        let d = &assignment[&down()];
        assert_eq!(a, d);
        assert!(a == "AAA" || a == "BBB");
    }

    #[test]
    fn test_unsatisfiable_crossing_returns_none() {
        let crossword = Crossword::new(OFFSET, ["ABC", "XYZ"]).unwrap();
        assert!(solve(&crossword).unwrap().is_none());

        let result = solve_with_options(&crossword, &SolveOptions::default()).unwrap();
        assert_eq!(result.status, SolveStatus::Unsatisfiable);
        // AC-3 caught it, so the search never ran
        assert_eq!(result.stats.steps, 0);
    }

    #[test]
    fn test_missing_word_length_is_unsatisfiable() {
        let crossword = Crossword::new(CORNER, ["AB", "ABCD"]).unwrap();
        let result = solve_with_options(&crossword, &SolveOptions::default()).unwrap();
        assert_eq!(result.status, SolveStatus::Unsatisfiable);
        assert!(result.assignment.is_none());
    }

    #[test]
    fn test_empty_puzzle_solves_to_empty_assignment() {
        let crossword = Crossword::new("_#_\n###", Vec::<String>::new()).unwrap();
        assert!(crossword.variables().is_empty());
        let assignment = solve(&crossword).unwrap();
        assert_eq!(assignment, Some(Assignment::new()));
    }

    #[test]
    fn test_empty_vocabulary_is_unsatisfiable() {
        let crossword = Crossword::new(CORNER, Vec::<String>::new()).unwrap();
        assert!(solve(&crossword).unwrap().is_none());
    }

    #[test]
    fn test_lattice_solution_is_consistent() {
        let words = ["ABCD", "AXYB", "DXYC", "BCDA", "ABC", "DEF", "BAD", "CAB"];
        let crossword = Crossword::new(LATTICE, words).unwrap();
        let assignment = solve(&crossword).unwrap().expect("lattice has a fill");

        assert!(assignment_complete(&crossword, &assignment));
        assert!(consistent(&crossword, &assignment));
        for (var, word) in &assignment {
            assert_eq!(word.len(), var.length);
            for neighbor in crossword.neighbors(var) {
                let (i, j) = crossword.overlap(var, neighbor).unwrap();
                assert_eq!(word.as_bytes()[i], assignment[neighbor].as_bytes()[j]);
            }
        }
        assert_eq!(assignment[&Variable::new(0, 0, Direction::Across, 4)], "BCDA");
        assert_eq!(assignment[&Variable::new(2, 0, Direction::Across, 4)], "DXYC");
    }

    #[test]
    fn test_assignment_complete() {
        let crossword = Crossword::new(CORNER, ["AAA"]).unwrap();
        assert!(!assignment_complete(&crossword, &Assignment::new()));
        assert!(!assignment_complete(&crossword, &assign(&[(across(), "AAA")])));
        assert!(assignment_complete(&crossword, &assign(&[(across(), "AAA"), (down(), "AAA")])));

        let stranger = Variable::new(4, 4, Direction::Across, 3);
        assert!(!assignment_complete(&crossword, &assign(&[(across(), "AAA"), (stranger, "AAA")])));
    }

    #[test]
    fn test_consistent_checks_length_and_overlap() {
        let crossword = Crossword::new(CORNER, ["AAA"]).unwrap();
        assert!(consistent(&crossword, &Assignment::new()));
        assert!(consistent(&crossword, &assign(&[(across(), "CAT")])));
        assert!(!consistent(&crossword, &assign(&[(across(), "CATS")])));
        assert!(consistent(&crossword, &assign(&[(across(), "CAT"), (down(), "COW")])));
        assert!(!consistent(&crossword, &assign(&[(across(), "CAT"), (down(), "DOG")])));
    }

    #[test]
    fn test_least_constraining_value_first() {
        let crossword = Crossword::new(CORNER, Vec::<String>::new()).unwrap();
        let mut domains = Domains::from_vocabulary(&crossword);
        domains.set(across(), set(&["ABC", "XYZ"]));
        domains.set(down(), set(&["AAA", "XBB", "XCC"]));

        // ABC rules out XBB and XCC; XYZ rules out only AAA
        let ordered = order_domain_values(&crossword, &domains, &across(), &Assignment::new());
        assert_eq!(ordered, vec!["XYZ", "ABC"]);
    }

    #[test]
    fn test_assigned_neighbors_do_not_count() {
        let crossword = Crossword::new(CORNER, Vec::<String>::new()).unwrap();
        let mut domains = Domains::from_vocabulary(&crossword);
        domains.set(across(), set(&["ABC", "XYZ"]));
        domains.set(down(), set(&["AAA", "XBB", "XCC"]));

        let assignment = assign(&[(down(), "AAA")]);
        let ordered = order_domain_values(&crossword, &domains, &across(), &assignment);
        assert_eq!(ordered, vec!["ABC", "XYZ"], "equal scores keep alphabetical order");
    }

    #[test]
    fn test_mrv_picks_smallest_domain() {
        let crossword = Crossword::new(CORNER, Vec::<String>::new()).unwrap();
        let mut domains = Domains::from_vocabulary(&crossword);
        domains.set(across(), set(&["AAA", "BBB", "CCC"]));
        domains.set(down(), set(&["AAA"]));

        let chosen = select_unassigned_variable(&crossword, &domains, &Assignment::new());
        assert_eq!(chosen, Some(down()));
    }

    #[test]
    fn test_mrv_tie_broken_by_degree() {
        // bottom row crosses three downs; each down crosses two acrosses
        let crossword = Crossword::new("_____\n_#_#_\n_____", Vec::<String>::new()).unwrap();
        let top = Variable::new(0, 0, Direction::Across, 5);
        let bottom = Variable::new(2, 0, Direction::Across, 5);
        assert_eq!(crossword.degree(&bottom), 3);

        let mut domains = Domains::from_vocabulary(&crossword);
        for v in crossword.variables() {
            domains.set(*v, set(&["AAA", "BBB"]));
        }
        domains.set(top, set(&["AAAAA", "BBBBB", "CCCCC"]));
        domains.set(bottom, set(&["AAAAA", "BBBBB"]));

        let chosen = select_unassigned_variable(&crossword, &domains, &Assignment::new());
        assert_eq!(chosen, Some(bottom));
    }

    #[test]
    fn test_full_ties_use_slot_order() {
        let crossword = Crossword::new(CORNER, ["AAA", "BBB"]).unwrap();
        let domains = Domains::from_vocabulary(&crossword);
        assert_eq!(select_unassigned_variable(&crossword, &domains, &Assignment::new()), Some(across()));

        let assignment = assign(&[(across(), "AAA")]);
        assert_eq!(select_unassigned_variable(&crossword, &domains, &assignment), Some(down()));

        let full = assign(&[(across(), "AAA"), (down(), "AAA")]);
        assert_eq!(select_unassigned_variable(&crossword, &domains, &full), None);
    }

    #[test]
    fn test_backtrack_without_pruning_exhausts_search() {
        let crossword = Crossword::new(OFFSET, ["ABC", "XYZ"]).unwrap();
        let mut solver = CrosswordSolver::new(&crossword);
        solver.enforce_node_consistency();

        assert!(solver.backtrack(&Assignment::new()).is_none());
        // two values for the first slot, each failing against both values of the second
        assert_eq!(solver.stats().backtracks, 2 * 2 + 2);
    }

    #[test]
    fn test_backtrack_extends_partial_assignment() {
        let crossword = Crossword::new(CORNER, ["AAA", "BBB"]).unwrap();
        let mut solver = CrosswordSolver::new(&crossword);
        solver.enforce_node_consistency();

        let result = solver.backtrack(&assign(&[(down(), "BBB")])).unwrap();
        assert_eq!(result[&across()], "BBB");
    }

    #[test]
    fn test_step_budget_reports_exhaustion() {
        let crossword = Crossword::new(CORNER, ["AAA", "BBB"]).unwrap();
        let options = SolveOptions { time_limit: None, max_steps: Some(0) };
        let result = solve_with_options(&crossword, &options).unwrap();

        assert!(result.assignment.is_none());
        assert!(matches!(result.status, SolveStatus::BudgetExhausted { steps: 1, .. }));
    }

    #[test]
    fn test_time_budget_reports_exhaustion() {
        let crossword = Crossword::new(CORNER, ["AAA", "BBB"]).unwrap();
        let options = SolveOptions { time_limit: Some(Duration::ZERO), max_steps: None };
        let result = solve_with_options(&crossword, &options).unwrap();
        assert!(matches!(result.status, SolveStatus::BudgetExhausted { .. }));
    }

    #[test]
    fn test_generous_budget_still_solves() {
        let crossword = Crossword::new(CORNER, ["AAA", "BBB"]).unwrap();
        let options = SolveOptions { time_limit: Some(Duration::from_secs(60)), max_steps: Some(100) };
        let result = solve_with_options(&crossword, &options).unwrap();
        assert_eq!(result.status, SolveStatus::Solved);
        assert_eq!(result.stats.steps, 3);
    }

    #[test]
    fn test_solve_text_normalizes_words() {
        let (crossword, result) = solve_text(CORNER, "aaa\nbbb;10", Some(50), &SolveOptions::default()).unwrap();
        assert_eq!(crossword.vocabulary.len(), 1);
        let assignment = result.assignment.unwrap();
        assert_eq!(assignment[&across()], "AAA");
    }

    #[test]
    fn test_solve_text_empty_structure() {
        let err = solve_text("", "AAA", None, &SolveOptions::default()).unwrap_err();
        assert!(matches!(err, SolverError::Puzzle(ref pe) if matches!(**pe, PuzzleError::EmptyStructure)));
    }

    #[test]
    fn test_assignment_to_string() {
        let s = assignment_to_string(&assign(&[(down(), "BBB"), (across(), "AAA")]));
        assert_eq!(s, "(0, 0) across: 3 = AAA • (0, 0) down: 3 = BBB");
    }

    mod error_tests {
        use super::*;

        fn out_of_bounds() -> SolverError {
            SolverError::OverlapOutOfBounds { variable: across(), index: 4, word: "CAT".to_string() }
        }

        #[test]
        fn test_error_codes_are_valid() {
            let puzzle_err = SolverError::from(PuzzleError::EmptyStructure);
            assert_eq!(puzzle_err.code(), "S001");
            assert_eq!(out_of_bounds().code(), "S002");
        }

        #[test]
        fn test_display_detailed_format() {
            let detailed = out_of_bounds().display_detailed();
            assert!(detailed.contains("S002"));
            assert!(detailed.contains("CAT"));
            assert!(detailed.contains("node consistency"), "should include help text");
        }

        #[test]
        fn test_puzzle_failure_error_chain() {
            let detailed = SolverError::from(PuzzleError::EmptyStructure).display_detailed();
            assert!(detailed.contains("S001"));
            assert!(detailed.contains("caused by"));
            assert!(detailed.contains("P001"));
        }

        #[test]
        fn test_error_display_consistency() {
            let err = out_of_bounds();
            assert!(format!("{err:?}").contains("OverlapOutOfBounds"));
            assert!(!err.to_string().contains("OverlapOutOfBounds"));
        }
    }
}
