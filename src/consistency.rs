//! Domain pruning: node consistency (word length) and arc consistency (AC-3).
//!
//! Both passes only shrink the [`Domains`] store. They run once, before search starts.

use crate::crossword::Crossword;
use crate::domains::Domains;
use crate::solver::SolverError;
use crate::variable::Variable;
use log::debug;
use std::collections::{BTreeSet, VecDeque};

/// Character at `index` of `word`, counting chars rather than bytes.
pub(crate) fn char_at(word: &str, index: usize) -> Option<char> {
    word.chars().nth(index)
}

/// Like [`char_at`], but a missing position is an overlap-table/domain mismatch.
pub(crate) fn checked_char_at(var: &Variable, word: &str, index: usize) -> Result<char, SolverError> {
    char_at(word, index).ok_or_else(|| SolverError::OverlapOutOfBounds {
        variable: *var,
        index,
        word: word.to_string(),
    })
}

/// Drop every candidate whose length differs from its variable's length.
///
/// Returns the total number of words removed.
pub fn enforce_node_consistency(crossword: &Crossword, domains: &mut Domains) -> usize {
    let mut removed = 0;
    for var in crossword.variables() {
        removed += domains.retain(var, |w| w.chars().count() == var.length);
    }
    debug!("node consistency removed {removed} candidates");
    removed
}

/// Make `x` arc consistent with `y`.
///
/// Removes from `x`'s domain every word with no partner in `y`'s domain agreeing
/// at the overlap. Returns whether anything was removed. `y`'s domain is never
/// touched, and slots that don't cross are left alone.
///
/// # Errors
///
/// [`SolverError::OverlapOutOfBounds`] if a candidate is too short for the overlap
/// index (i.e. the domain was not node consistent).
pub fn revise(
    crossword: &Crossword,
    domains: &mut Domains,
    x: &Variable,
    y: &Variable,
) -> Result<bool, SolverError> {
    let Some((i, j)) = crossword.overlap(x, y) else {
        return Ok(false);
    };

    // letters `y` can still put in the shared cell
    let supported: BTreeSet<char> = domains
        .words(y)
        .map(|v| checked_char_at(y, v, j))
        .collect::<Result<_, _>>()?;

    let mut unsupported = Vec::new();
    for w in domains.words(x) {
        if !supported.contains(&checked_char_at(x, w, i)?) {
            unsupported.push(w.clone());
        }
    }

    if unsupported.is_empty() {
        return Ok(false);
    }
    domains.remove_all(x, &unsupported);
    Ok(true)
}

/// Every ordered pair of distinct variables, in canonical order.
#[must_use]
pub fn all_arcs(crossword: &Crossword) -> Vec<(Variable, Variable)> {
    let vars = crossword.variables();
    vars.iter()
        .flat_map(|&x| vars.iter().filter(move |&&y| y != x).map(move |&y| (x, y)))
        .collect()
}

/// Propagate arc consistency to a fixpoint.
///
/// The worklist starts from `initial_arcs`, or from [`all_arcs`] when `None`, and is
/// processed first-in first-out. Whenever revising `(x, y)` shrinks `x`, every arc
/// `(z, x)` with `z ∉ {x, y}` is queued again; only slots crossing `x` can be
/// affected, so only those are queued.
///
/// Returns `Ok(false)` if some domain is empty on entry or becomes empty, `Ok(true)`
/// otherwise. A slot with no crossings is never revised, so its domain is checked up front.
///
/// # Errors
///
/// Propagates [`SolverError::OverlapOutOfBounds`] from [`revise`].
pub fn ac3(
    crossword: &Crossword,
    domains: &mut Domains,
    initial_arcs: Option<Vec<(Variable, Variable)>>,
) -> Result<bool, SolverError> {
    if domains.any_empty() {
        debug!("ac3: a domain is already empty");
        return Ok(false);
    }

    let mut queue: VecDeque<(Variable, Variable)> =
        initial_arcs.unwrap_or_else(|| all_arcs(crossword)).into();
    let mut revisions = 0usize;

    while let Some((x, y)) = queue.pop_front() {
        if !revise(crossword, domains, &x, &y)? {
            continue;
        }
        revisions += 1;

        if domains.len_of(&x) == 0 {
            debug!("ac3: domain of {x} emptied while revising against {y}");
            return Ok(false);
        }
        for z in crossword.neighbors(&x) {
            if *z != y {
                queue.push_back((*z, x));
            }
        }
    }

    debug!("ac3 reached fixpoint after {revisions} revisions");
    Ok(true)
}
