//! Per-variable candidate-word sets.
//!
//! Every variable starts with the full vocabulary. The consistency passes only ever
//! remove words; the search reads the store but never writes it.

use crate::crossword::Crossword;
use crate::variable::Variable;
use std::collections::{BTreeMap, BTreeSet};

/// Candidate words for each variable.
///
/// Backed by ordered collections so iteration (and therefore every tie-break that
/// falls back to iteration order) is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Domains {
    inner: BTreeMap<Variable, BTreeSet<String>>,
}

impl Domains {
    /// Give every variable of `crossword` a copy of the full vocabulary.
    #[must_use]
    pub fn from_vocabulary(crossword: &Crossword) -> Self {
        let inner = crossword
            .variables()
            .iter()
            .map(|&v| (v, crossword.vocabulary.clone()))
            .collect();
        Self { inner }
    }

    /// Candidate words for `var`, or `None` for variables the store doesn't know.
    #[must_use]
    pub fn get(&self, var: &Variable) -> Option<&BTreeSet<String>> {
        self.inner.get(var)
    }

    /// Number of remaining candidates for `var`.
    #[must_use]
    pub fn len_of(&self, var: &Variable) -> usize {
        self.inner.get(var).map_or(0, BTreeSet::len)
    }

    /// Iterate candidates of `var` in alphabetical order.
    pub fn words(&self, var: &Variable) -> impl Iterator<Item = &String> {
        self.inner.get(var).into_iter().flatten()
    }

    /// Replace the candidate set of `var` wholesale.
    pub fn set(&mut self, var: Variable, words: BTreeSet<String>) {
        self.inner.insert(var, words);
    }

    /// Keep only the candidates of `var` for which `keep` returns true.
    /// Returns the number of words removed.
    pub fn retain<F>(&mut self, var: &Variable, keep: F) -> usize
    where
        F: FnMut(&String) -> bool,
    {
        let Some(words) = self.inner.get_mut(var) else {
            return 0;
        };
        let before = words.len();
        words.retain(keep);
        before - words.len()
    }

    /// Remove each of `removed` from the candidates of `var`.
    pub fn remove_all(&mut self, var: &Variable, removed: &[String]) {
        if let Some(words) = self.inner.get_mut(var) {
            for w in removed {
                words.remove(w);
            }
        }
    }

    /// True if some variable has no candidates left.
    #[must_use]
    pub fn any_empty(&self) -> bool {
        self.inner.values().any(BTreeSet::is_empty)
    }

    /// Total number of candidate words across all variables.
    #[must_use]
    pub fn total_size(&self) -> usize {
        self.inner.values().map(BTreeSet::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &BTreeSet<String>)> {
        self.inner.iter()
    }
}
