//! Load and preprocess the vocabulary used to fill the grid
//!
//! The input is newline-delimited: one word per line. A line may optionally carry a
//! `;score` suffix (the format used by scored crossword word lists); when a minimum
//! score is requested, scored words below it are dropped.
//!
//! The parsing logic:
//! - Lines are trimmed; empty lines are skipped.
//! - `word;score` lines whose score is not an integer are skipped.
//! - Lines without a `;` are always kept (unscored words pass any score filter).
//! - All words are normalized to uppercase.
//! - The final list is deduplicated and sorted by length first, then alphabetically.
//!
//! `parse_from_str` never touches the filesystem, so it works in WASM builds.
//! `load_from_path` is native-only.

use crate::errors::PuzzleError;

/// A processed, ready-to-use vocabulary.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    /// Uppercase words, sorted by (length, alphabetical).
    /// Example: `["AB", "CAT", "DOG", "APPLE"]`
    pub words: Vec<String>,
}

impl WordList {
    /// Parse a raw word list from an in-memory string.
    ///
    /// # Arguments
    /// * `contents`: The raw file contents. Each line is `word` or `word;score`.
    /// * `min_score`: If set, scored words below this are skipped.
    pub fn parse_from_str(contents: &str, min_score: Option<i32>) -> WordList {
        let mut words: Vec<String> = contents
            .lines()
            .filter_map(|raw_line| {
                let line = raw_line.trim();
                if line.is_empty() {
                    return None;
                }

                let word_raw = match line.split_once(';') {
                    Some((word_raw, score_raw)) => {
                        let score: i32 = score_raw.trim().parse().ok()?;
                        if min_score.is_some_and(|min| score < min) {
                            return None;
                        }
                        word_raw
                    }
                    None => line,
                };

                let word = word_raw.trim().to_uppercase();
                (!word.is_empty()).then_some(word)
            })
            .collect();

        // dedup only removes adjacent duplicates, so sort alphabetically first
        sort_dedup_words(&mut words);

        WordList { words }
    }

    /// Native-only convenience method: read from a file path and parse.
    ///
    /// # Errors
    ///
    /// Will return [`PuzzleError::ReadFailure`] if unable to read a file at `path`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path<P: AsRef<std::path::Path>>(
        path: P,
        min_score: Option<i32>,
    ) -> Result<WordList, PuzzleError> {
        let path_ref = path.as_ref();
        let data = std::fs::read_to_string(path_ref).map_err(|e| PuzzleError::ReadFailure {
            path: path_ref.display().to_string(),
            message: e.to_string(),
        })?;

        Ok(Self::parse_from_str(&data, min_score))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn sort_dedup_words(words: &mut Vec<String>) {
    words.sort();
    words.dedup();
    words.sort_by(|a, b| {
        match a.chars().count().cmp(&b.chars().count()) {
            std::cmp::Ordering::Equal => a.cmp(b),
            other => other,
        }
    });
}
