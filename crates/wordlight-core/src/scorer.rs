//! Commonness scoring for individual tokens.
//!
//! Maps a relative frequency `r` to `log10(r) + 10`: the most frequent word
//! scores 10.0, a word at one millionth of the maximum scores 4.0. Scores
//! can go negative for known words rarer than 1e-10. Words absent from the
//! table score a sentinel 0.0 — "treat as maximally rare", not an error.

use std::sync::Arc;

use crate::frequency::FrequencyTable;

/// Punctuation removed from tokens before lookup, wherever it occurs.
const STRIP_CHARS: [char; 8] = ['.', ',', '?', '!', '\'', '"', '(', ')'];

/// Score assigned to words absent from the frequency table.
pub const UNKNOWN_WORD_SCORE: f64 = 0.0;

/// Scores raw tokens against a shared [`FrequencyTable`].
///
/// The table is built once by the caller and shared in — scorers hold a
/// reference-counted handle, no hidden global state.
#[derive(Debug, Clone)]
pub struct WordScorer {
    table: Arc<FrequencyTable>,
}

impl WordScorer {
    /// Create a scorer over the given table.
    pub const fn new(table: Arc<FrequencyTable>) -> Self {
        Self { table }
    }

    /// Normalize a raw token into its lookup key: lowercased, with every
    /// occurrence of `. , ? ! ' " ( )` removed (not just at the edges).
    ///
    /// The original token text is untouched; rendering always uses it.
    pub fn normalize_key(raw: &str) -> String {
        raw.trim()
            .to_lowercase()
            .chars()
            .filter(|c| !STRIP_CHARS.contains(c))
            .collect()
    }

    /// Commonness score for a raw token.
    ///
    /// Pure over the table and the input; unknown words return
    /// [`UNKNOWN_WORD_SCORE`], never an error.
    pub fn score(&self, raw_token: &str) -> f64 {
        self.table
            .lookup(&Self::normalize_key(raw_token))
            .map_or(UNKNOWN_WORD_SCORE, |r| r.log10() + 10.0)
    }
}
