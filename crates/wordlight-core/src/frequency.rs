//! Word frequency table built from a ranked unigram count source.
//!
//! The source is a sequence of `{word, count}` records sorted descending by
//! count (e.g. a `word,count` CSV of web unigram counts). Relative frequency
//! is each count divided by the first row's count, so the most frequent word
//! maps to exactly 1.0 and everything else lands in (0, 1].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{FrequencyError, FrequencyResult};

/// One record from the frequency data source.
///
/// `count` stays a string until build time so CSV records map onto this
/// struct directly; parsing happens once, with the word still at hand for
/// error reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencyRow {
    /// The word as it appears in the source.
    pub word: String,
    /// The raw occurrence count, as a numeric string.
    pub count: String,
}

/// Immutable map from word to relative frequency in (0, 1].
///
/// Built once and read-only afterwards — share it via `Arc` across scorers
/// or threads without locking. Rows are assumed pre-sorted descending by
/// count; the first row supplies the maximum. This is not validated: an
/// unsorted source silently rescales every frequency against the wrong
/// maximum.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    entries: HashMap<String, f64>,
}

impl FrequencyTable {
    /// Build a table from materialized source rows.
    ///
    /// # Errors
    ///
    /// - [`FrequencyError::EmptySource`] if `rows` is empty.
    /// - [`FrequencyError::InvalidCount`] if any count fails to parse as a
    ///   non-negative number.
    /// - [`FrequencyError::ZeroMaxCount`] if the first row's count is zero.
    #[tracing::instrument(skip(rows), fields(rows = rows.len()))]
    pub fn build(rows: Vec<FrequencyRow>) -> FrequencyResult<Self> {
        let first = rows.first().ok_or(FrequencyError::EmptySource)?;
        let count_max = parse_count(first)?;
        if count_max == 0.0 {
            return Err(FrequencyError::ZeroMaxCount);
        }

        let mut entries = HashMap::with_capacity(rows.len());
        for row in &rows {
            let count = parse_count(row)?;
            entries.insert(row.word.clone(), count / count_max);
        }

        tracing::debug!(words = entries.len(), "frequency table built");
        Ok(Self { entries })
    }

    /// Relative frequency of `word`, or `None` if it is absent.
    ///
    /// Absence is a normal case, not an error — callers treat unknown words
    /// as maximally rare.
    pub fn lookup(&self, word: &str) -> Option<f64> {
        self.entries.get(word).copied()
    }

    /// Number of distinct words in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table contains no words.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_count(row: &FrequencyRow) -> FrequencyResult<f64> {
    let invalid = || FrequencyError::InvalidCount {
        word: row.word.clone(),
        value: row.count.clone(),
    };
    let count: f64 = row.count.trim().parse().map_err(|_| invalid())?;
    if !count.is_finite() || count < 0.0 {
        return Err(invalid());
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(word: &str, count: &str) -> FrequencyRow {
        FrequencyRow {
            word: word.to_string(),
            count: count.to_string(),
        }
    }

    #[test]
    fn most_frequent_word_scales_to_one() {
        let table = FrequencyTable::build(vec![row("the", "100"), row("zzzyx", "1")]).unwrap();
        assert_eq!(table.lookup("the"), Some(1.0));
        assert_eq!(table.lookup("zzzyx"), Some(0.01));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn absent_word_is_none() {
        let table = FrequencyTable::build(vec![row("the", "100")]).unwrap();
        assert_eq!(table.lookup("missing"), None);
    }

    #[test]
    fn empty_source_errors() {
        let err = FrequencyTable::build(Vec::new()).unwrap_err();
        assert!(matches!(err, FrequencyError::EmptySource));
    }

    #[test]
    fn unparseable_count_errors() {
        let err = FrequencyTable::build(vec![row("the", "lots")]).unwrap_err();
        assert!(matches!(err, FrequencyError::InvalidCount { .. }));
    }

    #[test]
    fn negative_count_errors() {
        let err = FrequencyTable::build(vec![row("the", "100"), row("odd", "-3")]).unwrap_err();
        assert!(matches!(err, FrequencyError::InvalidCount { word, .. } if word == "odd"));
    }

    #[test]
    fn zero_max_count_errors() {
        let err = FrequencyTable::build(vec![row("the", "0")]).unwrap_err();
        assert!(matches!(err, FrequencyError::ZeroMaxCount));
    }

    #[test]
    fn whitespace_around_count_is_tolerated() {
        let table = FrequencyTable::build(vec![row("the", " 100 ")]).unwrap();
        assert_eq!(table.lookup("the"), Some(1.0));
    }
}
