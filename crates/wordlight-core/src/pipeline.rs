//! Document pipeline: tokenize, score, smooth, mask, render.
//!
//! [`Highlighter`] ties the stages together over a single document.
//! Tokenization is whitespace splitting — each token's original text is
//! carried through to the output untouched; only the lookup key is
//! normalized.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::frequency::FrequencyTable;
use crate::render::{self, HighlightStyle};
use crate::scorer::WordScorer;
use crate::smoothing::{self, EnsembleWeights};

/// Default smoothing window (positions on each side; odd windows center best).
pub const DEFAULT_WINDOW: usize = 3;

/// Default smoothed-score threshold separating highlighted from plain words.
pub const DEFAULT_THRESHOLD: f64 = 4.5;

/// A token with its raw and window-smoothed commonness scores.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScoredWord {
    /// The original token text.
    pub word: String,
    /// Raw commonness score: `log10(relative frequency) + 10`, or 0.0 for
    /// unknown words. At most 10.0; can be negative for very rare known
    /// words.
    pub raw_score: f64,
    /// Weighted ensemble of windowed median/mean/max and the raw score.
    pub smoothed_score: f64,
}

/// A token with its highlight flag.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MaskedWord {
    /// The original token text.
    pub word: String,
    /// Whether the smoothed score reached the threshold.
    pub highlighted: bool,
}

/// Scores, masks, and renders documents against a shared frequency table.
///
/// Every operation is a pure function over the immutable table and its
/// input; one `Highlighter` can serve any number of calls (or threads).
#[derive(Debug, Clone)]
pub struct Highlighter {
    scorer: WordScorer,
    window: usize,
    threshold: f64,
    weights: EnsembleWeights,
}

impl Highlighter {
    /// Create a highlighter with the default window, threshold, and weights.
    pub fn new(table: Arc<FrequencyTable>) -> Self {
        Self {
            scorer: WordScorer::new(table),
            window: DEFAULT_WINDOW,
            threshold: DEFAULT_THRESHOLD,
            weights: EnsembleWeights::default(),
        }
    }

    /// Set the smoothing window.
    #[must_use]
    pub const fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Set the highlight threshold.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the ensemble blend weights.
    #[must_use]
    pub const fn with_weights(mut self, weights: EnsembleWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Score every whitespace-separated token of `text`.
    ///
    /// Output preserves document order and original token text. Empty input
    /// yields an empty list, not an error.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn score_words(&self, text: &str) -> Vec<ScoredWord> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let raw: Vec<f64> = words.iter().map(|w| self.scorer.score(w)).collect();
        let smoothed = smoothing::smooth(&raw, self.window, &self.weights);

        words
            .into_iter()
            .zip(raw.into_iter().zip(smoothed))
            .map(|(word, (raw_score, smoothed_score))| ScoredWord {
                word: word.to_string(),
                raw_score,
                smoothed_score,
            })
            .collect()
    }

    /// Flag every token whose smoothed score reaches the threshold.
    ///
    /// The boundary is inclusive: a score exactly equal to the threshold is
    /// flagged.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn mask_words(&self, text: &str) -> Vec<MaskedWord> {
        self.score_words(text)
            .into_iter()
            .map(|scored| MaskedWord {
                highlighted: scored.smoothed_score >= self.threshold,
                word: scored.word,
            })
            .collect()
    }

    /// Render `text` with highlighted runs marked up per `style`.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn render(&self, text: &str, style: &HighlightStyle) -> String {
        render::render_spans(&self.mask_words(text), style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyRow;
    use crate::render::HighlightColor;

    fn table() -> Arc<FrequencyTable> {
        let rows = [("the", "1000"), ("quick", "100"), ("fox", "10")]
            .into_iter()
            .map(|(word, count)| FrequencyRow {
                word: word.to_string(),
                count: count.to_string(),
            })
            .collect();
        Arc::new(FrequencyTable::build(rows).unwrap())
    }

    #[test]
    fn scores_preserve_order_and_original_text() {
        let hl = Highlighter::new(table());
        let scored = hl.score_words("The quick  Fox.");
        let words: Vec<&str> = scored.iter().map(|s| s.word.as_str()).collect();
        assert_eq!(words, vec!["The", "quick", "Fox."]);
        assert!((scored[0].raw_score - 10.0).abs() < 1e-12);
        assert!((scored[1].raw_score - 9.0).abs() < 1e-12);
        assert!((scored[2].raw_score - 8.0).abs() < 1e-12);
    }

    #[test]
    fn single_known_word_smooths_to_its_raw_score() {
        let hl = Highlighter::new(table());
        let scored = hl.score_words("the");
        assert_eq!(scored.len(), 1);
        assert!((scored[0].smoothed_score - 10.0).abs() < 1e-12);
    }

    #[test]
    fn mask_boundary_is_inclusive() {
        // A lone "the" smooths to exactly 10.0, so a 10.0 threshold flags it
        // and anything above does not.
        let hl = Highlighter::new(table()).with_threshold(10.0);
        assert!(hl.mask_words("the")[0].highlighted);

        let hl = Highlighter::new(table()).with_threshold(10.0 + 1e-9);
        assert!(!hl.mask_words("the")[0].highlighted);
    }

    #[test]
    fn unknown_words_stay_below_default_threshold() {
        let hl = Highlighter::new(table());
        let mask = hl.mask_words("xqzt vvvv qqqq zzzz xxxx yyyy wwww");
        assert!(mask.iter().all(|m| !m.highlighted));
    }

    #[test]
    fn empty_text_yields_empty_outputs() {
        let hl = Highlighter::new(table());
        assert!(hl.score_words("").is_empty());
        assert!(hl.mask_words("   \n\t ").is_empty());
        assert_eq!(hl.render("", &HighlightStyle::default()), "");
    }

    #[test]
    fn render_wraps_common_run() {
        let hl = Highlighter::new(table()).with_threshold(0.5);
        let style = HighlightStyle {
            color: HighlightColor::Green,
            mask_out: None,
        };
        let out = hl.render("the quick fox", &style);
        // Everything scores well above 0.5, so one span opens at the start
        // and is never closed.
        assert_eq!(out, "\x1b[1;32;40m the quick fox");
    }

    #[test]
    fn scored_word_serializes_round_trip() {
        let scored = ScoredWord {
            word: "the".to_string(),
            raw_score: 10.0,
            smoothed_score: 9.5,
        };
        let json = serde_json::to_string(&scored).unwrap();
        let back: ScoredWord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.word, "the");
        assert!((back.smoothed_score - 9.5).abs() < f64::EPSILON);
    }
}
