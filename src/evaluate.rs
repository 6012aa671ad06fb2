//! Prediction-error evaluation, overall and per country.
//!
//! Grouping uses the `team` code as the key, matching the source data
//! where one team code is one country. Aggregation is a plain hash map
//! of running sums and counts; at this scale a tabular engine would be
//! overkill.

use crate::predict::PredictionRecord;
use std::collections::HashMap;

/// Per-country error aggregates. `ratio` is the mean absolute error
/// normalized by the country's mean actual medal count, making error
/// comparable between medal-rich and medal-poor countries.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryError {
    pub country: String,
    pub mae: f64,
    pub mean_actual: f64,
    pub ratio: f64,
}

/// Evaluation report over the held-out rows. Read-only once computed.
#[derive(Debug, Clone)]
pub struct ErrorSummary {
    /// Mean absolute error over every test row.
    pub overall_mae: f64,
    /// Per-country ratios, ascending. Countries whose mean actual medal
    /// count is zero have an undefined ratio and are excluded.
    pub by_country: Vec<CountryError>,
}

#[derive(Default)]
struct GroupAccumulator {
    abs_error_sum: f64,
    actual_sum: f64,
    count: usize,
}

impl ErrorSummary {
    pub fn compute(predictions: &[PredictionRecord]) -> ErrorSummary {
        let total_abs_error: f64 = predictions
            .iter()
            .map(|p| (p.medals - p.predicted).abs())
            .sum();
        let overall_mae = if predictions.is_empty() {
            0.0
        } else {
            total_abs_error / predictions.len() as f64
        };

        let mut groups: HashMap<String, GroupAccumulator> = HashMap::new();
        for prediction in predictions {
            let group = groups.entry(prediction.team.clone()).or_default();
            group.abs_error_sum += (prediction.medals - prediction.predicted).abs();
            group.actual_sum += prediction.medals;
            group.count += 1;
        }

        let mut by_country: Vec<CountryError> = groups
            .into_iter()
            .filter_map(|(country, group)| {
                let n = group.count as f64;
                let mae = group.abs_error_sum / n;
                let mean_actual = group.actual_sum / n;
                let ratio = mae / mean_actual;
                // mean_actual == 0 makes the ratio infinite or NaN.
                ratio.is_finite().then_some(CountryError {
                    country,
                    mae,
                    mean_actual,
                    ratio,
                })
            })
            .collect();
        by_country.sort_by(|a, b| a.ratio.total_cmp(&b.ratio).then(a.country.cmp(&b.country)));

        log::info!(
            "Overall MAE {:.3} over {} test rows; {} countries with a finite error ratio",
            overall_mae,
            predictions.len(),
            by_country.len()
        );
        ErrorSummary {
            overall_mae,
            by_country,
        }
    }
}
