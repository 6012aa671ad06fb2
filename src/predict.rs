//! Prediction and post-processing of the held-out rows.
//!
//! Raw model output is a real number; a medal count is a non-negative
//! integer. Negative predictions are clamped to zero first, then the
//! value is rounded half-to-even (`f64::round_ties_even`). The clamp
//! must precede the round so a raw value like -2.4 stores 0.

use crate::data::TeamRecord;
use crate::model::FittedModel;
use serde::Serialize;

/// One test row with its post-processed prediction attached. Created
/// during prediction, never mutated afterward.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRecord {
    pub team: String,
    pub country: String,
    pub year: i32,
    /// Actual medal count from the input data.
    pub medals: f64,
    /// Clamped, rounded model output. Always integral and >= 0.
    pub predicted: f64,
}

/// Applies `model` to every test row, in test row order.
pub fn predict_all(model: &FittedModel, test: &[TeamRecord]) -> Vec<PredictionRecord> {
    test.iter()
        .map(|row| PredictionRecord {
            team: row.team.clone(),
            country: row.country.clone(),
            year: row.year,
            medals: row.medals,
            predicted: postprocess(model.raw_prediction(row)),
        })
        .collect()
}

fn postprocess(raw: f64) -> f64 {
    raw.max(0.0).round_ties_even()
}
