//! End-to-end composition of the modeling stages.
//!
//! Load -> clean -> split -> fit -> predict -> evaluate, each stage a
//! pure function of the previous stage's output. Every failure is
//! fatal; there is no retry or partial-result mode.

use crate::data::{self, DataError, TeamRecord};
use crate::evaluate::ErrorSummary;
use crate::model::{DEFAULT_PREDICTORS, FitError, FittedModel};
use crate::predict::{self, PredictionRecord};
use crate::split::split_by_year;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Fit(#[from] FitError),
}

/// Everything the run produced, for reporting or further inspection.
#[derive(Debug)]
pub struct PipelineOutput {
    pub model: FittedModel,
    pub train: Vec<TeamRecord>,
    pub predictions: Vec<PredictionRecord>,
    pub summary: ErrorSummary,
}

/// Runs the full pipeline over the team CSV at `input`, training on
/// rows before `split_year` and evaluating on the rest.
pub fn run(input: &Path, split_year: i32) -> Result<PipelineOutput, PipelineError> {
    let rows = data::load_teams(input)?;
    let (train, test) = split_by_year(&rows, split_year);
    let model = FittedModel::fit(&train, &DEFAULT_PREDICTORS)?;
    let predictions = predict::predict_all(&model, &test);
    let summary = ErrorSummary::compute(&predictions);
    Ok(PipelineOutput {
        model,
        train,
        predictions,
        summary,
    })
}
