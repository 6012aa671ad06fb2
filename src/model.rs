//! Ordinary least-squares regression over a small dense design matrix.
//!
//! The model is deliberately tiny: an intercept plus two predictor
//! columns. The fit goes through the normal equations `(XᵀX)β = Xᵀy`,
//! solved by partial-pivot Gaussian elimination. With at most a handful
//! of predictors the system is 3x3 or so; a full linear-algebra backend
//! would be dead weight here.

use crate::data::TeamRecord;
use ndarray::{Array1, Array2};
use thiserror::Error;

/// Pivots smaller than this relative threshold mean the predictors are
/// linearly dependent and the system has no unique solution.
const PIVOT_TOLERANCE: f64 = 1e-12;

/// A predictor column of [`TeamRecord`] usable as a regression feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predictor {
    Athletes,
    Age,
    PrevMedals,
}

impl Predictor {
    pub fn name(self) -> &'static str {
        match self {
            Predictor::Athletes => "athletes",
            Predictor::Age => "age",
            Predictor::PrevMedals => "prev_medals",
        }
    }

    pub fn value(self, row: &TeamRecord) -> f64 {
        match self {
            Predictor::Athletes => row.athletes,
            Predictor::Age => row.age,
            Predictor::PrevMedals => row.prev_medals,
        }
    }
}

/// The predictor set used by the production model. Team size and the
/// previous Games' medal count are the two columns most correlated
/// with the target in the source data.
pub const DEFAULT_PREDICTORS: [Predictor; 2] = [Predictor::Athletes, Predictor::PrevMedals];

/// Errors from the least-squares fit.
#[derive(Error, Debug)]
pub enum FitError {
    #[error(
        "Training set has only {found} rows, but at least {required} are needed to estimate {required} coefficients."
    )]
    InsufficientRows { found: usize, required: usize },
    #[error(
        "The normal equations are singular: the predictor columns are linearly dependent. Remove or replace a predictor."
    )]
    SingularSystem,
}

/// A fitted linear model, immutable after estimation.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedModel {
    pub intercept: f64,
    /// One coefficient per predictor, in `predictors` order.
    pub coefficients: Vec<f64>,
    pub predictors: Vec<Predictor>,
}

impl FittedModel {
    /// Fits ordinary least squares of `medals` on `predictors` over the
    /// training rows, minimizing the sum of squared residuals.
    pub fn fit(train: &[TeamRecord], predictors: &[Predictor]) -> Result<FittedModel, FitError> {
        let required = predictors.len() + 1;
        if train.len() < required {
            return Err(FitError::InsufficientRows {
                found: train.len(),
                required,
            });
        }

        let n = train.len();
        let p = predictors.len() + 1;
        let mut x = Array2::<f64>::zeros((n, p));
        let mut y = Array1::<f64>::zeros(n);
        for (i, row) in train.iter().enumerate() {
            x[[i, 0]] = 1.0;
            for (j, predictor) in predictors.iter().enumerate() {
                x[[i, j + 1]] = predictor.value(row);
            }
            y[i] = row.medals;
        }

        let xtx = x.t().dot(&x);
        let xty = x.t().dot(&y);
        let beta = solve_normal_equations(xtx, xty)?;

        let model = FittedModel {
            intercept: beta[0],
            coefficients: beta.iter().skip(1).copied().collect(),
            predictors: predictors.to_vec(),
        };
        for (predictor, coefficient) in model.predictors.iter().zip(&model.coefficients) {
            log::info!("Fitted coefficient for {}: {:.6}", predictor.name(), coefficient);
        }
        log::info!("Fitted intercept: {:.6}", model.intercept);
        Ok(model)
    }

    /// Raw (unclamped, unrounded) prediction for one row.
    pub fn raw_prediction(&self, row: &TeamRecord) -> f64 {
        self.predictors
            .iter()
            .zip(&self.coefficients)
            .fold(self.intercept, |acc, (predictor, coefficient)| {
                acc + coefficient * predictor.value(row)
            })
    }
}

/// Solves the symmetric system `A β = b` by Gaussian elimination with
/// partial pivoting. `A` is consumed as the elimination workspace.
fn solve_normal_equations(mut a: Array2<f64>, mut b: Array1<f64>) -> Result<Array1<f64>, FitError> {
    let n = a.nrows();
    debug_assert_eq!(a.ncols(), n);
    debug_assert_eq!(b.len(), n);

    let scale = a.iter().fold(0.0_f64, |m, v| m.max(v.abs())).max(1.0);

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&i, &j| a[[i, col]].abs().total_cmp(&a[[j, col]].abs()))
            .ok_or(FitError::SingularSystem)?;
        if a[[pivot_row, col]].abs() < PIVOT_TOLERANCE * scale {
            return Err(FitError::SingularSystem);
        }
        if pivot_row != col {
            for k in 0..n {
                let tmp = a[[col, k]];
                a[[col, k]] = a[[pivot_row, k]];
                a[[pivot_row, k]] = tmp;
            }
            b.swap(col, pivot_row);
        }
        for row in (col + 1)..n {
            let factor = a[[row, col]] / a[[col, col]];
            for k in col..n {
                a[[row, k]] -= factor * a[[col, k]];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut beta = Array1::<f64>::zeros(n);
    for col in (0..n).rev() {
        let mut sum = b[col];
        for k in (col + 1)..n {
            sum -= a[[col, k]] * beta[k];
        }
        beta[col] = sum / a[[col, col]];
    }
    Ok(beta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn row(athletes: f64, prev_medals: f64, medals: f64) -> TeamRecord {
        TeamRecord {
            team: "XXX".to_string(),
            country: "Test".to_string(),
            year: 2008,
            athletes,
            age: 25.0,
            prev_medals,
            medals,
        }
    }

    #[test]
    fn exact_fit_on_a_noiseless_plane() {
        // medals = 1 + 0.2 * athletes + 0.5 * prev_medals, no noise.
        let train = vec![
            row(10.0, 0.0, 3.0),
            row(20.0, 4.0, 7.0),
            row(50.0, 10.0, 16.0),
            row(100.0, 30.0, 36.0),
        ];
        let model = FittedModel::fit(&train, &DEFAULT_PREDICTORS).unwrap();
        assert_abs_diff_eq!(model.intercept, 1.0, epsilon = 1e-8);
        assert_abs_diff_eq!(model.coefficients[0], 0.2, epsilon = 1e-8);
        assert_abs_diff_eq!(model.coefficients[1], 0.5, epsilon = 1e-8);
    }

    #[test]
    fn near_collinear_points_predict_close_to_targets() {
        let train = vec![
            row(5.0, 0.0, 0.0),
            row(500.0, 40.0, 46.0),
            row(250.0, 20.0, 23.0),
        ];
        let model = FittedModel::fit(&train, &DEFAULT_PREDICTORS).unwrap();
        for (input, expected) in train.iter().zip([0.0, 46.0, 23.0]) {
            let raw = model.raw_prediction(input);
            assert!(
                (raw - expected).abs() < 0.5,
                "prediction {raw} too far from {expected}"
            );
        }
    }

    #[test]
    fn too_few_rows_is_insufficient() {
        let train = vec![row(5.0, 0.0, 0.0), row(10.0, 1.0, 2.0)];
        let err = FittedModel::fit(&train, &DEFAULT_PREDICTORS).unwrap_err();
        match err {
            FitError::InsufficientRows { found, required } => {
                assert_eq!(found, 2);
                assert_eq!(required, 3);
            }
            other => panic!("Expected InsufficientRows, got {:?}", other),
        }
    }

    #[test]
    fn empty_training_set_is_insufficient() {
        let err = FittedModel::fit(&[], &DEFAULT_PREDICTORS).unwrap_err();
        assert!(matches!(err, FitError::InsufficientRows { found: 0, .. }));
    }

    #[test]
    fn duplicated_predictor_is_singular() {
        let train = vec![
            row(10.0, 0.0, 3.0),
            row(20.0, 4.0, 7.0),
            row(50.0, 10.0, 16.0),
            row(100.0, 30.0, 36.0),
        ];
        let err = FittedModel::fit(&train, &[Predictor::Athletes, Predictor::Athletes])
            .unwrap_err();
        assert!(matches!(err, FitError::SingularSystem));
    }

    #[test]
    fn fit_is_deterministic() {
        let train = vec![
            row(10.0, 0.0, 2.0),
            row(20.0, 4.0, 8.0),
            row(50.0, 10.0, 15.0),
            row(100.0, 30.0, 37.0),
        ];
        let first = FittedModel::fit(&train, &DEFAULT_PREDICTORS).unwrap();
        let second = FittedModel::fit(&train, &DEFAULT_PREDICTORS).unwrap();
        assert_eq!(first, second);
    }
}
