//! Test-only regressors used by unit and behaviour tests across the workspace.

use crate::{FeatureRow, InferenceError, Regressor};

/// Regressor returning the same raw score for every row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantRegressor(pub f64);

impl Regressor for ConstantRegressor {
    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>, InferenceError> {
        Ok(vec![self.0; rows.len()])
    }

    fn name(&self) -> &'static str {
        "constant"
    }
}

/// Regressor scoring four points per hour, deterministic for any input.
#[derive(Debug, Default, Clone, Copy)]
pub struct HourRegressor;

impl Regressor for HourRegressor {
    #[expect(
        clippy::float_arithmetic,
        reason = "test regressor scales the hour column"
    )]
    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>, InferenceError> {
        Ok(rows
            .iter()
            .map(|row| f64::from(row.first().copied().unwrap_or_default()) * 4.0)
            .collect())
    }

    fn name(&self) -> &'static str {
        "hour"
    }
}

/// Regressor that always raises an inference error.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingRegressor;

impl Regressor for FailingRegressor {
    fn predict(&self, _rows: &[FeatureRow]) -> Result<Vec<f64>, InferenceError> {
        Err(InferenceError::Backend {
            message: "simulated inference failure".to_owned(),
        })
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Regressor that panics on every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct PanickingRegressor;

impl Regressor for PanickingRegressor {
    #[expect(
        clippy::panic_in_result_fn,
        reason = "exercises panic containment in callers"
    )]
    fn predict(&self, _rows: &[FeatureRow]) -> Result<Vec<f64>, InferenceError> {
        panic!("simulated regressor panic")
    }

    fn name(&self) -> &'static str {
        "panicking"
    }
}

/// Regressor that returns no scores regardless of the batch size.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyRegressor;

impl Regressor for EmptyRegressor {
    fn predict(&self, _rows: &[FeatureRow]) -> Result<Vec<f64>, InferenceError> {
        Ok(Vec::new())
    }

    fn name(&self) -> &'static str {
        "empty"
    }
}
