//! Simple linear regression (one regressor, ordinary least squares).
//!
//! ```text
//! slope     = Sxy / Sxx
//! intercept = mean(y) - slope * mean(x)
//! R²        = 1 - SSE / SST
//! ```
//!
//! R² is fitted in-sample, so it lies in [0, 1] up to rounding. It is never
//! clamped: a perfect fit may come out a few ulps below 1.0. A constant y is
//! fitted exactly by a flat line through that value and reports R² = 1.0.

use super::interpretation;
use super::types::{Column, ColumnKind, Dataset, RegressionDiagnostics, RegressionResult};
use crate::error::{AutovizError, Result};
use statrs::distribution::{ContinuousCDF as _, StudentsT};

/// Two points determine the line; anything fewer cannot be fitted.
pub const MIN_OBSERVATIONS: usize = 2;

/// # Errors
///
/// - [`AutovizError::InvalidAxis`] if either column is missing
/// - [`AutovizError::TypeMismatch`] if either column is not numeric
/// - [`AutovizError::InsufficientData`] for fewer than two complete pairs
/// - [`AutovizError::DegenerateInput`] if every x value is identical
/// - [`AutovizError::NumericOverflow`] if the sums over either column overflow
pub fn fit_ols(dataset: &Dataset, x_column: &str, y_column: &str) -> Result<RegressionResult> {
    let x = numeric_column(dataset, x_column)?;
    let y = numeric_column(dataset, y_column)?;

    let (xs, ys) = paired_values(x, y);
    let excluded_rows = dataset.row_count() - xs.len();

    if xs.len() < MIN_OBSERVATIONS {
        return Err(AutovizError::InsufficientData {
            found: xs.len(),
            required: MIN_OBSERVATIONS,
        });
    }

    let fit = fit_simple(&xs, &ys).map_err(|failure| match failure {
        FitFailure::ConstantX => AutovizError::DegenerateInput(x_column.to_owned()),
        FitFailure::OverflowX => AutovizError::NumericOverflow(x_column.to_owned()),
        FitFailure::OverflowY => AutovizError::NumericOverflow(y_column.to_owned()),
    })?;
    let mut diagnostics = fit.diagnostics(&xs, &ys);
    diagnostics.excluded_rows = excluded_rows;

    let mut result = RegressionResult {
        x_column: x_column.to_owned(),
        y_column: y_column.to_owned(),
        slope: fit.slope,
        intercept: fit.intercept,
        r_squared: fit.r_squared,
        n_observations: xs.len(),
        diagnostics,
        interpretation: Vec::new(),
    };
    result.interpretation = interpretation::interpret_regression(&result);

    log::info!(
        "Regression completed: {y_column} ~ {x_column}, R² = {:.4}, n = {}",
        result.r_squared,
        result.n_observations
    );
    Ok(result)
}

fn numeric_column<'a>(dataset: &'a Dataset, name: &str) -> Result<&'a Column> {
    let col = dataset.require_column(name)?;
    if col.kind() == ColumnKind::Numeric {
        Ok(col)
    } else {
        Err(AutovizError::type_mismatch(
            name,
            ColumnKind::Numeric.as_str(),
            col.kind(),
        ))
    }
}

/// Rows where both cells are present, in row order.
pub fn paired_values(x: &Column, y: &Column) -> (Vec<f64>, Vec<f64>) {
    (0..x.len().min(y.len()))
        .filter_map(|row| Some((x.axis_value(row)?, y.axis_value(row)?)))
        .unzip()
}

/// Sufficient statistics of a fitted line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimpleFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub mean_x: f64,
    pub sxx: f64,
}

/// Why a line could not be fitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitFailure {
    /// Every x value is identical (or there are none).
    ConstantX,
    /// Sums over x leave the finite `f64` range.
    OverflowX,
    /// Sums over y leave the finite `f64` range.
    OverflowY,
}

/// Fits y = intercept + slope·x.
///
/// # Errors
///
/// [`FitFailure::ConstantX`] when x has zero variance, or one of the overflow
/// variants when the sums of squares are not finite.
pub fn fit_simple(xs: &[f64], ys: &[f64]) -> std::result::Result<SimpleFit, FitFailure> {
    let first_x = *xs.first().ok_or(FitFailure::ConstantX)?;
    if xs.iter().all(|&v| v == first_x) {
        return Err(FitFailure::ConstantX);
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;
    if !mean_x.is_finite() {
        return Err(FitFailure::OverflowX);
    }
    if !mean_y.is_finite() {
        return Err(FitFailure::OverflowY);
    }

    let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }
    if !sxx.is_finite() {
        return Err(FitFailure::OverflowX);
    }
    if sxx <= 0.0 {
        return Err(FitFailure::ConstantX);
    }
    if !syy.is_finite() || !sxy.is_finite() {
        return Err(FitFailure::OverflowY);
    }

    // A constant y is compared exactly; its mean can be a few ulps off.
    let constant_y = ys.first().map(|&first_y| (first_y, ys.iter().all(|&v| v == first_y)));
    let (slope, intercept, r_squared) = match constant_y {
        Some((first_y, true)) => (0.0, first_y, 1.0),
        _ => {
            let slope = sxy / sxx;
            let intercept = mean_y - slope * mean_x;
            let sse: f64 = residuals(xs, ys, slope, intercept).map(|r| r * r).sum();
            let r_squared = if syy > 0.0 { 1.0 - sse / syy } else { 1.0 };
            (slope, intercept, r_squared)
        }
    };

    Ok(SimpleFit {
        slope,
        intercept,
        r_squared,
        mean_x,
        sxx,
    })
}

fn residuals<'a>(
    xs: &'a [f64],
    ys: &'a [f64],
    slope: f64,
    intercept: f64,
) -> impl Iterator<Item = f64> + 'a {
    xs.iter()
        .zip(ys)
        .map(move |(&x, &y)| y - (intercept + slope * x))
}

impl SimpleFit {
    /// Standard errors, t statistics and two-sided p-values on n - 2 degrees
    /// of freedom.
    pub fn diagnostics(&self, xs: &[f64], ys: &[f64]) -> RegressionDiagnostics {
        let n = xs.len();
        let (mut sse, mut rmin, mut rmax) = (0.0, f64::INFINITY, f64::NEG_INFINITY);
        for r in residuals(xs, ys, self.slope, self.intercept) {
            sse += r * r;
            rmin = rmin.min(r);
            rmax = rmax.max(r);
        }

        let mut diag = RegressionDiagnostics {
            sum_squared_residuals: sse,
            residual_min: rmin,
            residual_max: rmax,
            ..Default::default()
        };

        let dof = n.saturating_sub(2);
        if dof == 0 {
            return diag;
        }

        let n_f = n as f64;
        let dof_f = dof as f64;
        let sigma2 = sse / dof_f;
        let slope_se = (sigma2 / self.sxx).sqrt();
        let intercept_se = (sigma2 * (1.0 / n_f + self.mean_x * self.mean_x / self.sxx)).sqrt();

        diag.adj_r_squared = Some(1.0 - (1.0 - self.r_squared) * (n_f - 1.0) / dof_f);
        diag.residual_std_error = Some(sigma2.sqrt());
        diag.slope_std_error = Some(slope_se);
        diag.intercept_std_error = Some(intercept_se);
        diag.slope_t = t_statistic(self.slope, slope_se);
        diag.intercept_t = t_statistic(self.intercept, intercept_se);

        let dist = StudentsT::new(0.0, 1.0, dof_f).ok();
        if let Some(dist) = dist {
            diag.slope_p_value = diag.slope_t.map(|t| 2.0 * dist.sf(t.abs()));
            diag.intercept_p_value = diag.intercept_t.map(|t| 2.0 * dist.sf(t.abs()));
        }

        diag
    }
}

fn t_statistic(coef: f64, se: f64) -> Option<f64> {
    (se > 0.0 && se.is_finite()).then(|| coef / se)
}
