//! Ordinary least squares.
//!
//! Solves `β = (X'X)⁺ X'y` through an SVD pseudo-inverse, so a rank-deficient
//! design still produces a (minimum-norm) coefficient vector instead of an
//! error. Standard errors use the residual variance with `n - k` degrees of
//! freedom.

use crate::error::{AnalysisError, Result};
use nalgebra::{DMatrix, DVector};
use std::f64::consts::PI;

/// Result of an OLS fit.
#[derive(Debug, Clone)]
pub struct OlsFit {
    /// Coefficients, one per design column, in column order
    pub params: Vec<f64>,
    /// Standard error of each coefficient
    pub std_errors: Vec<f64>,
    /// Sum of squared residuals
    pub ssr: f64,
    /// Number of observations used
    pub nobs: usize,
}

impl OlsFit {
    /// t-statistic of coefficient `i`.
    pub fn t_value(&self, i: usize) -> f64 {
        self.params[i] / self.std_errors[i]
    }

    /// Gaussian log-likelihood of the fit.
    pub fn log_likelihood(&self) -> f64 {
        let n = self.nobs as f64;
        -n / 2.0 * ((2.0 * PI).ln() + (self.ssr / n).ln() + 1.0)
    }

    /// Akaike information criterion, counting every coefficient.
    pub fn aic(&self) -> f64 {
        -2.0 * self.log_likelihood() + 2.0 * self.params.len() as f64
    }
}

/// Fit `y = Xβ + ε`.
///
/// # Errors
/// - `InsufficientData` when there are fewer rows than regressors
/// - `SingularMatrix` when the SVD fails to converge
///
/// An exactly identified system (`n == k`) solves but has undefined
/// standard errors (`NaN`).
pub fn ols(y: &DVector<f64>, x: &DMatrix<f64>) -> Result<OlsFit> {
    let n = x.nrows();
    let k = x.ncols();

    if y.len() != n {
        return Err(AnalysisError::Misaligned {
            left: format!("regressand ({} rows)", y.len()),
            right: format!("design matrix ({} rows)", n),
        });
    }
    if n < k {
        return Err(AnalysisError::InsufficientData {
            expected: k,
            actual: n,
        });
    }

    let xt = x.transpose();
    let xtx = &xt * x;
    // Relative cutoff for singular values, same order as numpy's pinv rcond
    let eps = xtx.amax() * k as f64 * f64::EPSILON;
    let xtx_inv = xtx
        .pseudo_inverse(eps)
        .map_err(|e| AnalysisError::SingularMatrix(e.to_string()))?;

    let beta = &xtx_inv * (&xt * y);
    let residuals = y - x * &beta;
    let ssr = residuals.norm_squared();
    let sigma2 = if n > k {
        ssr / (n - k) as f64
    } else {
        f64::NAN
    };

    let std_errors = (0..k).map(|i| (sigma2 * xtx_inv[(i, i)]).sqrt()).collect();

    Ok(OlsFit {
        params: beta.iter().copied().collect(),
        std_errors,
        ssr,
        nobs: n,
    })
}

/// Regress `y` on `[1, x]` and return `(intercept, slope)`.
pub fn simple_regression(y: &[f64], x: &[f64]) -> Result<(f64, f64)> {
    if y.len() != x.len() {
        return Err(AnalysisError::Misaligned {
            left: format!("y ({} rows)", y.len()),
            right: format!("x ({} rows)", x.len()),
        });
    }
    let n = x.len();
    let design = DMatrix::from_fn(n, 2, |r, c| if c == 0 { 1.0 } else { x[r] });
    let fit = ols(&DVector::from_column_slice(y), &design)?;
    Ok((fit.params[0], fit.params[1]))
}
