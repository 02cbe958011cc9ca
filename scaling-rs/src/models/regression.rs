use crate::error::{Result, ScalingError};
use serde::Serialize;
use tracing::warn;

/// Ordinary least-squares line `y = intercept + slope * x`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub intercept: f64,
    pub slope: f64,
}

impl LinearFit {
    /// Evaluate the fitted line at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Fit a straight line through `points` by ordinary least squares
///
/// When every `x` is identical the system is rank deficient; the
/// minimum-norm solution is returned instead (slope 0, intercept at the
/// mean of `y`), which is what a least-squares solver would produce.
///
/// # Errors
/// * `InsufficientData` if `points` is empty
pub fn linear_fit(points: &[(f64, f64)]) -> Result<LinearFit> {
    if points.is_empty() {
        return Err(ScalingError::InsufficientData { min: 1, actual: 0 });
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (sxx, sxy) = points.iter().fold((0.0, 0.0), |(sxx, sxy), (x, y)| {
        let dx = x - mean_x;
        (sxx + dx * dx, sxy + dx * (y - mean_y))
    });

    if sxx == 0.0 {
        warn!(
            "Degenerate fit over {} point(s) sharing x = {}; using a flat line",
            points.len(),
            mean_x
        );
        return Ok(LinearFit {
            intercept: mean_y,
            slope: 0.0,
        });
    }

    let slope = sxy / sxx;
    Ok(LinearFit {
        intercept: mean_y - slope * mean_x,
        slope,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exact_line() {
        let points = vec![(0.0, 1.0), (1.0, 3.0), (2.0, 5.0), (3.0, 7.0)];
        let fit = linear_fit(&points).unwrap();
        assert_relative_eq!(fit.intercept, 1.0, epsilon = 1e-12);
        assert_relative_eq!(fit.slope, 2.0, epsilon = 1e-12);
        assert_relative_eq!(fit.predict(10.0), 21.0, epsilon = 1e-12);
    }

    #[test]
    fn test_noisy_line() {
        let points = vec![(0.0, 1.1), (1.0, 1.9), (2.0, 3.1), (3.0, 3.9)];
        let fit = linear_fit(&points).unwrap();
        assert_relative_eq!(fit.slope, 0.96, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, 1.06, epsilon = 1e-12);
    }

    #[test]
    fn test_single_point_is_flat() {
        let fit = linear_fit(&[(0.5, 0.7)]).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_relative_eq!(fit.intercept, 0.7);
    }

    #[test]
    fn test_empty_is_error() {
        assert!(matches!(
            linear_fit(&[]),
            Err(ScalingError::InsufficientData { min: 1, actual: 0 })
        ));
    }
}
