//! Amdahl's law: fixed serial fraction, fixed problem size.

use crate::error::{Result, ScalingError};
use crate::models::regression::{LinearFit, linear_fit};
use serde::Serialize;

/// Number of samples used when drawing continuous speedup curves
pub const CURVE_SAMPLES: usize = 200;

/// Predicted speedup for serial fraction `f` on `p` threads
///
/// S = 1 / (f + (1 - f) / p)
pub fn amdahl_speedup(serial_fraction: f64, threads: f64) -> f64 {
    1.0 / (serial_fraction + (1.0 - serial_fraction) / threads)
}

/// `n` evenly spaced values over `[start, end]`, both ends included
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Amdahl speedup sampled over `[1, max_threads]`
pub fn amdahl_curve(serial_fraction: f64, max_threads: f64, n: usize) -> Vec<(f64, f64)> {
    linspace(1.0, max_threads, n)
        .into_iter()
        .map(|p| (p, amdahl_speedup(serial_fraction, p)))
        .collect()
}

/// Serial fraction estimated from the reciprocal linearisation of Amdahl's law
///
/// With x = 1/p and y = 1/S, Amdahl's law becomes y = f + (1 - f) x, so the
/// intercept of a straight-line fit estimates f.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SerialFractionFit {
    /// Intercept of the fit, the serial fraction estimate
    pub serial_fraction: f64,
    /// Slope of the fit (ideally 1 - f)
    pub slope: f64,
    /// Number of (threads, speedup) samples that entered the fit
    pub samples_used: usize,
}

impl SerialFractionFit {
    fn from_line(line: LinearFit, samples_used: usize) -> Self {
        Self {
            serial_fraction: line.intercept,
            slope: line.slope,
            samples_used,
        }
    }

    pub fn line(&self) -> LinearFit {
        LinearFit {
            intercept: self.serial_fraction,
            slope: self.slope,
        }
    }

    /// Predicted reciprocal speedup at reciprocal thread count `x`
    pub fn predict_reciprocal(&self, x: f64) -> f64 {
        self.line().predict(x)
    }

    /// Predicted speedup on `threads` threads
    pub fn predict_speedup(&self, threads: f64) -> f64 {
        amdahl_speedup(self.serial_fraction, threads)
    }
}

/// Reciprocal points (1/p, 1/S) for every sample whose thread count passes `keep`
pub fn reciprocal_points(samples: &[(u32, f64)], keep: impl Fn(u32) -> bool) -> Vec<(f64, f64)> {
    samples
        .iter()
        .filter(|(threads, _)| keep(*threads))
        .map(|(threads, speedup)| (1.0 / *threads as f64, 1.0 / speedup))
        .collect()
}

fn fit_reciprocal(points: Vec<(f64, f64)>) -> Result<SerialFractionFit> {
    if points.is_empty() {
        return Err(ScalingError::InsufficientData { min: 1, actual: 0 });
    }
    let line = linear_fit(&points)?;
    Ok(SerialFractionFit::from_line(line, points.len()))
}

/// Fit the serial fraction over every multi-threaded sample
///
/// Single-thread samples are discarded: they sit at (1, 1) by construction.
///
/// # Errors
/// * `InsufficientData` if no sample has more than one thread
pub fn serial_fraction_fit(samples: &[(u32, f64)]) -> Result<SerialFractionFit> {
    fit_reciprocal(reciprocal_points(samples, |threads| threads > 1))
}

/// Fit the serial fraction over multi-threaded samples that fit on physical cores
///
/// # Errors
/// * `InsufficientData` if no sample has `1 < threads <= physical_cores`
pub fn physical_serial_fraction_fit(
    samples: &[(u32, f64)],
    physical_cores: u32,
) -> Result<SerialFractionFit> {
    fit_reciprocal(reciprocal_points(samples, |threads| {
        threads > 1 && threads <= physical_cores
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_amdahl_limits() {
        assert_relative_eq!(amdahl_speedup(0.0, 8.0), 8.0);
        assert_relative_eq!(amdahl_speedup(1.0, 8.0), 1.0);
        assert_relative_eq!(amdahl_speedup(0.1, 1.0), 1.0);
        // f = 0.5 can never exceed 2x
        assert!(amdahl_speedup(0.5, 1e9) < 2.0);
    }

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(0.0, 1.0, 2), vec![0.0, 1.0]);
        assert_eq!(linspace(1.0, 3.0, 5), vec![1.0, 1.5, 2.0, 2.5, 3.0]);
        assert_eq!(linspace(4.0, 9.0, 1), vec![4.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_curve_endpoints() {
        let curve = amdahl_curve(0.2, 16.0, CURVE_SAMPLES);
        assert_eq!(curve.len(), CURVE_SAMPLES);
        assert_relative_eq!(curve[0].0, 1.0);
        assert_relative_eq!(curve[0].1, 1.0);
        assert_relative_eq!(curve[CURVE_SAMPLES - 1].0, 16.0);
        assert_relative_eq!(curve[CURVE_SAMPLES - 1].1, amdahl_speedup(0.2, 16.0));
    }

    #[test]
    fn test_planted_serial_fraction() {
        let f = 0.15;
        let samples: Vec<(u32, f64)> = [1, 2, 4, 8, 16, 32]
            .iter()
            .map(|&p| (p, amdahl_speedup(f, p as f64)))
            .collect();

        let fit = serial_fraction_fit(&samples).unwrap();
        assert_eq!(fit.samples_used, 5);
        assert_relative_eq!(fit.serial_fraction, f, epsilon = 1e-10);
        assert_relative_eq!(fit.slope, 1.0 - f, epsilon = 1e-10);
    }

    #[test]
    fn test_physical_fit_drops_logical_threads() {
        let samples = vec![(1, 1.0), (2, 1.9), (4, 3.5), (8, 6.0), (16, 6.2)];
        let fit = physical_serial_fraction_fit(&samples, 8).unwrap();
        assert_eq!(fit.samples_used, 3);
    }

    #[test]
    fn test_sequential_only_is_error() {
        let samples = vec![(1, 1.0), (1, 1.0)];
        assert!(serial_fraction_fit(&samples).is_err());
        assert!(physical_serial_fraction_fit(&[(16, 4.0)], 8).is_err());
    }
}
