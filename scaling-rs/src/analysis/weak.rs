use crate::analysis::strong::round2;
use crate::data::{GroupKey, ScalingGroup, WeakPoint};
use crate::error::{Result, ScalingError};
use crate::models::{gustafson_serial_fraction, ideal_scaled_speedup};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Thresholds for the weak-scaling analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeakScalingConfig {
    /// Weak efficiency, and throughput relative to ideal, below this is flagged
    pub min_efficiency: f64,

    /// Time above this multiple of the single-thread time is flagged
    pub max_relative_time: f64,
}

impl Default for WeakScalingConfig {
    fn default() -> Self {
        Self {
            min_efficiency: 0.7,
            max_relative_time: 1.3,
        }
    }
}

/// Measured scaled speedup against Gustafson's ideal at one thread count
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GustafsonRow {
    pub threads: u32,
    pub scaled_speedup: f64,
    pub ideal: f64,
    /// Distance below the ideal line
    pub gap: f64,
    /// Serial fraction implied by the measurement (p > 1 only)
    pub serial_fraction: Option<f64>,
}

/// Everything derived from one weak-scaling group
#[derive(Debug, Clone, Serialize)]
pub struct WeakAnalysis {
    pub key: GroupKey,
    pub points: Vec<WeakPoint>,
    pub baseline_time: f64,
    pub baseline_throughput: f64,
    pub gustafson: Vec<GustafsonRow>,
    pub efficiency_flags: Vec<bool>,
    pub throughput_flags: Vec<bool>,
    pub time_flags: Vec<bool>,
}

impl WeakAnalysis {
    /// Throughput if every thread matched the single-thread rate
    pub fn ideal_throughput(&self, threads: u32) -> f64 {
        threads as f64 * self.baseline_throughput
    }

    /// Largest distance below the ideal scaled speedup
    pub fn max_gap(&self) -> f64 {
        self.gustafson
            .iter()
            .map(|row| row.gap)
            .fold(0.0, f64::max)
    }
}

pub fn gustafson_rows(points: &[WeakPoint]) -> Vec<GustafsonRow> {
    points
        .iter()
        .map(|point| {
            let ideal = ideal_scaled_speedup(point.threads as f64);
            GustafsonRow {
                threads: point.threads,
                scaled_speedup: point.scaled_speedup,
                ideal,
                gap: ideal - point.scaled_speedup,
                serial_fraction: gustafson_serial_fraction(point.threads, point.scaled_speedup),
            }
        })
        .collect()
}

/// Compare one group with Gustafson's ideal and flag weak spots
///
/// # Errors
/// * `MissingBaseline` if the group has no single-thread measurement
pub fn analyze_weak(
    group: &ScalingGroup<WeakPoint>,
    config: &WeakScalingConfig,
) -> Result<WeakAnalysis> {
    let baseline = group
        .baseline()
        .ok_or_else(|| ScalingError::MissingBaseline {
            key: group.key.data.clone(),
            kernel: group.key.kernel,
        })?;
    let baseline_time = baseline.time_per_rep;
    let baseline_throughput = baseline.throughput;

    let efficiency_flags = group
        .points
        .iter()
        .map(|p| p.weak_efficiency < config.min_efficiency)
        .collect();
    let throughput_flags = group
        .points
        .iter()
        .map(|p| p.throughput / (p.threads as f64 * baseline_throughput) < config.min_efficiency)
        .collect();
    let time_flags = group
        .points
        .iter()
        .map(|p| round2(p.time_per_rep) > config.max_relative_time * baseline_time)
        .collect();

    let analysis = WeakAnalysis {
        key: group.key.clone(),
        points: group.points.clone(),
        baseline_time,
        baseline_throughput,
        gustafson: gustafson_rows(&group.points),
        efficiency_flags,
        throughput_flags,
        time_flags,
    };
    debug!(
        "{}: baseline {:.4}s at {:.2} Mpix/s, max gap from ideal {:.3}",
        group.key,
        baseline_time,
        baseline_throughput,
        analysis.max_gap()
    );
    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn point(threads: u32, time_per_rep: f64, throughput: f64) -> WeakPoint {
        let weak_efficiency = 1.0 / time_per_rep;
        WeakPoint {
            threads,
            time_per_rep,
            weak_efficiency,
            scaled_speedup: threads as f64 * weak_efficiency,
            throughput,
        }
    }

    fn group(points: Vec<WeakPoint>) -> ScalingGroup<WeakPoint> {
        ScalingGroup {
            key: GroupKey::new("3840x2160", 7),
            points,
        }
    }

    #[test]
    fn test_flags_against_baseline() {
        let g = group(vec![
            point(1, 1.0, 8.0),
            point(2, 1.1, 14.5),
            point(4, 1.25, 25.6),
            point(8, 2.0, 32.0),
        ]);
        let analysis = analyze_weak(&g, &WeakScalingConfig::default()).unwrap();

        // efficiencies 1.0, 0.909, 0.8, 0.5
        assert_eq!(analysis.efficiency_flags, vec![false, false, false, true]);
        // relative throughput 1.0, 0.906, 0.8, 0.5
        assert_eq!(analysis.throughput_flags, vec![false, false, false, true]);
        // time limit 1.3 s
        assert_eq!(analysis.time_flags, vec![false, false, false, true]);

        assert_relative_eq!(analysis.ideal_throughput(4), 32.0);
        assert_relative_eq!(analysis.max_gap(), 4.0);
    }

    #[test]
    fn test_time_flag_at_rounding_midpoint() {
        let g = group(vec![point(1, 1.0, 8.0), point(2, 1.305, 12.3)]);
        let analysis = analyze_weak(&g, &WeakScalingConfig::default()).unwrap();
        // 1.305 is printed as 1.30, which is not above the 1.3 s limit
        assert_eq!(format!("{:.2}", 1.305), "1.30");
        assert_eq!(analysis.time_flags, vec![false, false]);
    }

    #[test]
    fn test_gustafson_rows() {
        let rows = gustafson_rows(&[point(1, 1.0, 1.0), point(4, 1.25, 3.2)]);
        assert_eq!(rows[0].serial_fraction, None);
        assert_relative_eq!(rows[1].scaled_speedup, 3.2, epsilon = 1e-12);
        assert_relative_eq!(rows[1].gap, 0.8, epsilon = 1e-12);
        assert_relative_eq!(rows[1].serial_fraction.unwrap(), 0.8 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_baseline() {
        let g = group(vec![point(2, 1.0, 4.0), point(4, 1.0, 8.0)]);
        match analyze_weak(&g, &WeakScalingConfig::default()) {
            Err(ScalingError::MissingBaseline { key, kernel }) => {
                assert_eq!(key, "3840x2160");
                assert_eq!(kernel, 7);
            }
            other => panic!("expected missing baseline, got {:?}", other),
        }
    }
}
