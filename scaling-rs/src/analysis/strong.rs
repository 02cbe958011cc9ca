use crate::data::{GroupKey, ScalingGroup, StrongPoint};
use crate::error::Result;
use crate::models::{
    CURVE_SAMPLES, KarpFlattRow, SerialFractionFit, amdahl_curve, karp_flatt_table,
    physical_serial_fraction_fit, serial_fraction_fit,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Thresholds for the strong-scaling analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrongScalingConfig {
    /// Thread counts above this run on logical (SMT) cores
    pub physical_cores: u32,

    /// Minimum relative time improvement over the previous thread count
    /// below which the time is flagged
    pub min_relative_time: f64,

    /// Minimum absolute speedup gain over the previous thread count
    /// below which the speedup is flagged
    pub min_marginal_speedup: f64,

    /// Efficiency below this is flagged
    pub min_efficiency: f64,
}

impl Default for StrongScalingConfig {
    fn default() -> Self {
        Self {
            physical_cores: 10,
            min_relative_time: 0.05,
            min_marginal_speedup: 0.2,
            min_efficiency: 0.7,
        }
    }
}

/// Round to two decimals the way efficiency and time labels are printed
///
/// Goes through the decimal text so that values like 0.695, stored just
/// below the midpoint, round down as their `{:.2}` label does.
pub(crate) fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Everything derived from one strong-scaling group
#[derive(Debug, Clone, Serialize)]
pub struct StrongAnalysis {
    pub key: GroupKey,
    pub points: Vec<StrongPoint>,
    pub physical_cores: u32,

    /// Serial fraction fitted over every multi-threaded sample
    pub fit: SerialFractionFit,

    /// Serial fraction fitted over samples that fit on physical cores
    pub physical_fit: Option<SerialFractionFit>,

    pub karp_flatt: Vec<KarpFlattRow>,

    /// Per point: time did not improve enough over the previous thread count
    pub time_flags: Vec<bool>,

    /// Per point: speedup did not grow enough over the previous thread count
    pub speedup_flags: Vec<bool>,

    /// Per point: efficiency below the threshold
    pub efficiency_flags: Vec<bool>,
}

impl StrongAnalysis {
    pub fn max_threads(&self) -> u32 {
        self.points.iter().map(|p| p.threads).max().unwrap_or(1)
    }

    /// Multi-threaded points
    pub fn parallel_points(&self) -> impl Iterator<Item = &StrongPoint> {
        self.points.iter().filter(|p| p.threads > 1)
    }

    /// Multi-threaded points that fit on physical cores
    pub fn physical_points(&self) -> impl Iterator<Item = &StrongPoint> {
        let cores = self.physical_cores;
        self.parallel_points().filter(move |p| p.threads <= cores)
    }

    /// Thread range run on logical cores, if any
    pub fn logical_zone(&self) -> Option<(u32, u32)> {
        let max = self.max_threads();
        (max > self.physical_cores).then_some((self.physical_cores, max))
    }

    /// Amdahl speedup curve of the full fit over [1, max threads]
    pub fn fit_curve(&self) -> Vec<(f64, f64)> {
        amdahl_curve(
            self.fit.serial_fraction,
            self.max_threads() as f64,
            CURVE_SAMPLES,
        )
    }

    /// Amdahl speedup curve of the physical-core fit over [1, max threads]
    pub fn physical_fit_curve(&self) -> Option<Vec<(f64, f64)>> {
        self.physical_fit.map(|fit| {
            amdahl_curve(fit.serial_fraction, self.max_threads() as f64, CURVE_SAMPLES)
        })
    }
}

/// Flag times whose drop from the previous thread count is below
/// `min_relative_time` of the previous time
pub fn time_flags(points: &[StrongPoint], min_relative_time: f64) -> Vec<bool> {
    points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            i > 0 && {
                let prev = points[i - 1].time_per_rep;
                prev - point.time_per_rep < min_relative_time * prev
            }
        })
        .collect()
}

/// Flag speedups that gained less than `min_marginal_speedup` over the
/// previous thread count
pub fn speedup_flags(points: &[StrongPoint], min_marginal_speedup: f64) -> Vec<bool> {
    points
        .iter()
        .enumerate()
        .map(|(i, point)| i > 0 && point.speedup - points[i - 1].speedup < min_marginal_speedup)
        .collect()
}

pub fn efficiency_flags(points: &[StrongPoint], min_efficiency: f64) -> Vec<bool> {
    points
        .iter()
        .map(|point| round2(point.efficiency) < min_efficiency)
        .collect()
}

/// Fit Amdahl and Karp–Flatt models to one group and flag weak spots
///
/// # Errors
/// * `InsufficientData` if the group has no multi-threaded sample
pub fn analyze_strong(
    group: &ScalingGroup<StrongPoint>,
    config: &StrongScalingConfig,
) -> Result<StrongAnalysis> {
    let samples = group.speedup_samples();

    let fit = serial_fraction_fit(&samples)?;
    debug!(
        "{}: f = {:.4}, slope = {:.4} over {} sample(s)",
        group.key, fit.serial_fraction, fit.slope, fit.samples_used
    );

    let physical_fit = match physical_serial_fraction_fit(&samples, config.physical_cores) {
        Ok(fit) => Some(fit),
        Err(e) => {
            warn!(
                "{}: no physical-core fit with {} physical core(s): {}",
                group.key, config.physical_cores, e
            );
            None
        }
    };

    Ok(StrongAnalysis {
        key: group.key.clone(),
        points: group.points.clone(),
        physical_cores: config.physical_cores,
        fit,
        physical_fit,
        karp_flatt: karp_flatt_table(&samples),
        time_flags: time_flags(&group.points, config.min_relative_time),
        speedup_flags: speedup_flags(&group.points, config.min_marginal_speedup),
        efficiency_flags: efficiency_flags(&group.points, config.min_efficiency),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScalingError;
    use crate::models::amdahl_speedup;
    use approx::assert_relative_eq;

    fn point(threads: u32, time_per_rep: f64, speedup: f64) -> StrongPoint {
        StrongPoint {
            threads,
            time_per_rep,
            speedup,
            efficiency: speedup / threads as f64,
        }
    }

    fn amdahl_group(f: f64, threads: &[u32]) -> ScalingGroup<StrongPoint> {
        ScalingGroup {
            key: GroupKey::new("3840x2160", 7),
            points: threads
                .iter()
                .map(|&p| {
                    let s = amdahl_speedup(f, p as f64);
                    point(p, 10.0 / s, s)
                })
                .collect(),
        }
    }

    #[test]
    fn test_flags() {
        let points = vec![
            point(1, 10.0, 1.0),
            point(2, 5.0, 2.0),
            point(4, 4.9, 2.1),
            point(8, 2.0, 5.0),
        ];
        assert_eq!(time_flags(&points, 0.05), vec![false, false, true, false]);
        assert_eq!(speedup_flags(&points, 0.2), vec![false, false, true, false]);
        // efficiencies 1.0, 1.0, 0.525, 0.625
        assert_eq!(efficiency_flags(&points, 0.7), vec![false, false, true, true]);
    }

    #[test]
    fn test_efficiency_flag_uses_printed_precision() {
        let points = vec![StrongPoint {
            threads: 2,
            time_per_rep: 1.0,
            speedup: 1.399,
            efficiency: 0.6996,
        }];
        // 0.6996 prints as 0.70, which is not below 0.7
        assert_eq!(efficiency_flags(&points, 0.7), vec![false]);
    }

    #[test]
    fn test_efficiency_flag_at_rounding_midpoint() {
        let points = vec![StrongPoint {
            threads: 2,
            time_per_rep: 1.0,
            speedup: 1.39,
            efficiency: 0.695,
        }];
        assert_eq!(format!("{:.2}", points[0].efficiency), "0.69");
        assert_eq!(round2(0.695), 0.69);
        assert_eq!(efficiency_flags(&points, 0.7), vec![true]);
    }

    #[test]
    fn test_analyze_recovers_planted_fraction() {
        let group = amdahl_group(0.1, &[1, 2, 4, 8, 16, 32]);
        let config = StrongScalingConfig {
            physical_cores: 8,
            ..Default::default()
        };
        let analysis = analyze_strong(&group, &config).unwrap();

        assert_relative_eq!(analysis.fit.serial_fraction, 0.1, epsilon = 1e-10);
        let physical = analysis.physical_fit.unwrap();
        assert_eq!(physical.samples_used, 3);
        assert_relative_eq!(physical.serial_fraction, 0.1, epsilon = 1e-10);

        assert_eq!(analysis.karp_flatt.len(), 5);
        for row in &analysis.karp_flatt {
            assert_relative_eq!(row.serial_fraction, 0.1, epsilon = 1e-10);
        }

        assert_eq!(analysis.logical_zone(), Some((8, 32)));
        assert_eq!(analysis.physical_points().count(), 3);
        assert_eq!(analysis.fit_curve().len(), CURVE_SAMPLES);
    }

    #[test]
    fn test_no_physical_fit_when_all_threads_logical() {
        let group = amdahl_group(0.2, &[1, 16, 32]);
        let analysis = analyze_strong(&group, &StrongScalingConfig::default()).unwrap();
        assert!(analysis.physical_fit.is_none());
        assert!(analysis.physical_fit_curve().is_none());
    }

    #[test]
    fn test_sequential_only_group_fails() {
        let group = amdahl_group(0.2, &[1]);
        assert!(matches!(
            analyze_strong(&group, &StrongScalingConfig::default()),
            Err(ScalingError::InsufficientData { .. })
        ));
    }
}
