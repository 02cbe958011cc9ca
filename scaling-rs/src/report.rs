//! Console summaries and the JSON report of an analysis run

use crate::analysis::{StrongAnalysis, StrongScalingConfig, WeakAnalysis, WeakScalingConfig};
use crate::data::{ScalingGroup, StrongPoint};
use crate::error::Result;
use crate::models::SerialFractionFit;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

fn fit_summary(out: &mut String, heading: &str, fit: &SerialFractionFit) {
    let _ = writeln!(out, "\n{heading}");
    let _ = writeln!(
        out,
        "  f evaluated = {:.4} (intersection), angular coeff={:.4}",
        fit.serial_fraction, fit.slope
    );
}

/// Fit summaries and Karp–Flatt table for one strong-scaling group
pub fn strong_summary(analysis: &StrongAnalysis) -> String {
    let mut out = String::new();
    fit_summary(
        &mut out,
        &format!("Couple {} with thread > 1:", analysis.key),
        &analysis.fit,
    );
    if let Some(physical) = &analysis.physical_fit {
        fit_summary(
            &mut out,
            &format!(
                "Couple {} with 1 < thread <= {}:",
                analysis.key, analysis.physical_cores
            ),
            physical,
        );
    }

    let _ = writeln!(out, "\nf_p table (per p):");
    let _ = writeln!(out, "{:>10} {:>11} {:>7}", "NumThreads", "SpeedUp_avg", "f_p");
    for row in &analysis.karp_flatt {
        let _ = writeln!(
            out,
            "{:>10} {:>11.4} {:>7.4}",
            row.threads, row.speedup, row.serial_fraction
        );
    }
    out
}

/// Gustafson comparison table for one weak-scaling group
pub fn weak_summary(analysis: &WeakAnalysis) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "\nCouple {} (T1 = {:.4} s, throughput1 = {:.2} Mpix/s):",
        analysis.key, analysis.baseline_time, analysis.baseline_throughput
    );
    let _ = writeln!(
        out,
        "{:>10} {:>13} {:>7} {:>7} {:>7}",
        "NumThreads", "ScaledSpeedUp", "Ideal", "Gap", "f_p"
    );
    for row in &analysis.gustafson {
        let f = row
            .serial_fraction
            .map(|f| format!("{f:.4}"))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:>10} {:>13.4} {:>7.1} {:>7.4} {:>7}",
            row.threads, row.scaled_speedup, row.ideal, row.gap, f
        );
    }
    out
}

/// Per-thread summary of an overview group
pub fn overview_summary(group: &ScalingGroup<StrongPoint>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nCouple {}:", group.key);
    let _ = writeln!(
        out,
        "{:>10} {:>12} {:>8} {:>10}",
        "NumThreads", "TimePerRep_s", "SpeedUp", "Efficiency"
    );
    for p in &group.points {
        let _ = writeln!(
            out,
            "{:>10} {:>12.4} {:>8.2} {:>10.2}",
            p.threads, p.time_per_rep, p.speedup, p.efficiency
        );
    }
    out
}

/// Failure of one group, kept in the report instead of aborting the run
#[derive(Debug, Clone, Serialize)]
pub struct GroupFailure {
    pub group: String,
    pub error: String,
}

/// Machine-readable result of one run
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AnalysisReport {
    Strong {
        input: String,
        config: StrongScalingConfig,
        groups: Vec<StrongAnalysis>,
        failures: Vec<GroupFailure>,
    },
    Weak {
        input: String,
        config: WeakScalingConfig,
        groups: Vec<WeakAnalysis>,
        failures: Vec<GroupFailure>,
    },
    Overview {
        input: String,
        groups: Vec<ScalingGroup<StrongPoint>>,
        failures: Vec<GroupFailure>,
    },
}

impl AnalysisReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
