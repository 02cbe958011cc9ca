//! # scaling-plots
//!
//! Diagnostic charts for strong and weak scaling analyses.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use scaling_plots::{AmdahlEstimatePlot, ChartKind, Plot, ScalingPlotOptions};
//! use scaling_rs::{StrongScalingConfig, analyze_strong, load_strong_scaling};
//!
//! # fn main() -> anyhow::Result<()> {
//! let groups = load_strong_scaling("kip_openMP_strongScaling.csv")?;
//! let analysis = analyze_strong(&groups[0], &StrongScalingConfig::default())?;
//! let options = ScalingPlotOptions::for_chart(ChartKind::AmdahlEstimate, &analysis.key);
//! let png = AmdahlEstimatePlot.render(&analysis, &options)?;
//! std::fs::write(ChartKind::AmdahlEstimate.file_name(&analysis.key), png)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - `options`: chart configuration types using the builder pattern
//! - `plots`: one `Plot` implementation per chart
//! - `render`: PNG encoding and shared drawing helpers
//! - `colormap`: red-yellow-green efficiency colour map
//! - `naming`: chart kinds, file names and titles

pub mod colormap;
pub mod naming;
pub mod options;
pub mod plots;
pub mod render;

pub use colormap::EfficiencyColorMap;
pub use naming::ChartKind;
pub use options::{BasePlotOptions, PlotOptions, ScalingPlotOptions};
pub use plots::{
    AmdahlEstimatePlot, AmdahlEvaluationPlot, GustafsonPlot, OverviewPlot, Plot,
    StrongScalingPlot, WeakScalingPlot,
};

// Type aliases
pub type PlotBytes = Vec<u8>;
pub type PlotRange = std::ops::Range<f64>;

/// Axis range covering `values` with `padding` (a fraction of the span) on both sides
pub fn padded_range(values: impl IntoIterator<Item = f64>, padding: f64) -> PlotRange {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
            (min.min(v), max.max(v))
        });

    if min > max {
        return 0.0..1.0;
    }
    if min == max {
        return (min - 1.0)..(max + 1.0);
    }

    let pad = (max - min) * padding;
    (min - pad)..(max + pad)
}
