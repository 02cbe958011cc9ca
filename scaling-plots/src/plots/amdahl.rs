use crate::options::{PlotOptions, ScalingPlotOptions};
use crate::plots::traits::Plot;
use crate::plots::{
    DASH_DOT, DOTTED, clip_to, dashed_series, draw_legend, draw_mesh, thread_range,
    zero_based_range,
};
use crate::render::palette::{CYCLE, DARK_RED, LIME_GREEN};
use crate::render::{draw_err, marker_radius, render_png};
use crate::{PlotBytes, PlotRange, padded_range};
use anyhow::Result;
use plotters::prelude::*;
use scaling_rs::StrongAnalysis;
use scaling_rs::models::{CURVE_SAMPLES, SerialFractionFit, amdahl_curve, reciprocal_points};

/// Scatter marker area in square points
const SCATTER_AREA: f64 = 60.0;

const FIT_COLOR: RGBColor = CYCLE[0];
const PHYSICAL_FIT_COLOR: RGBColor = CYCLE[1];

fn speedup_samples(analysis: &StrongAnalysis) -> Vec<(u32, f64)> {
    analysis
        .points
        .iter()
        .map(|p| (p.threads, p.speedup))
        .collect()
}

/// Fitted `1/S` line over `1/p` in [0, 1]
pub fn reciprocal_fit_line(fit: &SerialFractionFit) -> Vec<(f64, f64)> {
    [0.0, 1.0]
        .iter()
        .map(|&x| (x, fit.predict_reciprocal(x)))
        .collect()
}

/// Speedup axis of the evaluation chart: measured speedups and both fitted
/// curves at the largest thread count
pub fn evaluation_range(analysis: &StrongAnalysis) -> PlotRange {
    let max_threads = analysis.max_threads() as f64;
    let fitted = std::iter::once(analysis.fit)
        .chain(analysis.physical_fit)
        .map(|fit| fit.predict_speedup(max_threads));
    zero_based_range(
        analysis.points.iter().map(|p| p.speedup).chain(fitted),
        0.15,
    )
}

/// Reciprocal plot (`1/S` against `1/p`) with the serial-fraction fits
///
/// The intercept of each fit line at `1/p = 0` is the estimated serial
/// fraction.
pub struct AmdahlEstimatePlot;

impl Plot for AmdahlEstimatePlot {
    type Options = ScalingPlotOptions;
    type Data = StrongAnalysis;

    fn render(&self, analysis: &StrongAnalysis, options: &ScalingPlotOptions) -> Result<PlotBytes> {
        let base = options.base();
        let samples = speedup_samples(analysis);
        let cores = analysis.physical_cores;
        let experimental = reciprocal_points(&samples, |t| t > 1);
        let physical = reciprocal_points(&samples, |t| t > 1 && t <= cores);
        let fit_line = reciprocal_fit_line(&analysis.fit);
        let physical_line = analysis.physical_fit.as_ref().map(reciprocal_fit_line);

        let y_range = padded_range(
            experimental
                .iter()
                .chain(&fit_line)
                .chain(physical_line.iter().flatten())
                .map(|(_, y)| *y),
            0.05,
        );
        let radius = marker_radius(SCATTER_AREA);

        render_png(base.width, base.height, |root| {
            let mut chart = ChartBuilder::on(root)
                .caption(&base.title, ("sans-serif", options.font_size as f64))
                .margin(base.margin)
                .x_label_area_size(base.x_label_area_size)
                .y_label_area_size(base.y_label_area_size)
                .build_cartesian_2d(0.0..1.0, y_range.clone())
                .map_err(draw_err("build chart"))?;
            draw_mesh(&mut chart, options, "1 / NumThreads", "1 / SpeedUp")?;

            chart
                .draw_series(
                    experimental
                        .iter()
                        .map(|&c| Circle::new(c, radius, LIME_GREEN.filled())),
                )
                .map_err(draw_err("draw experimental data"))?
                .label("experimental data")
                .legend(|(x, y)| Circle::new((x + 10, y), 5, LIME_GREEN.filled()));

            chart
                .draw_series(dashed_series(
                    fit_line.clone(),
                    DASH_DOT,
                    FIT_COLOR.stroke_width(2),
                ))
                .map_err(draw_err("draw linear fit"))?
                .label(format!(
                    "linear fit (f ≈ {:.3})",
                    analysis.fit.serial_fraction
                ))
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], FIT_COLOR.stroke_width(2)));

            chart
                .draw_series(
                    physical
                        .iter()
                        .map(|&c| Circle::new(c, radius, DARK_RED.stroke_width(2))),
                )
                .map_err(draw_err("draw physical core data"))?
                .label("physical core data")
                .legend(|(x, y)| Circle::new((x + 10, y), 5, DARK_RED.stroke_width(2)));

            if let (Some(fit), Some(line)) = (analysis.physical_fit, &physical_line) {
                chart
                    .draw_series(dashed_series(
                        line.clone(),
                        DOTTED,
                        PHYSICAL_FIT_COLOR.stroke_width(2),
                    ))
                    .map_err(draw_err("draw physical linear fit"))?
                    .label(format!(
                        "physical linear fit (f ≈ {:.3})",
                        fit.serial_fraction
                    ))
                    .legend(|(x, y)| {
                        PathElement::new(
                            vec![(x, y), (x + 20, y)],
                            PHYSICAL_FIT_COLOR.stroke_width(2),
                        )
                    });
            }

            draw_legend(&mut chart, options, SeriesLabelPosition::UpperLeft)
        })
    }
}

/// Measured speedups against the Amdahl curve of every Karp–Flatt fraction
/// and of both fits
pub struct AmdahlEvaluationPlot;

impl Plot for AmdahlEvaluationPlot {
    type Options = ScalingPlotOptions;
    type Data = StrongAnalysis;

    fn render(&self, analysis: &StrongAnalysis, options: &ScalingPlotOptions) -> Result<PlotBytes> {
        let base = options.base();
        let max_threads = analysis.max_threads() as f64;
        let x_range = thread_range(analysis.max_threads());
        let y_range = evaluation_range(analysis);
        let radius = marker_radius(SCATTER_AREA);

        let measured: Vec<(f64, f64)> = analysis
            .parallel_points()
            .map(|p| (p.threads as f64, p.speedup))
            .collect();
        let physical: Vec<(f64, f64)> = analysis
            .physical_points()
            .map(|p| (p.threads as f64, p.speedup))
            .collect();

        render_png(base.width, base.height, |root| {
            let mut chart = ChartBuilder::on(root)
                .caption(&base.title, ("sans-serif", options.font_size as f64))
                .margin(base.margin)
                .x_label_area_size(base.x_label_area_size)
                .y_label_area_size(base.y_label_area_size)
                .build_cartesian_2d(x_range.clone(), y_range.clone())
                .map_err(draw_err("build chart"))?;
            draw_mesh(&mut chart, options, "NumThreads (p)", "SpeedUp")?;

            chart
                .draw_series(
                    measured
                        .iter()
                        .map(|&c| Circle::new(c, radius, LIME_GREEN.filled())),
                )
                .map_err(draw_err("draw experimental speedup"))?
                .label("experimental speedup")
                .legend(|(x, y)| Circle::new((x + 10, y), 5, LIME_GREEN.filled()));

            // The fit colours lead the cycle, Karp–Flatt curves take the rest
            for (i, row) in analysis.karp_flatt.iter().enumerate() {
                let color = CYCLE[(i + 2) % CYCLE.len()];
                let curve = clip_to(
                    amdahl_curve(row.serial_fraction, max_threads, CURVE_SAMPLES),
                    &y_range,
                );
                chart
                    .draw_series(LineSeries::new(curve, color.stroke_width(2)))
                    .map_err(draw_err("draw Karp-Flatt curve"))?
                    .label(format!(
                        "p={} (f ≈ {:.3})",
                        row.threads, row.serial_fraction
                    ))
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
            }

            chart
                .draw_series(dashed_series(
                    clip_to(analysis.fit_curve(), &y_range),
                    DASH_DOT,
                    FIT_COLOR.stroke_width(2),
                ))
                .map_err(draw_err("draw linear fit curve"))?
                .label(format!(
                    "linear fit (f ≈ {:.3})",
                    analysis.fit.serial_fraction
                ))
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], FIT_COLOR.stroke_width(2)));

            chart
                .draw_series(
                    physical
                        .iter()
                        .map(|&c| Circle::new(c, radius, DARK_RED.stroke_width(2))),
                )
                .map_err(draw_err("draw physical core speedup"))?
                .label("physical core speedup")
                .legend(|(x, y)| Circle::new((x + 10, y), 5, DARK_RED.stroke_width(2)));

            if let (Some(fit), Some(curve)) = (analysis.physical_fit, analysis.physical_fit_curve()) {
                chart
                    .draw_series(dashed_series(
                        clip_to(curve, &y_range),
                        DOTTED,
                        PHYSICAL_FIT_COLOR.stroke_width(2),
                    ))
                    .map_err(draw_err("draw physical linear fit curve"))?
                    .label(format!(
                        "physical linear fit (f ≈ {:.3})",
                        fit.serial_fraction
                    ))
                    .legend(|(x, y)| {
                        PathElement::new(
                            vec![(x, y), (x + 20, y)],
                            PHYSICAL_FIT_COLOR.stroke_width(2),
                        )
                    });
            }

            draw_legend(&mut chart, options, SeriesLabelPosition::UpperLeft)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use scaling_rs::{GroupKey, ScalingGroup, StrongPoint, StrongScalingConfig, analyze_strong};

    fn analysis() -> StrongAnalysis {
        let group = ScalingGroup {
            key: GroupKey::new("1920x1080", 7),
            points: [(1, 1.0), (2, 1.8), (4, 3.0), (8, 4.2), (16, 5.0)]
                .iter()
                .map(|&(threads, speedup)| StrongPoint {
                    threads,
                    time_per_rep: 8.0 / speedup,
                    speedup,
                    efficiency: speedup / threads as f64,
                })
                .collect(),
        };
        let config = StrongScalingConfig {
            physical_cores: 8,
            ..Default::default()
        };
        analyze_strong(&group, &config).unwrap()
    }

    #[test]
    fn test_fit_line_spans_unit_interval() {
        let analysis = analysis();
        let line = reciprocal_fit_line(&analysis.fit);
        assert_eq!(line.len(), 2);
        assert_relative_eq!(line[0].1, analysis.fit.serial_fraction);
        assert_relative_eq!(line[1].1, analysis.fit.serial_fraction + analysis.fit.slope);
    }

    #[test]
    fn test_evaluation_range_covers_measurements() {
        let analysis = analysis();
        let range = evaluation_range(&analysis);
        assert_eq!(range.start, 0.0);
        assert!(range.end > 5.0);
        assert!(range.end > analysis.fit.predict_speedup(16.0));
    }
}
