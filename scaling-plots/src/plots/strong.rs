use crate::options::{PlotOptions, ScalingPlotOptions};
use crate::plots::traits::Plot;
use crate::plots::{
    DASH_DOT, DASHED, DOTTED, clip_to, dashed_series, draw_legend, draw_mesh, draw_thread_guides,
    draw_top_labels, thread_range, zero_based_range,
};
use crate::render::palette::{GREEN, PALE_GOLDENROD, TAB_BLUE, flag_color};
use crate::render::{draw_err, marker_radius, render_png, text_style};
use crate::{PlotBytes, PlotRange};
use anyhow::Result;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use scaling_rs::StrongAnalysis;

/// Marker area in square points of an efficiency bubble
pub fn efficiency_marker_area(efficiency: f64) -> f64 {
    150.0 + 500.0 * efficiency
}

/// Thread axis: every measured thread count and the physical-core marker
pub fn strong_thread_range(analysis: &StrongAnalysis) -> PlotRange {
    thread_range(analysis.max_threads().max(analysis.physical_cores))
}

/// Speedup axis: measured speedups, the ideal line and both fitted curves
pub fn speedup_range(analysis: &StrongAnalysis) -> PlotRange {
    let max_threads = analysis.max_threads() as f64;
    let fitted = std::iter::once(analysis.fit)
        .chain(analysis.physical_fit)
        .map(|fit| fit.predict_speedup(max_threads));
    zero_based_range(
        analysis
            .points
            .iter()
            .map(|p| p.speedup)
            .chain(std::iter::once(max_threads))
            .chain(fitted),
        0.15,
    )
}

/// Time (left axis), speedup and efficiency (right axis) against thread count
///
/// Flagged values are printed in red. Threads beyond the physical cores are
/// shaded as the logical-thread zone.
pub struct StrongScalingPlot;

impl Plot for StrongScalingPlot {
    type Options = ScalingPlotOptions;
    type Data = StrongAnalysis;

    fn render(&self, analysis: &StrongAnalysis, options: &ScalingPlotOptions) -> Result<PlotBytes> {
        let base = options.base();
        let max_threads = analysis.max_threads() as f64;
        let x_range = strong_thread_range(analysis);
        let time_range = zero_based_range(analysis.points.iter().map(|p| p.time_per_rep), 0.15);
        let speedup_range = speedup_range(analysis);
        let annotation_size = options.annotation_font_size();

        let times: Vec<(f64, f64)> = analysis
            .points
            .iter()
            .map(|p| (p.threads as f64, p.time_per_rep))
            .collect();
        let speedups: Vec<(f64, f64)> = analysis
            .points
            .iter()
            .map(|p| (p.threads as f64, p.speedup))
            .collect();
        let thread_positions: Vec<f64> = times.iter().map(|(x, _)| *x).collect();
        let efficiency_labels: Vec<(f64, String, RGBColor)> = analysis
            .points
            .iter()
            .zip(&analysis.efficiency_flags)
            .map(|(p, &flagged)| {
                (
                    p.threads as f64,
                    format!("{:.2}", p.efficiency),
                    flag_color(flagged),
                )
            })
            .collect();

        render_png(base.width, base.height, |root| {
            let mut chart = ChartBuilder::on(root)
                .caption(&base.title, ("sans-serif", options.font_size as f64))
                .margin(base.margin)
                .x_label_area_size(base.x_label_area_size)
                .y_label_area_size(base.y_label_area_size)
                .right_y_label_area_size(base.y_label_area_size)
                .top_x_label_area_size(base.x_label_area_size)
                .build_cartesian_2d(x_range.clone(), time_range.clone())
                .map_err(draw_err("build chart"))?
                .set_secondary_coord(x_range.clone(), speedup_range.clone());
            draw_mesh(&mut chart, options, "Threads number", "Time (s)")?;
            chart
                .configure_secondary_axes()
                .y_desc("SpeedUp")
                .axis_desc_style(("sans-serif", options.label_font_size() as f64))
                .label_style(("sans-serif", options.label_font_size() as f64 * 0.8))
                .draw()
                .map_err(draw_err("draw secondary axis"))?;

            if options.grid {
                draw_thread_guides(&mut chart, &thread_positions, &time_range)?;
            }

            if let Some((cores, max)) = analysis.logical_zone() {
                chart
                    .draw_series(std::iter::once(Rectangle::new(
                        [(cores as f64, time_range.start), (max as f64, time_range.end)],
                        BLACK.mix(0.1).filled(),
                    )))
                    .map_err(draw_err("draw logical threads zone"))?
                    .label("Logical threads zone")
                    .legend(|(x, y)| {
                        Rectangle::new([(x, y - 5), (x + 20, y + 5)], BLACK.mix(0.1).filled())
                    });
            }

            let cores = analysis.physical_cores as f64;
            chart
                .draw_series(dashed_series(
                    vec![(cores, time_range.start), (cores, time_range.end)],
                    DASHED,
                    BLACK.mix(0.6).stroke_width(2),
                ))
                .map_err(draw_err("draw physical core marker"))?
                .label("Max physical threads")
                .legend(|(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], BLACK.mix(0.6).stroke_width(2))
                });

            chart
                .draw_series(LineSeries::new(times.clone(), TAB_BLUE.stroke_width(2)))
                .map_err(draw_err("draw time"))?
                .label("time")
                .legend(|(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], TAB_BLUE.stroke_width(2))
                });
            chart
                .draw_series(times.iter().map(|&c| Circle::new(c, 5, TAB_BLUE.filled())))
                .map_err(draw_err("draw time markers"))?;
            if options.annotate {
                chart
                    .draw_series(times.iter().zip(&analysis.time_flags).map(|(&c, &flagged)| {
                        EmptyElement::at(c)
                            + Text::new(
                                format!("{:.2}", c.1),
                                (-20, 10),
                                text_style(
                                    annotation_size,
                                    flag_color(flagged),
                                    Pos::new(HPos::Center, VPos::Top),
                                ),
                            )
                    }))
                    .map_err(draw_err("annotate time"))?;
            }

            chart
                .draw_secondary_series(dashed_series(
                    vec![(1.0, 1.0), (max_threads, max_threads)],
                    DASHED,
                    GREEN.mix(0.4).stroke_width(2),
                ))
                .map_err(draw_err("draw ideal speedup"))?
                .label("ideal speedup")
                .legend(|(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], GREEN.mix(0.4).stroke_width(2))
                });

            chart
                .draw_secondary_series(analysis.points.iter().map(|p| {
                    Circle::new(
                        (p.threads as f64, p.speedup),
                        marker_radius(efficiency_marker_area(p.efficiency)),
                        PALE_GOLDENROD.filled(),
                    )
                }))
                .map_err(draw_err("draw efficiency"))?
                .label("efficiency")
                .legend(|(x, y)| Circle::new((x + 10, y), 6, PALE_GOLDENROD.filled()));

            chart
                .draw_secondary_series(LineSeries::new(speedups.clone(), GREEN.stroke_width(2)))
                .map_err(draw_err("draw speedup"))?
                .label("speedup")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN.stroke_width(2)));
            chart
                .draw_secondary_series(speedups.iter().map(|&c| {
                    EmptyElement::at(c) + Rectangle::new([(-4, -4), (4, 4)], GREEN.filled())
                }))
                .map_err(draw_err("draw speedup markers"))?;
            if options.annotate {
                chart
                    .draw_secondary_series(speedups.iter().zip(&analysis.speedup_flags).map(
                        |(&c, &flagged)| {
                            EmptyElement::at(c)
                                + Text::new(
                                    format!("{:.2}", c.1),
                                    (-20, -10),
                                    text_style(
                                        annotation_size,
                                        flag_color(flagged),
                                        Pos::new(HPos::Center, VPos::Bottom),
                                    ),
                                )
                        },
                    ))
                    .map_err(draw_err("annotate speedup"))?;
            }

            chart
                .draw_secondary_series(dashed_series(
                    clip_to(analysis.fit_curve(), &speedup_range),
                    DASH_DOT,
                    GREEN.mix(0.4).stroke_width(2),
                ))
                .map_err(draw_err("draw theoretical speedup"))?
                .label("theoretical speedup")
                .legend(|(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], GREEN.mix(0.4).stroke_width(2))
                });
            if let Some(curve) = analysis.physical_fit_curve() {
                chart
                    .draw_secondary_series(dashed_series(
                        clip_to(curve, &speedup_range),
                        DOTTED,
                        GREEN.mix(0.4).stroke_width(2),
                    ))
                    .map_err(draw_err("draw physical theoretical speedup"))?
                    .label("theoretical speedup (only physical core)")
                    .legend(|(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], GREEN.mix(0.4).stroke_width(2))
                    });
            }

            draw_top_labels(root, &chart, options, "Efficiency", &efficiency_labels)?;
            draw_legend(&mut chart, options, SeriesLabelPosition::UpperMiddle)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scaling_rs::{GroupKey, ScalingGroup, StrongPoint, StrongScalingConfig, analyze_strong};

    #[test]
    fn test_efficiency_marker_area() {
        assert_eq!(efficiency_marker_area(0.0), 150.0);
        assert_eq!(efficiency_marker_area(1.0), 650.0);
    }

    fn small_group() -> ScalingGroup<StrongPoint> {
        ScalingGroup {
            key: GroupKey::new("1920x1080", 7),
            points: [(1, 1.0), (2, 1.5), (4, 2.0)]
                .iter()
                .map(|&(threads, speedup)| StrongPoint {
                    threads,
                    time_per_rep: 4.0 / speedup,
                    speedup,
                    efficiency: speedup / threads as f64,
                })
                .collect(),
        }
    }

    #[test]
    fn test_thread_axis_shows_physical_cores_without_logical_zone() {
        // 10 physical cores, 4 threads at most: no zone, but the marker stays visible
        let analysis = analyze_strong(&small_group(), &StrongScalingConfig::default()).unwrap();
        assert!(analysis.logical_zone().is_none());
        assert!(strong_thread_range(&analysis).contains(&10.0));

        let config = StrongScalingConfig {
            physical_cores: 2,
            ..Default::default()
        };
        let analysis = analyze_strong(&small_group(), &config).unwrap();
        assert_eq!(analysis.logical_zone(), Some((2, 4)));
        assert_eq!(strong_thread_range(&analysis), thread_range(4));
    }

    #[test]
    fn test_speedup_range_includes_ideal() {
        let analysis = analyze_strong(&small_group(), &StrongScalingConfig::default()).unwrap();
        let range = speedup_range(&analysis);
        assert!(range.contains(&4.0));
        assert_eq!(range.start, 0.0);
    }
}
