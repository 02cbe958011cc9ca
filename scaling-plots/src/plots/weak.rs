use crate::options::{PlotOptions, ScalingPlotOptions};
use crate::plots::traits::Plot;
use crate::plots::{
    DASHED, dashed_series, draw_legend, draw_mesh, draw_thread_guides, draw_top_labels,
    thread_range, zero_based_range,
};
use crate::render::palette::{GREEN, PALE_GOLDENROD, PURPLE, TAB_BLUE, flag_color};
use crate::render::{draw_err, marker_radius, render_png, text_style};
use crate::{PlotBytes, PlotRange};
use anyhow::Result;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use scaling_rs::WeakAnalysis;

/// Marker area in square points of a time bubble
pub fn time_marker_area(time_per_rep: f64) -> f64 {
    100.0 + 60.0 * time_per_rep
}

/// Throughput axis: measured values and the ideal `p * throughput₁` line
pub fn throughput_range(analysis: &WeakAnalysis) -> PlotRange {
    zero_based_range(
        analysis.points.iter().flat_map(|p| {
            [p.throughput, analysis.ideal_throughput(p.threads)]
        }),
        0.15,
    )
}

/// Measured scaled speedup against Gustafson's ideal `y = p`
pub struct GustafsonPlot;

impl Plot for GustafsonPlot {
    type Options = ScalingPlotOptions;
    type Data = WeakAnalysis;

    fn render(&self, analysis: &WeakAnalysis, options: &ScalingPlotOptions) -> Result<PlotBytes> {
        let base = options.base();
        let x_range = thread_range(analysis.points.iter().map(|p| p.threads).max().unwrap_or(1));
        let y_range = zero_based_range(
            analysis
                .gustafson
                .iter()
                .flat_map(|row| [row.scaled_speedup, row.ideal]),
            0.1,
        );
        let measured: Vec<(f64, f64)> = analysis
            .gustafson
            .iter()
            .map(|row| (row.threads as f64, row.scaled_speedup))
            .collect();
        let ideal: Vec<(f64, f64)> = analysis
            .gustafson
            .iter()
            .map(|row| (row.threads as f64, row.ideal))
            .collect();
        let annotation_size = options.annotation_font_size();

        render_png(base.width, base.height, |root| {
            let mut chart = ChartBuilder::on(root)
                .caption(&base.title, ("sans-serif", options.font_size as f64))
                .margin(base.margin)
                .x_label_area_size(base.x_label_area_size)
                .y_label_area_size(base.y_label_area_size)
                .build_cartesian_2d(x_range.clone(), y_range.clone())
                .map_err(draw_err("build chart"))?;
            draw_mesh(&mut chart, options, "Threads number (p)", "Scaled Speedup")?;

            chart
                .draw_series(LineSeries::new(measured.clone(), GREEN.stroke_width(2)))
                .map_err(draw_err("draw scaled speedup"))?
                .label("real speedup")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN.stroke_width(2)));
            chart
                .draw_series(measured.iter().map(|&c| Circle::new(c, 5, GREEN.filled())))
                .map_err(draw_err("draw scaled speedup markers"))?;
            if options.annotate {
                chart
                    .draw_series(measured.iter().map(|&c| {
                        EmptyElement::at(c)
                            + Text::new(
                                format!("{:.2}", c.1),
                                (-20, 10),
                                text_style(
                                    annotation_size,
                                    BLACK,
                                    Pos::new(HPos::Center, VPos::Top),
                                ),
                            )
                    }))
                    .map_err(draw_err("annotate scaled speedup"))?;
            }

            chart
                .draw_series(dashed_series(ideal, DASHED, GREEN.mix(0.4).stroke_width(2)))
                .map_err(draw_err("draw ideal speedup"))?
                .label("ideal speedup (y=p)")
                .legend(|(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], GREEN.mix(0.4).stroke_width(2))
                });

            draw_legend(&mut chart, options, SeriesLabelPosition::UpperLeft)
        })
    }
}

/// Weak efficiency (left axis), throughput and time (right axis) against
/// thread count
///
/// Flagged values are printed in red.
pub struct WeakScalingPlot;

impl Plot for WeakScalingPlot {
    type Options = ScalingPlotOptions;
    type Data = WeakAnalysis;

    fn render(&self, analysis: &WeakAnalysis, options: &ScalingPlotOptions) -> Result<PlotBytes> {
        let base = options.base();
        let x_range = thread_range(analysis.points.iter().map(|p| p.threads).max().unwrap_or(1));
        let efficiency_range = zero_based_range(
            analysis
                .points
                .iter()
                .map(|p| p.weak_efficiency)
                .chain(std::iter::once(1.0)),
            0.15,
        );
        let throughput_range = throughput_range(analysis);
        let annotation_size = options.annotation_font_size();

        let efficiencies: Vec<(f64, f64)> = analysis
            .points
            .iter()
            .map(|p| (p.threads as f64, p.weak_efficiency))
            .collect();
        let throughputs: Vec<(f64, f64)> = analysis
            .points
            .iter()
            .map(|p| (p.threads as f64, p.throughput))
            .collect();
        let ideal_throughputs: Vec<(f64, f64)> = analysis
            .points
            .iter()
            .map(|p| (p.threads as f64, analysis.ideal_throughput(p.threads)))
            .collect();
        let thread_positions: Vec<f64> = efficiencies.iter().map(|(x, _)| *x).collect();
        let time_labels: Vec<(f64, String, RGBColor)> = analysis
            .points
            .iter()
            .zip(&analysis.time_flags)
            .map(|(p, &flagged)| {
                (
                    p.threads as f64,
                    format!("{:.2}", p.time_per_rep),
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
                .build_cartesian_2d(x_range.clone(), efficiency_range.clone())
                .map_err(draw_err("build chart"))?
                .set_secondary_coord(x_range.clone(), throughput_range.clone());
            draw_mesh(&mut chart, options, "Threads number (p)", "Weak Efficiency")?;
            chart
                .configure_secondary_axes()
                .y_desc("Throughput (Mpix/s)")
                .axis_desc_style(("sans-serif", options.label_font_size() as f64))
                .label_style(("sans-serif", options.label_font_size() as f64 * 0.8))
                .draw()
                .map_err(draw_err("draw secondary axis"))?;

            if options.grid {
                draw_thread_guides(&mut chart, &thread_positions, &efficiency_range)?;
            }

            chart
                .draw_series(LineSeries::new(efficiencies.clone(), TAB_BLUE.stroke_width(2)))
                .map_err(draw_err("draw weak efficiency"))?
                .label("real efficiency")
                .legend(|(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], TAB_BLUE.stroke_width(2))
                });
            chart
                .draw_series(efficiencies.iter().map(|&c| {
                    EmptyElement::at(c) + Rectangle::new([(-4, -4), (4, 4)], TAB_BLUE.filled())
                }))
                .map_err(draw_err("draw weak efficiency markers"))?;
            if options.annotate {
                chart
                    .draw_series(efficiencies.iter().zip(&analysis.efficiency_flags).map(
                        |(&c, &flagged)| {
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
                        },
                    ))
                    .map_err(draw_err("annotate weak efficiency"))?;
            }

            chart
                .draw_series(dashed_series(
                    vec![(x_range.start, 1.0), (x_range.end, 1.0)],
                    DASHED,
                    TAB_BLUE.mix(0.4).stroke_width(2),
                ))
                .map_err(draw_err("draw ideal efficiency"))?
                .label("ideal efficiency (y=1)")
                .legend(|(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], TAB_BLUE.mix(0.4).stroke_width(2))
                });

            chart
                .draw_secondary_series(analysis.points.iter().map(|p| {
                    Circle::new(
                        (p.threads as f64, p.throughput),
                        marker_radius(time_marker_area(p.time_per_rep)),
                        PALE_GOLDENROD.filled(),
                    )
                }))
                .map_err(draw_err("draw time"))?
                .label("time")
                .legend(|(x, y)| Circle::new((x + 10, y), 6, PALE_GOLDENROD.filled()));

            chart
                .draw_secondary_series(LineSeries::new(throughputs.clone(), PURPLE.stroke_width(2)))
                .map_err(draw_err("draw throughput"))?
                .label("real throughput")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], PURPLE.stroke_width(2)));
            chart
                .draw_secondary_series(
                    throughputs
                        .iter()
                        .map(|&c| TriangleMarker::new(c, 6, PURPLE.filled())),
                )
                .map_err(draw_err("draw throughput markers"))?;
            if options.annotate {
                chart
                    .draw_secondary_series(throughputs.iter().zip(&analysis.throughput_flags).map(
                        |(&c, &flagged)| {
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
                        },
                    ))
                    .map_err(draw_err("annotate throughput"))?;
            }

            chart
                .draw_secondary_series(dashed_series(
                    ideal_throughputs.clone(),
                    DASHED,
                    PURPLE.mix(0.4).stroke_width(2),
                ))
                .map_err(draw_err("draw ideal throughput"))?
                .label("ideal throughput (y=p*throughput₁)")
                .legend(|(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], PURPLE.mix(0.4).stroke_width(2))
                });

            draw_top_labels(root, &chart, options, "Time (s)", &time_labels)?;
            draw_legend(&mut chart, options, SeriesLabelPosition::LowerRight)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scaling_rs::{GroupKey, ScalingGroup, WeakPoint, WeakScalingConfig, analyze_weak};

    #[test]
    fn test_time_marker_area() {
        assert_eq!(time_marker_area(0.0), 100.0);
        assert_eq!(time_marker_area(2.0), 220.0);
    }

    #[test]
    fn test_throughput_range_includes_ideal() {
        let group = ScalingGroup {
            key: GroupKey::new("3840x2160", 7),
            points: [(1, 10.0), (8, 40.0)]
                .iter()
                .map(|&(threads, throughput)| WeakPoint {
                    threads,
                    time_per_rep: 1.0,
                    weak_efficiency: 1.0,
                    scaled_speedup: threads as f64,
                    throughput,
                })
                .collect(),
        };
        let analysis = analyze_weak(&group, &WeakScalingConfig::default()).unwrap();
        let range = throughput_range(&analysis);
        assert!(range.contains(&80.0));
        assert_eq!(range.start, 0.0);
    }
}
