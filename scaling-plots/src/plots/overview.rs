use crate::colormap::EfficiencyColorMap;
use crate::options::{PlotOptions, ScalingPlotOptions};
use crate::plots::traits::Plot;
use crate::plots::{DASHED, dashed_series, draw_legend, draw_mesh, thread_range, zero_based_range};
use crate::render::palette::{GREEN, TAB_BLUE};
use crate::render::{Canvas, draw_err, marker_radius, render_png, text_style};
use crate::PlotBytes;
use anyhow::Result;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use scaling_rs::{ScalingGroup, StrongPoint};

/// Width in pixels reserved for the efficiency colour bar
const COLOR_BAR_WIDTH: i32 = 130;

/// Number of bands the colour bar is drawn with
const COLOR_BAR_STEPS: usize = 100;

/// Marker area in square points of the efficiency-coloured markers
const MARKER_AREA: f64 = 100.0;

/// Lower edge and colour of every colour bar band
pub fn color_bar_bands(steps: usize) -> Vec<(f64, RGBColor)> {
    let map = EfficiencyColorMap::new();
    (0..steps)
        .map(|i| {
            let low = i as f64 / steps as f64;
            let mid = (i as f64 + 0.5) / steps as f64;
            (low, map.map(mid))
        })
        .collect()
}

fn draw_color_bar(area: &Canvas<'_>, options: &ScalingPlotOptions) -> Result<()> {
    let base = options.base();
    let step = 1.0 / COLOR_BAR_STEPS as f64;
    let mut bar = ChartBuilder::on(area)
        .margin_top(base.margin + options.font_size + base.x_label_area_size / 2)
        .margin_bottom(base.margin + base.x_label_area_size)
        .margin_left(10)
        .margin_right(base.margin)
        .right_y_label_area_size(base.y_label_area_size)
        .build_cartesian_2d(0.0..1.0, 0.0..1.0)
        .map_err(draw_err("build colour bar"))?;

    bar.draw_series(color_bar_bands(COLOR_BAR_STEPS).into_iter().map(|(low, color)| {
        Rectangle::new([(0.0, low), (1.0, low + step)], color.filled())
    }))
    .map_err(draw_err("draw colour bar"))?;

    let label_size = options.label_font_size() as f64;
    bar.configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .disable_x_axis()
        .y_labels(6)
        .y_desc("Efficiency")
        .axis_desc_style(("sans-serif", label_size))
        .label_style(("sans-serif", label_size * 0.8))
        .draw()
        .map_err(draw_err("draw colour bar axis"))
}

/// Time and speedup of a group with markers coloured by efficiency
///
/// Efficiency is clamped to [0, 1] for colouring, with a colour bar on the
/// right for reference.
pub struct OverviewPlot;

impl Plot for OverviewPlot {
    type Options = ScalingPlotOptions;
    type Data = ScalingGroup<StrongPoint>;

    fn render(
        &self,
        group: &ScalingGroup<StrongPoint>,
        options: &ScalingPlotOptions,
    ) -> Result<PlotBytes> {
        let base = options.base();
        let x_range = thread_range(group.max_threads());
        let time_range = zero_based_range(group.points.iter().map(|p| p.time_per_rep), 0.15);
        let speedup_range = zero_based_range(group.points.iter().map(|p| p.speedup), 0.15);
        let color_map = EfficiencyColorMap::new();
        let annotation_size = options.annotation_font_size();
        let radius = marker_radius(MARKER_AREA);

        let times: Vec<(f64, f64)> = group
            .points
            .iter()
            .map(|p| (p.threads as f64, p.time_per_rep))
            .collect();
        let speedups: Vec<(f64, f64)> = group
            .points
            .iter()
            .map(|p| (p.threads as f64, p.speedup))
            .collect();

        render_png(base.width, base.height, |root| {
            let (main, color_bar) = root.split_horizontally(base.width as i32 - COLOR_BAR_WIDTH);

            let mut chart = ChartBuilder::on(&main)
                .caption(&base.title, ("sans-serif", options.font_size as f64))
                .margin(base.margin)
                .x_label_area_size(base.x_label_area_size)
                .y_label_area_size(base.y_label_area_size)
                .right_y_label_area_size(base.y_label_area_size)
                .build_cartesian_2d(x_range.clone(), time_range.clone())
                .map_err(draw_err("build chart"))?
                .set_secondary_coord(x_range.clone(), speedup_range.clone());
            draw_mesh(&mut chart, options, "Threads number", "Average time (s)")?;
            chart
                .configure_secondary_axes()
                .y_desc("Average speedup")
                .axis_desc_style(("sans-serif", options.label_font_size() as f64))
                .label_style(("sans-serif", options.label_font_size() as f64 * 0.8))
                .draw()
                .map_err(draw_err("draw secondary axis"))?;

            chart
                .draw_series(LineSeries::new(times.clone(), TAB_BLUE.stroke_width(2)))
                .map_err(draw_err("draw time"))?
                .label("time")
                .legend(|(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], TAB_BLUE.stroke_width(2))
                });
            chart
                .draw_series(group.points.iter().map(|p| {
                    Circle::new(
                        (p.threads as f64, p.time_per_rep),
                        radius,
                        color_map.map(p.efficiency).filled(),
                    )
                }))
                .map_err(draw_err("draw efficiency markers"))?;
            if options.annotate {
                chart
                    .draw_series(group.points.iter().map(|p| {
                        EmptyElement::at((p.threads as f64, p.time_per_rep))
                            + Text::new(
                                format!("{:.2}", p.efficiency),
                                (0, -(radius as i32) - 2),
                                text_style(
                                    annotation_size,
                                    BLACK,
                                    Pos::new(HPos::Center, VPos::Bottom),
                                ),
                            )
                    }))
                    .map_err(draw_err("annotate efficiency"))?;
            }

            chart
                .draw_secondary_series(dashed_series(
                    speedups.clone(),
                    DASHED,
                    GREEN.stroke_width(2),
                ))
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
                    .draw_secondary_series(speedups.iter().map(|&c| {
                        EmptyElement::at(c)
                            + Text::new(
                                format!("{:.2}", c.1),
                                (0, -6),
                                text_style(
                                    annotation_size,
                                    BLACK,
                                    Pos::new(HPos::Center, VPos::Bottom),
                                ),
                            )
                    }))
                    .map_err(draw_err("annotate speedup"))?;
            }

            draw_legend(&mut chart, options, SeriesLabelPosition::MiddleRight)?;
            draw_color_bar(&color_bar, options)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_bar_bands() {
        let bands = color_bar_bands(4);
        let lows: Vec<f64> = bands.iter().map(|(low, _)| *low).collect();
        assert_eq!(lows, vec![0.0, 0.25, 0.5, 0.75]);

        let (_, bottom) = bands[0];
        let (_, top) = bands[3];
        assert!(bottom.0 > bottom.1, "poor efficiency should be red-dominant");
        assert!(top.1 > top.0, "good efficiency should be green-dominant");
    }
}
