pub mod amdahl;
pub mod overview;
pub mod strong;
pub mod traits;
pub mod weak;

pub use amdahl::{AmdahlEstimatePlot, AmdahlEvaluationPlot};
pub use overview::OverviewPlot;
pub use strong::StrongScalingPlot;
pub use traits::Plot;
pub use weak::{GustafsonPlot, WeakScalingPlot};

use crate::PlotRange;
use crate::options::ScalingPlotOptions;
use crate::render::draw_err;
use crate::render::palette::GRID;
use anyhow::Result;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

/// Cartesian chart on the in-memory bitmap
pub(crate) type ScalingChart<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Dash length and gap (pixels) of `--` lines
pub(crate) const DASHED: (i32, i32) = (10, 6);
/// Dash length and gap (pixels) of `-.` lines
pub(crate) const DASH_DOT: (i32, i32) = (14, 4);
/// Dash length and gap (pixels) of `:` lines
pub(crate) const DOTTED: (i32, i32) = (2, 5);

pub(crate) fn dashed_series(
    points: Vec<(f64, f64)>,
    (size, spacing): (i32, i32),
    style: ShapeStyle,
) -> DashedLineSeries<std::vec::IntoIter<(f64, f64)>, i32> {
    DashedLineSeries::new(points, size, spacing, style)
}

/// Axis range `[0, max * (1 + headroom)]` over the finite values
pub(crate) fn zero_based_range(values: impl IntoIterator<Item = f64>, headroom: f64) -> PlotRange {
    let max = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return 0.0..1.0;
    }
    0.0..max * (1.0 + headroom)
}

/// Thread axis with a little room left of one thread and right of the maximum
pub(crate) fn thread_range(max_threads: u32) -> PlotRange {
    let max = max_threads.max(1) as f64;
    0.0..max * 1.05 + 0.5
}

/// Keep the finite points inside the vertical range
pub(crate) fn clip_to(points: Vec<(f64, f64)>, range: &PlotRange) -> Vec<(f64, f64)> {
    points
        .into_iter()
        .filter(|(x, y)| x.is_finite() && y.is_finite() && range.contains(y))
        .collect()
}

/// Axes, labels and the light background grid
pub(crate) fn draw_mesh(
    chart: &mut ScalingChart<'_, '_>,
    options: &ScalingPlotOptions,
    x_desc: &str,
    y_desc: &str,
) -> Result<()> {
    let label_size = options.label_font_size() as f64;
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(x_desc)
        .y_desc(y_desc)
        .axis_desc_style(("sans-serif", label_size))
        .label_style(("sans-serif", label_size * 0.8))
        .bold_line_style(GRID.mix(0.6))
        .light_line_style(TRANSPARENT);
    if !options.grid {
        mesh.disable_mesh();
    }
    mesh.draw().map_err(draw_err("draw mesh"))
}

pub(crate) fn draw_legend<'a, 'b: 'a>(
    chart: &mut ScalingChart<'a, 'b>,
    options: &ScalingPlotOptions,
    position: SeriesLabelPosition,
) -> Result<()> {
    chart
        .configure_series_labels()
        .position(position)
        .label_font(("sans-serif", options.annotation_font_size() as f64))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.3))
        .draw()
        .map_err(draw_err("draw legend"))
}

/// Draw one text label per thread count above the plotting area,
/// with `title` centred above them
///
/// Thread positions are taken from the chart's x axis.
pub(crate) fn draw_top_labels(
    root: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
    chart: &ScalingChart<'_, '_>,
    options: &ScalingPlotOptions,
    title: &str,
    labels: &[(f64, String, RGBColor)],
) -> Result<()> {
    use crate::render::text_style;
    use plotters::style::text_anchor::{HPos, Pos, VPos};

    let (x_pixels, y_pixels) = chart.plotting_area().get_pixel_range();
    let top = y_pixels.start;
    let label_size = options.annotation_font_size();

    for (x, text, color) in labels {
        let (px, _) = chart.backend_coord(&(*x, 0.0));
        root.draw(&Text::new(
            text.clone(),
            (px, top - 6),
            text_style(label_size, *color, Pos::new(HPos::Center, VPos::Bottom)),
        ))
        .map_err(draw_err("draw top label"))?;
    }

    let centre = (x_pixels.start + x_pixels.end) / 2;
    root.draw(&Text::new(
        title.to_string(),
        (centre, top - 12 - label_size as i32),
        text_style(
            options.label_font_size(),
            BLACK,
            Pos::new(HPos::Center, VPos::Bottom),
        ),
    ))
    .map_err(draw_err("draw top axis title"))?;
    Ok(())
}

/// Dashed vertical guides at every thread count
pub(crate) fn draw_thread_guides(
    chart: &mut ScalingChart<'_, '_>,
    threads: &[f64],
    y_range: &PlotRange,
) -> Result<()> {
    for &x in threads {
        chart
            .draw_series(dashed_series(
                vec![(x, y_range.start), (x, y_range.end)],
                DASHED,
                GRID.mix(0.6).stroke_width(1),
            ))
            .map_err(draw_err("draw thread guide"))?;
    }
    Ok(())
}
