//! PNG rendering and drawing helpers shared by the charts

use crate::PlotBytes;
use anyhow::{Result, anyhow};
use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::Pos;
use std::io::Cursor;
use std::time::Instant;
use tracing::debug;

pub mod palette;

/// Resolution the marker sizes are expressed for
pub const DPI: f64 = 150.0;

/// Canvas handed to the chart drawing closures
pub type Canvas<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Build the closure used with `map_err` to turn a plotters error into context
pub fn draw_err<E: std::fmt::Display>(what: &'static str) -> impl FnOnce(E) -> anyhow::Error {
    move |e| anyhow!("failed to {what}: {e}")
}

/// Draw into an in-memory RGB buffer and encode the result as PNG
///
/// The buffer is white before `draw` runs.
pub fn render_png<F>(width: u32, height: u32, draw: F) -> Result<PlotBytes>
where
    F: FnOnce(&Canvas<'_>) -> Result<()>,
{
    let draw_start = Instant::now();
    // RGB buffer, 3 bytes per pixel
    let mut pixel_buffer = vec![255u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut pixel_buffer, (width, height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(draw_err("fill plot background"))?;
        draw(&root)?;
        root.present()
            .map_err(draw_err("present plotters buffer"))?;
    } // pixel_buffer is released by plotters here
    debug!("drew {width}x{height} chart in {:?}", draw_start.elapsed());

    let encode_start = Instant::now();
    let bytes = encode_png(pixel_buffer, width, height)?;
    debug!("encoded {} PNG bytes in {:?}", bytes.len(), encode_start.elapsed());
    Ok(bytes)
}

/// Encode a raw RGB buffer as PNG bytes
pub fn encode_png(pixels: Vec<u8>, width: u32, height: u32) -> Result<PlotBytes> {
    let img = RgbImage::from_raw(width, height, pixels)
        .ok_or_else(|| anyhow!("pixel buffer does not match {width}x{height}"))?;
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Marker radius in pixels for a marker area given in square points
pub fn marker_radius(area_pt2: f64) -> u32 {
    let radius_pt = area_pt2.max(0.0).sqrt() / 2.0;
    (radius_pt * DPI / 72.0).round() as u32
}

pub fn text_style(size: u32, color: RGBColor, pos: Pos) -> TextStyle<'static> {
    ("sans-serif", size as f64).into_font().color(&color).pos(pos)
}
