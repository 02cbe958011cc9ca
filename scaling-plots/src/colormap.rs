use colorgrad::Gradient;
use plotters::style::RGBColor;

/// Red-yellow-green map for efficiency values: red is poor, green is ideal
///
/// Values are clamped to [0, 1], so super-linear efficiency maps to the
/// same green as perfect efficiency.
#[derive(Debug, Clone, Copy, Default)]
pub struct EfficiencyColorMap;

impl EfficiencyColorMap {
    pub fn new() -> Self {
        Self
    }

    /// Map an efficiency value to an RGB color
    pub fn map(&self, value: f64) -> RGBColor {
        let clamped_value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        let grad = colorgrad::preset::rd_yl_gn();
        // Note: colorgrad Color has r, g, b, a as f32 in range [0.0, 1.0]
        let color = grad.at(clamped_value as f32);
        RGBColor(
            (color.r * 255.0).round() as u8,
            (color.g * 255.0).round() as u8,
            (color.b * 255.0).round() as u8,
        )
    }
}
