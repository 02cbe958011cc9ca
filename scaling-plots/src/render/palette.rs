//! Colors of the scaling charts

use plotters::style::RGBColor;

pub const LIME_GREEN: RGBColor = RGBColor(50, 205, 50);
pub const DARK_RED: RGBColor = RGBColor(139, 0, 0);
pub const TAB_BLUE: RGBColor = RGBColor(31, 119, 180);
pub const GREEN: RGBColor = RGBColor(0, 128, 0);
pub const PURPLE: RGBColor = RGBColor(128, 0, 128);
pub const PALE_GOLDENROD: RGBColor = RGBColor(238, 232, 170);
pub const FLAGGED: RGBColor = RGBColor(255, 0, 0);
pub const NORMAL: RGBColor = RGBColor(0, 0, 0);
pub const GRID: RGBColor = RGBColor(200, 200, 200);

/// Distinct colors cycled over the per-thread Karp–Flatt curves
pub const CYCLE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Red when `flagged`, black otherwise
pub fn flag_color(flagged: bool) -> RGBColor {
    if flagged { FLAGGED } else { NORMAL }
}
