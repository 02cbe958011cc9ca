pub mod base;
pub mod scaling;

pub use base::{BasePlotOptions, BasePlotOptionsBuilder};
pub use scaling::{ScalingPlotOptions, ScalingPlotOptionsBuilder};

/// Trait for plot options types
///
/// All chart options structs implement this trait to provide access to the
/// base options.
pub trait PlotOptions {
    /// Get a reference to the base plot options
    fn base(&self) -> &BasePlotOptions;
}
