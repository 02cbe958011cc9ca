use crate::PlotBytes;
use crate::options::PlotOptions;
use anyhow::Result;

/// Trait for chart types
///
/// Each chart names the analysis result it draws and its options type.
///
/// # Example
///
/// ```rust,no_run
/// use scaling_plots::plots::traits::Plot;
/// use scaling_plots::options::{BasePlotOptions, PlotOptions};
/// use scaling_plots::PlotBytes;
/// use anyhow::Result;
///
/// struct MyPlotOptions {
///     base: BasePlotOptions,
/// }
///
/// impl PlotOptions for MyPlotOptions {
///     fn base(&self) -> &BasePlotOptions { &self.base }
/// }
///
/// struct MyPlot;
///
/// impl Plot for MyPlot {
///     type Options = MyPlotOptions;
///     type Data = Vec<(f64, f64)>;
///
///     fn render(&self, data: &Self::Data, options: &Self::Options) -> Result<PlotBytes> {
///         Ok(vec![])
///     }
/// }
/// ```
pub trait Plot {
    /// The options type for this chart
    type Options: PlotOptions;

    /// The analysis result this chart draws
    type Data;

    /// Render the chart
    ///
    /// # Returns
    ///
    /// PNG-encoded image bytes
    fn render(&self, data: &Self::Data, options: &Self::Options) -> Result<PlotBytes>;
}
