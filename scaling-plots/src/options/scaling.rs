use crate::naming::ChartKind;
use crate::options::{BasePlotOptions, PlotOptions};
use derive_builder::Builder;
use scaling_rs::GroupKey;

/// Options shared by every scaling chart
///
/// # Example
///
/// ```rust,no_run
/// use scaling_plots::options::{BasePlotOptions, ScalingPlotOptions};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let options = ScalingPlotOptions::new()
///     .base(BasePlotOptions::new().width(1600u32).height(1200u32).build()?)
///     .annotate(false)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Builder, Clone, Debug)]
#[builder(setter(into, strip_option), default)]
pub struct ScalingPlotOptions {
    /// Base plot options (layout, dimensions, title)
    #[builder(default)]
    pub base: BasePlotOptions,

    /// Print the value next to every data point
    #[builder(default = "true")]
    pub annotate: bool,

    /// Draw the dashed background grid
    #[builder(default = "true")]
    pub grid: bool,

    /// Font size of titles; labels and annotations scale from it
    #[builder(default = "26")]
    pub font_size: u32,
}

impl Default for ScalingPlotOptions {
    fn default() -> Self {
        Self {
            base: BasePlotOptions::default(),
            annotate: true,
            grid: true,
            font_size: 26,
        }
    }
}

impl PlotOptions for ScalingPlotOptions {
    fn base(&self) -> &BasePlotOptions {
        &self.base
    }
}

impl ScalingPlotOptions {
    /// Create a new builder for ScalingPlotOptions
    pub fn new() -> ScalingPlotOptionsBuilder {
        ScalingPlotOptionsBuilder::default()
    }

    /// Default size and title for one chart of one experiment
    pub fn for_chart(kind: ChartKind, key: &GroupKey) -> Self {
        let (width, height) = kind.size();
        Self {
            base: BasePlotOptions {
                width,
                height,
                title: kind.title(key),
                ..BasePlotOptions::default()
            },
            ..Self::default()
        }
    }

    pub fn label_font_size(&self) -> u32 {
        self.font_size * 3 / 4
    }

    pub fn annotation_font_size(&self) -> u32 {
        self.font_size * 5 / 8
    }
}
