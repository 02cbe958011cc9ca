use derive_builder::Builder;

/// Base plot options containing layout and display settings
///
/// These options are common to all charts and control the overall
/// appearance and layout of the image.
///
/// # Example
///
/// ```rust,no_run
/// use scaling_plots::options::BasePlotOptions;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let base = BasePlotOptions::new()
///     .width(1200u32)
///     .height(900u32)
///     .title("Strong Scaling")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Builder, Clone, Debug)]
#[builder(setter(into, strip_option), default)]
pub struct BasePlotOptions {
    /// Image width in pixels
    #[builder(default = "1050")]
    pub width: u32,

    /// Image height in pixels
    #[builder(default = "750")]
    pub height: u32,

    /// Margin around the plot area in pixels
    #[builder(default = "20")]
    pub margin: u32,

    /// Size of the x-axis label area in pixels
    #[builder(default = "60")]
    pub x_label_area_size: u32,

    /// Size of the y-axis label area in pixels (also used for a secondary axis)
    #[builder(default = "80")]
    pub y_label_area_size: u32,

    /// Chart title
    #[builder(default = "String::new()")]
    pub title: String,
}

impl Default for BasePlotOptions {
    fn default() -> Self {
        Self {
            width: 1050,
            height: 750,
            margin: 20,
            x_label_area_size: 60,
            y_label_area_size: 80,
            title: String::new(),
        }
    }
}

impl BasePlotOptions {
    /// Create a new builder for BasePlotOptions
    pub fn new() -> BasePlotOptionsBuilder {
        BasePlotOptionsBuilder::default()
    }
}
