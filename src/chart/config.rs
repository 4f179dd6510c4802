//! Chart configuration.
//!
//! Defaults reproduce the detection ratio over inverse false positive rate
//! figure: a log-scaled x axis from 0.3 s to 6000 s, a linear y axis from
//! 0.82 to 0.98, and a single-column (8.6 cm) page width.

use super::style::{Rgb, colors};

/// Axis scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisScale {
    /// Evenly spaced values.
    Linear,
    /// Base-10 logarithmic.
    Log,
}

/// One axis of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisConfig {
    /// Axis label.
    pub label: String,
    /// Lower limit (inclusive).
    pub min: f64,
    /// Upper limit (inclusive).
    pub max: f64,
    /// Scale type.
    pub scale: AxisScale,
}

impl AxisConfig {
    /// Creates a linear axis.
    #[must_use]
    pub fn linear(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            label: label.into(),
            min,
            max,
            scale: AxisScale::Linear,
        }
    }

    /// Creates a logarithmic axis.
    #[must_use]
    pub fn log(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            label: label.into(),
            min,
            max,
            scale: AxisScale::Log,
        }
    }

    /// Whether `value` lies within the limits, bounds included.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Chart configuration. All sizes are in points (1/72 in).
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Document title (PDF metadata, SVG `<title>`).
    pub title: String,
    /// Horizontal axis.
    pub x_axis: AxisConfig,
    /// Vertical axis.
    pub y_axis: AxisConfig,
    /// Axis label font size.
    pub label_font_size: f64,
    /// Major tick label font size.
    pub major_tick_font_size: f64,
    /// Minor tick label font size.
    pub minor_tick_font_size: f64,
    /// Grid line color (major and minor).
    pub grid_color: Rgb,
    /// Grid line width.
    pub grid_width: f64,
    /// Nominal marker size.
    pub marker_size: f64,
    /// Marker edge width.
    pub marker_edge_width: f64,
    /// Annotation font size.
    pub annotation_font_size: f64,
    /// Vertical distance from a marker center down to its annotation center.
    pub annotation_offset: f64,
    /// Legend font size. The legend sits in the upper right of the axes.
    pub legend_font_size: f64,
    /// Figure width in inches.
    pub width_in: f64,
    /// Figure height in inches.
    pub height_in: f64,
    /// Padding around the cropped content.
    pub pad: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        let width_in = 8.6 / 2.54 / 1.025;
        Self {
            title: "Detection Ratio over Inverse False Positive Rate".to_string(),
            x_axis: AxisConfig::log("Inverse False Positive Rate (s)", 3e-1, 6e3),
            y_axis: AxisConfig::linear("Detection Ratio", 0.82, 0.98),
            label_font_size: 8.0,
            major_tick_font_size: 6.0,
            minor_tick_font_size: 6.0,
            grid_color: colors::GRID,
            grid_width: 0.5,
            marker_size: 3.0,
            marker_edge_width: 0.5,
            annotation_font_size: 4.5,
            annotation_offset: 5.5,
            legend_font_size: 6.0,
            width_in,
            height_in: 2.0 / 3.0 * width_in,
            pad: 0.0,
        }
    }
}

impl ChartConfig {
    /// Creates a configuration with the given title and default layout.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Sets the horizontal axis.
    #[must_use]
    pub fn with_x_axis(mut self, axis: AxisConfig) -> Self {
        self.x_axis = axis;
        self
    }

    /// Sets the vertical axis.
    #[must_use]
    pub fn with_y_axis(mut self, axis: AxisConfig) -> Self {
        self.y_axis = axis;
        self
    }

    /// Sets the figure size in inches.
    #[must_use]
    pub fn with_size_inches(mut self, width: f64, height: f64) -> Self {
        self.width_in = width;
        self.height_in = height;
        self
    }

    /// Figure size in points.
    #[must_use]
    pub fn size_points(&self) -> (f64, f64) {
        (self.width_in * 72.0, self.height_in * 72.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_figure_size() {
        let config = ChartConfig::default();
        assert!((config.width_in - 3.3035).abs() < 1e-3);
        assert!((config.height_in / config.width_in - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_inclusive_limits() {
        let config = ChartConfig::default();
        assert!(config.x_axis.contains(0.3));
        assert!(config.x_axis.contains(6000.0));
        assert!(!config.x_axis.contains(0.29));
        assert!(config.y_axis.contains(0.82));
        assert!(!config.y_axis.contains(0.99));
    }

    #[test]
    fn test_builder() {
        let config = ChartConfig::new("Other")
            .with_y_axis(AxisConfig::linear("DR", 0.0, 1.0));
        assert_eq!(config.title, "Other");
        assert_eq!(config.y_axis.max, 1.0);
        assert_eq!(config.x_axis.scale, AxisScale::Log);
        assert_eq!(config.pad, 0.0);
    }
}
