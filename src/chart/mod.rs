//! Chart construction, layout and output.
//!
//! A chart is built in three steps:
//!
//! 1. [`plot_thresholds`] fills a [`Figure`] with one series per threshold.
//! 2. [`Scene::layout`] places axes, grid, markers, annotations and legend,
//!    then crops the page to the drawn content.
//! 3. [`save`] serializes the scene as PDF or SVG depending on the file
//!    extension, creating the output directory if needed.

pub mod config;
pub mod figure;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod scene;
pub mod style;
pub mod svg;
pub mod text;
pub mod ticks;

pub use config::{AxisConfig, AxisScale, ChartConfig};
pub use figure::{Figure, LegendEntry, PlotPoint, Series, plot_thresholds, threshold_label};
pub use scene::{Primitive, Scene};
pub use style::{MARKERS, Marker, PALETTE, Rgb, SeriesStyle, colors};
pub use svg::generate_svg;

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Vector output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Portable Document Format.
    Pdf,
    /// Scalable Vector Graphics.
    Svg,
}

impl OutputFormat {
    /// Picks the format from a file extension. Paths without an extension
    /// default to PDF; an extension that is not UTF-8 is unsupported.
    pub fn from_path(path: &Path) -> Result<Self> {
        let Some(ext) = path.extension() else {
            return Ok(Self::Pdf);
        };
        match ext.to_str() {
            Some(ext) if ext.eq_ignore_ascii_case("pdf") => Ok(Self::Pdf),
            Some(ext) if ext.eq_ignore_ascii_case("svg") => Ok(Self::Svg),
            _ => Err(Error::UnsupportedFormat(ext.to_string_lossy().into_owned())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf => f.write_str("PDF"),
            Self::Svg => f.write_str("SVG"),
        }
    }
}

/// Serializes a laid-out scene.
pub fn render(scene: &Scene, title: &str, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Svg => Ok(generate_svg(scene, title).into_bytes()),
        #[cfg(feature = "pdf")]
        OutputFormat::Pdf => Ok(pdf::generate_pdf(scene, title, chrono::Utc::now())),
        #[cfg(not(feature = "pdf"))]
        OutputFormat::Pdf => Err(Error::UnsupportedFormat(
            "pdf (built without the `pdf` feature)".to_string(),
        )),
    }
}

/// Lays out `figure` and writes it to `path`.
///
/// The parent directory is created if it does not exist. Layout happens
/// before the file is opened, so a figure that cannot be rendered leaves no
/// partial output behind.
pub fn save(figure: &Figure, path: impl AsRef<Path>) -> Result<Scene> {
    let path = path.as_ref();
    let format = OutputFormat::from_path(path)?;
    let scene = Scene::layout(figure)?;
    let bytes = render(&scene, &figure.config().title, format)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;
    Ok(scene)
}
