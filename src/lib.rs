//! # dr-ifpr-plot
//!
//! Renders detection ratio over inverse false positive rate for a detector
//! evaluated across detection thresholds and sliding-window sizes.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dr_ifpr_plot::{ChartConfig, Figure, ResultTable, ThresholdIndex, chart};
//!
//! let table = ResultTable::load("./results/dr_over_ifpr.json")?;
//! let index = ThresholdIndex::from_table(&table);
//!
//! let mut figure = Figure::new(ChartConfig::default());
//! chart::plot_thresholds(&mut figure, &table, &index)?;
//! chart::save(&figure, "./plots/dr_over_ifpr.pdf")?;
//! # Ok::<(), dr_ifpr_plot::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`error`]: Error types for the library
//! - [`results`]: Loading result records and indexing thresholds/window sizes
//! - [`chart`]: Figure construction, layout, SVG and PDF output

pub mod chart;
pub mod error;
pub mod results;

// Re-export commonly used types
pub use chart::{ChartConfig, Figure, OutputFormat, Scene, SeriesStyle};
pub use error::{Error, Result};
pub use results::{ResultRecord, ResultTable, ThresholdIndex};
