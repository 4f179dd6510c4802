//! The figure under construction and the per-threshold plotter.

use super::config::ChartConfig;
use super::style::SeriesStyle;
use crate::error::{Error, Result};
use crate::results::{ResultTable, ThresholdIndex};

/// A single annotated data point.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotPoint {
    /// Horizontal value (inverse false positive rate).
    pub x: f64,
    /// Vertical value (detection ratio).
    pub y: f64,
    /// Annotation drawn below the marker (window size).
    pub label: String,
}

/// Points sharing one style.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Series name, shown in the legend.
    pub name: String,
    /// Color and marker.
    pub style: SeriesStyle,
    /// Points in drawing order.
    pub points: Vec<PlotPoint>,
}

/// One legend row.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    /// Row text.
    pub label: String,
    /// Marker shown next to the text.
    pub style: SeriesStyle,
}

/// A chart being assembled: configuration, data series and legend.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    config: ChartConfig,
    series: Vec<Series>,
    legend: Vec<LegendEntry>,
}

impl Figure {
    /// Creates an empty figure.
    #[must_use]
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            series: Vec::new(),
            legend: Vec::new(),
        }
    }

    /// Chart configuration.
    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Series in drawing order.
    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Legend rows, top to bottom.
    #[must_use]
    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    /// Appends a series.
    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    /// Appends a legend row.
    pub fn add_legend_entry(&mut self, entry: LegendEntry) {
        self.legend.push(entry);
    }

    /// Total number of points across all series.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

/// Legend text for a threshold, e.g. `Threshold 0.5` or `Threshold 1.0`.
#[must_use]
pub fn threshold_label(threshold: f64) -> String {
    // `{:?}` keeps a trailing `.0` on whole numbers
    format!("Threshold {threshold:?}")
}

/// Adds one series and one legend row per threshold.
///
/// Series follow ascending threshold order and points follow ascending window
/// size. Every (threshold, window size) pair of the index must have a record;
/// otherwise nothing is added and [`Error::MissingPoint`] is returned.
pub fn plot_thresholds(
    figure: &mut Figure,
    table: &ResultTable,
    index: &ThresholdIndex,
) -> Result<()> {
    let mut series = Vec::with_capacity(index.thresholds.len());

    for (i, &threshold) in index.thresholds.iter().enumerate() {
        let style = SeriesStyle::for_index(i);

        let points = index
            .window_sizes
            .iter()
            .map(|&window_size| -> Result<PlotPoint> {
                let record = table
                    .find(threshold, window_size)
                    .ok_or(Error::MissingPoint {
                        threshold,
                        window_size,
                    })?;
                Ok(PlotPoint {
                    x: record.ifp_rate,
                    y: record.det_ratio,
                    label: window_size.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        series.push(Series {
            name: threshold_label(threshold),
            style,
            points,
        });
    }

    for s in series {
        figure.add_legend_entry(LegendEntry {
            label: s.name.clone(),
            style: s.style,
        });
        figure.add_series(s);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::ResultRecord;
    use std::collections::BTreeMap;

    fn record(threshold: f64, window_size: i64, ifp_rate: f64, det_ratio: f64) -> ResultRecord {
        ResultRecord {
            det_ratio,
            fp_rate: 1.0 / ifp_rate,
            ifp_rate,
            threshold,
            window_size,
            extra: BTreeMap::new(),
        }
    }

    fn plot(records: Vec<ResultRecord>) -> Result<Figure> {
        let table = ResultTable::new(records);
        let index = ThresholdIndex::from_table(&table);
        let mut figure = Figure::new(ChartConfig::default());
        plot_thresholds(&mut figure, &table, &index)?;
        Ok(figure)
    }

    #[test]
    fn test_threshold_label() {
        assert_eq!(threshold_label(0.5), "Threshold 0.5");
        assert_eq!(threshold_label(1.0), "Threshold 1.0");
    }

    #[test]
    fn test_point_grid() {
        let figure = plot(vec![
            record(0.9, 100, 40.0, 0.86),
            record(0.5, 10, 1.0, 0.95),
            record(0.5, 100, 20.0, 0.93),
            record(0.9, 10, 3.0, 0.9),
            record(0.7, 10, 2.0, 0.92),
            record(0.7, 100, 30.0, 0.9),
        ])
        .unwrap();

        assert_eq!(figure.series().len(), 3);
        assert_eq!(figure.point_count(), 3 * 2);

        let first = &figure.series()[0];
        assert_eq!(first.name, "Threshold 0.5");
        let xs: Vec<f64> = first.points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![1.0, 20.0]);
        let labels: Vec<&str> = first.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["10", "100"]);
    }

    #[test]
    fn test_legend_matches_series_styles() {
        let records = (0..8)
            .flat_map(|t| {
                let threshold = f64::from(t) / 10.0;
                [record(threshold, 5, 10.0, 0.9), record(threshold, 50, 100.0, 0.9)]
            })
            .collect();
        let figure = plot(records).unwrap();

        assert_eq!(figure.legend().len(), figure.series().len());
        for (i, (entry, series)) in figure.legend().iter().zip(figure.series()).enumerate() {
            assert_eq!(entry.label, series.name);
            assert_eq!(entry.style, series.style);
            assert_eq!(entry.style, SeriesStyle::for_index(i));
        }
    }

    #[test]
    fn test_missing_point_leaves_figure_untouched() {
        let table = ResultTable::new(vec![
            record(0.5, 10, 1.0, 0.95),
            record(0.5, 100, 20.0, 0.93),
            record(0.9, 10, 3.0, 0.9),
        ]);
        let index = ThresholdIndex::from_table(&table);
        let mut figure = Figure::new(ChartConfig::default());

        let err = plot_thresholds(&mut figure, &table, &index).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingPoint { threshold, window_size: 100 } if threshold == 0.9
        ));
        assert_eq!(figure.point_count(), 0);
        assert!(figure.legend().is_empty());
    }

    #[test]
    fn test_duplicate_pair_uses_first() {
        let figure = plot(vec![
            record(0.5, 10, 1.0, 0.95),
            record(0.5, 10, 2.0, 0.85),
        ])
        .unwrap();
        assert_eq!(figure.point_count(), 1);
        assert_eq!(figure.series()[0].points[0].y, 0.95);
    }
}
