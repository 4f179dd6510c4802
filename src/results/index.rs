//! Distinct threshold and window-size values of a result table.

use super::ResultTable;

/// Ascending distinct thresholds and window sizes.
///
/// Thresholds define the series order (and therefore their style), window
/// sizes define the point order within each series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThresholdIndex {
    /// Distinct thresholds, ascending.
    pub thresholds: Vec<f64>,
    /// Distinct window sizes, ascending.
    pub window_sizes: Vec<i64>,
}

impl ThresholdIndex {
    /// Collects the distinct values present in `table`.
    #[must_use]
    pub fn from_table(table: &ResultTable) -> Self {
        let mut thresholds: Vec<f64> = table.records().iter().map(|r| r.threshold).collect();
        thresholds.sort_by(f64::total_cmp);
        thresholds.dedup();

        let mut window_sizes: Vec<i64> = table.records().iter().map(|r| r.window_size).collect();
        window_sizes.sort_unstable();
        window_sizes.dedup();

        Self {
            thresholds,
            window_sizes,
        }
    }

    /// Number of points a fully covered chart contains.
    #[must_use]
    pub fn grid_size(&self) -> usize {
        self.thresholds.len() * self.window_sizes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::ResultRecord;
    use std::collections::BTreeMap;

    fn record(threshold: f64, window_size: i64) -> ResultRecord {
        ResultRecord {
            det_ratio: 0.9,
            fp_rate: 0.01,
            ifp_rate: 100.0,
            threshold,
            window_size,
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_sorted_distinct() {
        let table = ResultTable::new(vec![
            record(0.9, 100),
            record(0.5, 10),
            record(0.9, 10),
            record(0.7, 1000),
            record(0.5, 100),
        ]);
        let index = ThresholdIndex::from_table(&table);
        assert_eq!(index.thresholds, vec![0.5, 0.7, 0.9]);
        assert_eq!(index.window_sizes, vec![10, 100, 1000]);
        assert_eq!(index.grid_size(), 9);
    }

    #[test]
    fn test_numeric_not_lexical_order() {
        let table = ResultTable::new(vec![record(0.5, 9), record(0.5, 10), record(0.5, 100)]);
        let index = ThresholdIndex::from_table(&table);
        assert_eq!(index.window_sizes, vec![9, 10, 100]);
    }

    #[test]
    fn test_empty_table() {
        let index = ThresholdIndex::from_table(&ResultTable::default());
        assert!(index.thresholds.is_empty());
        assert_eq!(index.grid_size(), 0);
    }
}
