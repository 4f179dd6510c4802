//! Result grid summary command.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dr_ifpr_plot::chart::threshold_label;
use dr_ifpr_plot::{ResultTable, ThresholdIndex};

/// One (threshold, window size) cell of the grid.
#[derive(Debug, Clone, PartialEq)]
struct GridRow {
    series: String,
    window_size: i64,
    /// `(ifp_rate, det_ratio)` of the first matching record.
    point: Option<(f64, f64)>,
}

/// Grid rows plus the pairs that are missing or duplicated.
#[derive(Debug)]
struct GridSummary {
    records: usize,
    thresholds: usize,
    window_sizes: usize,
    rows: Vec<GridRow>,
    missing: usize,
    duplicates: usize,
}

impl GridSummary {
    fn from_table(table: &ResultTable) -> Self {
        let index = ThresholdIndex::from_table(table);

        let mut rows = Vec::with_capacity(index.grid_size());
        for &threshold in &index.thresholds {
            let series = threshold_label(threshold);
            for &window_size in &index.window_sizes {
                rows.push(GridRow {
                    series: series.clone(),
                    window_size,
                    point: table
                        .find(threshold, window_size)
                        .map(|r| (r.ifp_rate, r.det_ratio)),
                });
            }
        }

        let missing = rows.iter().filter(|r| r.point.is_none()).count();
        // Every record fills one grid cell; the rest are extra copies of a pair
        let duplicates = table.len() - (index.grid_size() - missing);

        Self {
            records: table.len(),
            thresholds: index.thresholds.len(),
            window_sizes: index.window_sizes.len(),
            rows,
            missing,
            duplicates,
        }
    }

    fn write_table(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Total results: {}", self.records)?;
        writeln!(
            out,
            "Thresholds: {}, window sizes: {}",
            self.thresholds, self.window_sizes
        )?;
        writeln!(out)?;

        writeln!(
            out,
            "{:<16} {:>8} {:>14} {:>10}",
            "Series", "Window", "IFP rate (s)", "Det ratio"
        )?;
        writeln!(out, "{:-<51}", "")?;

        for row in &self.rows {
            match row.point {
                Some((ifp_rate, det_ratio)) => writeln!(
                    out,
                    "{:<16} {:>8} {:>14.3} {:>10.4}",
                    row.series, row.window_size, ifp_rate, det_ratio
                )?,
                None => writeln!(
                    out,
                    "{:<16} {:>8} {:>14} {:>10}",
                    row.series, row.window_size, "-", "-"
                )?,
            }
        }

        if self.missing > 0 {
            writeln!(out)?;
            writeln!(
                out,
                "{} (threshold, window size) pairs have no result; plotting will fail",
                self.missing
            )?;
        }
        if self.duplicates > 0 {
            writeln!(out)?;
            writeln!(
                out,
                "{} duplicate records; the first one per pair is plotted",
                self.duplicates
            )?;
        }
        Ok(())
    }
}

pub fn run(input: PathBuf, json: bool, verbose: bool) -> Result<()> {
    let stdout = io::stdout();
    summarize_to(&mut stdout.lock(), &input, json, verbose)
}

fn summarize_to(out: &mut impl Write, input: &Path, json: bool, verbose: bool) -> Result<()> {
    if verbose {
        eprintln!("Loading results from: {}", input.display());
    }

    let table = ResultTable::load(input)
        .with_context(|| format!("Failed to load results from {}", input.display()))?;

    if json {
        for record in table.records() {
            writeln!(out, "{}", serde_json::to_string(record)?)?;
        }
        return Ok(());
    }

    GridSummary::from_table(&table).write_table(out)?;
    Ok(())
}
