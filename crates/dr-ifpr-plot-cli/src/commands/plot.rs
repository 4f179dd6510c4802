//! Chart rendering command.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use dr_ifpr_plot::chart::{self, ChartConfig, Figure, OutputFormat};
use dr_ifpr_plot::{ResultTable, ThresholdIndex};

pub fn run(input: PathBuf, output: PathBuf, verbose: bool) -> Result<()> {
    let stdout = io::stdout();
    plot_to(&mut stdout.lock(), &input, &output, verbose)
}

/// Runs the pipeline, narrating each stage to `out`.
fn plot_to(out: &mut impl Write, input: &Path, output: &Path, verbose: bool) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "PLOT DETECTION RATIO OVER THE INVERSE FALSE POSITIVE RATE")?;
    writeln!(out)?;

    let start = Instant::now();

    // Fail on an unknown extension before doing any work
    let format = OutputFormat::from_path(output)
        .with_context(|| format!("Cannot write {}", output.display()))?;

    stage(out, "Reading in data...")?;
    let table = ResultTable::load(input)
        .with_context(|| format!("Failed to load results from {}", input.display()))?;
    let index = ThresholdIndex::from_table(&table);
    done(out)?;

    if verbose {
        eprintln!(
            "Loaded {} records: {} thresholds x {} window sizes",
            table.len(),
            index.thresholds.len(),
            index.window_sizes.len()
        );
    }

    stage(out, "Creating plot...")?;
    let mut figure = Figure::new(ChartConfig::default());
    chart::plot_thresholds(&mut figure, &table, &index).context("Failed to create plot")?;
    done(out)?;

    stage(out, &format!("Saving plot as {format}..."))?;
    let scene = chart::save(&figure, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    done(out)?;

    if verbose {
        eprintln!(
            "Saved to: {} ({:.1} x {:.1} pt, {} markers)",
            output.display(),
            scene.width,
            scene.height,
            scene.marker_count
        );
        if scene.marker_count < index.grid_size() {
            eprintln!(
                "{} points fall outside the axis limits and were not drawn",
                index.grid_size() - scene.marker_count
            );
        }
    }

    writeln!(out)?;
    writeln!(out, "This took {:.1} seconds!", start.elapsed().as_secs_f64())?;
    writeln!(out)?;

    Ok(())
}

fn stage(out: &mut impl Write, message: &str) -> io::Result<()> {
    write!(out, "{message} ")?;
    out.flush()
}

fn done(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Done!")
}
