//! plot-dr-over-ifpr CLI - detection ratio over inverse false positive rate chart

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

const DEFAULT_INPUT: &str = "./results/dr_over_ifpr.json";
const DEFAULT_OUTPUT: &str = "./plots/dr_over_ifpr.pdf";

/// Plot detection ratio over inverse false positive rate.
///
/// Without a subcommand the chart is rendered from the default paths.
#[derive(Parser)]
#[command(name = "plot-dr-over-ifpr")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Results file (JSON lines, or CSV with a .csv extension)
    #[arg(short, long, global = true, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Output chart (.pdf or .svg)
    #[arg(short, long, global = true, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the chart (default)
    Plot,

    /// Print the threshold x window size grid without plotting
    Summary {
        /// Print the cleaned records as JSON lines instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Plot) {
        Commands::Plot => commands::plot::run(cli.input, cli.output, cli.verbose),
        Commands::Summary { json } => commands::summary::run(cli.input, json, cli.verbose),
    }
}
