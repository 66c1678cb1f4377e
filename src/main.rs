use std::path::PathBuf;

use anyhow::{Context, Result};
use bench_core::{AnalysisOptions, MalformedRows, DEFAULT_CEILING};
use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};
use tracing::Level;

mod render;
mod table;

use render::{ChartKind, ImageFormat, RenderConfig};

/// Plot cumulative solve-time curves from a pipe-delimited benchmark report.
#[derive(Parser, Debug)]
#[command(name = "bench_plot", version)]
struct Cli {
    /// Benchmark report: two header lines, `a|b|t1|t2|t3|t4|c` rows, one trailer line
    input: PathBuf,

    /// Times at or above this many seconds count as unsolved
    #[arg(long, default_value_t = DEFAULT_CEILING)]
    ceiling: f64,

    /// Drop malformed rows instead of aborting
    #[arg(long)]
    skip_malformed: bool,

    #[arg(long, value_enum, default_value_t = ChartKind::Cactus)]
    chart: ChartKind,

    #[arg(long, value_enum, default_value_t = ImageFormat::Png)]
    format: ImageFormat,

    /// Chart path (default: the input path plus a chart suffix)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print per-variant statistics as a table
    #[arg(long)]
    summary: bool,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,

    /// Write the curve points as CSV
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Do not render a chart
    #[arg(long)]
    no_plot: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let opts = AnalysisOptions {
        ceiling: cli.ceiling,
        malformed: if cli.skip_malformed {
            MalformedRows::Skip
        } else {
            MalformedRows::Abort
        },
        ..AnalysisOptions::default()
    };

    let report = bench_core::analyze_file(&cli.input, &opts)
        .with_context(|| format!("failed to analyze {}", cli.input.display()))?;
    tracing::info!(
        instances = report.instances,
        ceiling = report.ceiling,
        "built cumulative curves"
    );

    if cli.summary {
        println!("{}", table::stats_frame(&report)?);
    }
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    if let Some(path) = &cli.csv {
        table::write_curves_csv(&report, path)?;
    }

    if !cli.no_plot {
        let cfg = RenderConfig {
            kind: cli.chart,
            format: cli.format,
        };
        let out = cli
            .output
            .clone()
            .unwrap_or_else(|| cfg.output_path(&cli.input));
        render::render(&report, &cfg, &out)?;
        tracing::info!(path = %out.display(), "wrote chart");
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err)
            if matches!(
                err.kind(),
                ErrorKind::MissingRequiredArgument | ErrorKind::EmptyValue
            ) =>
        {
            println!("{}", Cli::command().render_usage());
            std::process::exit(1);
        }
        Err(err) => err.exit(),
    };

    init_tracing(cli.verbose);
    run(cli)
}
