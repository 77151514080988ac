use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

/// Use mincresample to subdivide voxels in a MINC file.
#[derive(Parser)]
#[command(name = "subdiv-resample")]
struct Cli {
    /// Input MINC file
    input: PathBuf,

    /// Output MINC file
    output: PathBuf,

    /// Number of cuts along each voxel edge. Omit to forward only the raw
    /// options. If a divisor and a conflicting raw option are both given,
    /// the raw option wins (mincresample honors the last occurrence).
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    divisions: Option<u32>,

    /// Additional options passed to mincresample as a space-separated
    /// list, e.g. an interpolation flag such as -trilinear or -tricubic
    #[arg(short, long, allow_hyphen_values = true)]
    options: Option<String>,

    /// Skip the minccalc thresholding step, allowing floating point output
    #[arg(short = 'n', long = "no-binarize")]
    no_binarize: bool,

    /// Let mincresample and minccalc print progress
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let options: Vec<String> = cli
        .options
        .as_deref()
        .unwrap_or_default()
        .split_whitespace()
        .map(str::to_string)
        .collect();

    subdiv_io::minc::resample(
        &cli.input,
        &cli.output,
        cli.divisions,
        &options,
        !cli.no_binarize,
        cli.verbose,
    )?;
    Ok(())
}
