use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use subdiv_core::filter::ExpandFilter;
use subdiv_io::{read_volume, write_volume};

/// Subdivide voxels by exact block expansion (a Kronecker product with a
/// block of ones). Both NIfTI and MINC files are supported; MINC output
/// depends on nii2mnc.
#[derive(Parser)]
#[command(name = "subdiv-expand")]
struct Cli {
    /// Input volume (.mnc, .nii or .nii.gz)
    input: PathBuf,

    /// Output volume; the extension selects the format
    output: PathBuf,

    /// Number of cuts along each voxel edge
    #[arg(short, long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..))]
    divisions: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let volume = read_volume(&cli.input)?;
    let expanded = ExpandFilter::new(cli.divisions)?.apply(&volume);
    write_volume(&cli.output, &expanded)?;

    let shape = expanded.shape();
    info!(
        "wrote {} ({}x{}x{} voxels)",
        cli.output.display(),
        shape[0],
        shape[1],
        shape[2]
    );
    Ok(())
}
