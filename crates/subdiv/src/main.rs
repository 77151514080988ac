use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::info;

use subdiv::methods::{ExpandMethod, Interpolation, Method, ResampleMethod};

/// Subdivide voxels of MINC volumes using several methods and summarize
/// how the interpolated results differ from exact block expansion.
#[derive(Parser)]
#[command(name = "subdiv", version)]
struct Cli {
    /// Directory containing input MINC files (searched non-recursively)
    input_dir: PathBuf,

    /// Directory for output volumes and summary.json
    output_dir: PathBuf,

    /// Number of cuts along each voxel edge; must be a power of 2
    #[arg(short, long, default_value_t = 2, value_parser = parse_divisions)]
    divisions: u32,

    /// Subset of methods to run (default: all)
    #[arg(short, long, value_enum, value_delimiter = ',')]
    methods: Option<Vec<MethodKind>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MethodKind {
    Trilinear,
    Tricubic,
    NearestNeighbour,
    Kron,
}

impl MethodKind {
    fn all() -> Vec<MethodKind> {
        vec![
            MethodKind::Trilinear,
            MethodKind::Tricubic,
            MethodKind::NearestNeighbour,
            MethodKind::Kron,
        ]
    }

    fn instantiate(self) -> Box<dyn Method> {
        match self {
            MethodKind::Trilinear => Box::new(ResampleMethod::new(Interpolation::Trilinear)),
            MethodKind::Tricubic => Box::new(ResampleMethod::new(Interpolation::Tricubic)),
            MethodKind::NearestNeighbour => {
                Box::new(ResampleMethod::new(Interpolation::NearestNeighbour))
            }
            MethodKind::Kron => Box::new(ExpandMethod),
        }
    }
}

fn parse_divisions(s: &str) -> Result<u32, String> {
    let divisions: u32 = s
        .parse()
        .map_err(|_| format!("`{s}` is not a positive integer"))?;
    if divisions == 0 || !divisions.is_power_of_two() {
        return Err(format!("--divisions={divisions} is not a power of 2"));
    }
    Ok(divisions)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let kinds = cli.methods.unwrap_or_else(MethodKind::all);
    let methods: Vec<Box<dyn Method>> = kinds.into_iter().map(MethodKind::instantiate).collect();

    let summary = subdiv::batch::run(&cli.input_dir, &cli.output_dir, &methods, cli.divisions)?;
    info!(
        "processed {} inputs, {} records",
        summary.count_inputs,
        summary.record_count()
    );
    Ok(())
}
