//! Wrappers for the external MINC toolchain.
//!
//! All MINC work is delegated to the standard command-line tools:
//! `mincinfo` for geometry queries, `mincresample` for interpolated
//! subdivision, `minccalc` for binarization, and `mnc2nii`/`nii2mnc` for
//! format conversion. Every invocation goes through a single runner that
//! waits for the child and maps a failure status to [`IoError::ExternalTool`].

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{IoError, Result};

/// MINC dimension names, in (x, y, z) order.
pub const SPACES: [&str; 3] = ["xspace", "yspace", "zspace"];

/// Per-axis geometry of a MINC volume as reported by `mincinfo`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MincInfo {
    /// Voxel counts, in (x, y, z) order.
    pub length: [usize; 3],
    /// Step sizes, in (x, y, z) order.
    pub step: [f64; 3],
}

/// Handle for querying an on-disk MINC file with `mincinfo`.
pub struct MincFile<'a> {
    path: &'a Path,
}

impl<'a> MincFile<'a> {
    pub fn new(path: &'a Path) -> Self {
        Self { path }
    }

    /// Voxel count along one dimension.
    pub fn dim_length(&self, dim: &str) -> Result<usize> {
        let out = self.query(&["-dimlength", dim])?;
        out.trim().parse().map_err(|_| IoError::ToolOutput {
            tool: "mincinfo",
            detail: format!("expected an integer dimension length, got {:?}", out.trim()),
        })
    }

    /// Step size along one dimension.
    pub fn step(&self, dim: &str) -> Result<f64> {
        let attribute = format!("{dim}:step");
        let out = self.query(&["-attvalue", &attribute])?;
        out.trim().parse().map_err(|_| IoError::ToolOutput {
            tool: "mincinfo",
            detail: format!("expected a numeric step size, got {:?}", out.trim()),
        })
    }

    /// Full per-axis geometry.
    pub fn info(&self) -> Result<MincInfo> {
        let mut length = [0usize; 3];
        let mut step = [0f64; 3];
        for (i, dim) in SPACES.iter().enumerate() {
            length[i] = self.dim_length(dim)?;
            step[i] = self.step(dim)?;
        }
        Ok(MincInfo { length, step })
    }

    fn query(&self, args: &[&str]) -> Result<String> {
        capture("mincinfo", Command::new("mincinfo").args(args).arg(self.path))
    }
}

/// Subdivide a MINC volume with `mincresample`.
///
/// With a divisor, per-axis voxel counts are multiplied and step sizes
/// divided so world-space extent is preserved; without one, only the raw
/// `options` are forwarded. Divisor-derived arguments are emitted before
/// the raw options, so a conflicting explicit option wins (the tool
/// honors the last occurrence).
///
/// When `binarize` is set the output is thresholded at 0.5 with
/// `minccalc` afterwards, keeping interpolated masks binary.
pub fn resample(
    input: &Path,
    output: &Path,
    divisions: Option<u32>,
    options: &[String],
    binarize: bool,
    verbose: bool,
) -> Result<()> {
    let mut args: Vec<String> = Vec::new();
    if !verbose {
        args.push("-quiet".into());
    }
    if let Some(divisions) = divisions {
        if divisions < 1 {
            return Err(IoError::InvalidArgument(format!(
                "divisions must be at least 1, got {divisions}"
            )));
        }
        let info = MincFile::new(input).info()?;
        args.extend(geometry_args(&info, divisions));
    }
    args.extend_from_slice(options);

    run(
        "mincresample",
        Command::new("mincresample").args(&args).arg(input).arg(output),
    )?;

    if binarize {
        binarize_in_place(output, verbose)?;
    }
    Ok(())
}

/// `-nelements`/`-step` arguments for subdividing the given geometry.
pub fn geometry_args(info: &MincInfo, divisions: u32) -> Vec<String> {
    let mut args = Vec::with_capacity(8);
    args.push("-nelements".into());
    for length in info.length {
        args.push((length * divisions as usize).to_string());
    }
    args.push("-step".into());
    for step in info.step {
        args.push((step / f64::from(divisions)).to_string());
    }
    args
}

/// Threshold a volume at 0.5 into an unsigned byte mask, in place.
fn binarize_in_place(volume: &Path, verbose: bool) -> Result<()> {
    let tmp = PathBuf::from(format!("{}.binarized.mnc", volume.display()));
    let mut command = Command::new("minccalc");
    if !verbose {
        command.arg("-quiet");
    }
    command
        .args(["-unsigned", "-byte", "-expression", "A[0]>0.5"])
        .arg(volume)
        .arg(&tmp);
    run("minccalc", &mut command)?;
    std::fs::rename(&tmp, volume)?;
    Ok(())
}

/// Convert a NIfTI file to MINC with `nii2mnc`.
pub fn nii_to_minc(input: &Path, output: &Path) -> Result<()> {
    // nii2mnc has a -quiet flag but it does not silence the tool.
    run(
        "nii2mnc",
        Command::new("nii2mnc")
            .arg(input)
            .arg(output)
            .stdout(Stdio::null())
            .stderr(Stdio::null()),
    )
}

/// Convert a MINC file to NIfTI with `mnc2nii`.
pub fn minc_to_nii(input: &Path, output: &Path) -> Result<()> {
    run(
        "mnc2nii",
        Command::new("mnc2nii")
            .arg(input)
            .arg(output)
            .stdout(Stdio::null())
            .stderr(Stdio::null()),
    )
}

/// Run a tool to completion, mapping failure to [`IoError`].
fn run(tool: &'static str, command: &mut Command) -> Result<()> {
    debug!("running {:?}", command);
    let status = command
        .status()
        .map_err(|source| IoError::ToolLaunch { tool, source })?;
    if !status.success() {
        return Err(IoError::ExternalTool {
            tool,
            status: status.to_string(),
        });
    }
    Ok(())
}

/// Run a tool to completion, capturing stdout.
fn capture(tool: &'static str, command: &mut Command) -> Result<String> {
    debug!("running {:?}", command);
    let output = command
        .output()
        .map_err(|source| IoError::ToolLaunch { tool, source })?;
    if !output.status.success() {
        return Err(IoError::ExternalTool {
            tool,
            status: output.status.to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
