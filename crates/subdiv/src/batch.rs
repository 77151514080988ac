//! Batch orchestration over a directory of MINC volumes.
//!
//! Discovers inputs, runs every configured method against every file,
//! diffs interpolated outputs against the expansion baseline, and writes
//! `summary.json` into the output directory. A method failure is recorded
//! in the summary and does not stop the batch; only setup problems (no
//! inputs, unusable output directory) abort the run.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use subdiv_core::MaskDiff;
use subdiv_io::read_volume;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::methods::Method;
use crate::summary::{MethodRecord, Summary};

/// MINC files directly inside `input_dir`, sorted by name.
pub fn discover_inputs(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for entry in WalkDir::new(input_dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        let is_minc = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("mnc"));
        if is_minc {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

/// Run every method against every discovered input and write
/// `summary.json` into `output_dir`.
pub fn run(
    input_dir: &Path,
    output_dir: &Path,
    methods: &[Box<dyn Method>],
    divisions: u32,
) -> Result<Summary> {
    let inputs = discover_inputs(input_dir)
        .with_context(|| format!("cannot read input directory {}", input_dir.display()))?;
    if inputs.is_empty() {
        bail!("no MINC files found in {}", input_dir.display());
    }
    info!("found {} MINC files in {}", inputs.len(), input_dir.display());

    fs::create_dir_all(output_dir)
        .with_context(|| format!("cannot create output directory {}", output_dir.display()))?;
    tempfile::tempfile_in(output_dir)
        .with_context(|| format!("output directory {} is not writable", output_dir.display()))?;

    let mut summary = Summary::new(inputs.len());
    for input in &inputs {
        process_file(input, output_dir, methods, divisions, &mut summary);
    }

    summary.aggregate();
    let summary_path = output_dir.join("summary.json");
    summary
        .write(&summary_path)
        .with_context(|| format!("cannot write {}", summary_path.display()))?;
    info!("summary written to {}", summary_path.display());

    Ok(summary)
}

/// Run every method against one input, recording results in the summary.
fn process_file(
    input: &Path,
    output_dir: &Path,
    methods: &[Box<dyn Method>],
    divisions: u32,
    summary: &mut Summary,
) {
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());
    let stem = input
        .file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.clone());
    info!("processing {}", input.display());

    let mut baseline: Option<(&'static str, PathBuf)> = None;
    let mut produced: Vec<(&'static str, PathBuf)> = Vec::new();

    for method in methods {
        let output = output_dir.join(method.output_name(&stem, divisions));
        let start = Instant::now();
        let result = method.run(input, &output, divisions);
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let record = match result {
            Ok(()) => {
                let size_bytes = fs::metadata(&output).map(|m| m.len()).ok();
                if method.is_baseline() {
                    baseline = Some((method.name(), output.clone()));
                } else {
                    produced.push((method.name(), output.clone()));
                }
                MethodRecord::ok(output.display().to_string(), size_bytes, elapsed_ms)
            }
            Err(e) => {
                warn!("{} failed on {}: {}", method.name(), input.display(), e);
                MethodRecord::failed(e.to_string(), elapsed_ms)
            }
        };
        summary.record(&file_name, method.name(), record);
    }

    if let Some((baseline_name, baseline_path)) = baseline {
        diff_against_baseline(&file_name, baseline_name, &baseline_path, &produced, summary);
    }
}

/// Diff each interpolated output against the expansion baseline.
fn diff_against_baseline(
    file_name: &str,
    baseline_name: &str,
    baseline_path: &Path,
    produced: &[(&'static str, PathBuf)],
    summary: &mut Summary,
) {
    let reference = match read_volume(baseline_path) {
        Ok(volume) => volume,
        Err(e) => {
            warn!("cannot load baseline {} for diffing: {}", baseline_path.display(), e);
            return;
        }
    };

    if let Some(record) = summary.record_mut(file_name, baseline_name) {
        record.voxels = Some(reference.voxel_count() as u64);
    }

    for (method, output) in produced {
        let other = match read_volume(output) {
            Ok(volume) => volume,
            Err(e) => {
                warn!("cannot load {} for diffing: {}", output.display(), e);
                continue;
            }
        };
        let diff = match MaskDiff::between(&reference, &other) {
            Ok(diff) => diff,
            Err(e) => {
                warn!("cannot diff {} against baseline: {}", output.display(), e);
                continue;
            }
        };
        if let Some(record) = summary.record_mut(file_name, method) {
            record.voxels = Some(other.voxel_count() as u64);
            record.diff = Some(diff.into());
        }
    }
}
