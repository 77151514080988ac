//! Subdivision methods runnable by the batch orchestrator.
//!
//! Each method turns one input volume into one output file. The
//! interpolating methods shell out to `mincresample`; the expansion
//! method replicates voxels in memory and serves as the reference the
//! others are diffed against.

use std::path::Path;

use subdiv_core::filter::ExpandFilter;
use subdiv_io::{minc, read_volume, write_volume, IoError};

/// A subdivision method.
pub trait Method {
    /// Short name used in output file names and the summary.
    fn name(&self) -> &'static str;

    /// Output file name for an input with the given stem.
    fn output_name(&self, stem: &str, divisions: u32) -> String;

    /// Produce `output` from `input`.
    fn run(&self, input: &Path, output: &Path, divisions: u32) -> Result<(), IoError>;

    /// Whether this method produces the reference output that the other
    /// methods are diffed against.
    fn is_baseline(&self) -> bool {
        false
    }
}

/// Interpolation modes understood by `mincresample`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    Trilinear,
    Tricubic,
    NearestNeighbour,
}

impl Interpolation {
    pub const ALL: [Interpolation; 3] = [
        Interpolation::Trilinear,
        Interpolation::Tricubic,
        Interpolation::NearestNeighbour,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Interpolation::Trilinear => "trilinear",
            Interpolation::Tricubic => "tricubic",
            Interpolation::NearestNeighbour => "nearest_neighbour",
        }
    }

    /// The `mincresample` flag selecting this mode.
    pub fn flag(&self) -> &'static str {
        match self {
            Interpolation::Trilinear => "-trilinear",
            Interpolation::Tricubic => "-tricubic",
            Interpolation::NearestNeighbour => "-nearest_neighbour",
        }
    }
}

/// Interpolated subdivision via `mincresample`, binarized afterwards.
pub struct ResampleMethod {
    interpolation: Interpolation,
}

impl ResampleMethod {
    pub fn new(interpolation: Interpolation) -> Self {
        Self { interpolation }
    }
}

impl Method for ResampleMethod {
    fn name(&self) -> &'static str {
        self.interpolation.name()
    }

    fn output_name(&self, stem: &str, divisions: u32) -> String {
        format!("{stem}.subdiv.{divisions}.mt.{}.mnc", self.name())
    }

    fn run(&self, input: &Path, output: &Path, divisions: u32) -> Result<(), IoError> {
        minc::resample(
            input,
            output,
            Some(divisions),
            &[self.interpolation.flag().to_string()],
            true,
            false,
        )
    }
}

/// Exact block expansion, the baseline for mask diffing.
pub struct ExpandMethod;

impl Method for ExpandMethod {
    fn name(&self) -> &'static str {
        "kron"
    }

    fn output_name(&self, stem: &str, divisions: u32) -> String {
        format!("{stem}.subdiv.{divisions}.np.mnc")
    }

    fn run(&self, input: &Path, output: &Path, divisions: u32) -> Result<(), IoError> {
        let volume = read_volume(input)?;
        let expanded = ExpandFilter::new(divisions)?.apply(&volume);
        write_volume(output, &expanded)
    }

    fn is_baseline(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_names_encode_source_and_method() {
        let trilinear = ResampleMethod::new(Interpolation::Trilinear);
        assert_eq!(
            trilinear.output_name("brain", 2),
            "brain.subdiv.2.mt.trilinear.mnc"
        );
        assert_eq!(ExpandMethod.output_name("brain", 4), "brain.subdiv.4.np.mnc");
    }

    #[test]
    fn test_interpolation_flags() {
        assert_eq!(Interpolation::Trilinear.flag(), "-trilinear");
        assert_eq!(Interpolation::NearestNeighbour.flag(), "-nearest_neighbour");
        assert_eq!(Interpolation::ALL.len(), 3);
    }

    #[test]
    fn test_only_expansion_is_the_baseline() {
        assert!(ExpandMethod.is_baseline());
        assert!(!ResampleMethod::new(Interpolation::Tricubic).is_baseline());
    }
}
