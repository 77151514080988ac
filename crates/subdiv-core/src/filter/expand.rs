//! Voxel expansion filter.
//!
//! Subdivides each voxel into identical copies along every axis, the
//! Kronecker product of the volume with a block of ones. No interpolation
//! is performed; spacing shrinks so world-space extent is preserved.

use ndarray::Array3;

use crate::error::{Result, VolumeError};
use crate::volume::Volume;

/// Expansion filter.
///
/// Replicates each voxel into a `divisions`-cubed block of identical
/// values and divides spacing by the same factor.
pub struct ExpandFilter {
    divisions: usize,
}

impl ExpandFilter {
    /// Create a new expansion filter.
    ///
    /// # Arguments
    /// * `divisions` - Number of cuts along each voxel edge (must be >= 1).
    pub fn new(divisions: u32) -> Result<Self> {
        if divisions < 1 {
            return Err(VolumeError::InvalidDivisions(divisions));
        }
        Ok(Self {
            divisions: divisions as usize,
        })
    }

    /// Apply the filter to a volume, producing the expanded volume.
    ///
    /// With `divisions = 1` the output is a voxel-for-voxel copy.
    pub fn apply(&self, volume: &Volume) -> Volume {
        let d = self.divisions;
        if d == 1 {
            return volume.clone();
        }

        let data = volume.data();
        let (nx, ny, nz) = data.dim();
        let expanded = Array3::from_shape_fn((nx * d, ny * d, nz * d), |(i, j, k)| {
            data[[i / d, j / d, k / d]]
        });

        Volume::new(
            expanded,
            *volume.origin(),
            volume.spacing().subdivide(self.divisions as u32),
            *volume.direction(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::{Direction, Spacing};
    use nalgebra::Point3;
    use ndarray::Array3;

    fn sample_volume() -> Volume {
        let data = Array3::from_shape_fn((2, 3, 4), |(i, j, k)| (i * 12 + j * 4 + k) as f32);
        Volume::new(
            data,
            Point3::new(0.0, 0.0, 0.0),
            Spacing::new([1.0, 2.0, 0.5]),
            Direction::identity(),
        )
    }

    #[test]
    fn test_expand_replicates_blocks() {
        let volume = sample_volume();
        let expanded = ExpandFilter::new(2).unwrap().apply(&volume);

        assert_eq!(expanded.shape(), [4, 6, 8]);
        for ((i, j, k), &value) in expanded.data().indexed_iter() {
            assert_eq!(value, volume.data()[[i / 2, j / 2, k / 2]]);
        }
    }

    #[test]
    fn test_expand_rejects_zero_divisions() {
        assert!(matches!(
            ExpandFilter::new(0),
            Err(VolumeError::InvalidDivisions(0))
        ));
    }

    #[test]
    fn test_expand_identity() {
        let volume = sample_volume();
        let out = ExpandFilter::new(1).unwrap().apply(&volume);
        assert_eq!(out.data(), volume.data());
        assert_eq!(out.spacing(), volume.spacing());
    }
}
