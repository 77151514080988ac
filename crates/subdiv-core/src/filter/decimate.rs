//! Decimation filter.
//!
//! Reduces resolution by keeping every Nth voxel per axis, the inverse of
//! expansion. Spacing grows so world-space extent is preserved.

use ndarray::s;

use crate::error::{Result, VolumeError};
use crate::volume::Volume;

/// Decimation filter.
///
/// Keeps every `factor`-th voxel along each axis and multiplies spacing
/// by the same factor.
pub struct DecimateFilter {
    factor: usize,
}

impl DecimateFilter {
    /// Create a new decimation filter with the given factor (must be >= 1).
    pub fn new(factor: u32) -> Result<Self> {
        if factor < 1 {
            return Err(VolumeError::InvalidDivisions(factor));
        }
        Ok(Self {
            factor: factor as usize,
        })
    }

    /// Apply the filter to a volume.
    ///
    /// Sampling starts at index 0, so the world-space position of the
    /// first voxel (the origin) is unchanged.
    pub fn apply(&self, volume: &Volume) -> Volume {
        let f = self.factor as isize;
        if f == 1 {
            return volume.clone();
        }

        let data = volume.data().slice(s![..;f, ..;f, ..;f]).to_owned();

        Volume::new(
            data,
            *volume.origin(),
            volume.spacing().coarsen(self.factor as u32),
            *volume.direction(),
        )
    }
}
