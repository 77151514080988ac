//! Volume type combining voxel data with world-space metadata.

use nalgebra::{Matrix4, Point3};
use ndarray::Array3;

use crate::spatial::{compose_affine, decompose_affine, Direction, Spacing};

/// A volumetric image: voxel intensities plus the transform mapping voxel
/// indices to world-space coordinates.
///
/// Volumes are immutable once constructed; filters produce new volumes
/// rather than mutating in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    /// Voxel intensities, indexed `[x, y, z]`.
    data: Array3<f32>,
    /// World-space coordinate of the first voxel (index 0, 0, 0).
    origin: Point3<f64>,
    /// World-space distance between adjacent voxels along each axis.
    spacing: Spacing,
    /// Orientation of the voxel axes.
    direction: Direction,
}

impl Volume {
    /// Create a new volume from voxel data and metadata.
    pub fn new(data: Array3<f32>, origin: Point3<f64>, spacing: Spacing, direction: Direction) -> Self {
        Self {
            data,
            origin,
            spacing,
            direction,
        }
    }

    /// Create a volume from voxel data and a 4x4 voxel-to-world affine.
    pub fn from_affine(data: Array3<f32>, affine: &Matrix4<f64>) -> Self {
        let (origin, spacing, direction) = decompose_affine(affine);
        Self::new(data, origin, spacing, direction)
    }

    /// Get the voxel data.
    pub fn data(&self) -> &Array3<f32> {
        &self.data
    }

    /// Consume the volume, returning the voxel data.
    pub fn into_data(self) -> Array3<f32> {
        self.data
    }

    /// Get the origin (world-space coordinate of the first voxel).
    pub fn origin(&self) -> &Point3<f64> {
        &self.origin
    }

    /// Get the spacing (world-space step between voxels).
    pub fn spacing(&self) -> &Spacing {
        &self.spacing
    }

    /// Get the direction (orientation of the voxel axes).
    pub fn direction(&self) -> &Direction {
        &self.direction
    }

    /// Voxel counts per axis.
    pub fn shape(&self) -> [usize; 3] {
        let (nx, ny, nz) = self.data.dim();
        [nx, ny, nz]
    }

    /// Total number of voxels.
    pub fn voxel_count(&self) -> usize {
        self.data.len()
    }

    /// World-space extent per axis (voxel count times step size).
    pub fn extent(&self) -> [f64; 3] {
        let shape = self.shape();
        [
            shape[0] as f64 * self.spacing[0],
            shape[1] as f64 * self.spacing[1],
            shape[2] as f64 * self.spacing[2],
        ]
    }

    /// The 4x4 voxel-to-world affine of this volume.
    pub fn affine(&self) -> Matrix4<f64> {
        compose_affine(&self.origin, &self.spacing, &self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn test_volume_accessors() {
        let data = Array3::<f32>::zeros((4, 5, 6));
        let volume = Volume::new(
            data,
            Point3::new(1.0, 2.0, 3.0),
            Spacing::uniform(2.0),
            Direction::identity(),
        );

        assert_eq!(volume.shape(), [4, 5, 6]);
        assert_eq!(volume.voxel_count(), 120);
        assert_eq!(volume.extent(), [8.0, 10.0, 12.0]);
    }

    #[test]
    fn test_affine_roundtrip_through_volume() {
        let data = Array3::<f32>::zeros((2, 2, 2));
        let volume = Volume::new(
            data.clone(),
            Point3::new(-5.0, 0.0, 5.0),
            Spacing::new([0.5, 1.0, 1.5]),
            Direction::identity(),
        );

        let rebuilt = Volume::from_affine(data, &volume.affine());
        assert_eq!(rebuilt.origin(), volume.origin());
        for i in 0..3 {
            assert!((rebuilt.spacing()[i] - volume.spacing()[i]).abs() < 1e-12);
        }
    }
}
