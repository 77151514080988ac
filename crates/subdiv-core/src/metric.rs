//! Mask difference metric.
//!
//! Counts voxel-level disagreements between two binarized volumes, used to
//! compare an interpolated subdivision against the exact block expansion.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VolumeError};
use crate::volume::Volume;

/// Voxel-count difference between a reference mask and another mask.
///
/// Both volumes must be binary masks (values 0 or 1). Voxels are compared
/// with a 0.5 threshold on the difference, so interpolation artifacts
/// below half intensity are not counted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaskDiff {
    /// Voxels that are background in the reference but foreground in the other.
    pub additions: u64,
    /// Voxels that are foreground in the reference but background in the other.
    pub deletions: u64,
    /// Foreground voxel count of the reference.
    pub total: u64,
}

impl MaskDiff {
    /// Count the differences between `reference` and `other`.
    ///
    /// A shape mismatch is reconciled by comparing in flat index order
    /// when the voxel counts agree; otherwise it is an error.
    pub fn between(reference: &Volume, other: &Volume) -> Result<Self> {
        if reference.voxel_count() != other.voxel_count() {
            return Err(VolumeError::ShapeMismatch {
                expected: reference.shape().to_vec(),
                actual: other.shape().to_vec(),
            });
        }

        let mut additions = 0;
        let mut deletions = 0;
        let mut total = 0;
        for (&a, &b) in reference.data().iter().zip(other.data().iter()) {
            let diff = a - b;
            if diff < -0.5 {
                additions += 1;
            } else if diff > 0.5 {
                deletions += 1;
            }
            if a > 0.5 {
                total += 1;
            }
        }

        Ok(Self {
            additions,
            deletions,
            total,
        })
    }

    /// Net change in foreground voxel count.
    pub fn change(&self) -> i64 {
        self.additions as i64 - self.deletions as i64
    }

    /// Total number of changed voxels.
    pub fn count_changes(&self) -> u64 {
        self.additions + self.deletions
    }

    /// Net change relative to the reference foreground count.
    ///
    /// Zero when the reference mask is empty.
    pub fn percent_change(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.change() as f64 / self.total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::{Direction, Spacing};
    use nalgebra::Point3;
    use ndarray::Array3;

    fn mask(values: &[f32]) -> Volume {
        let data = Array3::from_shape_vec((2, 2, 2), values.to_vec()).unwrap();
        Volume::new(
            data,
            Point3::new(0.0, 0.0, 0.0),
            Spacing::uniform(1.0),
            Direction::identity(),
        )
    }

    #[test]
    fn test_identical_masks_have_no_changes() {
        let a = mask(&[1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
        let diff = MaskDiff::between(&a, &a).unwrap();
        assert_eq!(diff.additions, 0);
        assert_eq!(diff.deletions, 0);
        assert_eq!(diff.total, 4);
        assert_eq!(diff.percent_change(), 0.0);
    }

    #[test]
    fn test_additions_and_deletions_counted() {
        let reference = mask(&[1.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]);
        let other = mask(&[1.0, 0.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0]);

        let diff = MaskDiff::between(&reference, &other).unwrap();
        assert_eq!(diff.additions, 2);
        assert_eq!(diff.deletions, 1);
        assert_eq!(diff.total, 3);
        assert_eq!(diff.change(), 1);
        assert_eq!(diff.count_changes(), 3);
        assert!((diff.percent_change() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_reference_has_zero_percent_change() {
        let reference = mask(&[0.0; 8]);
        let other = mask(&[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let diff = MaskDiff::between(&reference, &other).unwrap();
        assert_eq!(diff.additions, 1);
        assert_eq!(diff.percent_change(), 0.0);
    }

    #[test]
    fn test_voxel_count_mismatch_is_an_error() {
        let small = mask(&[0.0; 8]);
        let big = Volume::new(
            Array3::zeros((2, 2, 4)),
            Point3::new(0.0, 0.0, 0.0),
            Spacing::uniform(1.0),
            Direction::identity(),
        );
        assert!(matches!(
            MaskDiff::between(&small, &big),
            Err(VolumeError::ShapeMismatch { .. })
        ));
    }
}
