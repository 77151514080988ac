//! Spatial metadata types for volumetric images.
//!
//! Spacing and direction describe how voxel indices map to world-space
//! coordinates. All types are based on nalgebra.

use nalgebra::{Matrix3, Matrix4, Point3, Vector3};

/// Physical distance between adjacent voxels along each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing(pub Vector3<f64>);

impl Spacing {
    /// Create a new spacing from per-axis step sizes.
    pub fn new(steps: [f64; 3]) -> Self {
        Self(Vector3::from(steps))
    }

    /// Create uniform spacing (same step along all axes).
    pub fn uniform(step: f64) -> Self {
        Self::new([step, step, step])
    }

    /// Check if spacing is uniform (all components equal).
    pub fn is_uniform(&self) -> bool {
        (self.0[1] - self.0[0]).abs() < 1e-9 && (self.0[2] - self.0[0]).abs() < 1e-9
    }

    /// Spacing after cutting each voxel edge into `divisions` parts.
    pub fn subdivide(&self, divisions: u32) -> Self {
        Self(self.0 / f64::from(divisions))
    }

    /// Spacing after keeping every `factor`-th voxel along each axis.
    pub fn coarsen(&self, factor: u32) -> Self {
        Self(self.0 * f64::from(factor))
    }
}

impl std::ops::Index<usize> for Spacing {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

/// Direction cosine matrix giving the orientation of the voxel axes in
/// world space. Column i is the world-space direction of axis i.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Direction(pub Matrix3<f64>);

impl Direction {
    /// Identity orientation (voxel axes aligned with world axes).
    pub fn identity() -> Self {
        Self(Matrix3::identity())
    }

    /// Check if the matrix is orthogonal.
    pub fn is_orthogonal(&self) -> bool {
        let product = self.0 * self.0.transpose();
        let identity = Matrix3::<f64>::identity();
        (0..3).all(|i| (0..3).all(|j| (product[(i, j)] - identity[(i, j)]).abs() < 1e-6))
    }
}

impl std::ops::Index<(usize, usize)> for Direction {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.0[index]
    }
}

/// Compose a 4x4 voxel-to-world affine from origin, spacing and direction.
///
/// Column j of the upper 3x3 block is the j-th direction column scaled by
/// the j-th step size; the fourth column is the origin.
pub fn compose_affine(origin: &Point3<f64>, spacing: &Spacing, direction: &Direction) -> Matrix4<f64> {
    let mut affine = Matrix4::identity();
    for j in 0..3 {
        for i in 0..3 {
            affine[(i, j)] = direction[(i, j)] * spacing[j];
        }
        affine[(j, 3)] = origin[j];
    }
    affine
}

/// Decompose a 4x4 voxel-to-world affine into origin, spacing and direction.
///
/// Spacing is recovered as the norm of each column of the upper 3x3 block;
/// direction columns are the normalized columns, falling back to the world
/// axis for degenerate (near-zero) columns.
pub fn decompose_affine(affine: &Matrix4<f64>) -> (Point3<f64>, Spacing, Direction) {
    let origin = Point3::new(affine[(0, 3)], affine[(1, 3)], affine[(2, 3)]);

    let mut steps = [0.0; 3];
    let mut dir = Matrix3::identity();
    for j in 0..3 {
        let col = Vector3::new(affine[(0, j)], affine[(1, j)], affine[(2, j)]);
        let norm = col.norm();
        steps[j] = norm;
        let unit = if norm > 1e-9 {
            col / norm
        } else {
            let mut axis = Vector3::zeros();
            axis[j] = 1.0;
            axis
        };
        dir.set_column(j, &unit);
    }

    (origin, Spacing::new(steps), Direction(dir))
}
