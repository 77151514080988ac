//! Native NIfTI reading and writing.
//!
//! The voxel-to-world transform is taken from the sform when present,
//! falling back to the qform and finally to plain pixdim scaling, and is
//! decomposed into origin, spacing and direction. Written files carry a
//! reconstructed sform. Gzipped files (`.nii.gz`) are handled by the
//! codec based on the path extension.

use std::path::Path;

use nalgebra::Matrix4;
use ndarray::Ix3;
use nifti::writer::WriterOptions;
use nifti::{IntoNdArray, NiftiHeader, NiftiObject, ReaderOptions};
use subdiv_core::spatial::decompose_affine;
use subdiv_core::Volume;

use crate::error::{IoError, Result};

/// Read a NIfTI file into a volume.
pub fn read_nifti<P: AsRef<Path>>(path: P) -> Result<Volume> {
    let obj = ReaderOptions::new().read_file(path.as_ref())?;
    let affine = affine_from_header(obj.header());

    let data = obj.into_volume().into_ndarray::<f32>()?;
    if data.ndim() != 3 {
        return Err(IoError::InvalidArgument(format!(
            "expected a 3-D volume, got {} dimensions",
            data.ndim()
        )));
    }
    let data = data
        .into_dimensionality::<Ix3>()
        .map_err(|e| IoError::InvalidArgument(e.to_string()))?;

    let (origin, spacing, direction) = decompose_affine(&affine);
    Ok(Volume::new(data, origin, spacing, direction))
}

/// Write a volume to a NIfTI file.
pub fn write_nifti<P: AsRef<Path>>(path: P, volume: &Volume) -> Result<()> {
    let header = header_for(volume);
    WriterOptions::new(path.as_ref())
        .reference_header(&header)
        .write_nifti(volume.data())?;
    Ok(())
}

/// Voxel-to-world affine of a NIfTI header.
fn affine_from_header(header: &NiftiHeader) -> Matrix4<f64> {
    if header.sform_code > 0 {
        let mut affine = Matrix4::identity();
        for (row, srow) in [header.srow_x, header.srow_y, header.srow_z]
            .iter()
            .enumerate()
        {
            for col in 0..4 {
                affine[(row, col)] = f64::from(srow[col]);
            }
        }
        affine
    } else if header.qform_code > 0 {
        qform_affine(header)
    } else {
        // Last resort: axis-aligned pixdim scaling.
        let mut affine = Matrix4::identity();
        for i in 0..3 {
            affine[(i, i)] = f64::from(header.pixdim[i + 1]);
        }
        affine
    }
}

/// Build the rotation part of the affine from the qform quaternion.
///
/// See the NIfTI-1 standard for the quaternion-to-matrix formulas.
fn qform_affine(header: &NiftiHeader) -> Matrix4<f64> {
    let b = f64::from(header.quatern_b);
    let c = f64::from(header.quatern_c);
    let d = f64::from(header.quatern_d);
    let a = (1.0 - (b * b + c * c + d * d).min(1.0)).sqrt();

    let qfac = if header.pixdim[0] == 0.0 {
        1.0
    } else {
        f64::from(header.pixdim[0])
    };

    let dx = f64::from(header.pixdim[1]);
    let dy = f64::from(header.pixdim[2]);
    let dz = f64::from(header.pixdim[3]) * qfac;

    let mut affine = Matrix4::identity();
    affine[(0, 0)] = (a * a + b * b - c * c - d * d) * dx;
    affine[(0, 1)] = (2.0 * b * c - 2.0 * a * d) * dy;
    affine[(0, 2)] = (2.0 * b * d + 2.0 * a * c) * dz;
    affine[(1, 0)] = (2.0 * b * c + 2.0 * a * d) * dx;
    affine[(1, 1)] = (a * a + c * c - b * b - d * d) * dy;
    affine[(1, 2)] = (2.0 * c * d - 2.0 * a * b) * dz;
    affine[(2, 0)] = (2.0 * b * d - 2.0 * a * c) * dx;
    affine[(2, 1)] = (2.0 * c * d + 2.0 * a * b) * dy;
    affine[(2, 2)] = (a * a + d * d - c * c - b * b) * dz;
    affine[(0, 3)] = f64::from(header.quatern_x);
    affine[(1, 3)] = f64::from(header.quatern_y);
    affine[(2, 3)] = f64::from(header.quatern_z);
    affine
}

/// Build a header carrying the volume's transform as an sform.
fn header_for(volume: &Volume) -> NiftiHeader {
    let affine = volume.affine();
    let spacing = volume.spacing();

    let mut header = NiftiHeader::default();
    header.pixdim = [
        1.0,
        spacing[0] as f32,
        spacing[1] as f32,
        spacing[2] as f32,
        1.0,
        1.0,
        1.0,
        1.0,
    ];
    header.sform_code = 1;
    header.qform_code = 0;
    for row in 0..3 {
        let srow = match row {
            0 => &mut header.srow_x,
            1 => &mut header.srow_y,
            _ => &mut header.srow_z,
        };
        for col in 0..4 {
            srow[col] = affine[(row, col)] as f32;
        }
    }
    header
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sform_is_preferred() {
        let mut header = NiftiHeader::default();
        header.sform_code = 1;
        header.srow_x = [1.0, 0.0, 0.0, 10.0];
        header.srow_y = [0.0, 2.0, 0.0, 20.0];
        header.srow_z = [0.0, 0.0, 3.0, 30.0];
        header.pixdim = [1.0, 9.0, 9.0, 9.0, 1.0, 1.0, 1.0, 1.0];

        let affine = affine_from_header(&header);
        assert_eq!(affine[(0, 0)], 1.0);
        assert_eq!(affine[(1, 1)], 2.0);
        assert_eq!(affine[(2, 2)], 3.0);
        assert_eq!(affine[(0, 3)], 10.0);
        assert_eq!(affine[(2, 3)], 30.0);
    }

    #[test]
    fn test_pixdim_fallback() {
        let mut header = NiftiHeader::default();
        header.sform_code = 0;
        header.qform_code = 0;
        header.pixdim = [1.0, 1.5, 2.5, 3.5, 1.0, 1.0, 1.0, 1.0];

        let affine = affine_from_header(&header);
        assert_eq!(affine[(0, 0)], 1.5);
        assert_eq!(affine[(1, 1)], 2.5);
        assert_eq!(affine[(2, 2)], 3.5);
        assert_eq!(affine[(0, 3)], 0.0);
    }

    #[test]
    fn test_identity_qform() {
        let mut header = NiftiHeader::default();
        header.sform_code = 0;
        header.qform_code = 1;
        header.quatern_b = 0.0;
        header.quatern_c = 0.0;
        header.quatern_d = 0.0;
        header.quatern_x = 5.0;
        header.quatern_y = 6.0;
        header.quatern_z = 7.0;
        header.pixdim = [1.0, 1.0, 1.0, 2.0, 1.0, 1.0, 1.0, 1.0];

        let affine = affine_from_header(&header);
        assert!((affine[(0, 0)] - 1.0).abs() < 1e-6);
        assert!((affine[(1, 1)] - 1.0).abs() < 1e-6);
        assert!((affine[(2, 2)] - 2.0).abs() < 1e-6);
        assert_eq!(affine[(0, 3)], 5.0);
        assert_eq!(affine[(2, 3)], 7.0);
    }
}
