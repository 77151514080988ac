//! Format-dispatched volume loading and saving.
//!
//! NIfTI files are handled natively; MINC files go through a temporary
//! NIfTI intermediate and the external converters.

use std::path::Path;

use subdiv_core::Volume;

use crate::error::Result;
use crate::format::Format;
use crate::{minc, nifti_io};

/// Read a volume from a MINC or NIfTI file.
pub fn read_volume<P: AsRef<Path>>(path: P) -> Result<Volume> {
    let path = path.as_ref();
    match Format::from_path(path)? {
        Format::Nifti => nifti_io::read_nifti(path),
        Format::Minc => {
            let dir = tempfile::tempdir()?;
            let intermediate = dir.path().join("volume.nii");
            minc::minc_to_nii(path, &intermediate)?;
            nifti_io::read_nifti(&intermediate)
        }
    }
}

/// Write a volume to a MINC or NIfTI file.
pub fn write_volume<P: AsRef<Path>>(path: P, volume: &Volume) -> Result<()> {
    let path = path.as_ref();
    match Format::from_path(path)? {
        Format::Nifti => nifti_io::write_nifti(path, volume),
        Format::Minc => {
            let dir = tempfile::tempdir()?;
            let intermediate = dir.path().join("volume.nii");
            nifti_io::write_nifti(&intermediate, volume)?;
            minc::nii_to_minc(&intermediate, path)
        }
    }
}
