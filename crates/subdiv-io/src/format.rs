//! Volume file format detection.

use std::path::Path;

use crate::error::{IoError, Result};

/// Supported volume container formats, resolved once from the file
/// extension at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Medical Imaging NetCDF (`.mnc`).
    Minc,
    /// Neuroimaging Informatics Technology Initiative (`.nii`, `.nii.gz`).
    Nifti,
}

impl Format {
    /// Detect the format of `path` from its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if name.ends_with(".mnc") {
            Ok(Format::Minc)
        } else if name.ends_with(".nii") || name.ends_with(".nii.gz") {
            Ok(Format::Nifti)
        } else {
            Err(IoError::UnsupportedFormat(path.to_path_buf()))
        }
    }
}
