//! Error types for volume file I/O.
//!
//! Per-file errors (unsupported formats, external tool failures) are meant
//! to be recorded and survived by callers; plain I/O errors on the
//! surrounding directories are fatal to a run.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for volume I/O operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// File extension is not a recognized volume format.
    #[error("unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// An external tool could not be launched at all.
    #[error("failed to launch {tool}: {source}")]
    ToolLaunch {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// An external tool ran but exited unsuccessfully.
    #[error("{tool}: {status}")]
    ExternalTool { tool: &'static str, status: String },

    /// An external tool produced output we could not interpret.
    #[error("could not parse {tool} output: {detail}")]
    ToolOutput { tool: &'static str, detail: String },

    /// Invalid request parameters.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Underlying filesystem error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Error from the NIfTI codec.
    #[error("NIfTI error: {0}")]
    Nifti(#[from] nifti::NiftiError),

    /// Error from an in-memory volume operation.
    #[error(transparent)]
    Volume(#[from] subdiv_core::VolumeError),
}

/// Result type for volume I/O operations.
pub type Result<T> = std::result::Result<T, IoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format_display() {
        let err = IoError::UnsupportedFormat(PathBuf::from("scan.dcm"));
        assert_eq!(err.to_string(), "unsupported file format: scan.dcm");
    }

    #[test]
    fn test_external_tool_display() {
        let err = IoError::ExternalTool {
            tool: "mincresample",
            status: "exit status: 1".into(),
        };
        assert_eq!(err.to_string(), "mincresample: exit status: 1");
    }
}
