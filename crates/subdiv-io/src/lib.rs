pub mod error;
pub mod format;
pub mod minc;
pub mod nifti_io;
pub mod volume_io;

pub use error::{IoError, Result};
pub use format::Format;
pub use volume_io::{read_volume, write_volume};
