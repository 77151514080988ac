pub mod error;
pub mod filter;
pub mod metric;
pub mod spatial;
pub mod volume;

pub use error::VolumeError;
pub use metric::MaskDiff;
pub use spatial::{Direction, Spacing};
pub use volume::Volume;
