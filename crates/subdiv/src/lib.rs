pub mod batch;
pub mod methods;
pub mod summary;

pub use batch::run;
pub use methods::{ExpandMethod, Interpolation, Method, ResampleMethod};
pub use summary::Summary;
