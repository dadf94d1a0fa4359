mod atrous_filter;
mod compositor;
mod reprojector;
mod surface_packer;
mod variance_estimator;

pub use self::atrous_filter::*;
pub use self::compositor::*;
pub use self::reprojector::*;
pub use self::surface_packer::*;
pub use self::variance_estimator::*;
