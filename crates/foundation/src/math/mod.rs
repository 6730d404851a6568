pub mod geodesy;
pub mod planar;
pub mod projection;

pub use geodesy::*;
pub use planar::*;
pub use projection::*;
