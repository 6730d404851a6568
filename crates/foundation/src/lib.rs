pub mod bounds;
pub mod geo;
pub mod math;
pub mod time;

// Foundation crate: small, well-tested geo primitives only.
pub use bounds::*;
pub use geo::*;
pub use time::*;
