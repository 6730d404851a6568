pub mod error;
pub mod model;
pub mod set;
pub mod tour;

pub use error::*;
pub use model::*;
pub use set::*;
pub use tour::*;
