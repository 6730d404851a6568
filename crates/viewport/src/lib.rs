pub mod filter;
pub mod memo;
pub mod options;
pub mod range;

pub use filter::*;
pub use memo::*;
pub use options::*;
pub use range::*;
