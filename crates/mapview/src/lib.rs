pub mod camera;
pub mod cluster;
pub mod config;
pub mod error;
pub mod handlers;
pub mod notifier;
pub mod region;
pub mod script;
pub mod state;
pub mod view;

pub use camera::*;
pub use cluster::*;
pub use config::*;
pub use error::*;
pub use notifier::*;
pub use region::*;
pub use script::*;
pub use state::*;
pub use view::*;
