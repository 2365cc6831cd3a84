pub mod config;
pub mod identifiers;
pub mod logger;
pub mod model;

pub use identifiers::*;
pub use model::*;
