pub mod config;
mod batch;
mod error;
mod outcome;
mod stats;
mod summary;

pub use batch::*;
pub use error::*;
pub use outcome::*;
pub use stats::*;
pub use summary::*;
