mod endpoint;
pub mod fixtures;
mod output;

pub use endpoint::*;
pub use output::*;
