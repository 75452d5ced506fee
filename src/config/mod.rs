//! Configuration module.

mod checks;
mod loader;

pub use checks::*;
pub use loader::*;
