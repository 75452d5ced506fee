//! CLI command implementations.

mod render;

pub use render::*;
