//! Rendering checks into monit configuration files.

mod error;
mod renderer;
mod template;

pub use error::*;
pub use renderer::*;
pub use template::*;
