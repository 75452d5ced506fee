//! Check model: attributes, types and validation.

mod error;
mod types;
mod validate;

pub use error::*;
pub use types::*;
pub use validate::*;
