//! monit-conf - Render monit check configuration from declarative attributes.

pub mod check;
pub mod commands;
pub mod config;
pub mod display;
pub mod render;
