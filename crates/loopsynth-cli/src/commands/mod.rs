//! CLI command implementations.

pub mod config;
pub mod devices;
pub mod live;
pub mod play;
pub mod render;
