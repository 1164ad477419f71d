//! tilestep - tile-grid platformer motion
//!
//! Library half of the demo binary: layered configuration and the systems
//! that drive a world loaded from a scene file.

pub mod config;
pub mod systems;
