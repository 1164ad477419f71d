//! Application systems
//!
//! Systems that drive a loaded world, kept out of main.rs for testability.

mod simulation;

pub use simulation::{SimulationResult, SimulationSystem};
