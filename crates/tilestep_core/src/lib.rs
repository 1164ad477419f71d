//! Core types for tilestep
//!
//! This crate provides the types for building simulated tile worlds:
//!
//! - [`Entity`] - An object in the world with optional physics components
//! - [`World`] - Container for all entities and the collision map
//! - [`EntityKey`] - Generational key to an entity in the world
//! - [`EntityTemplate`] - Serializable entity template
//! - [`Scene`] - Loadable/saveable scene containing a map and entities

mod entity;
mod world;
mod scene;

pub use entity::{Entity, EntityTemplate};
pub use world::{World, EntityKey};
pub use scene::{Scene, SceneError, SceneLoadError, SceneSaveError};

// Re-export commonly used types from tilestep_math for convenience
pub use tilestep_math::{Rect, Size, Vec2, Vector};

// Re-export physics types for convenient access through tilestep_core
pub use tilestep_physics::{EntityTags, Physical, PhysicsConfig, StepStats, TileCollisionMap};
