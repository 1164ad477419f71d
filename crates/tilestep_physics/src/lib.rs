//! Tile-grid physics for tilestep
//!
//! This crate moves entities through a static tile world one grid unit at a
//! time. It provides:
//! - Physics components (velocity, gravity and stair-stepping flags, tags)
//! - The [`CollisionOracle`] query interface and a tile-grid implementation
//! - [`PhysicsSystem`], which resolves horizontal movement, gravity and
//!   vertical movement for every active entity once per tick

pub mod body;
pub mod collision;
pub mod system;
pub mod tile_map;

// Re-export commonly used types
pub use body::{to_world_space, BoundingBox, EntityTags, Physical, PhysicsBody, WorldPosition};
pub use collision::{CollisionOracle, SolidEdges};
pub use system::{PhysicsConfig, PhysicsSystem, StepStats};
pub use tile_map::{TileCollisionMap, TileMapError};
