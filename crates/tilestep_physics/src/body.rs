//! Physics components attached to entities
//!
//! These are the pieces of entity state the motion resolver reads and writes.
//! The entity store owns them; the resolver only sees them through a
//! [`PhysicsBody`] view for the duration of one tick.

use bitflags::bitflags;
use serde::{Serialize, Deserialize};
use tilestep_math::{Rect, Vec2, Vector};

/// Integer position of an entity. The y coordinate marks the bottom row of its bounding box.
pub type WorldPosition = Vector;

/// Collision rectangle in the entity's local frame
pub type BoundingBox = Rect;

bitflags! {
    /// Marker tags on an entity
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EntityTags: u8 {
        /// Entity takes part in simulation this tick
        const ACTIVE = 1 << 0;
        /// Entity's movement was cut short by world geometry during the last tick
        const COLLIDED_WITH_WORLD = 1 << 1;
    }
}

/// Convert a local bounding box into world space
///
/// The box is anchored so that its bottom row sits on `position.y`.
#[inline]
pub fn to_world_space(bbox: &BoundingBox, position: WorldPosition) -> BoundingBox {
    *bbox + Vector::new(position.x, position.y - (bbox.size.height - 1))
}

/// Physical properties of a movable entity
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Physical {
    /// Velocity in grid units per tick
    pub velocity: Vec2,
    /// Whether gravity is integrated for this entity
    pub gravity_affected: bool,
    /// Whether horizontal movement may climb one-unit steps
    #[serde(default)]
    pub can_step_up_stairs: bool,
}

impl Physical {
    /// Create physical properties with the given velocity and gravity flag
    pub fn new(velocity: Vec2, gravity_affected: bool) -> Self {
        Self {
            velocity,
            gravity_affected,
            can_step_up_stairs: false,
        }
    }

    /// Set the velocity
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set whether gravity applies
    pub fn with_gravity(mut self, affected: bool) -> Self {
        self.gravity_affected = affected;
        self
    }

    /// Set whether the entity can step up stairs
    pub fn with_stair_stepping(mut self, enabled: bool) -> Self {
        self.can_step_up_stairs = enabled;
        self
    }
}

/// Borrowed view of one entity's physics state for a single tick
///
/// Position, velocity and tags are mutable; the local bounding box is not.
#[derive(Debug)]
pub struct PhysicsBody<'a> {
    pub physical: &'a mut Physical,
    pub position: &'a mut WorldPosition,
    pub bounding_box: &'a BoundingBox,
    pub tags: &'a mut EntityTags,
}

impl PhysicsBody<'_> {
    /// Whether the entity is flagged as active
    pub fn is_active(&self) -> bool {
        self.tags.contains(EntityTags::ACTIVE)
    }
}
