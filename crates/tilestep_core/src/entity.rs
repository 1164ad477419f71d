//! Entity and EntityTemplate types
//!
//! An Entity is a bag of optional components plus marker tags. Only entities
//! carrying every physics component and the `ACTIVE` tag are simulated.

use serde::{Serialize, Deserialize};
use tilestep_math::{Rect, Vec2, Vector};
use tilestep_physics::{to_world_space, BoundingBox, EntityTags, Physical, PhysicsBody, WorldPosition};

/// An entity in the world
///
/// Each entity has:
/// - An optional name (for lookup by name)
/// - An optional position, bounding box and set of physical properties
/// - Marker tags (`ACTIVE`, `COLLIDED_WITH_WORLD`)
#[derive(Clone, Debug)]
pub struct Entity {
    /// Optional name for this entity (for lookup)
    pub name: Option<String>,
    /// Bottom-left anchored grid position
    pub position: Option<WorldPosition>,
    /// Collision shape in the entity's local frame
    pub bounding_box: Option<BoundingBox>,
    /// Velocity and movement flags
    pub physical: Option<Physical>,
    /// Marker tags
    pub tags: EntityTags,
}

impl Default for Entity {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity {
    /// Create a new active entity with no components
    pub fn new() -> Self {
        Self {
            name: None,
            position: None,
            bounding_box: None,
            physical: None,
            tags: EntityTags::ACTIVE,
        }
    }

    /// Set the name of this entity (for lookup)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach a position
    pub fn with_position(mut self, position: WorldPosition) -> Self {
        self.position = Some(position);
        self
    }

    /// Attach a collision shape
    pub fn with_bounding_box(mut self, bounding_box: BoundingBox) -> Self {
        self.bounding_box = Some(bounding_box);
        self
    }

    /// Attach physical properties
    pub fn with_physical(mut self, physical: Physical) -> Self {
        self.physical = Some(physical);
        self
    }

    /// Set whether the entity is active
    pub fn with_active(mut self, active: bool) -> Self {
        self.set_active(active);
        self
    }

    /// Check if the entity takes part in simulation
    #[inline]
    pub fn is_active(&self) -> bool {
        self.tags.contains(EntityTags::ACTIVE)
    }

    /// Activate or deactivate the entity
    #[inline]
    pub fn set_active(&mut self, active: bool) {
        self.tags.set(EntityTags::ACTIVE, active);
    }

    /// Check if the entity's movement was cut short by the world last tick
    #[inline]
    pub fn collided_with_world(&self) -> bool {
        self.tags.contains(EntityTags::COLLIDED_WITH_WORLD)
    }

    /// Bounding box in world space, if the entity has both a position and a shape
    pub fn world_bounding_box(&self) -> Option<BoundingBox> {
        match (&self.bounding_box, self.position) {
            (Some(bbox), Some(position)) => Some(to_world_space(bbox, position)),
            _ => None,
        }
    }

    /// Borrow the physics view of this entity
    ///
    /// Returns None unless the entity is active and has a position, a
    /// bounding box and physical properties.
    pub fn physics_body_mut(&mut self) -> Option<PhysicsBody<'_>> {
        let Self { position, bounding_box, physical, tags, .. } = self;
        if !tags.contains(EntityTags::ACTIVE) {
            return None;
        }

        Some(PhysicsBody {
            physical: physical.as_mut()?,
            position: position.as_mut()?,
            bounding_box: bounding_box.as_ref()?,
            tags,
        })
    }
}

fn default_true() -> bool {
    true
}

/// A serializable entity template
///
/// Used for scene files. Every template produces a fully simulated entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityTemplate {
    /// Optional name for this entity (for lookup)
    #[serde(default)]
    pub name: Option<String>,
    /// Spawn position (bottom row of the bounding box)
    pub position: Vector,
    /// Collision shape in the local frame
    pub bounding_box: Rect,
    /// Initial velocity
    #[serde(default)]
    pub velocity: Vec2,
    /// Whether gravity applies
    #[serde(default = "default_true")]
    pub gravity_affected: bool,
    /// Whether the entity can climb one-unit steps
    #[serde(default)]
    pub can_step_up_stairs: bool,
    /// Whether the entity starts active
    #[serde(default = "default_true")]
    pub active: bool,
}

impl EntityTemplate {
    /// Create a new gravity-affected, active template at rest
    pub fn new(position: Vector, bounding_box: Rect) -> Self {
        Self {
            name: None,
            position,
            bounding_box,
            velocity: Vec2::ZERO,
            gravity_affected: true,
            can_step_up_stairs: false,
            active: true,
        }
    }

    /// Set the name of this template
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the initial velocity
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

    /// Set whether the entity starts active
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Create an Entity from this template
    pub fn to_entity(&self) -> Entity {
        let physical = Physical::new(self.velocity, self.gravity_affected)
            .with_stair_stepping(self.can_step_up_stairs);

        let mut entity = Entity::new()
            .with_position(self.position)
            .with_bounding_box(self.bounding_box)
            .with_physical(physical)
            .with_active(self.active);
        entity.name = self.name.clone();
        entity
    }
}
