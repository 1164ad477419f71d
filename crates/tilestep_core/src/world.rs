//! World container for entities
//!
//! The World owns all entities and the static collision map, and advances
//! them one physics tick at a time.

use std::collections::HashMap;

use slotmap::{new_key_type, SlotMap};
use tilestep_physics::{PhysicsBody, PhysicsConfig, PhysicsSystem, StepStats, TileCollisionMap};

use crate::Entity;

new_key_type! {
    /// Generational key to an entity in the world
    ///
    /// Keys to removed entities never alias entities added later.
    pub struct EntityKey;
}

/// The world containing all entities and the collision map
pub struct World {
    /// All entities in the world (using generational keys)
    entities: SlotMap<EntityKey, Entity>,
    /// Name lookup for named entities
    name_index: HashMap<String, EntityKey>,
    /// Static world geometry (None = nothing is simulated)
    collision_map: Option<TileCollisionMap>,
    /// Gravity constants used by `update`
    physics_config: PhysicsConfig,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
            name_index: HashMap::new(),
            collision_map: None,
            physics_config: PhysicsConfig::default(),
        }
    }

    /// Create a world with pre-allocated capacity for entities
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: SlotMap::with_capacity_and_key(capacity),
            ..Self::new()
        }
    }

    /// Set the collision map
    pub fn with_collision_map(mut self, map: TileCollisionMap) -> Self {
        self.collision_map = Some(map);
        self
    }

    /// Set the physics constants
    pub fn with_physics_config(mut self, config: PhysicsConfig) -> Self {
        self.physics_config = config;
        self
    }

    /// Get the collision map (if any)
    pub fn collision_map(&self) -> Option<&TileCollisionMap> {
        self.collision_map.as_ref()
    }

    /// Replace the collision map
    pub fn set_collision_map(&mut self, map: Option<TileCollisionMap>) {
        self.collision_map = map;
    }

    /// Get the physics constants
    pub fn physics_config(&self) -> &PhysicsConfig {
        &self.physics_config
    }

    /// Add an entity to the world, returning its key
    ///
    /// If the name is already taken, the name lookup moves to the new entity.
    pub fn add_entity(&mut self, entity: Entity) -> EntityKey {
        let name = entity.name.clone();
        let key = self.entities.insert(entity);
        if let Some(name) = name {
            if let Some(previous) = self.name_index.insert(name.clone(), key) {
                log::warn!("Entity name '{}' reused; lookup now points at the newest entity ({:?} replaced)", name, previous);
            }
        }
        key
    }

    /// Remove an entity from the world and return it
    pub fn remove_entity(&mut self, key: EntityKey) -> Option<Entity> {
        let entity = self.entities.remove(key)?;
        if let Some(name) = &entity.name {
            if self.name_index.get(name) == Some(&key) {
                self.name_index.remove(name);
            }
        }
        Some(entity)
    }

    /// Get a reference to an entity by key
    pub fn get_entity(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    /// Get a mutable reference to an entity by key
    pub fn get_entity_mut(&mut self, key: EntityKey) -> Option<&mut Entity> {
        self.entities.get_mut(key)
    }

    /// Look up an entity by name
    pub fn get_by_name(&self, name: &str) -> Option<(EntityKey, &Entity)> {
        let key = *self.name_index.get(name)?;
        self.entities.get(key).map(|entity| (key, entity))
    }

    /// Whether the entity collided with the world during the last tick
    ///
    /// False for unknown keys.
    pub fn collided_with_world(&self, key: EntityKey) -> bool {
        self.entities
            .get(key)
            .map(Entity::collided_with_world)
            .unwrap_or(false)
    }

    /// Get the number of entities
    #[inline]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Check if the world is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Clear all entities from the world
    pub fn clear(&mut self) {
        self.entities.clear();
        self.name_index.clear();
    }

    /// Iterate over keys and entities
    pub fn iter(&self) -> impl Iterator<Item = (EntityKey, &Entity)> {
        self.entities.iter()
    }

    /// Physics views of every active entity that has all physics components
    pub fn physics_bodies_mut(&mut self) -> impl Iterator<Item = PhysicsBody<'_>> {
        self.entities
            .values_mut()
            .filter_map(|entity| entity.physics_body_mut())
    }

    /// Advance all simulated entities by one tick
    ///
    /// Does nothing without a collision map.
    pub fn update(&mut self) -> StepStats {
        let Some(map) = self.collision_map.as_ref() else {
            log::debug!("World has no collision map; skipping physics");
            return StepStats::default();
        };

        let physics = PhysicsSystem::with_config(map, self.physics_config.clone());
        physics.update(
            self.entities
                .values_mut()
                .filter_map(|entity| entity.physics_body_mut()),
        )
    }
}
