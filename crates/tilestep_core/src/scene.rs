//! Scene serialization
//!
//! Provides Scene struct for loading/saving scenes from RON files.
//! A scene holds the collision map as ASCII rows plus entity templates.

use serde::{Serialize, Deserialize};
use std::path::Path;
use std::fs;
use std::io;

use tilestep_physics::{PhysicsConfig, TileCollisionMap, TileMapError};

use crate::entity::EntityTemplate;
use crate::World;

/// A serializable scene
///
/// Map rows use the glyphs understood by [`TileCollisionMap::from_rows`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name (for display/debugging)
    pub name: String,
    /// Collision map, one string per row
    #[serde(default)]
    pub map: Vec<String>,
    /// Entity templates in this scene
    #[serde(default)]
    pub entities: Vec<EntityTemplate>,
    /// Scene-specific physics constants
    #[serde(default)]
    pub physics: Option<PhysicsConfig>,
}

impl Scene {
    /// Create a new empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            map: Vec::new(),
            entities: Vec::new(),
            physics: None,
        }
    }

    /// Load a scene from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneLoadError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let scene: Scene = ron::from_str(&contents)?;
        log::debug!("Loaded scene '{}' from {}", scene.name, path.display());
        Ok(scene)
    }

    /// Save a scene to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Add an entity template to this scene
    pub fn add_entity(&mut self, entity: EntityTemplate) {
        self.entities.push(entity);
    }

    /// Set the collision map rows
    pub fn with_map<S: Into<String>>(mut self, rows: impl IntoIterator<Item = S>) -> Self {
        self.map = rows.into_iter().map(Into::into).collect();
        self
    }

    /// Set scene-specific physics constants
    pub fn with_physics(mut self, config: PhysicsConfig) -> Self {
        self.physics = Some(config);
        self
    }

    /// Build a live World from this scene
    ///
    /// Physics constants come from `physics_config` if given, then from the
    /// scene, then from the defaults. A scene without map rows produces a
    /// world without a collision map.
    pub fn instantiate(&self, physics_config: Option<PhysicsConfig>) -> Result<World, SceneError> {
        let config = physics_config
            .or_else(|| self.physics.clone())
            .unwrap_or_default();

        let mut world = World::with_capacity(self.entities.len()).with_physics_config(config);
        if !self.map.is_empty() {
            world.set_collision_map(Some(TileCollisionMap::from_rows(&self.map)?));
        }

        for template in &self.entities {
            let entity = template.to_entity();
            if let (Some(map), Some(bbox)) = (world.collision_map(), entity.world_bounding_box()) {
                if map.overlaps_solid(&bbox) {
                    log::warn!(
                        "Entity {:?} in scene '{}' spawns overlapping solid tiles",
                        template.name,
                        self.name
                    );
                }
            }
            world.add_entity(entity);
        }

        log::debug!(
            "Instantiated scene '{}' with {} entities",
            self.name,
            world.entity_count()
        );
        Ok(world)
    }
}

/// Error loading a scene
#[derive(Debug)]
pub enum SceneLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
}

impl From<io::Error> for SceneLoadError {
    fn from(e: io::Error) -> Self {
        SceneLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SceneLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneLoadError::Parse(e)
    }
}

impl std::fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneLoadError::Io(e) => write!(f, "IO error: {}", e),
            SceneLoadError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for SceneLoadError {}

/// Error saving a scene
#[derive(Debug)]
pub enum SceneSaveError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for SceneSaveError {
    fn from(e: io::Error) -> Self {
        SceneSaveError::Io(e)
    }
}

impl From<ron::Error> for SceneSaveError {
    fn from(e: ron::Error) -> Self {
        SceneSaveError::Serialize(e)
    }
}

impl std::fmt::Display for SceneSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneSaveError::Io(e) => write!(f, "IO error: {}", e),
            SceneSaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for SceneSaveError {}

/// Unified error type for scene operations
#[derive(Debug)]
pub enum SceneError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
    /// Serialization error
    Serialize(ron::Error),
    /// Invalid collision map rows
    Map(TileMapError),
}

impl From<io::Error> for SceneError {
    fn from(e: io::Error) -> Self {
        SceneError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SceneError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneError::Parse(e)
    }
}

impl From<ron::Error> for SceneError {
    fn from(e: ron::Error) -> Self {
        SceneError::Serialize(e)
    }
}

impl From<TileMapError> for SceneError {
    fn from(e: TileMapError) -> Self {
        SceneError::Map(e)
    }
}

impl From<SceneLoadError> for SceneError {
    fn from(e: SceneLoadError) -> Self {
        match e {
            SceneLoadError::Io(io_err) => SceneError::Io(io_err),
            SceneLoadError::Parse(parse_err) => SceneError::Parse(parse_err),
        }
    }
}

impl From<SceneSaveError> for SceneError {
    fn from(e: SceneSaveError) -> Self {
        match e {
            SceneSaveError::Io(io_err) => SceneError::Io(io_err),
            SceneSaveError::Serialize(ser_err) => SceneError::Serialize(ser_err),
        }
    }
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::Io(e) => write!(f, "IO error: {}", e),
            SceneError::Parse(e) => write!(f, "Parse error: {}", e),
            SceneError::Serialize(e) => write!(f, "Serialize error: {}", e),
            SceneError::Map(e) => write!(f, "Map error: {}", e),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Io(e) => Some(e),
            SceneError::Parse(e) => Some(e),
            SceneError::Serialize(e) => Some(e),
            SceneError::Map(e) => Some(e),
        }
    }
}
