//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`TS_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Simulation configuration
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Physics overrides (None = use the scene's constants)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physics: Option<PhysicsConfig>,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`TS_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // User config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // TS_SIMULATION__TICKS=10 -> simulation.ticks = 10
        figment = figment.merge(Env::prefixed("TS_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Physics constants to force onto every loaded scene
    ///
    /// Returns None when no `[physics]` section or `TS_PHYSICS__*` variable
    /// was given, so scenes keep their own constants.
    pub fn physics_override(&self) -> Option<tilestep_physics::PhysicsConfig> {
        self.physics.as_ref().map(PhysicsConfig::to_physics_config)
    }
}

/// Simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Path to the RON scene file
    pub scene_path: String,
    /// Number of ticks the demo runs
    pub ticks: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            scene_path: "scenes/demo.ron".to_string(),
            ticks: 60,
        }
    }
}

/// Physics configuration
///
/// Mirrors [`tilestep_physics::PhysicsConfig`]. Missing keys fall back to the
/// gameplay constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Added to the fall velocity each tick while airborne
    pub gravity_acceleration: f32,
    /// Fall velocity cap
    pub terminal_velocity: f32,
    /// Fall velocity on the first airborne tick
    pub fall_start_velocity: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        let defaults = tilestep_physics::PhysicsConfig::default();
        Self {
            gravity_acceleration: defaults.gravity_acceleration,
            terminal_velocity: defaults.terminal_velocity,
            fall_start_velocity: defaults.fall_start_velocity,
        }
    }
}

impl PhysicsConfig {
    /// Convert to the physics crate's config type
    pub fn to_physics_config(&self) -> tilestep_physics::PhysicsConfig {
        tilestep_physics::PhysicsConfig::new(
            self.gravity_acceleration,
            self.terminal_velocity,
            self.fall_start_velocity,
        )
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Log every entity's state after each tick
    pub trace_entities: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            trace_entities: false,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
