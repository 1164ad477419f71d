//! tilestep - headless platformer motion demo
//!
//! Loads a scene, runs it for a fixed number of ticks and logs what happened.

use std::error::Error;

use tilestep::config::AppConfig;
use tilestep::systems::SimulationSystem;
use tilestep_core::Scene;

fn main() -> Result<(), Box<dyn Error>> {
    let loaded = AppConfig::load();
    let log_level = loaded
        .as_ref()
        .map(|config| config.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    // RUST_LOG still wins over the configured level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
    log::info!("Starting tilestep");

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    let scene = Scene::load(&config.simulation.scene_path)?;
    let mut world = scene.instantiate(config.physics_override())?;
    log::info!(
        "Loaded scene '{}' with {} entities",
        scene.name,
        world.entity_count()
    );

    let mut simulation = SimulationSystem::new().with_entity_tracing(config.debug.trace_entities);
    let results = simulation.run(&mut world, config.simulation.ticks);
    let busiest = results.iter().map(|result| result.collisions).max().unwrap_or(0);

    log::info!(
        "Ran {} ticks: {} world collisions (at most {} in one tick)",
        simulation.tick(),
        simulation.total_collisions(),
        busiest
    );

    for (_, entity) in world.iter() {
        if let (Some(name), Some(position)) = (&entity.name, entity.position) {
            log::info!(
                "{} ended at ({}, {}){}",
                name,
                position.x,
                position.y,
                if entity.is_active() { "" } else { " (inactive)" }
            );
        }
    }

    Ok(())
}
