//! Runs the bundled demo scene through the simulation system

use tilestep::config::AppConfig;
use tilestep::systems::SimulationSystem;
use tilestep_core::{PhysicsConfig, Scene, Vector};

fn demo_world() -> tilestep_core::World {
    let scene = Scene::load("scenes/demo.ron").expect("Demo scene should parse");
    scene
        .instantiate(AppConfig::default().physics_override())
        .expect("Demo scene should instantiate")
}

#[test]
fn test_demo_scene_loads() {
    let world = demo_world();
    assert_eq!(world.entity_count(), 4);
    for name in ["player", "crate", "drone", "sleeper"] {
        assert!(world.get_by_name(name).is_some(), "missing {}", name);
    }
    let map = world.collision_map().unwrap();
    assert_eq!((map.width(), map.height()), (24, 10));
}

#[test]
fn test_demo_crate_lands_on_platform() {
    let mut world = demo_world();
    let mut simulation = SimulationSystem::new();
    simulation.run(&mut world, 5);

    let (_, crate_entity) = world.get_by_name("crate").unwrap();
    assert_eq!(crate_entity.position, Some(Vector::new(15, 2)));
    assert_eq!(crate_entity.physical.unwrap().velocity.y, 0.0);
}

#[test]
fn test_demo_sleeper_never_moves() {
    let mut world = demo_world();
    SimulationSystem::new().run(&mut world, 30);

    let (_, sleeper) = world.get_by_name("sleeper").unwrap();
    assert_eq!(sleeper.position, Some(Vector::new(20, 6)));
}

#[test]
fn test_demo_drone_flies_level() {
    let mut world = demo_world();
    SimulationSystem::new().run(&mut world, 3);

    let (_, drone) = world.get_by_name("drone").unwrap();
    assert_eq!(drone.position, Some(Vector::new(19, 4)));
}

#[test]
fn test_demo_player_climbs_stairs() {
    let mut world = demo_world();
    SimulationSystem::new().run(&mut world, 5);

    let (_, player) = world.get_by_name("player").unwrap();
    assert_eq!(player.position, Some(Vector::new(6, 6)));
}

#[test]
fn test_scene_physics_used_without_config_override() {
    let scene = Scene::new("Heavy")
        .with_map(["...", "..."])
        .with_physics(PhysicsConfig::new(0.56, 2.0, 3.0));

    let world = scene.instantiate(AppConfig::default().physics_override()).unwrap();
    assert_eq!(world.physics_config().fall_start_velocity, 3.0);

    let overridden: AppConfig = toml::from_str("[physics]\nfall_start_velocity = 1.5\n").unwrap();
    let world = scene.instantiate(overridden.physics_override()).unwrap();
    assert_eq!(world.physics_config().fall_start_velocity, 1.5);
}
