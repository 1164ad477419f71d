//! Integration tests for the scene-physics pipeline
//!
//! These tests drive whole worlds built from scenes:
//! 1. Scene instantiation produces simulated entities
//! 2. Ticks apply gravity, stair stepping and wall stops
//! 3. Collision tags reflect the latest tick only

use tilestep_core::{
    EntityTemplate, PhysicsConfig, Rect, Scene, Vec2, Vector, World,
};

fn scene_with(rows: &[&str], entities: Vec<EntityTemplate>) -> Scene {
    let mut scene = Scene::new("Integration").with_map(rows.iter().copied());
    for entity in entities {
        scene.add_entity(entity);
    }
    scene
}

fn position_of(world: &World, name: &str) -> Vector {
    let (_, entity) = world.get_by_name(name).expect("entity should exist");
    entity.position.expect("entity should have a position")
}

// ==================== Falling ====================

/// Velocity and position per tick of a body dropped into a deep shaft
#[test]
fn test_fall_sequence_until_landing() {
    let mut rows = vec!["..."; 10];
    rows.push("###");
    let scene = scene_with(
        &rows,
        vec![EntityTemplate::new(Vector::new(1, 0), Rect::from_size(1, 1)).with_name("rock")],
    );
    let mut world = scene.instantiate(None).unwrap();
    let (key, _) = world.get_by_name("rock").unwrap();

    let expected = [
        (1.0, 1, false),
        (1.56, 2, false),
        (2.12, 4, false),
        (2.0, 6, false),
        (2.0, 8, false),
        (0.0, 9, true),
        (0.0, 9, false),
    ];

    for (tick, (velocity, y, collided)) in expected.into_iter().enumerate() {
        world.update();
        let entity = world.get_entity(key).unwrap();
        let actual_velocity = entity.physical.unwrap().velocity.y;
        assert!(
            (actual_velocity - velocity).abs() < 1e-5,
            "tick {}: velocity {} != {}",
            tick,
            actual_velocity,
            velocity
        );
        assert_eq!(entity.position, Some(Vector::new(1, y)), "tick {}", tick);
        assert_eq!(world.collided_with_world(key), collided, "tick {}", tick);
    }
}

/// Scene physics constants flow into the world
#[test]
fn test_scene_physics_constants() {
    let mut rows = vec!["..."; 6];
    rows.push("###");
    let scene = scene_with(
        &rows,
        vec![EntityTemplate::new(Vector::new(1, 0), Rect::from_size(1, 1)).with_name("rock")],
    )
    .with_physics(PhysicsConfig::new(0.56, 2.0, 3.0));

    let mut world = scene.instantiate(None).unwrap();
    world.update();

    assert_eq!(position_of(&world, "rock"), Vector::new(1, 3));
}

// ==================== Walking ====================

/// A walker with stair stepping climbs a staircase; one without stops
#[test]
fn test_staircase() {
    let rows = [
        "......",
        "......",
        "...###",
        "..####",
        "######",
    ];
    let climber = EntityTemplate::new(Vector::new(0, 3), Rect::from_size(1, 1))
        .with_name("climber")
        .with_velocity(Vec2::new(1.0, 0.0))
        .with_stair_stepping(true);
    let walker = EntityTemplate::new(Vector::new(0, 3), Rect::from_size(1, 1))
        .with_name("walker")
        .with_velocity(Vec2::new(1.0, 0.0));

    let mut world = scene_with(&rows, vec![climber, walker]).instantiate(None).unwrap();
    for _ in 0..4 {
        world.update();
    }

    // (0,3) -> (1,3) -> (2,2) -> (3,1) -> (4,1)
    assert_eq!(position_of(&world, "climber"), Vector::new(4, 1));
    assert_eq!(position_of(&world, "walker"), Vector::new(1, 3));

    let (walker_key, _) = world.get_by_name("walker").unwrap();
    assert!(world.collided_with_world(walker_key));
}

/// Walking off a ledge starts a fall on the same tick
#[test]
fn test_walk_off_ledge() {
    let rows = [
        "....",
        "##..",
        "....",
        "####",
    ];
    let scene = scene_with(
        &rows,
        vec![EntityTemplate::new(Vector::new(1, 0), Rect::from_size(1, 1))
            .with_name("walker")
            .with_velocity(Vec2::new(1.0, 0.0))],
    );
    let mut world = scene.instantiate(None).unwrap();

    world.update();

    let (key, walker) = world.get_by_name("walker").unwrap();
    assert_eq!(walker.position, Some(Vector::new(2, 1)));
    assert_eq!(walker.physical.unwrap().velocity.y, 1.0);
    assert!(!world.collided_with_world(key));
}

/// One-way platforms hold bodies from above but not from below
#[test]
fn test_one_way_platform() {
    let rows = [
        "...",
        "...",
        "===",
        "...",
        "...",
    ];
    let faller = EntityTemplate::new(Vector::new(0, 0), Rect::from_size(1, 1)).with_name("faller");
    let jumper = EntityTemplate::new(Vector::new(2, 4), Rect::from_size(1, 1))
        .with_name("jumper")
        .with_velocity(Vec2::new(0.0, -2.0))
        .with_gravity(false);

    let mut world = scene_with(&rows, vec![faller, jumper]).instantiate(None).unwrap();
    world.update();
    world.update();

    assert_eq!(position_of(&world, "faller"), Vector::new(0, 1));
    // Passes up through the platform row unhindered
    assert_eq!(position_of(&world, "jumper"), Vector::new(2, 0));
}

// ==================== World bookkeeping ====================

/// Removing an entity mid-simulation leaves the rest untouched
#[test]
fn test_remove_during_simulation() {
    let rows = ["....", "....", "####"];
    let scene = scene_with(
        &rows,
        vec![
            EntityTemplate::new(Vector::new(0, 0), Rect::from_size(1, 1)).with_name("a"),
            EntityTemplate::new(Vector::new(3, 0), Rect::from_size(1, 1)).with_name("b"),
        ],
    );
    let mut world = scene.instantiate(None).unwrap();
    let (key_a, _) = world.get_by_name("a").unwrap();

    world.update();
    world.remove_entity(key_a);
    let stats = world.update();

    assert_eq!(stats.bodies, 1);
    assert!(world.get_by_name("a").is_none());
    assert_eq!(position_of(&world, "b"), Vector::new(3, 1));
}

/// Deactivated templates are loaded but frozen
#[test]
fn test_inactive_template() {
    let rows = ["...", "...", "###"];
    let scene = scene_with(
        &rows,
        vec![EntityTemplate::new(Vector::new(1, 0), Rect::from_size(1, 1))
            .with_name("statue")
            .with_active(false)],
    );
    let mut world = scene.instantiate(None).unwrap();

    let stats = world.update();

    assert_eq!(stats.bodies, 0);
    assert_eq!(position_of(&world, "statue"), Vector::new(1, 0));
}
