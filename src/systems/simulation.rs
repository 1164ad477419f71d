//! Fixed-tick simulation system
//!
//! Drives the world one physics tick at a time and keeps running totals.

use tilestep_core::World;

/// Result of a simulation update
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimulationResult {
    /// Tick number just completed (starting at 1)
    pub tick: u64,
    /// Bodies simulated this tick
    pub bodies: usize,
    /// Bodies that collided with the world this tick
    pub collisions: usize,
}

/// Manages the fixed-tick simulation loop
pub struct SimulationSystem {
    tick: u64,
    total_collisions: usize,
    trace_entities: bool,
}

impl SimulationSystem {
    /// Create a new simulation system
    pub fn new() -> Self {
        Self {
            tick: 0,
            total_collisions: 0,
            trace_entities: false,
        }
    }

    /// Log every entity's state after each tick
    pub fn with_entity_tracing(mut self, enabled: bool) -> Self {
        self.trace_entities = enabled;
        self
    }

    /// Number of ticks run so far
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Collisions counted across all ticks
    pub fn total_collisions(&self) -> usize {
        self.total_collisions
    }

    /// Run one simulation tick
    pub fn update(&mut self, world: &mut World) -> SimulationResult {
        let stats = world.update();
        self.tick += 1;
        self.total_collisions += stats.collisions;

        if self.trace_entities {
            self.log_entities(world);
        }

        SimulationResult {
            tick: self.tick,
            bodies: stats.bodies,
            collisions: stats.collisions,
        }
    }

    /// Run `ticks` simulation ticks, returning the result of each
    pub fn run(&mut self, world: &mut World, ticks: u32) -> Vec<SimulationResult> {
        (0..ticks).map(|_| self.update(world)).collect()
    }

    fn log_entities(&self, world: &World) {
        let bounds = world.collision_map().map(|map| map.bounds());
        for (key, entity) in world.iter() {
            let (Some(position), Some(physical)) = (entity.position, entity.physical) else {
                continue;
            };
            let label = entity.name.as_deref().unwrap_or("<unnamed>");
            log::info!(
                "tick {} {} {:?}: pos=({}, {}) vel=({}, {}) collided={}",
                self.tick,
                label,
                key,
                position.x,
                position.y,
                physical.velocity.x,
                physical.velocity.y,
                entity.collided_with_world()
            );

            let outside = match (bounds, entity.world_bounding_box()) {
                (Some(bounds), Some(bbox)) => !bounds.intersects(&bbox),
                _ => false,
            };
            if outside {
                log::warn!("tick {} {} {:?} is outside the map", self.tick, label, key);
            }
        }
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new()
    }
}
