//! Per-tick motion resolution
//!
//! [`PhysicsSystem`] moves every active body by its velocity, one grid unit at
//! a time, against a [`CollisionOracle`]. Each tick runs three sub-steps in a
//! fixed order:
//!
//! 1. Horizontal movement (optionally climbing one-unit steps)
//! 2. Gravity, evaluated at the post-horizontal position
//! 3. Vertical movement
//!
//! Gravity runs after horizontal movement so that walking off a ledge starts
//! the fall in the same tick. It runs before vertical movement so that the new
//! velocity already drives this tick's vertical displacement.

use serde::{Serialize, Deserialize};
use tilestep_math::Vector;

use crate::body::{to_world_space, BoundingBox, EntityTags, PhysicsBody, WorldPosition};
use crate::collision::CollisionOracle;

/// Tuning constants for gravity
///
/// The defaults are the gameplay constants: fall at 1.0, accelerate by 0.56,
/// settle at 2.0.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Added to a non-zero vertical velocity each tick while below terminal velocity
    pub gravity_acceleration: f32,
    /// Velocity that falling bodies are clamped to
    pub terminal_velocity: f32,
    /// Velocity given to a body that starts falling, either because it lost
    /// its footing or because it hit a ceiling while rising
    pub fall_start_velocity: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity_acceleration: 0.56,
            terminal_velocity: 2.0,
            fall_start_velocity: 1.0,
        }
    }
}

impl PhysicsConfig {
    /// Create a physics config with custom constants
    pub fn new(gravity_acceleration: f32, terminal_velocity: f32, fall_start_velocity: f32) -> Self {
        Self {
            gravity_acceleration,
            terminal_velocity,
            fall_start_velocity,
        }
    }
}

/// Summary of one [`PhysicsSystem::update`] call
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Active bodies that were resolved
    pub bodies: usize,
    /// Bodies whose movement was cut short by world geometry
    pub collisions: usize,
}

/// Resolves entity movement against static world geometry
pub struct PhysicsSystem<'a, O: CollisionOracle + ?Sized> {
    oracle: &'a O,
    /// Gravity constants
    pub config: PhysicsConfig,
}

impl<'a, O: CollisionOracle + ?Sized> PhysicsSystem<'a, O> {
    /// Create a physics system with default constants
    pub fn new(oracle: &'a O) -> Self {
        Self::with_config(oracle, PhysicsConfig::default())
    }

    /// Create a physics system with custom constants
    pub fn with_config(oracle: &'a O, config: PhysicsConfig) -> Self {
        Self { oracle, config }
    }

    /// Advance every active body by one tick
    ///
    /// Bodies without the `ACTIVE` tag are skipped entirely: they neither
    /// move nor have their collision tag touched.
    pub fn update<'b, I>(&self, bodies: I) -> StepStats
    where
        I: IntoIterator<Item = PhysicsBody<'b>>,
    {
        let mut stats = StepStats::default();

        for body in bodies {
            if !body.is_active() {
                continue;
            }

            stats.bodies += 1;
            if self.update_body(body) {
                stats.collisions += 1;
            }
        }

        log::debug!(
            "Physics step: {} bodies, {} world collisions",
            stats.bodies,
            stats.collisions
        );
        stats
    }

    /// Advance a single body by one tick
    ///
    /// Returns whether the body collided with the world, which is also
    /// written to its `COLLIDED_WITH_WORLD` tag.
    pub fn update_body(&self, body: PhysicsBody<'_>) -> bool {
        let PhysicsBody { physical, position, bounding_box, tags } = body;
        let original_position = *position;

        let movement_x = physical.velocity.truncated().x;
        if movement_x != 0 {
            *position = self.apply_horizontal_movement(
                &to_world_space(bounding_box, *position),
                *position,
                movement_x,
                physical.can_step_up_stairs,
            );
        }

        // Gravity and vertical movement both see the post-horizontal footing
        let bbox = to_world_space(bounding_box, *position);

        if physical.gravity_affected {
            physical.velocity.y = self.apply_gravity(&bbox, physical.velocity.y);
        }

        let movement_y = physical.velocity.truncated().y;
        if movement_y != 0 {
            let (new_position, new_velocity) = self.apply_vertical_movement(
                &bbox,
                *position,
                physical.velocity.y,
                movement_y,
                physical.gravity_affected,
            );
            *position = new_position;
            physical.velocity.y = new_velocity;
        }

        let requested = original_position.saturating_add(Vector::new(movement_x, movement_y));
        let collision_occurred = *position != requested;
        tags.set(EntityTags::COLLIDED_WITH_WORLD, collision_occurred);
        collision_occurred
    }

    fn is_touching_wall(&self, bbox: &BoundingBox, moving_right: bool) -> bool {
        if moving_right {
            self.oracle.is_touching_right_wall(bbox)
        } else {
            self.oracle.is_touching_left_wall(bbox)
        }
    }

    /// Whether a box blocked by a wall can climb one unit and keep going
    fn can_step_up(&self, bbox: &BoundingBox, step: Vector, moving_right: bool) -> bool {
        let raised = bbox.translated(Vector::new(0, -1));
        !self.is_touching_wall(&raised, moving_right)
            && self.oracle.is_on_solid_ground(&raised.translated(step))
    }

    /// Move up to `|movement_x|` units horizontally, stopping at the first wall
    ///
    /// With `allow_stair_stepping`, a wall that is exactly one unit high and
    /// has footing on top is climbed diagonally instead of stopping.
    pub fn apply_horizontal_movement(
        &self,
        bbox: &BoundingBox,
        current_position: WorldPosition,
        movement_x: i32,
        allow_stair_stepping: bool,
    ) -> WorldPosition {
        let moving_right = movement_x > 0;
        let step = Vector::new(if moving_right { 1 } else { -1 }, 0);

        let mut new_position = current_position;
        let mut moving_bbox = *bbox;
        for _ in 0..movement_x.unsigned_abs() {
            if self.is_touching_wall(&moving_bbox, moving_right) {
                if allow_stair_stepping && self.can_step_up(&moving_bbox, step, moving_right) {
                    let diagonal = step + Vector::new(0, -1);
                    moving_bbox = moving_bbox.translated(diagonal);
                    new_position += diagonal;
                    log::trace!("Stepped up to {:?}", new_position);
                    continue;
                }

                log::trace!("Horizontal movement blocked at {:?}", new_position);
                break;
            }

            moving_bbox = moving_bbox.translated(step);
            new_position += step;
        }

        new_position
    }

    /// Compute the vertical velocity for this tick
    pub fn apply_gravity(&self, bbox: &BoundingBox, current_velocity: f32) -> f32 {
        if current_velocity == 0.0 {
            if self.oracle.is_on_solid_ground(bbox) {
                return current_velocity;
            }

            // Lost footing
            return self.config.fall_start_velocity;
        }

        if current_velocity < self.config.terminal_velocity {
            current_velocity + self.config.gravity_acceleration
        } else {
            self.config.terminal_velocity
        }
    }

    /// Move up to `|movement_y|` units vertically (down when positive)
    ///
    /// Returns the new position and the new vertical velocity. Landing on the
    /// ground resets the velocity to zero. Hitting a ceiling resets it to zero,
    /// or starts the fall right away when `begin_falling_on_hitting_ceiling`
    /// is set. Without contact the velocity is returned unchanged.
    pub fn apply_vertical_movement(
        &self,
        bbox: &BoundingBox,
        current_position: WorldPosition,
        current_velocity: f32,
        movement_y: i32,
        begin_falling_on_hitting_ceiling: bool,
    ) -> (WorldPosition, f32) {
        let moving_down = movement_y > 0;
        let step = Vector::new(0, if moving_down { 1 } else { -1 });

        let mut new_position = current_position;
        let mut moving_bbox = *bbox;
        for _ in 0..movement_y.unsigned_abs() {
            let is_touching = if moving_down {
                self.oracle.is_on_solid_ground(&moving_bbox)
            } else {
                self.oracle.is_touching_ceiling(&moving_bbox)
            };

            if is_touching {
                log::trace!(
                    "Vertical contact at {:?} ({})",
                    new_position,
                    if moving_down { "ground" } else { "ceiling" }
                );

                if moving_down || !begin_falling_on_hitting_ceiling {
                    return (new_position, 0.0);
                }
                return (new_position, self.config.fall_start_velocity);
            }

            moving_bbox = moving_bbox.translated(step);
            new_position += step;
        }

        (new_position, current_velocity)
    }
}
