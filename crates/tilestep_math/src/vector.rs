//! 2D vector types
//!
//! [`Vector`] is the integer grid coordinate used for positions and displacements.
//! [`Vec2`] is the fractional counterpart used for velocities.

use serde::{Serialize, Deserialize};

/// Integer 2D vector on the tile grid
///
/// The y axis points down: increasing y moves toward the bottom of the map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vector {
    pub x: i32,
    pub y: i32,
}

impl Vector {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new Vector
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Saturating component-wise addition
    #[inline]
    pub fn saturating_add(self, other: Self) -> Self {
        Self::new(self.x.saturating_add(other.x), self.y.saturating_add(other.y))
    }
}

impl std::ops::Add for Vector {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::AddAssign for Vector {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl std::ops::Sub for Vector {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl std::ops::SubAssign for Vector {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl std::ops::Neg for Vector {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// Fractional 2D vector, used for per-tick velocities
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new Vec2
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Truncate both components toward zero
    ///
    /// Out-of-range values saturate at the `i32` limits and NaN becomes 0.
    #[inline]
    pub fn truncated(self) -> Vector {
        Vector::new(self.x as i32, self.y as i32)
    }
}
