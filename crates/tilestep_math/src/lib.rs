//! 2D grid mathematics
//!
//! This crate provides the integer and fractional vector types and the
//! rectangle type used by the tilestep engine.
//!
//! ## Core Types
//!
//! - [`Vector`] - Integer grid coordinate
//! - [`Vec2`] - Fractional 2D vector (velocities)
//! - [`Size`] - Width and height in grid units
//! - [`Rect`] - Axis-aligned rectangle with inclusive edges

mod vector;
pub mod rect;

pub use vector::{Vector, Vec2};
pub use rect::{Rect, Size};
