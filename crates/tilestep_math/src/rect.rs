//! Axis-aligned integer rectangles

use serde::{Serialize, Deserialize};
use crate::Vector;

/// Width and height in grid units
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Create a new Size
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle on the tile grid
///
/// Edges are inclusive: a 1x1 rectangle at (3, 4) has `left == right == 3`
/// and `top == bottom == 4`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub top_left: Vector,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle from its top-left corner and size
    #[inline]
    pub const fn new(top_left: Vector, size: Size) -> Self {
        Self { top_left, size }
    }

    /// Rectangle anchored at the origin
    #[inline]
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(Vector::ZERO, Size::new(width, height))
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.top_left.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.top_left.x + self.size.width - 1
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.top_left.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.top_left.y + self.size.height - 1
    }

    /// Move the rectangle by a delta
    #[inline]
    pub fn translated(&self, delta: Vector) -> Self {
        Self::new(self.top_left + delta, self.size)
    }

    /// Check if two rectangles share at least one grid cell
    pub fn intersects(&self, other: &Self) -> bool {
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.top() <= other.bottom()
            && other.top() <= self.bottom()
    }
}

impl std::ops::Add<Vector> for Rect {
    type Output = Self;
    #[inline]
    fn add(self, delta: Vector) -> Self {
        self.translated(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_are_inclusive() {
        let r = Rect::new(Vector::new(2, 3), Size::new(4, 2));
        assert_eq!(r.left(), 2);
        assert_eq!(r.right(), 5);
        assert_eq!(r.top(), 3);
        assert_eq!(r.bottom(), 4);
    }

    #[test]
    fn test_unit_rect() {
        let r = Rect::new(Vector::new(7, 7), Size::new(1, 1));
        assert_eq!(r.left(), r.right());
        assert_eq!(r.top(), r.bottom());
    }

    #[test]
    fn test_translate_keeps_size() {
        let r = Rect::from_size(3, 5) + Vector::new(-1, 4);
        assert_eq!(r.top_left, Vector::new(-1, 4));
        assert_eq!(r.size, Size::new(3, 5));
    }

    #[test]
    fn test_intersects() {
        let a = Rect::new(Vector::new(0, 0), Size::new(2, 2));
        let b = Rect::new(Vector::new(1, 1), Size::new(2, 2));
        let c = Rect::new(Vector::new(2, 0), Size::new(1, 1));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }
}
