//! Collision queries against static world geometry
//!
//! The motion resolver never inspects geometry directly. It asks a
//! [`CollisionOracle`] whether a world-space box is in contact with a wall,
//! a ceiling or the ground.

use bitflags::bitflags;

use crate::body::BoundingBox;

bitflags! {
    /// Which edges of a tile block movement
    ///
    /// A tile with only `TOP` set is a one-way platform: entities can stand on
    /// it but pass through from below and from the sides.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SolidEdges: u8 {
        /// Blocks entities standing on the tile
        const TOP = 1 << 0;
        /// Blocks entities moving up into the tile
        const BOTTOM = 1 << 1;
        /// Blocks entities moving right into the tile
        const LEFT = 1 << 2;
        /// Blocks entities moving left into the tile
        const RIGHT = 1 << 3;
        /// Solid on every side
        const FULL = Self::TOP.bits() | Self::BOTTOM.bits() | Self::LEFT.bits() | Self::RIGHT.bits();
    }
}

/// Read-only contact queries against static world geometry
///
/// Every query takes a box in world space and looks at the cells directly
/// adjacent to it on one side. A box is "touching" a wall when the next step
/// in that direction would be blocked.
pub trait CollisionOracle {
    /// Something solid directly left of the box
    fn is_touching_left_wall(&self, bbox: &BoundingBox) -> bool;

    /// Something solid directly right of the box
    fn is_touching_right_wall(&self, bbox: &BoundingBox) -> bool;

    /// Something solid directly above the box
    fn is_touching_ceiling(&self, bbox: &BoundingBox) -> bool;

    /// Something solid directly below the box
    fn is_on_solid_ground(&self, bbox: &BoundingBox) -> bool;
}

impl<T: CollisionOracle + ?Sized> CollisionOracle for &T {
    fn is_touching_left_wall(&self, bbox: &BoundingBox) -> bool {
        (**self).is_touching_left_wall(bbox)
    }

    fn is_touching_right_wall(&self, bbox: &BoundingBox) -> bool {
        (**self).is_touching_right_wall(bbox)
    }

    fn is_touching_ceiling(&self, bbox: &BoundingBox) -> bool {
        (**self).is_touching_ceiling(bbox)
    }

    fn is_on_solid_ground(&self, bbox: &BoundingBox) -> bool {
        (**self).is_on_solid_ground(bbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_contains_every_edge() {
        assert!(SolidEdges::FULL.contains(SolidEdges::TOP));
        assert!(SolidEdges::FULL.contains(SolidEdges::BOTTOM));
        assert!(SolidEdges::FULL.contains(SolidEdges::LEFT));
        assert!(SolidEdges::FULL.contains(SolidEdges::RIGHT));
    }

    #[test]
    fn test_default_is_open() {
        assert!(SolidEdges::default().is_empty());
    }

    struct Floor;

    impl CollisionOracle for Floor {
        fn is_touching_left_wall(&self, _bbox: &BoundingBox) -> bool {
            false
        }
        fn is_touching_right_wall(&self, _bbox: &BoundingBox) -> bool {
            false
        }
        fn is_touching_ceiling(&self, _bbox: &BoundingBox) -> bool {
            false
        }
        fn is_on_solid_ground(&self, bbox: &BoundingBox) -> bool {
            bbox.bottom() >= 0
        }
    }

    fn grounded<O: CollisionOracle>(oracle: O, bbox: &BoundingBox) -> bool {
        oracle.is_on_solid_ground(bbox)
    }

    #[test]
    fn test_reference_forwards_queries() {
        let floor = Floor;
        let by_ref: &dyn CollisionOracle = &floor;
        assert!(grounded(by_ref, &BoundingBox::from_size(1, 1)));
        assert!(grounded(&floor, &BoundingBox::from_size(1, 1)));
        assert!(!grounded(&floor, &(BoundingBox::from_size(1, 1) + tilestep_math::Vector::new(0, -5))));
    }
}
