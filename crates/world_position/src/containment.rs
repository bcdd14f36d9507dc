//! # Spatial Containment
//!
//! Predicates answering "is that point inside this shape" for the shapes
//! gameplay code tests against: oriented boxes, vertical cylinders, facing
//! arcs and forward lines. All of them are pure reads of the receiver.
//!
//! ## Conventions
//!
//! - Box extents are half extents measured from the origin, inclusive.
//! - Cylinder height is inclusive; single cylinders extend only above their
//!   origin, double cylinders extend the same height above and below.
//! - Cylinder radius uses the strict planar range test.
//! - Arc borders are inclusive. The `border` argument divides the arc, so the
//!   default of `2.0` accepts targets within `arc / 2` of the facing.

use crate::angle::{normalize_pitch, PI, TAU};
use crate::bounds::{MapBounds, WorldBounds};
use crate::position::Position;

/// Default arc divisor for [`Position::has_in_arc`].
pub const DEFAULT_ARC_BORDER: f32 = 2.0;

/// Something in the world with a location and a physical extent.
///
/// Used by line tests that have to account for how wide the target is.
pub trait WorldObject {
    /// Where the object is.
    fn position(&self) -> &Position;

    /// Radius of the object around its position.
    fn object_size(&self) -> f32;
}

/// A bare position is a point with no extent.
impl WorldObject for Position {
    fn position(&self) -> &Position {
        self
    }

    fn object_size(&self) -> f32 {
        0.0
    }
}

impl Position {
    /// Whether this point lies inside a box centred on `origin` and rotated
    /// by the origin's orientation.
    ///
    /// `length` is the half extent along the origin's facing, `width` the
    /// half extent across it and `height` the half extent on z.
    pub fn is_within_box(&self, origin: &Position, length: f32, width: f32, height: f32) -> bool {
        // Rotate this point into the box frame instead of rotating the box.
        let (sin, cos) = origin.orientation().sin_cos();
        let dx = self.x - origin.x;
        let dy = self.y - origin.y;

        let along = dx * cos + dy * sin;
        let across = dy * cos - dx * sin;
        let dz = self.z - origin.z;

        along.abs() <= length && across.abs() <= width && dz.abs() <= height
    }

    /// Whether this point lies inside a vertical cylinder standing on `origin`.
    ///
    /// With `double_vertical` the cylinder reaches `height` below the origin
    /// as well as above it.
    pub fn is_within_vertical_cylinder(
        &self,
        origin: &Position,
        radius: f32,
        height: f32,
        double_vertical: bool,
    ) -> bool {
        let dz = self.z - origin.z;
        let in_height = if double_vertical {
            dz.abs() <= height
        } else {
            (0.0..=height).contains(&dz)
        };

        in_height && self.is_in_dist_2d(origin, radius)
    }

    /// Whether `target` lies within the facing arc, using the default border.
    pub fn has_in_arc(&self, arc: f32, target: &Position) -> bool {
        self.has_in_arc_with_border(arc, target, DEFAULT_ARC_BORDER)
    }

    /// Whether `target` lies within `arc / border` radians either side of
    /// the current facing.
    ///
    /// A target on the same planar spot is always inside. The arc is clamped
    /// to a full circle.
    pub fn has_in_arc_with_border(&self, arc: f32, target: &Position, border: f32) -> bool {
        if self.x == target.x && self.y == target.y {
            return true;
        }

        let arc = arc.clamp(0.0, TAU);
        let angle = normalize_pitch(self.relative_angle(target));
        let half = arc / border;

        angle >= -half && angle <= half
    }

    /// Whether `target` sits in front of this position and across a line no
    /// wider than `width` plus the target's own size.
    pub fn has_in_line<T: WorldObject + ?Sized>(&self, target: &T, width: f32) -> bool {
        let pos = target.position();
        if !self.has_in_arc(PI, pos) {
            return false;
        }

        let width = width + target.object_size();
        let angle = self.relative_angle(pos);
        angle.sin().abs() * self.exact_dist_2d(pos) < width
    }

    /// Whether every field is finite and inside the default map grid.
    pub fn is_position_valid(&self) -> bool {
        self.is_position_valid_in(&MapBounds::default())
    }

    /// Whether `bounds` accepts this position.
    pub fn is_position_valid_in<B: WorldBounds + ?Sized>(&self, bounds: &B) -> bool {
        bounds.is_valid_coord(self.x, self.y, self.z, self.orientation())
    }
}
