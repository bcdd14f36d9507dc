//! # Oriented Positions
//!
//! [`Position`] is the spatial primitive every simulation subsystem builds
//! on: three public axes plus a facing angle that is kept in `[0, 2π)` by
//! every mutation method.
//!
//! [`RawPosition`] is the interop tier. All of its fields are public so it
//! can be bulk-initialized from tables or external data, and therefore its
//! orientation carries no guarantee. Convert it into a [`Position`] before
//! relying on the orientation invariant.
//!
//! ## Squared distances
//!
//! Range checks compare squared distances against squared thresholds so the
//! hot comparison path never takes a square root. The `exact_dist*` methods
//! take the root only when a caller needs the magnitude itself.
//!
//! ## Naming
//!
//! Methods taking another [`Position`] have the plain name
//! (`exact_dist_2d`), methods taking raw coordinates carry an axis suffix
//! (`exact_dist_2d_xy`).

use crate::angle::normalize_orientation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Planar distance under which a bearing is treated as undefined.
const COINCIDENT_EPSILON: f32 = 0.001;

/// Unchecked position data for bulk initialization and interop.
///
/// The orientation here may be any value. Callers must normalize before
/// relying on orientation invariants, which converting with
/// [`Position::from`] does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPosition {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
    /// Z coordinate (elevation)
    pub z: f32,
    /// Facing angle in radians, not necessarily normalized
    pub orientation: f32,
}

impl RawPosition {
    /// Creates raw position data without touching the orientation.
    pub const fn new(x: f32, y: f32, z: f32, orientation: f32) -> Self {
        Self {
            x,
            y,
            z,
            orientation,
        }
    }

    /// Whether the orientation already lies in `[0, 2π)`.
    pub fn is_normalized(&self) -> bool {
        normalize_orientation(self.orientation) == self.orientation
    }
}

/// A point in world space with a normalized facing angle.
///
/// Equality compares all four fields exactly, with no tolerance. Use
/// [`Position::same_spot`] to ignore orientation, or the range predicates
/// when a tolerance is wanted.
///
/// The type holds no synchronization of its own. An entity that shares a
/// position between threads must guard it, since multi-field reads are not
/// atomic.
///
/// # Examples
///
/// ```rust
/// use world_position::Position;
///
/// let here = Position::new(0.0, 0.0, 0.0, 0.0);
/// assert_eq!(here.exact_dist_2d_xy(3.0, 4.0), 5.0);
/// assert!(here.is_in_dist_2d_xy(3.0, 4.0, 5.1));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPosition", into = "RawPosition")]
pub struct Position {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
    /// Z coordinate (elevation)
    pub z: f32,
    orientation: f32,
}

impl From<RawPosition> for Position {
    fn from(raw: RawPosition) -> Self {
        Self::new(raw.x, raw.y, raw.z, raw.orientation)
    }
}

impl From<Position> for RawPosition {
    fn from(pos: Position) -> Self {
        pos.to_raw()
    }
}

impl Position {
    /// Creates a position, normalizing the orientation.
    pub fn new(x: f32, y: f32, z: f32, orientation: f32) -> Self {
        Self {
            x,
            y,
            z,
            orientation: normalize_orientation(orientation),
        }
    }

    /// Creates a position on the ground plane (`z = 0`) facing along +x.
    pub const fn from_xy(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            orientation: 0.0,
        }
    }

    /// Creates a position facing along +x.
    pub const fn from_xyz(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            orientation: 0.0,
        }
    }

    /// Exports the fields into the unchecked interop struct.
    pub const fn to_raw(&self) -> RawPosition {
        RawPosition::new(self.x, self.y, self.z, self.orientation)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Facing angle in `[0, 2π)`.
    pub const fn orientation(&self) -> f32 {
        self.orientation
    }

    /// Sets the facing angle, normalizing it.
    pub fn set_orientation(&mut self, orientation: f32) {
        self.orientation = normalize_orientation(orientation);
    }

    /// Planar coordinates.
    pub const fn xy(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Spatial coordinates.
    pub const fn xyz(&self) -> (f32, f32, f32) {
        (self.x, self.y, self.z)
    }

    /// All four fields, orientation last.
    pub const fn xyzo(&self) -> (f32, f32, f32, f32) {
        (self.x, self.y, self.z, self.orientation)
    }

    /// Compares x, y and z exactly, ignoring orientation.
    pub fn same_spot(&self, other: &Position) -> bool {
        self.x == other.x && self.y == other.y && self.z == other.z
    }

    // ========================================================================
    // Relocation
    // ========================================================================

    /// Moves on the plane, keeping z and orientation.
    pub fn relocate_xy(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Moves in space, keeping orientation.
    pub fn relocate_xyz(&mut self, x: f32, y: f32, z: f32) {
        self.x = x;
        self.y = y;
        self.z = z;
    }

    /// Moves and turns.
    pub fn relocate(&mut self, x: f32, y: f32, z: f32, orientation: f32) {
        self.relocate_xyz(x, y, z);
        self.set_orientation(orientation);
    }

    /// Copies every field of `other`.
    pub fn relocate_from(&mut self, other: &Position) {
        self.relocate(other.x, other.y, other.z, other.orientation);
    }

    /// Translates by `offset` component-wise, orientation included.
    ///
    /// This is the inverse of [`Position::position_offset_to`].
    pub fn relocate_offset(&mut self, offset: &Position) {
        self.relocate(
            self.x + offset.x,
            self.y + offset.y,
            self.z + offset.z,
            self.orientation + offset.orientation,
        );
    }

    /// Translates by an offset expressed in this position's facing frame.
    ///
    /// `offset.x` points forward along the current orientation and
    /// `offset.y` to its left. Elevation and orientation are added as is.
    /// This is the inverse of [`Position::local_offset_to`].
    pub fn relocate_local_offset(&mut self, offset: &Position) {
        let (sin, cos) = self.orientation.sin_cos();
        self.relocate(
            self.x + offset.x * cos - offset.y * sin,
            self.y + offset.x * sin + offset.y * cos,
            self.z + offset.z,
            self.orientation + offset.orientation,
        );
    }

    /// Moves `distance` along `orientation + angle` and raises by `z_offset`.
    ///
    /// The orientation itself is unchanged.
    pub fn relocate_offset_polar(&mut self, angle: f32, distance: f32, z_offset: f32) {
        let (sin, cos) = (self.orientation + angle).sin_cos();
        self.relocate_xyz(
            self.x + distance * cos,
            self.y + distance * sin,
            self.z + z_offset,
        );
    }

    /// World-frame offset that [`Position::relocate_offset`] needs to reach `end`.
    pub fn position_offset_to(&self, end: &Position) -> Position {
        Position::new(
            end.x - self.x,
            end.y - self.y,
            end.z - self.z,
            end.orientation - self.orientation,
        )
    }

    /// Facing-frame offset that [`Position::relocate_local_offset`] needs to reach `end`.
    pub fn local_offset_to(&self, end: &Position) -> Position {
        let dx = end.x - self.x;
        let dy = end.y - self.y;
        let (sin, cos) = self.orientation.sin_cos();
        Position::new(
            dx * cos + dy * sin,
            dy * cos - dx * sin,
            end.z - self.z,
            end.orientation - self.orientation,
        )
    }

    // ========================================================================
    // Distances
    // ========================================================================

    /// Squared planar distance to `(x, y)`.
    pub fn exact_dist_2d_sq_xy(&self, x: f32, y: f32) -> f32 {
        let dx = x - self.x;
        let dy = y - self.y;
        dx * dx + dy * dy
    }

    /// Squared planar distance to `other`.
    pub fn exact_dist_2d_sq(&self, other: &Position) -> f32 {
        self.exact_dist_2d_sq_xy(other.x, other.y)
    }

    /// Planar distance to `(x, y)`.
    pub fn exact_dist_2d_xy(&self, x: f32, y: f32) -> f32 {
        self.exact_dist_2d_sq_xy(x, y).sqrt()
    }

    /// Planar distance to `other`.
    pub fn exact_dist_2d(&self, other: &Position) -> f32 {
        self.exact_dist_2d_xy(other.x, other.y)
    }

    /// Squared 3D distance to `(x, y, z)`.
    pub fn exact_dist_sq_xyz(&self, x: f32, y: f32, z: f32) -> f32 {
        let dz = z - self.z;
        self.exact_dist_2d_sq_xy(x, y) + dz * dz
    }

    /// Squared 3D distance to `other`.
    pub fn exact_dist_sq(&self, other: &Position) -> f32 {
        self.exact_dist_sq_xyz(other.x, other.y, other.z)
    }

    /// 3D distance to `(x, y, z)`.
    pub fn exact_dist_xyz(&self, x: f32, y: f32, z: f32) -> f32 {
        self.exact_dist_sq_xyz(x, y, z).sqrt()
    }

    /// 3D distance to `other`.
    pub fn exact_dist(&self, other: &Position) -> f32 {
        self.exact_dist_xyz(other.x, other.y, other.z)
    }

    /// Strict planar range test on squared distances: `dist_2d_sq < dist * dist`.
    ///
    /// Both sides are rounded `f32` values. When `dist` is itself the rounded
    /// [`Position::exact_dist_2d_xy`] of the same point, the squared form may
    /// still report the point in range. Any disagreement with
    /// `exact_dist_2d_xy(x, y) < dist` happens only at that one-ulp boundary.
    pub fn is_in_dist_2d_xy(&self, x: f32, y: f32, dist: f32) -> bool {
        self.exact_dist_2d_sq_xy(x, y) < dist * dist
    }

    /// Strict planar range test against `other`; see [`Position::is_in_dist_2d_xy`].
    pub fn is_in_dist_2d(&self, other: &Position, dist: f32) -> bool {
        self.exact_dist_2d_sq(other) < dist * dist
    }

    /// Strict 3D range test on squared distances: `dist_3d_sq < dist * dist`.
    ///
    /// Shares the rounding caveat of [`Position::is_in_dist_2d_xy`] when
    /// `dist` equals the rounded [`Position::exact_dist_xyz`].
    pub fn is_in_dist_xyz(&self, x: f32, y: f32, z: f32, dist: f32) -> bool {
        self.exact_dist_sq_xyz(x, y, z) < dist * dist
    }

    /// Strict 3D range test against `other`; see [`Position::is_in_dist_xyz`].
    pub fn is_in_dist(&self, other: &Position, dist: f32) -> bool {
        self.exact_dist_sq(other) < dist * dist
    }

    // ========================================================================
    // Angles
    // ========================================================================

    /// World-frame bearing to `(x, y)` in `[0, 2π)`.
    pub fn absolute_angle_xy(&self, x: f32, y: f32) -> f32 {
        let dx = x - self.x;
        let dy = y - self.y;
        normalize_orientation(dy.atan2(dx))
    }

    /// World-frame bearing to `other` in `[0, 2π)`.
    pub fn absolute_angle(&self, other: &Position) -> f32 {
        self.absolute_angle_xy(other.x, other.y)
    }

    /// Turns an angle relative to the current facing into a world-frame angle.
    pub fn to_absolute_angle(&self, relative: f32) -> f32 {
        normalize_orientation(relative + self.orientation)
    }

    /// Bearing to `(x, y)`; same value as [`Position::absolute_angle_xy`].
    pub fn angle_xy(&self, x: f32, y: f32) -> f32 {
        self.absolute_angle_xy(x, y)
    }

    /// Bearing to `other`.
    pub fn angle(&self, other: &Position) -> f32 {
        self.angle_xy(other.x, other.y)
    }

    /// Bearing to `(x, y)` minus the current orientation.
    ///
    /// The result lies in `(-2π, 2π)` and is not normalized; pass it through
    /// [`crate::normalize_orientation`] or [`crate::normalize_pitch`] as needed.
    pub fn relative_angle_xy(&self, x: f32, y: f32) -> f32 {
        self.angle_xy(x, y) - self.orientation
    }

    /// Bearing to `other` minus the current orientation, not normalized.
    pub fn relative_angle(&self, other: &Position) -> f32 {
        self.relative_angle_xy(other.x, other.y)
    }

    /// Sine and cosine of the bearing to `(x, y)`, without an `atan2`.
    ///
    /// Returns `(sin, cos)`. When the target sits on this position the
    /// bearing is undefined and the current facing is used instead.
    pub fn sin_cos_xy(&self, x: f32, y: f32) -> (f32, f32) {
        let dx = x - self.x;
        let dy = y - self.y;

        if dx.abs() < COINCIDENT_EPSILON && dy.abs() < COINCIDENT_EPSILON {
            return self.orientation.sin_cos();
        }

        let dist = (dx * dx + dy * dy).sqrt();
        (dy / dist, dx / dist)
    }

    /// Sine and cosine of the bearing to `other`.
    pub fn sin_cos(&self, other: &Position) -> (f32, f32) {
        self.sin_cos_xy(other.x, other.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X: {:.6} Y: {:.6} Z: {:.6} O: {:.6}",
            self.x, self.y, self.z, self.orientation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::{PI, TAU};

    const EPSILON: f32 = 1e-4;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_default_is_origin() {
        let pos = Position::default();
        assert_eq!(pos.xyzo(), (0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_new_normalizes_orientation() {
        let pos = Position::new(1.0, 2.0, 3.0, -0.5);
        assert!(approx(pos.orientation(), TAU - 0.5));
        assert_eq!(pos.xyz(), (1.0, 2.0, 3.0));
    }

    #[test]
    fn test_short_constructors() {
        assert_eq!(Position::from_xy(1.0, 2.0).xyzo(), (1.0, 2.0, 0.0, 0.0));
        assert_eq!(Position::from_xyz(1.0, 2.0, 3.0).xyzo(), (1.0, 2.0, 3.0, 0.0));
    }

    #[test]
    fn test_raw_conversion_normalizes() {
        let raw = RawPosition::new(1.0, 2.0, 3.0, 7.0);
        assert!(!raw.is_normalized());

        let pos = Position::from(raw);
        assert!(approx(pos.orientation(), 7.0 - TAU));
        assert!(pos.to_raw().is_normalized());
    }

    #[test]
    fn test_relocate_overloads_keep_untouched_fields() {
        let mut pos = Position::new(1.0, 2.0, 3.0, 1.5);

        pos.relocate_xy(10.0, 20.0);
        assert_eq!(pos.xyzo(), (10.0, 20.0, 3.0, 1.5));

        pos.relocate_xyz(4.0, 5.0, 6.0);
        assert_eq!(pos.xyzo(), (4.0, 5.0, 6.0, 1.5));

        pos.relocate(7.0, 8.0, 9.0, -1.0);
        assert_eq!(pos.xyz(), (7.0, 8.0, 9.0));
        assert!(approx(pos.orientation(), TAU - 1.0));
    }

    #[test]
    fn test_relocate_from_copies_everything() {
        let source = Position::new(3.0, 4.0, 5.0, 2.0);
        let mut pos = Position::default();
        pos.relocate_from(&source);
        assert_eq!(pos, source);
    }

    #[test]
    fn test_relocate_offset_adds_and_renormalizes() {
        let mut pos = Position::new(1.0, 1.0, 1.0, 6.0);
        pos.relocate_offset(&Position::new(2.0, -1.0, 0.5, 1.0));
        assert_eq!(pos.xyz(), (3.0, 0.0, 1.5));
        assert!(approx(pos.orientation(), 7.0 - TAU));
    }

    #[test]
    fn test_position_offset_to_inverts_relocate_offset() {
        let start = Position::new(10.0, -4.0, 2.0, 5.5);
        let end = Position::new(-3.0, 8.0, 6.0, 0.5);

        let offset = start.position_offset_to(&end);
        let mut moved = start;
        moved.relocate_offset(&offset);

        assert!(approx(moved.x, end.x));
        assert!(approx(moved.y, end.y));
        assert!(approx(moved.z, end.z));
        assert!(approx(moved.orientation(), end.orientation()));
    }

    #[test]
    fn test_local_offset_moves_in_facing_frame() {
        // Facing +y: one unit forward is +y, one unit left is -x.
        let mut pos = Position::new(0.0, 0.0, 0.0, PI / 2.0);
        pos.relocate_local_offset(&Position::from_xyz(1.0, 1.0, 2.0));
        assert!(approx(pos.x, -1.0));
        assert!(approx(pos.y, 1.0));
        assert!(approx(pos.z, 2.0));
    }

    #[test]
    fn test_local_offset_to_inverts_relocate_local_offset() {
        let start = Position::new(5.0, 5.0, 0.0, 2.3);
        let end = Position::new(-7.0, 12.0, 3.0, 4.1);

        let offset = start.local_offset_to(&end);
        let mut moved = start;
        moved.relocate_local_offset(&offset);

        assert!(approx(moved.x, end.x));
        assert!(approx(moved.y, end.y));
        assert!(approx(moved.z, end.z));
        assert!(approx(moved.orientation(), end.orientation()));
    }

    #[test]
    fn test_polar_offset_relative_to_facing() {
        let mut pos = Position::new(1.0, 1.0, 0.0, PI / 2.0);
        pos.relocate_offset_polar(PI / 2.0, 2.0, 0.5);
        // Facing +y, turned a further quarter: moving along -x.
        assert!(approx(pos.x, -1.0));
        assert!(approx(pos.y, 1.0));
        assert!(approx(pos.z, 0.5));
        assert!(approx(pos.orientation(), PI / 2.0));
    }

    #[test]
    fn test_distances() {
        let pos = Position::default();
        assert_eq!(pos.exact_dist_2d_xy(3.0, 4.0), 5.0);
        assert_eq!(pos.exact_dist_2d_sq_xy(3.0, 4.0), 25.0);
        assert_eq!(pos.exact_dist_sq_xyz(3.0, 4.0, 12.0), 169.0);
        assert_eq!(pos.exact_dist_xyz(3.0, 4.0, 12.0), 13.0);

        let other = Position::from_xyz(3.0, 4.0, 12.0);
        assert_eq!(pos.exact_dist_2d(&other), 5.0);
        assert_eq!(pos.exact_dist(&other), 13.0);
    }

    #[test]
    fn test_distance_symmetry() {
        let a = Position::new(-12.5, 3.25, 7.0, 1.0);
        let b = Position::new(40.0, -9.75, -2.0, 3.0);
        assert_eq!(a.exact_dist_2d(&b), b.exact_dist_2d(&a));
        assert_eq!(a.exact_dist(&b), b.exact_dist(&a));
        assert!(a.exact_dist_2d_sq(&b) >= 0.0);
    }

    #[test]
    fn test_in_dist_is_strict() {
        let pos = Position::default();
        assert!(!pos.is_in_dist_2d_xy(3.0, 4.0, 5.0));
        assert!(pos.is_in_dist_2d_xy(3.0, 4.0, 5.001));
        assert!(!pos.is_in_dist_xyz(3.0, 4.0, 12.0, 13.0));
        assert!(pos.is_in_dist_xyz(3.0, 4.0, 12.0, 13.001));

        let target = Position::from_xyz(3.0, 4.0, 12.0);
        assert!(pos.is_in_dist_2d(&target, 5.5));
        assert!(!pos.is_in_dist(&target, 5.5));
    }

    #[test]
    fn test_absolute_angle() {
        let pos = Position::default();
        assert!(approx(pos.absolute_angle_xy(3.0, 4.0), 0.927_295_2));
        assert!(approx(pos.absolute_angle_xy(0.0, -1.0), 3.0 * PI / 2.0));
        assert!(approx(pos.angle_xy(-1.0, 0.0), PI));
    }

    #[test]
    fn test_to_absolute_angle() {
        let pos = Position::new(0.0, 0.0, 0.0, 6.0);
        assert!(approx(pos.to_absolute_angle(1.0), 7.0 - TAU));
    }

    #[test]
    fn test_relative_angle_not_normalized() {
        let pos = Position::new(0.0, 0.0, 0.0, 3.0 * PI / 2.0);
        // Target straight ahead along +x: bearing 0, facing 3π/2.
        assert!(approx(pos.relative_angle_xy(1.0, 0.0), -3.0 * PI / 2.0));
    }

    #[test]
    fn test_sin_cos_matches_bearing() {
        let pos = Position::new(1.0, 1.0, 0.0, 0.0);
        let (sin, cos) = pos.sin_cos_xy(4.0, 5.0);
        assert!(approx(sin, 0.8));
        assert!(approx(cos, 0.6));
    }

    #[test]
    fn test_sin_cos_coincident_uses_facing() {
        let pos = Position::new(1.0, 1.0, 0.0, PI / 2.0);
        let (sin, cos) = pos.sin_cos(&Position::from_xy(1.0, 1.0));
        assert!(approx(sin, 1.0));
        assert!(approx(cos, 0.0));
    }

    #[test]
    fn test_equality_includes_orientation() {
        let a = Position::new(1.0, 2.0, 3.0, 0.5);
        let b = Position::new(1.0, 2.0, 3.0, 1.5);
        assert_ne!(a, b);
        assert!(a.same_spot(&b));
        assert_eq!(a, Position::new(1.0, 2.0, 3.0, 0.5));
    }

    #[test]
    fn test_equality_is_exact() {
        let a = Position::from_xyz(1.0, 2.0, 3.0);
        let b = Position::from_xyz(1.0, 2.0, 3.000_001);
        assert_ne!(a, b);
        assert!(!a.same_spot(&b));
    }

    #[test]
    fn test_display() {
        let pos = Position::new(1.0, 2.5, -3.0, 0.25);
        assert_eq!(
            pos.to_string(),
            "X: 1.000000 Y: 2.500000 Z: -3.000000 O: 0.250000"
        );
    }
}
