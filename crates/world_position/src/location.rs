//! # Map-Qualified Positions
//!
//! A [`Position`] only means something inside a particular world instance.
//! [`WorldLocation`] pairs one with the [`MapId`] of the map it belongs to.
//! The position is held by composition; use [`WorldLocation::position`] or
//! the public field to run geometric queries on it.

use crate::containment::WorldObject;
use crate::position::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a map or world instance.
///
/// [`MapId::INVALID`] (all bits set) means "no map".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapId(pub u32);

impl MapId {
    /// Sentinel for a location that belongs to no map.
    pub const INVALID: MapId = MapId(u32::MAX);

    /// Whether this is a real map rather than [`MapId::INVALID`].
    pub const fn is_valid(self) -> bool {
        self.0 != Self::INVALID.0
    }
}

impl Default for MapId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for MapId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// A position within a specific map.
///
/// # Examples
///
/// ```rust
/// use world_position::{MapId, WorldLocation};
///
/// let mut loc = WorldLocation::default();
/// assert!(!loc.has_map());
///
/// loc.world_relocate_to(MapId(1), &world_position::Position::new(10.0, 20.0, 5.0, 0.0));
/// assert_eq!(loc.map_id(), MapId(1));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldLocation {
    /// Map the position belongs to
    pub map_id: MapId,
    /// Position within the map
    pub position: Position,
}

impl WorldLocation {
    /// Creates a location from raw coordinates, normalizing orientation.
    pub fn new(map_id: MapId, x: f32, y: f32, z: f32, orientation: f32) -> Self {
        Self {
            map_id,
            position: Position::new(x, y, z, orientation),
        }
    }

    /// Pairs an already-built position with a map.
    pub const fn from_position(map_id: MapId, position: Position) -> Self {
        Self { map_id, position }
    }

    /// Map the location belongs to.
    pub const fn map_id(&self) -> MapId {
        self.map_id
    }

    /// Whether the location is attached to a map.
    pub const fn has_map(&self) -> bool {
        self.map_id.is_valid()
    }

    /// Position within the map.
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// Mutable access to the position.
    pub fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }

    /// Copy of this location.
    pub const fn world_location(&self) -> WorldLocation {
        *self
    }

    /// Copies both map and position from `other`.
    pub fn world_relocate(&mut self, other: &WorldLocation) {
        self.map_id = other.map_id;
        self.position.relocate_from(&other.position);
    }

    /// Moves to `position` on `map_id`.
    pub fn world_relocate_to(&mut self, map_id: MapId, position: &Position) {
        self.map_id = map_id;
        self.position.relocate_from(position);
    }

    /// Changes the map, keeping the position.
    pub fn set_map_id(&mut self, map_id: MapId) {
        self.map_id = map_id;
    }

    /// Detaches from any map and returns to the origin.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl From<WorldLocation> for Position {
    fn from(loc: WorldLocation) -> Self {
        loc.position
    }
}

impl AsRef<Position> for WorldLocation {
    fn as_ref(&self) -> &Position {
        &self.position
    }
}

/// A location on its own is a point with no extent.
impl WorldObject for WorldLocation {
    fn position(&self) -> &Position {
        &self.position
    }

    fn object_size(&self) -> f32 {
        0.0
    }
}

impl fmt::Display for WorldLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MapID: {} {}", self.map_id, self.position)
    }
}
