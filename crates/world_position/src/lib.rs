//! # World Position
//!
//! The spatial primitive of a tick-driven world simulation: an oriented
//! point and the range, angle and containment queries that movement, combat,
//! area effects and line-of-sight checks all depend on.
//!
//! ## Core Types
//!
//! - [`Position`] - x, y, z plus a facing angle kept in `[0, 2π)`
//! - [`RawPosition`] - unchecked interop struct for bulk initialization
//! - [`WorldLocation`] - a [`Position`] qualified by a [`MapId`]
//! - [`MapBounds`] - default world-bounds oracle, loadable from TOML
//! - [`ByteBuffer`] - little-endian stream for the compact wire encoding
//!
//! ## Consistency
//!
//! Every subsystem must agree on whether a target is in range, so the
//! predicates here use a single convention each:
//!
//! - Range tests compare squared distances with a strict `<`
//! - Orientation is normalized on every gated mutation
//! - Equality is exact on all four fields; there is no epsilon
//!
//! The squared comparison is the reference answer for range. It agrees with
//! `exact_dist(..) < range` except when `range` is itself the rounded
//! distance to the same target, where the squared form can still report the
//! target in range by one ulp. Callers that feed a computed distance back as
//! a range should not rely on the boundary being excluded.
//!
//! Non-finite coordinates are not guarded. NaN propagates through the
//! arithmetic and makes every range predicate false; use
//! [`Position::is_position_valid`] to reject such input at the boundary.
//!
//! ## Quick Start
//!
//! ```rust
//! use world_position::*;
//!
//! let caster = Position::new(0.0, 0.0, 0.0, 0.0);
//! let target = Position::new(3.0, 4.0, 0.0, 0.0);
//!
//! assert_eq!(caster.exact_dist_2d(&target), 5.0);
//! assert!(caster.is_in_dist_2d(&target, 6.0));
//! assert!(caster.has_in_arc(std::f32::consts::PI, &target));
//!
//! let mut buffer = ByteBuffer::new();
//! target.write_xyzo(&mut buffer);
//! let mut received = Position::default();
//! received.read_xyzo(&mut buffer)?;
//! assert_eq!(received, target);
//! # Ok::<(), PositionError>(())
//! ```

pub mod angle;
pub mod binary;
pub mod bounds;
pub mod containment;
pub mod error;
pub mod location;
pub mod position;

pub use angle::{normalize_orientation, normalize_pitch};
pub use binary::{BinarySerializable, ByteBuffer, FloatStream, StreamShape};
pub use bounds::{MapBounds, WorldBounds};
pub use containment::{WorldObject, DEFAULT_ARC_BORDER};
pub use error::{PositionError, Result};
pub use location::{MapId, WorldLocation};
pub use position::{Position, RawPosition};
