//! World bounds configuration
//!
//! Validity of a position is decided by a [`WorldBounds`] oracle. The map
//! subsystem owns the real bounds; [`MapBounds`] is the default square map
//! grid and can be loaded from a TOML file so servers with larger or smaller
//! maps can override it.
//!
//! ```toml
//! half_size = 17066.666
//! edge_margin = 0.5
//! max_height = 100000.0
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Side length of one map grid cell.
pub const SIZE_OF_GRIDS: f32 = 533.333_33;
/// Number of grid cells along each map axis.
pub const MAX_NUMBER_OF_GRIDS: u32 = 64;
/// Half the side length of a full map.
pub const MAP_HALFSIZE: f32 = SIZE_OF_GRIDS * MAX_NUMBER_OF_GRIDS as f32 / 2.0;
/// Distance kept clear of the map edge.
pub const MAP_EDGE_MARGIN: f32 = 0.5;
/// Largest absolute elevation accepted.
pub const MAX_HEIGHT: f32 = 100_000.0;

/// Decides whether a set of coordinates is inside the world.
pub trait WorldBounds {
    /// Returns `true` when all fields are finite and within the world.
    fn is_valid_coord(&self, x: f32, y: f32, z: f32, orientation: f32) -> bool;
}

/// Square map centred on the origin.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct MapBounds {
    /// Largest |x| and |y| before the edge margin is applied
    pub half_size: f32,

    /// Kept clear of the map edge on x and y
    pub edge_margin: f32,

    /// Largest |z|
    pub max_height: f32,
}

impl Default for MapBounds {
    fn default() -> Self {
        Self {
            half_size: MAP_HALFSIZE,
            edge_margin: MAP_EDGE_MARGIN,
            max_height: MAX_HEIGHT,
        }
    }
}

impl MapBounds {
    /// Parses bounds from TOML; missing keys keep their defaults.
    pub fn from_toml_str(config: &str) -> Result<Self> {
        Ok(toml::de::from_str(config)?)
    }

    /// Renders the bounds as TOML suitable for a config file.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Loads bounds from a TOML file.
    ///
    /// # Errors
    /// * Returns error if the file cannot be read
    /// * Returns error if TOML parsing fails
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config_str = std::fs::read_to_string(path)?;
        match Self::from_toml_str(&config_str) {
            Ok(bounds) => {
                for issue in bounds.issues() {
                    warn!("World bounds {}: {}", path.display(), issue);
                }
                info!(
                    "Loaded world bounds from {}: half_size={} max_height={}",
                    path.display(),
                    bounds.half_size,
                    bounds.max_height
                );
                Ok(bounds)
            }
            Err(e) => {
                warn!("Failed to parse world bounds {}: {}", path.display(), e);
                Err(e)
            }
        }
    }

    /// Values that parse but reject every position or make no sense.
    ///
    /// Empty for usable bounds. [`MapBounds::load`] logs each one as a
    /// warning and still returns the bounds.
    pub fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if !self.half_size.is_finite() || self.half_size <= 0.0 {
            issues.push(format!("half_size {} must be positive and finite", self.half_size));
        }
        if !self.edge_margin.is_finite() || self.edge_margin < 0.0 {
            issues.push(format!("edge_margin {} must be non-negative and finite", self.edge_margin));
        }
        if self.half_size.is_finite() && self.edge_margin >= self.half_size {
            issues.push(format!(
                "edge_margin {} leaves no room inside half_size {}",
                self.edge_margin, self.half_size
            ));
        }
        if self.max_height.is_nan() || self.max_height < 0.0 {
            issues.push(format!("max_height {} must be non-negative", self.max_height));
        }
        issues
    }

    fn is_valid_plane(&self, value: f32) -> bool {
        value.is_finite() && value.abs() <= self.half_size - self.edge_margin
    }
}

impl WorldBounds for MapBounds {
    fn is_valid_coord(&self, x: f32, y: f32, z: f32, orientation: f32) -> bool {
        self.is_valid_plane(x)
            && self.is_valid_plane(y)
            && z.is_finite()
            && z.abs() <= self.max_height
            && orientation.is_finite()
    }
}
