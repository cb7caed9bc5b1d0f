//! Shared configuration for the puff-print engine
//!
//! This crate is the single source of truth for the tunable constants the
//! geometry engine relies on (corner thresholds, weld tolerance, hair caps,
//! raster sizes). None of these are derived from first principles; they are
//! exposed here so hosts can override them without touching the engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "bevy")]
use bevy::prelude::Resource;

/// Above this value of both `|cos|` and `|sin|`, a rounded-square section uses the square formula
pub const DEFAULT_CORNER_THRESHOLD: f32 = 0.3;

/// Radius multiplier of the edge band relative to the base ring
pub const DEFAULT_EDGE_RING_SCALE: f32 = 1.02;

/// How far below the base the edge band sits, as a fraction of puff height
pub const DEFAULT_EDGE_RING_DROP: f32 = 0.02;

/// Positions closer than this are treated as the same vertex when welding normals
pub const DEFAULT_WELD_TOLERANCE: f32 = 1e-4;

/// Hard cap on hair strands per puff
pub const DEFAULT_MAX_HAIRS: usize = 20_000;

/// Distance hair roots are pushed out along the surface normal
pub const DEFAULT_HAIR_SURFACE_OFFSET: f32 = 0.001;

/// Angular segments of a single hair strand
pub const DEFAULT_HAIR_RADIAL_SEGMENTS: u32 = 4;

/// Edge length of the square gradient raster in pixels
pub const DEFAULT_GRADIENT_RESOLUTION: u32 = 256;

/// Edge length of the square weave normal map in pixels
pub const DEFAULT_NORMAL_MAP_RESOLUTION: u32 = 64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse engine config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Engine-wide tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Corner threshold for rounded-square cross-sections
    pub corner_threshold: f32,
    /// Edge band enlargement over the base ring
    pub edge_ring_scale: f32,
    /// Edge band drop below the base (fraction of height)
    pub edge_ring_drop: f32,
    /// Quantization tolerance for normal welding
    pub weld_tolerance: f32,
    /// Maximum hair strands per puff
    pub max_hairs: usize,
    /// Outward offset applied to hair roots
    pub hair_surface_offset: f32,
    /// Radial segments per hair strand
    pub hair_radial_segments: u32,
    /// Gradient raster size
    pub gradient_resolution: u32,
    /// Weave normal map size
    pub normal_map_resolution: u32,
    /// Seed for hair placement. `None` draws from OS entropy.
    pub hair_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            corner_threshold: DEFAULT_CORNER_THRESHOLD,
            edge_ring_scale: DEFAULT_EDGE_RING_SCALE,
            edge_ring_drop: DEFAULT_EDGE_RING_DROP,
            weld_tolerance: DEFAULT_WELD_TOLERANCE,
            max_hairs: DEFAULT_MAX_HAIRS,
            hair_surface_offset: DEFAULT_HAIR_SURFACE_OFFSET,
            hair_radial_segments: DEFAULT_HAIR_RADIAL_SEGMENTS,
            gradient_resolution: DEFAULT_GRADIENT_RESOLUTION,
            normal_map_resolution: DEFAULT_NORMAL_MAP_RESOLUTION,
            hair_seed: None,
        }
    }
}

impl EngineConfig {
    /// Config with a fixed hair seed, for reproducible builds
    pub fn seeded(seed: u64) -> Self {
        Self {
            hair_seed: Some(seed),
            ..Default::default()
        }
    }

    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject tunables the engine cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.weld_tolerance > 0.0) {
            return Err(ConfigError::Invalid {
                field: "weldTolerance",
                reason: format!("must be positive, got {}", self.weld_tolerance),
            });
        }
        if !(self.edge_ring_scale > 0.0) {
            return Err(ConfigError::Invalid {
                field: "edgeRingScale",
                reason: format!("must be positive, got {}", self.edge_ring_scale),
            });
        }
        if !(0.0..=1.0).contains(&self.corner_threshold) {
            return Err(ConfigError::Invalid {
                field: "cornerThreshold",
                reason: format!("must be within 0..=1, got {}", self.corner_threshold),
            });
        }
        if self.gradient_resolution == 0 || self.normal_map_resolution == 0 {
            return Err(ConfigError::Invalid {
                field: "resolution",
                reason: format!(
                    "raster sizes must be positive, got {} and {}",
                    self.gradient_resolution, self.normal_map_resolution
                ),
            });
        }
        if self.hair_radial_segments < 3 {
            return Err(ConfigError::Invalid {
                field: "hairRadialSegments",
                reason: format!("need at least 3, got {}", self.hair_radial_segments),
            });
        }
        Ok(())
    }
}
