//! Segment counts for a puff from its size or an explicit detail level
//!
//! Height ring counts stay low on purpose. Once normals are smoothed, more
//! rings only reintroduce visible banding.

use crate::types::DetailLevel;

/// Angular and vertical resolution of a puff mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tessellation {
    /// Vertices per ring
    pub segments: u32,
    /// Ring intervals between base and apex (rings = height_segments + 1)
    pub height_segments: u32,
}

impl Tessellation {
    pub const fn new(segments: u32, height_segments: u32) -> Self {
        Self {
            segments,
            height_segments,
        }
    }

    /// Pick counts by characteristic size. Upper bounds are inclusive.
    pub fn for_size(size: f32) -> Self {
        if size <= 0.1 {
            Self::new(16, 2)
        } else if size <= 0.3 {
            Self::new(24, 3)
        } else if size <= 0.5 {
            Self::new(32, 4)
        } else {
            Self::new(48, 5)
        }
    }

    /// Fixed counts for an explicit detail level
    pub fn for_level(level: DetailLevel) -> Self {
        match level {
            DetailLevel::Low => Self::new(16, 2),
            DetailLevel::High => Self::new(48, 5),
            DetailLevel::Medium | DetailLevel::Auto => Self::new(24, 3),
        }
    }

    /// Resolve counts for a puff of the given base radius and height.
    ///
    /// Auto mode sizes by the larger of radius and height, since both bound
    /// the curvature the rings have to follow.
    pub fn resolve(level: DetailLevel, size: f32, height: f32) -> Self {
        match level {
            DetailLevel::Auto => Self::for_size(size.max(height)),
            fixed => Self::for_level(fixed),
        }
    }
}
