//! Orientation frames along a stroke path
//!
//! Each path point gets a tangent/bitangent/normal basis. Bitangents are
//! kept pointing the same way as the previous point's bitangent, which is
//! enough to stop cross-sections from flipping on gently curving strokes.
//! This is a consistency heuristic, not full parallel transport.

use glam::Vec3;

use crate::types::StrokePoint;

/// Orthonormal basis at a path point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub tangent: Vec3,
    pub bitangent: Vec3,
    pub normal: Vec3,
}

impl Frame {
    /// Arbitrary frame around a normal, for single-point puffs
    pub fn from_normal(normal: Vec3) -> Self {
        let normal = normal.try_normalize().unwrap_or(Vec3::Y);
        let tangent = normal.any_orthonormal_vector();
        Self {
            tangent,
            bitangent: normal.cross(tangent),
            normal,
        }
    }

    /// Map a cross-section offset into world space
    pub fn offset(&self, x: f32, y: f32) -> Vec3 {
        self.tangent * x + self.bitangent * y
    }
}

/// Compute one frame per point. Returns an empty list for fewer than 2 points.
pub fn compute_frames(points: &[StrokePoint]) -> Vec<Frame> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }

    let mut frames: Vec<Frame> = Vec::with_capacity(n);
    for i in 0..n {
        let normal = points[i].normal.try_normalize().unwrap_or(Vec3::Y);
        let raw_tangent = path_direction(points, i);

        let previous = frames.last().copied();
        let mut bitangent = match normal.cross(raw_tangent).try_normalize() {
            Some(b) => b,
            // Tangent parallel to the normal (or zero): keep the last bitangent if it still fits
            None => previous
                .and_then(|f| (f.bitangent - normal * f.bitangent.dot(normal)).try_normalize())
                .unwrap_or_else(|| Frame::from_normal(normal).bitangent),
        };

        if let Some(prev) = previous {
            if bitangent.dot(prev.bitangent) < 0.0 {
                bitangent = -bitangent;
            }
        }

        // Re-orthogonalize; flipping the bitangent flips the tangent too, keeping t x b = n
        let tangent = bitangent.cross(normal).normalize_or_zero();

        frames.push(Frame {
            tangent,
            bitangent,
            normal,
        });
    }

    frames
}

/// Raw path direction at `i`: one-sided at the ends, averaged inside
fn path_direction(points: &[StrokePoint], i: usize) -> Vec3 {
    let n = points.len();
    let at = |k: usize| points[k].world_position;
    if i == 0 {
        (at(1) - at(0)).normalize_or_zero()
    } else if i == n - 1 {
        (at(n - 1) - at(n - 2)).normalize_or_zero()
    } else {
        let incoming = (at(i) - at(i - 1)).normalize_or_zero();
        let outgoing = (at(i + 1) - at(i)).normalize_or_zero();
        (incoming + outgoing).normalize_or_zero()
    }
}
