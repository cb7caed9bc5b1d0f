//! Cross-section sampling in the tangent/bitangent plane

use glam::Vec2;

use crate::types::CrossSection;

/// Offset of the outline at `angle` for a section of the given radius.
///
/// `x` runs along the tangent, `y` along the bitangent. `aspect_ratio` only
/// affects ovals; `corner_threshold` only affects rounded squares.
pub fn sample_cross_section(
    shape: CrossSection,
    angle: f32,
    radius: f32,
    aspect_ratio: f32,
    corner_threshold: f32,
) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    match shape {
        CrossSection::Circle => circle(cos, sin, radius),
        CrossSection::Square => square(cos, sin, radius),
        CrossSection::RoundedSquare => {
            if cos.abs() > corner_threshold && sin.abs() > corner_threshold {
                square(cos, sin, radius)
            } else {
                circle(cos, sin, radius)
            }
        }
        CrossSection::Oval => Vec2::new(cos * radius * aspect_ratio, sin * radius),
    }
}

fn circle(cos: f32, sin: f32, radius: f32) -> Vec2 {
    Vec2::new(cos * radius, sin * radius)
}

fn square(cos: f32, sin: f32, radius: f32) -> Vec2 {
    let scale = cos.abs().max(sin.abs());
    if scale <= f32::EPSILON {
        return Vec2::ZERO;
    }
    Vec2::new(cos / scale * radius, sin / scale * radius)
}
