//! Gradient fill raster

use glam::{Vec2, Vec4};

use super::{allocate_raster, Texture};
use crate::types::{ColorStop, GradientKind, GradientSettings};

/// Color at `t` along stops sorted by offset. Clamps outside the first and last stop.
pub fn sample_stops(stops: &[ColorStop], t: f32) -> [f32; 4] {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return [1.0; 4];
    };
    if t <= first.offset {
        return first.color;
    }
    if t >= last.offset {
        return last.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            let local = if span > f32::EPSILON {
                (t - a.offset) / span
            } else {
                1.0
            };
            return Vec4::from_array(a.color)
                .lerp(Vec4::from_array(b.color), local)
                .to_array();
        }
    }
    last.color
}

/// Gradient parameter for a pixel center in -0.5..=0.5 texture space
fn gradient_t(kind: GradientKind, direction: Vec2, extent: f32, p: Vec2) -> f32 {
    match kind {
        GradientKind::Radial => (p.length() / 0.5).min(1.0),
        // Angular and diamond layouts are not rasterized separately
        GradientKind::Linear | GradientKind::Angular | GradientKind::Diamond => {
            (p.dot(direction) / extent * 0.5 + 0.5).clamp(0.0, 1.0)
        }
    }
}

/// Rasterize a gradient into a square texture of `resolution` pixels.
///
/// Falls back to a 1x1 texture of the first stop when the raster cannot be allocated.
pub fn render_gradient(gradient: &GradientSettings, resolution: u32) -> Texture {
    let mut stops = gradient.stops.clone();
    stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));

    let Some(mut raster) = allocate_raster(resolution, "render_gradient") else {
        return Texture::placeholder(to_rgba8(sample_stops(&stops, 0.0)));
    };

    let angle = gradient.angle.to_radians();
    let direction = Vec2::new(angle.cos(), angle.sin());
    // Half extent of the unit square along the direction
    let extent = 0.5 * (direction.x.abs() + direction.y.abs());
    let size = resolution as f32;

    for (x, y, pixel) in raster.enumerate_pixels_mut() {
        let p = Vec2::new((x as f32 + 0.5) / size - 0.5, (y as f32 + 0.5) / size - 0.5);
        let t = gradient_t(gradient.kind, direction, extent, p);
        *pixel = image::Rgba(to_rgba8(sample_stops(&stops, t)));
    }
    Texture::new(raster)
}

fn to_rgba8(color: [f32; 4]) -> [u8; 4] {
    color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}
