//! Procedural weave normal map

use std::f32::consts::TAU;

use glam::Vec3;

use super::{allocate_raster, Texture};
use crate::constants::{WEAVE_AMPLITUDES, WEAVE_FREQUENCIES};

/// Flat tangent-space normal, encoded
const FLAT_NORMAL: [u8; 4] = [128, 128, 255, 255];

/// Tangent-space normal at texture coordinate (u, v)
fn weave_normal(u: f32, v: f32) -> Vec3 {
    let (low, high) = WEAVE_FREQUENCIES;
    let (low_amp, high_amp) = WEAVE_AMPLITUDES;
    // Warp runs along u, weft along v
    let x = low_amp * (u * low * TAU).sin() * (v * low * TAU).cos()
        + high_amp * (u * high * TAU).sin();
    let y = low_amp * (v * low * TAU).sin() * (u * low * TAU).cos()
        + high_amp * (v * high * TAU).sin();
    Vec3::new(x, y, 1.0).normalize()
}

fn encode(n: Vec3) -> [u8; 4] {
    let e = (n * 0.5 + 0.5) * 255.0;
    [e.x.round() as u8, e.y.round() as u8, e.z.round() as u8, 255]
}

/// Bake the two-frequency weave into a square normal map.
///
/// Falls back to a flat 1x1 map when the raster cannot be allocated.
pub fn weave_normal_map(resolution: u32) -> Texture {
    let Some(mut raster) = allocate_raster(resolution, "weave_normal_map") else {
        return Texture::placeholder(FLAT_NORMAL);
    };
    let size = resolution as f32;
    for (x, y, pixel) in raster.enumerate_pixels_mut() {
        let n = weave_normal(x as f32 / size, y as f32 / size);
        *pixel = image::Rgba(encode(n));
    }
    Texture::new(raster)
}
