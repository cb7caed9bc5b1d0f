//! Surface materials for generated puffs
//!
//! A [`Material`] is a plain description of a PBR surface: base color,
//! opacity, roughness, metalness and optional baked textures. Hosts map it
//! onto whatever renderer they use.

mod fabric;
mod gradient;
mod weave;

pub use fabric::{fabric_properties, resolve_fabric, FabricProperties};
pub use gradient::{render_gradient, sample_stops};
pub use weave::weave_normal_map;

use image::{Rgba, RgbaImage};
use puff_config::EngineConfig;
use tracing::warn;

use crate::constants::{HAIR_OPACITY_FACTOR, HAIR_ROUGHNESS};
use crate::types::PuffSettings;

/// Largest raster edge the engine will allocate
pub const MAX_TEXTURE_RESOLUTION: u32 = 4096;

/// How a texture samples outside 0..=1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureWrap {
    #[default]
    Repeat,
    Clamp,
}

/// A baked RGBA texture
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub image: RgbaImage,
    pub wrap: TextureWrap,
}

impl Texture {
    pub fn new(image: RgbaImage) -> Self {
        Self {
            image,
            wrap: TextureWrap::Repeat,
        }
    }

    /// Single-pixel texture used when a raster cannot be allocated
    pub fn placeholder(pixel: [u8; 4]) -> Self {
        Self::new(RgbaImage::from_pixel(1, 1, Rgba(pixel)))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// True for a 1x1 fallback texture
    pub fn is_placeholder(&self) -> bool {
        self.image.width() == 1 && self.image.height() == 1
    }
}

/// Allocate a square raster, or None when the size is unusable
pub(crate) fn allocate_raster(resolution: u32, what: &str) -> Option<RgbaImage> {
    if resolution == 0 || resolution > MAX_TEXTURE_RESOLUTION {
        warn!(
            "{}: cannot allocate {}x{} raster, using placeholder",
            what, resolution, resolution
        );
        return None;
    }
    Some(RgbaImage::new(resolution, resolution))
}

/// PBR surface description
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Linear RGB; white when a color map carries the color
    pub base_color: [f32; 3],
    pub opacity: f32,
    pub transparent: bool,
    pub roughness: f32,
    pub metalness: f32,
    /// Color map (gradient fill)
    pub map: Option<Texture>,
    pub normal_map: Option<Texture>,
    pub normal_scale: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color: [1.0, 1.0, 1.0],
            opacity: 1.0,
            transparent: false,
            roughness: 0.8,
            metalness: 0.0,
            map: None,
            normal_map: None,
            normal_scale: 1.0,
        }
    }
}

impl Material {
    /// Solid color material with the given opacity
    pub fn solid(color: [f32; 3], opacity: f32, fabric: FabricProperties) -> Self {
        let opacity = opacity.clamp(0.0, 1.0);
        Self {
            base_color: color,
            opacity,
            transparent: opacity < 1.0,
            roughness: fabric.roughness,
            metalness: fabric.metalness,
            ..Default::default()
        }
    }

    /// Drop texture storage
    pub fn release(&mut self) {
        self.map = None;
        self.normal_map = None;
    }
}

/// Surface material for a puff: fabric response, optional gradient fill and
/// optional weave normal map.
pub fn build_surface_material(settings: &PuffSettings, config: &EngineConfig) -> Material {
    let fabric = resolve_fabric(settings);
    let mut material = Material::solid(settings.color, settings.opacity, fabric);

    match &settings.gradient {
        Some(gradient) if !gradient.stops.is_empty() => {
            material.map = Some(render_gradient(gradient, config.gradient_resolution));
            // The map carries the color
            material.base_color = [1.0, 1.0, 1.0];
        }
        Some(_) => warn!("build_surface_material: gradient has no stops, using solid color"),
        None => {}
    }

    if settings.normal_map {
        material.normal_map = Some(weave_normal_map(config.normal_map_resolution));
        material.normal_scale = 1.0;
    }
    material
}

/// Solid material for the edge band
pub fn build_edge_material(settings: &PuffSettings) -> Material {
    Material::solid(settings.edge_color, settings.opacity, resolve_fabric(settings))
}

/// Shared material for hair strands: rough, always transparent
pub fn build_hair_material(settings: &PuffSettings) -> Material {
    Material {
        base_color: settings.color,
        opacity: (settings.opacity * HAIR_OPACITY_FACTOR).clamp(0.0, 1.0),
        transparent: true,
        roughness: HAIR_ROUGHNESS,
        metalness: 0.0,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColorStop, FabricType, GradientSettings};

    #[test]
    fn test_solid_surface() {
        let settings = PuffSettings {
            color: [0.2, 0.4, 0.6],
            opacity: 0.5,
            fabric_type: FabricType::Wool,
            ..Default::default()
        };
        let material = build_surface_material(&settings, &EngineConfig::default());
        assert_eq!(material.base_color, [0.2, 0.4, 0.6]);
        assert!(material.transparent);
        assert!(material.map.is_none());
        assert!(material.normal_map.is_none());
        assert!(material.roughness >= 0.95);
    }

    #[test]
    fn test_gradient_forces_white_base() {
        let settings = PuffSettings {
            color: [1.0, 0.0, 0.0],
            gradient: Some(GradientSettings {
                stops: vec![
                    ColorStop {
                        offset: 0.0,
                        color: [0.0, 0.0, 1.0, 1.0],
                    },
                    ColorStop {
                        offset: 1.0,
                        color: [0.0, 1.0, 0.0, 1.0],
                    },
                ],
                ..Default::default()
            }),
            ..Default::default()
        };
        let config = EngineConfig {
            gradient_resolution: 16,
            ..Default::default()
        };
        let material = build_surface_material(&settings, &config);
        assert_eq!(material.base_color, [1.0, 1.0, 1.0]);
        assert_eq!(material.map.as_ref().map(Texture::width), Some(16));
    }

    #[test]
    fn test_empty_gradient_keeps_solid_color() {
        let settings = PuffSettings {
            color: [0.3, 0.3, 0.3],
            gradient: Some(GradientSettings::default()),
            ..Default::default()
        };
        let material = build_surface_material(&settings, &EngineConfig::default());
        assert!(material.map.is_none());
        assert_eq!(material.base_color, [0.3, 0.3, 0.3]);
    }

    #[test]
    fn test_normal_map_toggle() {
        let settings = PuffSettings {
            normal_map: true,
            ..Default::default()
        };
        let config = EngineConfig {
            normal_map_resolution: 8,
            ..Default::default()
        };
        let material = build_surface_material(&settings, &config);
        let map = material.normal_map.unwrap();
        assert_eq!((map.width(), map.height()), (8, 8));
        assert_eq!(material.normal_scale, 1.0);
    }

    #[test]
    fn test_hair_material() {
        let settings = PuffSettings {
            opacity: 0.5,
            ..Default::default()
        };
        let material = build_hair_material(&settings);
        assert!(material.transparent);
        assert!((material.opacity - 0.3).abs() < 1e-6);
        assert_eq!(material.roughness, HAIR_ROUGHNESS);
    }

    #[test]
    fn test_unusable_raster_falls_back() {
        assert!(allocate_raster(0, "test").is_none());
        assert!(allocate_raster(MAX_TEXTURE_RESOLUTION + 1, "test").is_none());
        assert!(Texture::placeholder([255; 4]).is_placeholder());
    }
}
