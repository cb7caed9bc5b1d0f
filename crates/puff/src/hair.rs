//! Hair strands on a puff surface
//!
//! Roots are sampled from the mesh vertices without replacement. Every strand
//! shares one tapered-cylinder template; each instance carries its own root,
//! orientation (surface normal plus a random tilt) and length scale.

use std::f32::consts::TAU;

use glam::{Mat4, Quat, Vec2, Vec3};
use puff_config::EngineConfig;
use rand::Rng;
use tracing::{debug, warn};

use crate::constants::{HAIR_MAX_TILT, HAIR_TIP_RATIO};
use crate::material::{build_hair_material, Material};
use crate::mesh::MeshBuffers;
use crate::types::PuffSettings;

/// One placed strand
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HairStrand {
    /// Root position in the puff's local space
    pub root: Vec3,
    /// Rotates the template's +Y axis onto the strand direction
    pub rotation: Quat,
    /// Multiplier on the template length
    pub length_scale: f32,
}

impl HairStrand {
    /// Instance transform for the shared template
    pub fn transform(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::new(1.0, self.length_scale, 1.0),
            self.rotation,
            self.root,
        )
    }

    pub fn direction(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}

/// All strands of one puff
#[derive(Debug, Clone, PartialEq)]
pub struct HairGroup {
    /// Strand geometry along +Y from the origin, full length
    pub template: MeshBuffers,
    pub strands: Vec<HairStrand>,
    pub material: Material,
}

impl HairGroup {
    pub fn len(&self) -> usize {
        self.strands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strands.is_empty()
    }

    /// Bake every instance into one mesh, for hosts without instancing
    pub fn merged(&self) -> MeshBuffers {
        let mut out = MeshBuffers::with_capacity(
            self.template.vertex_count() * self.strands.len(),
            self.template.triangle_count() * self.strands.len(),
        );
        for strand in &self.strands {
            let transform = strand.transform();
            let mut instance = self.template.clone();
            for (p, n) in instance.positions.iter_mut().zip(instance.normals.iter_mut()) {
                *p = transform.transform_point3(Vec3::from_array(*p)).to_array();
                *n = (strand.rotation * Vec3::from_array(*n)).to_array();
            }
            out.append(instance);
        }
        out
    }

    /// Drop geometry, instances and textures
    pub fn release(&mut self) {
        self.template.release();
        self.strands = Vec::new();
        self.material.release();
    }
}

/// Strands the settings ask for, after the engine cap. Does not consider vertex count.
pub fn hair_count(settings: &PuffSettings, max_hairs: usize) -> usize {
    let area = std::f32::consts::PI * settings.size * settings.size;
    let wanted = (settings.hair_density.max(0.0) * area).floor() as usize;
    wanted.min(max_hairs)
}

/// Open tapered cylinder from the origin to `length` along +Y
pub fn strand_template(root_radius: f32, length: f32, segments: u32) -> MeshBuffers {
    let segments = segments.max(3);
    let tip_radius = root_radius * HAIR_TIP_RATIO;
    let mut mesh = MeshBuffers::with_capacity(segments as usize * 2, segments as usize * 2);
    // Normals tilt inward by the taper slope
    let slope = (root_radius - tip_radius) / length.max(f32::EPSILON);

    for (radius, y, v) in [(root_radius, 0.0, 0.0), (tip_radius, length, 1.0)] {
        for j in 0..segments {
            let angle = j as f32 / segments as f32 * TAU;
            let (sin, cos) = angle.sin_cos();
            let normal = Vec3::new(cos, slope, -sin).normalize();
            mesh.push_vertex(
                Vec3::new(cos * radius, y, -sin * radius),
                normal,
                Vec2::new(j as f32 / segments as f32, v),
            );
        }
    }
    for j in 0..segments {
        let next = (j + 1) % segments;
        let (a, b) = (j, next);
        let (c, d) = (next + segments, j + segments);
        mesh.push_triangle(a, b, c);
        mesh.push_triangle(a, c, d);
    }
    mesh
}

/// Scatter hair over every vertex of a surface mesh in the puff's local space.
///
/// Returns None when hair is disabled, the length is unset, the mesh has no
/// vertices, or the count works out to zero.
pub fn generate_hair<R: Rng + ?Sized>(
    surface: &MeshBuffers,
    settings: &PuffSettings,
    config: &EngineConfig,
    rng: &mut R,
) -> Option<HairGroup> {
    let roots: Vec<u32> = (0..surface.vertex_count() as u32).collect();
    generate_hair_on(surface, &roots, settings, config, rng)
}

/// Scatter hair over the vertices listed in `roots`.
///
/// Each strand takes a distinct root, so the count is also capped by
/// `roots.len()`. Indices outside the mesh are ignored.
pub fn generate_hair_on<R: Rng + ?Sized>(
    surface: &MeshBuffers,
    roots: &[u32],
    settings: &PuffSettings,
    config: &EngineConfig,
    rng: &mut R,
) -> Option<HairGroup> {
    if !settings.hairs {
        return None;
    }
    let Some(length) = settings.hair_length() else {
        debug!("generate_hair: no hair height, skipping");
        return None;
    };
    let vertices = surface.vertex_count();
    let roots: Vec<u32> = roots.iter().copied().filter(|&i| (i as usize) < vertices).collect();
    if roots.is_empty() {
        warn!("generate_hair: surface has no root vertices");
        return None;
    }

    let wanted = hair_count(settings, config.max_hairs);
    let count = wanted.min(roots.len());
    if count < wanted {
        debug!(
            "generate_hair: {} strands requested, surface has {} root vertices",
            wanted,
            roots.len()
        );
    }
    if count == 0 {
        return None;
    }

    let variation = settings.hair_variation.clamp(0.0, 1.0);
    let max_tilt = HAIR_MAX_TILT * variation;
    let strands = rand::seq::index::sample(rng, roots.len(), count)
        .into_iter()
        .map(|pick| {
            let index = roots[pick];
            let normal = surface.normal(index).try_normalize().unwrap_or(Vec3::Y);
            let root = surface.position(index) + normal * config.hair_surface_offset;

            let heading = rng.random::<f32>() * TAU;
            let tilt_axis = Vec3::new(heading.cos(), 0.0, heading.sin());
            let tilt = Quat::from_axis_angle(tilt_axis, rng.random::<f32>() * max_tilt);
            let length_scale = 1.0 + (rng.random::<f32>() - 0.5) * variation;

            HairStrand {
                root,
                rotation: Quat::from_rotation_arc(Vec3::Y, normal) * tilt,
                length_scale,
            }
        })
        .collect::<Vec<_>>();

    let radius = settings.size * settings.hair_thickness;
    debug!("generate_hair: {} strands, length {}", strands.len(), length);
    Some(HairGroup {
        template: strand_template(radius, length, config.hair_radial_segments),
        strands,
        material: build_hair_material(settings),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid_surface(n: usize) -> MeshBuffers {
        let mut mesh = MeshBuffers::new();
        for i in 0..n {
            mesh.push_vertex(Vec3::new(i as f32 * 0.01, 0.0, 0.0), Vec3::Y, Vec2::ZERO);
        }
        mesh
    }

    fn hairy() -> PuffSettings {
        PuffSettings {
            hairs: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_disabled_or_unset() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = EngineConfig::default();
        let surface = grid_surface(10);
        assert!(generate_hair(&surface, &PuffSettings::default(), &config, &mut rng).is_none());

        let no_height = PuffSettings {
            hair_height: None,
            ..hairy()
        };
        assert!(generate_hair(&surface, &no_height, &config, &mut rng).is_none());
        assert!(generate_hair(&MeshBuffers::new(), &hairy(), &config, &mut rng).is_none());
    }

    #[test]
    fn test_count_capped_by_max_and_vertices() {
        let settings = PuffSettings {
            hair_density: 1.0e9,
            ..hairy()
        };
        assert_eq!(hair_count(&settings, 20_000), 20_000);

        let mut rng = StdRng::seed_from_u64(2);
        let hair = generate_hair(&grid_surface(50), &settings, &EngineConfig::default(), &mut rng).unwrap();
        assert_eq!(hair.len(), 50);

        // Density 2000 over a 0.3 radius disc
        assert_eq!(hair_count(&hairy(), 20_000), 565);
    }

    #[test]
    fn test_count_never_exceeds_cap() {
        let config = EngineConfig::default();
        let surface = grid_surface(3000);
        let mut rng = StdRng::seed_from_u64(6);
        for density in [0.0, 1.0, 50.0, 2000.0, 1.0e5, 1.0e7] {
            for size in [0.01, 0.05, 0.3, 1.0] {
                let settings = PuffSettings {
                    hair_density: density,
                    size,
                    ..hairy()
                };
                let cap = hair_count(&settings, config.max_hairs);
                assert!(cap <= config.max_hairs);
                let area = std::f32::consts::PI * size * size;
                assert!(cap <= (density * area).floor() as usize);
                let grown = generate_hair(&surface, &settings, &config, &mut rng).map_or(0, |h| h.len());
                assert!(grown <= cap, "density {} size {}: {} > {}", density, size, grown, cap);
            }
        }
    }

    #[test]
    fn test_roots_limited_to_candidates() {
        let mut rng = StdRng::seed_from_u64(8);
        let surface = grid_surface(40);
        let roots: Vec<u32> = (10..20).chain([500]).collect();
        let settings = PuffSettings {
            hair_density: 1.0e6,
            ..hairy()
        };
        let hair = generate_hair_on(&surface, &roots, &settings, &EngineConfig::default(), &mut rng).unwrap();
        assert_eq!(hair.len(), 10);
        for strand in &hair.strands {
            let index = (strand.root.x / 0.01).round() as u32;
            assert!((10..20).contains(&index));
        }
        assert!(generate_hair_on(&surface, &[], &settings, &EngineConfig::default(), &mut rng).is_none());
    }

    #[test]
    fn test_roots_are_distinct_vertices() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = EngineConfig::default();
        let settings = PuffSettings {
            hair_density: 100.0,
            ..hairy()
        };
        let surface = grid_surface(200);
        let hair = generate_hair(&surface, &settings, &config, &mut rng).unwrap();
        let mut xs: Vec<i64> = hair
            .strands
            .iter()
            .map(|s| (s.root.x * 1000.0).round() as i64)
            .collect();
        xs.sort();
        xs.dedup();
        assert_eq!(xs.len(), hair.len());
        for strand in &hair.strands {
            assert!((strand.root.y - config.hair_surface_offset).abs() < 1e-6);
        }
    }

    #[test]
    fn test_tilt_and_length_bounded_by_variation() {
        let mut rng = StdRng::seed_from_u64(4);
        let settings = PuffSettings {
            hair_variation: 0.5,
            ..hairy()
        };
        let hair = generate_hair(&grid_surface(300), &settings, &EngineConfig::default(), &mut rng).unwrap();
        for strand in &hair.strands {
            let angle = strand.direction().angle_between(Vec3::Y);
            assert!(angle <= HAIR_MAX_TILT * 0.5 + 1e-4);
            assert!((0.75..=1.25).contains(&strand.length_scale));
        }
    }

    #[test]
    fn test_same_seed_same_hair() {
        let surface = grid_surface(100);
        let config = EngineConfig::default();
        let a = generate_hair(&surface, &hairy(), &config, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = generate_hair(&surface, &hairy(), &config, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a.strands, b.strands);
    }

    #[test]
    fn test_template_shape() {
        let template = strand_template(0.01, 0.2, 4);
        assert_eq!(template.vertex_count(), 8);
        assert_eq!(template.triangle_count(), 8);
        let (min, max) = template.bounds().unwrap();
        assert!(min.y.abs() < 1e-6);
        assert!((max.y - 0.2).abs() < 1e-6);
        // Side faces point away from the axis
        for tri in template.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| template.position(i));
            let face = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(face.dot(Vec3::new(centroid.x, 0.0, centroid.z)) > 0.0);
        }
    }

    #[test]
    fn test_merged_instances() {
        let mut rng = StdRng::seed_from_u64(5);
        let hair = generate_hair(&grid_surface(20), &hairy(), &EngineConfig::default(), &mut rng).unwrap();
        let merged = hair.merged();
        assert_eq!(merged.vertex_count(), hair.template.vertex_count() * hair.len());
    }
}
