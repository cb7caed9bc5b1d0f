//! Puff mesh construction
//!
//! A single stroke point becomes a dome: a stack of cross-section rings from
//! the surface up to an apex, shaped by the profile curve. Two or more points
//! become a tube: one dome-shaped section per point, skinned together between
//! neighbouring sections and capped at the first base and the last apex.
//!
//! Both paths share the same normal pass:
//! 1. geometric vertex normals from the faces
//! 2. blend toward precomputed smooth normals (directions from a sphere
//!    center at `base + normal * height`) by the smoothness setting
//! 3. weld normals of coincident vertices so collapsed rings show no seam

mod buffers;
mod dome;
pub mod normals;
mod tube;

pub use buffers::{vertex_bytes, MeshBuffers, PuffVertex};
pub use dome::build_dome;
pub use tube::build_tube;

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use puff_config::EngineConfig;
use tracing::debug;

use crate::cross_section::sample_cross_section;
use crate::frame::Frame;
use crate::profile::profile_radius;
use crate::shape::{apply_shape, ShapeParams};
use crate::tessellation::Tessellation;
use crate::types::{CrossSection, ProfileCurve, PuffSettings, StrokePoint};

/// Geometry inputs resolved from settings and engine config
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildParams {
    pub height: f32,
    pub size: f32,
    pub cross_section: CrossSection,
    pub aspect_ratio: f32,
    pub profile_curve: ProfileCurve,
    pub shape: ShapeParams,
    pub smoothness: f32,
    pub tessellation: Tessellation,
    pub corner_threshold: f32,
    pub weld_tolerance: f32,
}

impl BuildParams {
    pub fn new(settings: &PuffSettings, config: &EngineConfig) -> Self {
        Self {
            height: settings.height,
            size: settings.size,
            cross_section: settings.cross_section,
            aspect_ratio: settings.aspect_ratio,
            profile_curve: settings.profile_curve,
            shape: ShapeParams {
                top: settings.top_shape,
                bottom: settings.bottom_shape,
                bevel_amount: settings.bevel_amount,
                taper_amount: settings.taper_amount,
            },
            smoothness: settings.smoothness,
            tessellation: Tessellation::resolve(settings.detail_level, settings.size, settings.height),
            corner_threshold: config.corner_threshold,
            weld_tolerance: config.weld_tolerance,
        }
    }

    /// Cross-section offset at `angle` for a ring of `radius`, in world space
    pub fn ring_offset(&self, frame: &Frame, angle: f32, radius: f32) -> Vec3 {
        let offset = sample_cross_section(
            self.cross_section,
            angle,
            radius,
            self.aspect_ratio,
            self.corner_threshold,
        );
        frame.offset(offset.x, offset.y)
    }

    /// Angle of ring column `j`
    pub fn column_angle(&self, j: u32) -> f32 {
        j as f32 / self.tessellation.segments as f32 * TAU
    }

    /// Height ratio of ring `i`
    fn ring_ratio(&self, i: u32) -> f32 {
        i as f32 / self.tessellation.height_segments as f32
    }

    /// Ring radius for a height ratio, after shape modifiers
    fn ring_radius(&self, ratio: f32) -> f32 {
        self.size * profile_radius(self.profile_curve, apply_shape(&self.shape, ratio))
    }

    fn ring_count(&self) -> u32 {
        self.tessellation.height_segments + 1
    }
}

/// Base ring placement, kept for the edge band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseRing {
    pub center: Vec3,
    pub frame: Frame,
}

/// Output of a dome or tube build
#[derive(Debug, Clone, PartialEq)]
pub struct PuffGeometry {
    pub buffers: MeshBuffers,
    pub tessellation: Tessellation,
    pub base_rings: Vec<BaseRing>,
    /// Vertex index of the base cap center
    pub base_center: u32,
    /// Vertex index of the apex cap center
    pub apex_center: u32,
}

/// Build a dome for one point or a tube for several. Returns None for no points.
pub fn build_puff(points: &[StrokePoint], params: &BuildParams) -> Option<PuffGeometry> {
    match points {
        [] => None,
        [point] => Some(build_dome(point, params)),
        _ => build_tube(points, params),
    }
}

/// Working state shared by the dome and tube builders
struct SectionBuilder<'a> {
    params: &'a BuildParams,
    buffers: MeshBuffers,
    /// Smooth normal per vertex, parallel to the buffers
    smooth: Vec<Vec3>,
}

impl<'a> SectionBuilder<'a> {
    fn new(params: &'a BuildParams, sections: usize) -> Self {
        let tess = params.tessellation;
        let per_section = (tess.segments * (tess.height_segments + 1)) as usize;
        let vertices = per_section * sections + 2;
        let quads = (tess.segments * tess.height_segments) as usize;
        let triangles = quads * 2 * (2 * sections).saturating_sub(1) + 2 * tess.segments as usize;
        Self {
            params,
            buffers: MeshBuffers::with_capacity(vertices, triangles),
            smooth: Vec::with_capacity(vertices),
        }
    }

    fn push(&mut self, position: Vec3, smooth: Vec3, uv: Vec2) -> u32 {
        self.smooth.push(smooth);
        self.buffers.push_vertex(position, smooth, uv)
    }

    /// Push all rings of one section. `v` maps a ring ratio to the V texture coordinate.
    ///
    /// Rings have no duplicated seam column: U runs `0..(s-1)/s` and the
    /// closing quad reuses column 0, so its U wraps from `(s-1)/s` back to 0.
    /// Textures sampled across that quad repeat, which the wrap mode expects.
    ///
    /// Returns the index of the section's first vertex.
    fn push_section(&mut self, base: Vec3, frame: &Frame, v: impl Fn(f32) -> f32) -> u32 {
        let params = self.params;
        let start = self.buffers.vertex_count() as u32;
        let sphere_center = base + frame.normal * params.height;
        let segments = params.tessellation.segments;

        for i in 0..params.ring_count() {
            let ratio = params.ring_ratio(i);
            let radius = params.ring_radius(ratio);
            let ring_center = base + frame.normal * (params.height * ratio);
            for j in 0..segments {
                let position = ring_center + params.ring_offset(frame, params.column_angle(j), radius);
                let smooth = (position - sphere_center)
                    .try_normalize()
                    .unwrap_or(frame.normal);
                let uv = Vec2::new(j as f32 / segments as f32, v(ratio));
                self.push(position, smooth, uv);
            }
        }
        start
    }

    /// Index of vertex (ring, column) in a section starting at `start`
    fn vertex(&self, start: u32, ring: u32, column: u32) -> u32 {
        let segments = self.params.tessellation.segments;
        start + ring * segments + column % segments
    }

    /// Two triangles per quad between each pair of adjacent rings
    fn connect_rings(&mut self, start: u32) {
        let tess = self.params.tessellation;
        for i in 0..tess.height_segments {
            for j in 0..tess.segments {
                let a = self.vertex(start, i, j);
                let b = self.vertex(start, i, j + 1);
                let c = self.vertex(start, i + 1, j + 1);
                let d = self.vertex(start, i + 1, j);
                self.buffers.push_triangle(a, b, c);
                self.buffers.push_triangle(a, c, d);
            }
        }
    }

    /// Fan from a center vertex under the first ring, facing away from the normal
    fn cap_base(&mut self, start: u32, base: Vec3, normal: Vec3, v: f32) -> u32 {
        let center = self.push(base, -normal, Vec2::new(0.5, v));
        for j in 0..self.params.tessellation.segments {
            let current = self.vertex(start, 0, j);
            let next = self.vertex(start, 0, j + 1);
            self.buffers.push_triangle(center, next, current);
        }
        center
    }

    /// Fan from the apex to the last ring
    fn cap_apex(&mut self, start: u32, apex: Vec3, normal: Vec3, v: f32) -> u32 {
        let top = self.params.tessellation.height_segments;
        let center = self.push(apex, normal, Vec2::new(0.5, v));
        for j in 0..self.params.tessellation.segments {
            let current = self.vertex(start, top, j);
            let next = self.vertex(start, top, j + 1);
            self.buffers.push_triangle(current, next, center);
        }
        center
    }

    /// Run the shared normal pass and hand back the buffers
    fn finish(mut self) -> MeshBuffers {
        normals::blend_normals(&mut self.buffers, &self.smooth, self.params.smoothness);
        let welded = normals::weld_normals(&mut self.buffers, self.params.weld_tolerance);
        debug!(
            "puff mesh: {} vertices, {} triangles, {} welded",
            self.buffers.vertex_count(),
            self.buffers.triangle_count(),
            welded
        );
        self.buffers
    }
}
