//! Generated puff meshes
//!
//! [`generate_mesh`] runs the full build for one stroke: geometry, optional
//! edge band and surface material. The result is in world space until the
//! engine attaches it; hair is added at attach time.

use std::ops::Range;

use glam::Vec3;
use puff_config::EngineConfig;
use tracing::debug;

use crate::edge::append_edge_detail;
use crate::hair::HairGroup;
use crate::material::{build_edge_material, build_surface_material, Material};
use crate::mesh::{build_puff, BuildParams, MeshBuffers};
use crate::tessellation::Tessellation;
use crate::types::{PuffSettings, StrokeId, StrokePoint};

/// Edge band drawn with its own material
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeBand {
    /// Range into `GeneratedMesh::buffers.indices`
    pub indices: Range<usize>,
    pub material: Material,
}

/// Size summary for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeshStats {
    pub vertices: usize,
    pub triangles: usize,
    pub edge_triangles: usize,
    pub hairs: usize,
}

/// One stroke's puff with everything needed to rebuild or decorate it
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedMesh {
    pub stroke_id: StrokeId,
    pub buffers: MeshBuffers,
    pub material: Material,
    pub edge: Option<EdgeBand>,
    /// Added when the mesh is attached to a scene
    pub hair: Option<HairGroup>,
    pub source_points: Vec<StrokePoint>,
    /// World position of the first stroke point
    pub base_position: Vec3,
    /// The mesh's own translation; vertices are relative to it
    pub position: Vec3,
    pub settings: PuffSettings,
    pub tessellation: Tessellation,
    /// Vertex index of the base cap center
    pub base_center: u32,
    /// Vertex index of the apex cap center
    pub apex_center: u32,
}

impl GeneratedMesh {
    /// Move vertices into the frame of `base_position`. Idempotent.
    pub fn localize(&mut self) {
        if self.position == self.base_position {
            return;
        }
        self.buffers.translate(self.position - self.base_position);
        self.position = self.base_position;
    }

    /// Vertices hair may root on: the body surface up to the apex cap.
    /// The base cap center faces into the garment and the edge band hangs
    /// below the base, so both are left out.
    pub fn hair_roots(&self) -> Vec<u32> {
        let body_end = self.apex_center.min(self.buffers.vertex_count().saturating_sub(1) as u32);
        (0..=body_end).filter(|&i| i != self.base_center).collect()
    }

    /// World-space position of a vertex
    pub fn world_position(&self, index: u32) -> Vec3 {
        self.position + self.buffers.position(index)
    }

    pub fn stats(&self) -> MeshStats {
        MeshStats {
            vertices: self.buffers.vertex_count(),
            triangles: self.buffers.triangle_count(),
            edge_triangles: self.edge.as_ref().map_or(0, |e| e.indices.len() / 3),
            hairs: self.hair.as_ref().map_or(0, |h| h.len()),
        }
    }

    /// Release geometry, materials and hair
    pub fn dispose(&mut self) {
        self.buffers.release();
        self.material.release();
        self.edge = None;
        if let Some(mut hair) = self.hair.take() {
            hair.release();
        }
        self.source_points = Vec::new();
    }

    /// True once [`dispose`](Self::dispose) has run
    pub fn is_disposed(&self) -> bool {
        self.buffers.is_empty() && self.hair.is_none()
    }
}

/// Build the world-space puff for a stroke. Returns None for no points.
pub fn generate_mesh(
    stroke_id: StrokeId,
    points: &[StrokePoint],
    settings: &PuffSettings,
    config: &EngineConfig,
) -> Option<GeneratedMesh> {
    let first = points.first()?;
    let params = BuildParams::new(settings, config);
    let mut geometry = build_puff(points, &params)?;

    let edge = append_edge_detail(&mut geometry, settings, &params, config).map(|indices| EdgeBand {
        indices,
        material: build_edge_material(settings),
    });

    let mesh = GeneratedMesh {
        stroke_id,
        buffers: geometry.buffers,
        material: build_surface_material(settings, config),
        edge,
        hair: None,
        source_points: points.to_vec(),
        base_position: first.world_position,
        position: Vec3::ZERO,
        settings: settings.clone(),
        tessellation: geometry.tessellation,
        base_center: geometry.base_center,
        apex_center: geometry.apex_center,
    };
    debug!(
        "generate_mesh: stroke {} from {} points, {:?}",
        stroke_id,
        points.len(),
        mesh.stats()
    );
    Some(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EdgeType;
    use glam::Vec2;

    fn point(p: Vec3) -> StrokePoint {
        StrokePoint::new(Vec2::ZERO, p, Vec3::Y)
    }

    #[test]
    fn test_no_points_no_mesh() {
        assert!(generate_mesh(1, &[], &PuffSettings::default(), &EngineConfig::default()).is_none());
    }

    #[test]
    fn test_localize_keeps_world_positions() {
        let base = Vec3::new(2.0, 1.0, -3.0);
        let mut mesh =
            generate_mesh(1, &[point(base)], &PuffSettings::default(), &EngineConfig::default()).unwrap();
        let before = mesh.world_position(mesh.apex_center);

        mesh.localize();
        assert_eq!(mesh.position, base);
        assert!(mesh.buffers.position(mesh.base_center).length() < 1e-6);
        assert!((mesh.world_position(mesh.apex_center) - before).length() < 1e-5);

        mesh.localize();
        assert_eq!(mesh.position, base);
    }

    #[test]
    fn test_edge_band_material() {
        let settings = PuffSettings {
            edge_type: EdgeType::Stitched,
            edge_color: [0.9, 0.1, 0.1],
            ..Default::default()
        };
        let mesh = generate_mesh(1, &[point(Vec3::ZERO)], &settings, &EngineConfig::default()).unwrap();
        let edge = mesh.edge.as_ref().unwrap();
        assert_eq!(edge.material.base_color, [0.9, 0.1, 0.1]);
        assert_eq!(edge.indices.end, mesh.buffers.indices.len());
        assert!(mesh.stats().edge_triangles > 0);
    }

    #[test]
    fn test_dispose_releases_everything() {
        let mut mesh =
            generate_mesh(7, &[point(Vec3::ZERO)], &PuffSettings::default(), &EngineConfig::default()).unwrap();
        mesh.dispose();
        assert!(mesh.is_disposed());
        assert_eq!(mesh.stats(), MeshStats::default());
        assert!(mesh.source_points.is_empty());
    }
}
