use crate::frame::Frame;
use crate::types::StrokePoint;

use super::{BaseRing, BuildParams, PuffGeometry, SectionBuilder};

/// Build a single-point dome
///
/// Vertex layout: `(height_segments + 1) * segments` ring vertices, then the
/// base cap center, then the apex.
pub fn build_dome(point: &StrokePoint, params: &BuildParams) -> PuffGeometry {
    let frame = Frame::from_normal(point.normal);
    let base = point.world_position;

    let mut builder = SectionBuilder::new(params, 1);
    let start = builder.push_section(base, &frame, |ratio| ratio);
    builder.connect_rings(start);
    let base_center = builder.cap_base(start, base, frame.normal, 0.0);
    let apex_center = builder.cap_apex(start, base + frame.normal * params.height, frame.normal, 1.0);

    PuffGeometry {
        buffers: builder.finish(),
        tessellation: params.tessellation,
        base_rings: vec![BaseRing {
            center: base,
            frame,
        }],
        base_center,
        apex_center,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tessellation::Tessellation;
    use crate::types::{CrossSection, DetailLevel, PuffSettings, TopShape};
    use glam::{Vec2, Vec3};
    use puff_config::EngineConfig;

    fn params(settings: &PuffSettings) -> BuildParams {
        BuildParams::new(settings, &EngineConfig::default())
    }

    fn origin_point() -> StrokePoint {
        StrokePoint::new(Vec2::ZERO, Vec3::new(1.0, 2.0, 3.0), Vec3::Y)
    }

    #[test]
    fn test_vertex_count_formula() {
        for level in [DetailLevel::Low, DetailLevel::Medium, DetailLevel::High] {
            let settings = PuffSettings {
                detail_level: level,
                ..Default::default()
            };
            let p = params(&settings);
            let dome = build_dome(&origin_point(), &p);
            let Tessellation {
                segments,
                height_segments,
            } = p.tessellation;
            assert_eq!(
                dome.buffers.vertex_count(),
                ((height_segments + 1) * segments + 2) as usize
            );
            // Ring quads plus two fans
            assert_eq!(
                dome.buffers.triangle_count(),
                (height_segments * segments * 2 + segments * 2) as usize
            );
        }
    }

    #[test]
    fn test_cap_centers() {
        let settings = PuffSettings::default();
        let point = origin_point();
        let dome = build_dome(&point, &params(&settings));
        assert_eq!(dome.buffers.position(dome.base_center), point.world_position);
        let apex = dome.buffers.position(dome.apex_center);
        assert!((apex - (point.world_position + Vec3::Y * settings.height)).length() < 1e-6);
    }

    #[test]
    fn test_base_ring_radius_and_normals() {
        let settings = PuffSettings {
            size: 0.4,
            ..Default::default()
        };
        let point = origin_point();
        let dome = build_dome(&point, &params(&settings));
        let segments = dome.tessellation.segments;
        for j in 0..segments {
            let p = dome.buffers.position(j);
            let r = (p - point.world_position).length();
            assert!((r - 0.4).abs() < 1e-4);
        }
        for n in &dome.buffers.normals {
            let n = Vec3::from_array(*n);
            assert!(n.is_finite());
            assert!((n.length() - 1.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_side_normals_point_outward() {
        let settings = PuffSettings {
            smoothness: 0.0,
            ..Default::default()
        };
        let point = origin_point();
        let dome = build_dome(&point, &params(&settings));
        let segments = dome.tessellation.segments;
        // Second ring sits on the dome's flank
        for j in 0..segments {
            let index = segments + j;
            let radial = dome.buffers.position(index) - point.world_position;
            let radial = Vec3::new(radial.x, 0.0, radial.z).normalize();
            assert!(dome.buffers.normal(index).dot(radial) > 0.0);
        }
    }

    #[test]
    fn test_flat_top_keeps_open_ring() {
        let settings = PuffSettings {
            top_shape: TopShape::Flat,
            cross_section: CrossSection::Square,
            ..Default::default()
        };
        let point = origin_point();
        let dome = build_dome(&point, &params(&settings));
        let tess = dome.tessellation;
        let top_vertex = dome.buffers.position(tess.height_segments * tess.segments);
        let apex = dome.buffers.position(dome.apex_center);
        // Top ring lies in the apex plane but away from its center
        assert!((top_vertex.y - apex.y).abs() < 1e-5);
        assert!((top_vertex - apex).length() > 1e-3);
    }

    #[test]
    fn test_uv_layout() {
        let dome = build_dome(&origin_point(), &params(&PuffSettings::default()));
        let segments = dome.tessellation.segments as usize;
        assert_eq!(dome.buffers.uvs[0], [0.0, 0.0]);
        assert_eq!(dome.buffers.uvs[1][0], 1.0 / segments as f32);
        let last_ring = dome.tessellation.height_segments as usize * segments;
        assert_eq!(dome.buffers.uvs[last_ring][1], 1.0);
    }

    #[test]
    fn test_ring_seam_wraps_to_first_column() {
        let dome = build_dome(&origin_point(), &params(&PuffSettings::default()));
        let segments = dome.tessellation.segments;
        let ring_vertices = ((dome.tessellation.height_segments + 1) * segments) as usize;
        assert!(dome.buffers.uvs[..ring_vertices].iter().all(|uv| uv[0] >= 0.0 && uv[0] < 1.0));

        // Closing quad of the first ring pair: (s-1, 0, s)
        let closing = 6 * (segments as usize - 1);
        let triangle = &dome.buffers.indices[closing..closing + 3];
        assert_eq!(triangle, &[segments - 1, 0, segments]);
        let last_u = dome.buffers.uvs[segments as usize - 1][0];
        assert!((last_u - (segments - 1) as f32 / segments as f32).abs() < 1e-6);
        assert_eq!(dome.buffers.uvs[0][0], 0.0);
    }
}
