//! Edge treatment band
//!
//! A flat ring of quads just below each base ring and slightly wider, so it
//! stays visible around the puff's foot. The kind changes the band's shape:
//! stitched bands are dashed, hemmed bands lift their rim, bound bands are
//! wider and wrap upward, raw bands alternate their outer radius.

use std::ops::Range;

use glam::Vec2;
use puff_config::EngineConfig;
use tracing::debug;

use crate::mesh::normals::{recompute_normals, weld_normals};
use crate::mesh::{BuildParams, MeshBuffers, PuffGeometry};
use crate::types::{EdgeType, PuffSettings};

/// Outer radius of a raw edge's short teeth, as a fraction of the band width
const RAW_SHORT_TOOTH: f32 = 0.6;

/// Band shape for one edge kind
#[derive(Debug, Clone, Copy, PartialEq)]
struct BandShape {
    width: f32,
    rim_lift: f32,
    dashed: bool,
    frayed: bool,
}

impl BandShape {
    fn for_kind(kind: EdgeType, width: f32) -> Option<Self> {
        let plain = Self {
            width,
            rim_lift: 0.0,
            dashed: false,
            frayed: false,
        };
        match kind {
            EdgeType::None => None,
            EdgeType::Stitched => Some(Self {
                dashed: true,
                ..plain
            }),
            EdgeType::Hemmed => Some(Self {
                rim_lift: width * 0.5,
                ..plain
            }),
            EdgeType::Bound => Some(Self {
                width: width * 1.5,
                rim_lift: width,
                ..plain
            }),
            EdgeType::Raw => Some(Self {
                frayed: true,
                ..plain
            }),
        }
    }
}

/// Append the edge band for `settings.edge_type` to the geometry.
///
/// Returns the index range (into `indices`) of the band triangles, or None
/// when the edge type is `none`.
pub fn append_edge_detail(
    geometry: &mut PuffGeometry,
    settings: &PuffSettings,
    params: &BuildParams,
    config: &EngineConfig,
) -> Option<Range<usize>> {
    let shape = BandShape::for_kind(settings.edge_type, settings.edge_width)?;
    let segments = params.tessellation.segments;
    let drop = config.edge_ring_drop * params.height;
    let inner_radius = params.size * config.edge_ring_scale;

    let mut band = MeshBuffers::with_capacity(
        geometry.base_rings.len() * segments as usize * 2,
        geometry.base_rings.len() * segments as usize * 2,
    );

    for ring in &geometry.base_rings {
        let frame = &ring.frame;
        let inner_center = ring.center - frame.normal * drop;
        let outer_center = inner_center + frame.normal * shape.rim_lift;
        let start = band.vertex_count() as u32;

        for j in 0..segments {
            let angle = params.column_angle(j);
            let mut outer_width = shape.width;
            if shape.frayed && j % 2 == 1 {
                outer_width *= RAW_SHORT_TOOTH;
            }
            let outer_radius = (params.size + outer_width) * config.edge_ring_scale;
            let u = j as f32 / segments as f32;

            band.push_vertex(
                inner_center + params.ring_offset(frame, angle, inner_radius),
                frame.normal,
                Vec2::new(u, 0.0),
            );
            band.push_vertex(
                outer_center + params.ring_offset(frame, angle, outer_radius),
                frame.normal,
                Vec2::new(u, 1.0),
            );
        }

        for j in 0..segments {
            if shape.dashed && j % 2 == 1 {
                continue;
            }
            let next = (j + 1) % segments;
            let inner = start + j * 2;
            let outer = inner + 1;
            let inner_next = start + next * 2;
            let outer_next = inner_next + 1;
            // Faces along the surface normal
            band.push_triangle(inner, outer, outer_next);
            band.push_triangle(inner, outer_next, inner_next);
        }
    }

    let first = geometry.buffers.indices.len();
    geometry.buffers.append(band);
    let range = first..geometry.buffers.indices.len();

    recompute_normals(&mut geometry.buffers);
    weld_normals(&mut geometry.buffers, params.weld_tolerance);

    debug!(
        "append_edge_detail: {} band with {} triangles over {} rings",
        settings.edge_type,
        range.len() / 3,
        geometry.base_rings.len()
    );
    Some(range)
}
