use crate::frame::{compute_frames, Frame};
use crate::types::StrokePoint;

use super::{BaseRing, BuildParams, PuffGeometry, SectionBuilder};

/// Build a tube following `points`. Returns None for fewer than 2 points;
/// callers fall back to [`super::build_dome`].
pub fn build_tube(points: &[StrokePoint], params: &BuildParams) -> Option<PuffGeometry> {
    if points.len() < 2 {
        return None;
    }
    let frames = compute_frames(points);
    let last = points.len() - 1;

    let mut builder = SectionBuilder::new(params, points.len());
    let mut starts = Vec::with_capacity(points.len());
    for (k, (point, frame)) in points.iter().zip(&frames).enumerate() {
        let v = k as f32 / last as f32;
        let start = builder.push_section(point.world_position, frame, |_| v);
        builder.connect_rings(start);
        starts.push(start);
    }

    for k in 0..last {
        link_sections(&mut builder, starts[k], starts[k + 1], &frames[k]);
    }

    let first_frame = &frames[0];
    let base_center = builder.cap_base(starts[0], points[0].world_position, first_frame.normal, 0.0);
    let last_frame = &frames[last];
    let apex = points[last].world_position + last_frame.normal * params.height;
    let apex_center = builder.cap_apex(starts[last], apex, last_frame.normal, 1.0);

    let base_rings = points
        .iter()
        .zip(&frames)
        .map(|(point, frame)| BaseRing {
            center: point.world_position,
            frame: *frame,
        })
        .collect();

    Some(PuffGeometry {
        buffers: builder.finish(),
        tessellation: params.tessellation,
        base_rings,
        base_center,
        apex_center,
    })
}

/// Skin between two neighbouring sections: one quad per ring interval and column
fn link_sections(builder: &mut SectionBuilder<'_>, from: u32, to: u32, frame: &Frame) {
    let tess = builder.params.tessellation;
    for j in 0..tess.segments {
        let outward = builder
            .params
            .ring_offset(frame, builder.params.column_angle(j), 1.0);
        for i in 0..tess.height_segments {
            let a = builder.vertex(from, i, j);
            let b = builder.vertex(to, i, j);
            let c = builder.vertex(to, i + 1, j);
            let d = builder.vertex(from, i + 1, j);

            // Wind so the face points away from the path on either side
            let pa = builder.buffers.position(a);
            let face = (builder.buffers.position(d) - pa).cross(builder.buffers.position(c) - pa);
            if face.dot(outward) >= 0.0 {
                builder.buffers.push_triangle(a, d, c);
                builder.buffers.push_triangle(a, c, b);
            } else {
                builder.buffers.push_triangle(a, b, c);
                builder.buffers.push_triangle(a, c, d);
            }
        }
    }
}
