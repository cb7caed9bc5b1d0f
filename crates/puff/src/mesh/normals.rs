//! Vertex normal passes: geometric normals, smooth blending and seam welding

use std::collections::HashMap;

use glam::Vec3;
use tracing::trace;

use super::buffers::MeshBuffers;

/// Area-weighted vertex normals from the triangle faces.
///
/// Vertices that touch no non-degenerate face come back as zero.
pub fn face_vertex_normals(mesh: &MeshBuffers) -> Vec<Vec3> {
    let mut accum = vec![Vec3::ZERO; mesh.vertex_count()];
    for tri in mesh.indices.chunks_exact(3) {
        let (a, b, c) = (tri[0], tri[1], tri[2]);
        let pa = mesh.position(a);
        // Unnormalized cross product weights by triangle area
        let face = (mesh.position(b) - pa).cross(mesh.position(c) - pa);
        accum[a as usize] += face;
        accum[b as usize] += face;
        accum[c as usize] += face;
    }
    accum.into_iter().map(Vec3::normalize_or_zero).collect()
}

/// Recompute mesh normals from faces only
pub fn recompute_normals(mesh: &mut MeshBuffers) {
    let geometric = face_vertex_normals(mesh);
    for (slot, n) in mesh.normals.iter_mut().zip(geometric) {
        if n != Vec3::ZERO {
            *slot = n.to_array();
        }
    }
}

/// Recompute geometric normals and blend them toward `smooth` by `amount`.
///
/// Vertices without a usable face normal take the smooth normal as-is.
pub fn blend_normals(mesh: &mut MeshBuffers, smooth: &[Vec3], amount: f32) {
    let amount = amount.clamp(0.0, 1.0);
    let geometric = face_vertex_normals(mesh);
    for (i, slot) in mesh.normals.iter_mut().enumerate() {
        let target = smooth.get(i).copied().unwrap_or(Vec3::ZERO);
        let n = if geometric[i] == Vec3::ZERO {
            target
        } else {
            geometric[i].lerp(target, amount)
        };
        if let Some(n) = n.try_normalize() {
            *slot = n.to_array();
        }
    }
}

/// Average normals of vertices sharing a position (within `tolerance`).
///
/// Returns the number of vertices that were merged with at least one other.
pub fn weld_normals(mesh: &mut MeshBuffers, tolerance: f32) -> usize {
    let quantize = |p: &[f32; 3]| -> [i64; 3] {
        [
            (p[0] / tolerance).round() as i64,
            (p[1] / tolerance).round() as i64,
            (p[2] / tolerance).round() as i64,
        ]
    };

    let mut groups: HashMap<[i64; 3], Vec<usize>> = HashMap::new();
    for (i, p) in mesh.positions.iter().enumerate() {
        groups.entry(quantize(p)).or_default().push(i);
    }

    let mut welded = 0;
    for members in groups.values().filter(|m| m.len() > 1) {
        let sum: Vec3 = members
            .iter()
            .map(|&i| Vec3::from_array(mesh.normals[i]))
            .sum();
        let Some(average) = sum.try_normalize() else {
            continue;
        };
        for &i in members {
            mesh.normals[i] = average.to_array();
        }
        welded += members.len();
    }

    trace!(
        "weld_normals: {} vertices in {} position groups",
        welded,
        groups.len()
    );
    welded
}
