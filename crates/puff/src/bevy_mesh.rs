//! Conversion into bevy meshes

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;

use crate::hair::HairGroup;
use crate::mesh::MeshBuffers;

impl MeshBuffers {
    /// Convert to an indexed triangle-list bevy mesh
    pub fn to_bevy_mesh(&self) -> Mesh {
        let mut mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        );
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, self.positions.clone());
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, self.normals.clone());
        mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, self.uvs.clone());
        mesh.insert_indices(Indices::U32(self.indices.clone()));
        mesh
    }
}

impl HairGroup {
    /// Strand template plus one transform per strand, for instanced spawning
    pub fn to_bevy_instances(&self) -> (Mesh, Vec<Transform>) {
        let transforms = self
            .strands
            .iter()
            .map(|strand| Transform::from_matrix(strand.transform()))
            .collect();
        (self.template.to_bevy_mesh(), transforms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_bevy_mesh_counts() {
        let mut buffers = MeshBuffers::new();
        let a = buffers.push_vertex(Vec3::ZERO, Vec3::Y, Vec2::ZERO);
        let b = buffers.push_vertex(Vec3::X, Vec3::Y, Vec2::X);
        let c = buffers.push_vertex(Vec3::Z, Vec3::Y, Vec2::Y);
        buffers.push_triangle(a, c, b);

        let mesh = buffers.to_bevy_mesh();
        assert_eq!(mesh.count_vertices(), 3);
        assert_eq!(mesh.indices().map(|i| i.len()), Some(3));
    }
}
