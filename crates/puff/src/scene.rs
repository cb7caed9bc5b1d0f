//! Scene contract
//!
//! The engine only needs a host scene to accept and drop meshes. Each mesh
//! is identified by the arena key the engine stores it under.

use std::collections::HashMap;

use glam::Vec3;
use slotmap::new_key_type;

use crate::generated::GeneratedMesh;
use crate::types::StrokeId;

new_key_type! {
    /// Stable handle of a generated mesh in the engine arena
    pub struct MeshKey;
}

/// Host scene capability
pub trait Scene {
    /// Attach a mesh. The mesh stays owned by the engine; hosts copy what they need.
    fn add(&mut self, key: MeshKey, mesh: &GeneratedMesh);
    /// Detach a mesh previously added under `key`
    fn remove(&mut self, key: MeshKey);
}

/// What [`MemoryScene`] keeps per attached mesh
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub stroke_id: StrokeId,
    pub position: Vec3,
    pub vertex_count: usize,
    pub hair_count: usize,
}

/// Headless scene that records attached meshes
#[derive(Debug, Default)]
pub struct MemoryScene {
    objects: HashMap<MeshKey, SceneObject>,
    /// Total adds, including replaced meshes
    pub added: usize,
    /// Total removes
    pub removed: usize,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn contains(&self, key: MeshKey) -> bool {
        self.objects.contains_key(&key)
    }

    pub fn get(&self, key: MeshKey) -> Option<&SceneObject> {
        self.objects.get(&key)
    }
}

impl Scene for MemoryScene {
    fn add(&mut self, key: MeshKey, mesh: &GeneratedMesh) {
        self.added += 1;
        self.objects.insert(
            key,
            SceneObject {
                stroke_id: mesh.stroke_id,
                position: mesh.position,
                vertex_count: mesh.buffers.vertex_count(),
                hair_count: mesh.hair.as_ref().map_or(0, |h| h.len()),
            },
        );
    }

    fn remove(&mut self, key: MeshKey) {
        if self.objects.remove(&key).is_some() {
            self.removed += 1;
        }
    }
}
