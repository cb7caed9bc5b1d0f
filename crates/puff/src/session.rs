//! Stroke sessions and mesh bookkeeping
//!
//! [`PuffEngine`] owns the active stroke and every mesh it has attached.
//! The caller drives it:
//! 1. `start_stroke` opens a session for a stroke id
//! 2. `add_point_to_stroke` appends surface samples
//! 3. `update_current_stroke` rebuilds a preview from all points so far
//! 4. `finish_stroke` builds the final mesh and closes the session
//!
//! Meshes live in an arena keyed by [`MeshKey`], with the stroke id as a
//! lookup into it. Replacing or deleting a mesh always disposes it first.

use std::collections::HashMap;

use puff_config::EngineConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use slotmap::SlotMap;
use tracing::{debug, info, warn};

use crate::generated::{generate_mesh, GeneratedMesh};
use crate::hair::generate_hair_on;
use crate::scene::{MeshKey, Scene};
use crate::types::{PuffSettings, StrokeId, StrokePoint};

/// Points of the stroke being drawn
#[derive(Debug, Clone)]
struct StrokeSession {
    stroke_id: StrokeId,
    points: Vec<StrokePoint>,
}

/// Puff-print engine instance
pub struct PuffEngine {
    config: EngineConfig,
    /// Active stroke (None when idle)
    session: Option<StrokeSession>,
    meshes: SlotMap<MeshKey, GeneratedMesh>,
    by_stroke: HashMap<StrokeId, MeshKey>,
    /// Hair placement
    rng: StdRng,
}

impl Default for PuffEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl PuffEngine {
    pub fn new(config: EngineConfig) -> Self {
        let rng = match config.hair_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            config,
            session: None,
            meshes: SlotMap::with_key(),
            by_stroke: HashMap::new(),
            rng,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Open a session for `stroke_id`. A still-open session is discarded
    /// together with any preview mesh it attached.
    pub fn start_stroke(&mut self, stroke_id: StrokeId, scene: &mut impl Scene) {
        if let Some(stale) = self.session.take() {
            let removed = self.delete_puff_mesh(stale.stroke_id, scene);
            warn!(
                "start_stroke({}): stroke {} was still open, discarding {} points, preview removed: {}",
                stroke_id,
                stale.stroke_id,
                stale.points.len(),
                removed
            );
        }
        self.session = Some(StrokeSession {
            stroke_id,
            points: Vec::new(),
        });
        debug!("start_stroke({})", stroke_id);
    }

    /// Append a sample to the active stroke. Returns false (and drops the
    /// point) when no stroke is active.
    pub fn add_point_to_stroke(&mut self, point: StrokePoint) -> bool {
        match self.session.as_mut() {
            Some(session) => {
                session.points.push(point);
                true
            }
            None => {
                warn!("add_point_to_stroke: no active stroke, ignoring point");
                false
            }
        }
    }

    /// Rebuild the active stroke's mesh from all points so far and attach it,
    /// replacing the previous preview.
    pub fn update_current_stroke(&mut self, settings: &PuffSettings, scene: &mut impl Scene) -> Option<MeshKey> {
        let Some(session) = self.session.as_ref() else {
            debug!("update_current_stroke: no active stroke, ignoring");
            return None;
        };
        let mesh = generate_mesh(session.stroke_id, &session.points, settings, &self.config)?;
        Some(self.add_puff_mesh_to_scene(mesh, scene))
    }

    /// Build the final mesh for the active stroke, attach it and return to idle
    pub fn finish_stroke(&mut self, settings: &PuffSettings, scene: &mut impl Scene) -> Option<MeshKey> {
        let Some(session) = self.session.take() else {
            warn!("finish_stroke: no active stroke, ignoring");
            return None;
        };
        let Some(mesh) = generate_mesh(session.stroke_id, &session.points, settings, &self.config) else {
            debug!("finish_stroke({}): no points, no mesh", session.stroke_id);
            return None;
        };
        let key = self.add_puff_mesh_to_scene(mesh, scene);
        info!(
            "finish_stroke({}): {} points -> {}",
            session.stroke_id,
            session.points.len(),
            if session.points.len() == 1 { "dome" } else { "tube" }
        );
        Some(key)
    }

    /// Abort the active stroke, removing any preview mesh built for it
    pub fn cancel_stroke(&mut self, scene: &mut impl Scene) {
        let Some(session) = self.session.take() else {
            debug!("cancel_stroke: no active stroke, ignoring");
            return;
        };
        let removed = self.delete_puff_mesh(session.stroke_id, scene);
        info!(
            "cancel_stroke({}): dropped {} points, preview removed: {}",
            session.stroke_id,
            session.points.len(),
            removed
        );
    }

    /// Localize a mesh, grow its hair and attach it. Any mesh already tracked
    /// for the same stroke is disposed and detached first.
    pub fn add_puff_mesh_to_scene(&mut self, mut mesh: GeneratedMesh, scene: &mut impl Scene) -> MeshKey {
        if let Some(previous) = self.by_stroke.remove(&mesh.stroke_id) {
            self.dispose(previous, scene);
        }

        mesh.localize();
        if let Some(mut stale) = mesh.hair.take() {
            stale.release();
        }
        let roots = mesh.hair_roots();
        mesh.hair = generate_hair_on(&mesh.buffers, &roots, &mesh.settings, &self.config, &mut self.rng);

        let stroke_id = mesh.stroke_id;
        let key = self.meshes.insert(mesh);
        self.by_stroke.insert(stroke_id, key);
        if let Some(mesh) = self.meshes.get(key) {
            scene.add(key, mesh);
            debug!("add_puff_mesh_to_scene: stroke {} {:?}", stroke_id, mesh.stats());
        }
        key
    }

    /// Dispose and detach the mesh for `stroke_id`. Returns false if none exists.
    pub fn delete_puff_mesh(&mut self, stroke_id: StrokeId, scene: &mut impl Scene) -> bool {
        match self.by_stroke.remove(&stroke_id) {
            Some(key) => {
                self.dispose(key, scene);
                info!("delete_puff_mesh({})", stroke_id);
                true
            }
            None => false,
        }
    }

    /// Dispose and detach every mesh. Returns how many were removed.
    pub fn clear_all_puff_meshes(&mut self, scene: &mut impl Scene) -> usize {
        let mut count = 0;
        for (key, mut mesh) in self.meshes.drain() {
            scene.remove(key);
            mesh.dispose();
            count += 1;
        }
        self.by_stroke.clear();
        info!("clear_all_puff_meshes: removed {}", count);
        count
    }

    fn dispose(&mut self, key: MeshKey, scene: &mut impl Scene) {
        scene.remove(key);
        if let Some(mut mesh) = self.meshes.remove(key) {
            mesh.dispose();
        }
    }

    /// Every attached mesh
    pub fn puff_meshes(&self) -> impl Iterator<Item = (MeshKey, &GeneratedMesh)> {
        self.meshes.iter()
    }

    pub fn mesh(&self, key: MeshKey) -> Option<&GeneratedMesh> {
        self.meshes.get(key)
    }

    pub fn mesh_for_stroke(&self, stroke_id: StrokeId) -> Option<&GeneratedMesh> {
        self.by_stroke.get(&stroke_id).and_then(|key| self.meshes.get(*key))
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Check if a stroke is currently in progress
    pub fn is_stroking(&self) -> bool {
        self.session.is_some()
    }

    pub fn active_stroke_id(&self) -> Option<StrokeId> {
        self.session.as_ref().map(|s| s.stroke_id)
    }

    /// Points recorded for the active stroke (0 when idle)
    pub fn point_count(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.points.len())
    }
}
