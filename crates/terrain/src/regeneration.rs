//! Building and publishing the terrain.
//!
//! The sampler and the mesh are always replaced together, in one system, so
//! the camera never collides against a surface different from the one drawn.

use std::sync::Arc;

use bevy::prelude::*;

use crate::camera::{CameraController, Lifecycle};
use crate::height::HeightFieldSampler;
use crate::mesh::{build_terrain_mesh, TerrainMesh};
use crate::settings::TerrainSettings;

/// Request a full rebuild from the current [`TerrainSettings`].
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct RegenerateTerrain;

/// Sent after a new mesh has been published.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainRegenerated {
    pub generation: u64,
    pub vertex_count: usize,
    pub index_count: usize,
}

/// The mesh currently handed to the renderer.
///
/// Publishing swaps the whole `Arc`; readers holding the previous one keep a
/// complete old mesh.
#[derive(Resource, Debug, Clone, Default)]
pub struct PublishedTerrain {
    mesh: Arc<TerrainMesh>,
    generation: u64,
}

impl PublishedTerrain {
    pub fn mesh(&self) -> &TerrainMesh {
        &self.mesh
    }

    /// Shared handle to the published mesh.
    pub fn shared(&self) -> Arc<TerrainMesh> {
        Arc::clone(&self.mesh)
    }

    /// Incremented on every publish; 0 means nothing was published yet.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn publish(&mut self, mesh: TerrainMesh) -> u64 {
        self.mesh = Arc::new(mesh);
        self.generation += 1;
        self.generation
    }
}

/// Build a sampler and its mesh from validated settings.
pub fn build_terrain(settings: &TerrainSettings) -> (HeightFieldSampler, TerrainMesh) {
    let sampler = HeightFieldSampler::from_settings(settings);
    let mesh = build_terrain_mesh(&sampler, settings.texture_tile);
    (sampler, mesh)
}

/// Startup: build the first terrain and stand the camera on it.
pub fn init_terrain(
    mut settings: ResMut<TerrainSettings>,
    mut sampler: ResMut<HeightFieldSampler>,
    mut published: ResMut<PublishedTerrain>,
    mut controller: ResMut<CameraController>,
    mut regenerated: EventWriter<TerrainRegenerated>,
) {
    if let Err(e) = settings.validate() {
        warn!("Invalid terrain settings at startup ({e}); using defaults");
        *settings = TerrainSettings::default();
    }
    let (new_sampler, mesh) = build_terrain(&settings);
    *sampler = new_sampler;
    controller.snap_to_ground(&sampler);
    publish(&mut published, mesh, &mut regenerated);
}

/// Handle pending [`RegenerateTerrain`] requests. Several requests in one
/// frame produce a single rebuild.
///
/// Runs after the walker has stepped, so a grounded camera is re-locked onto
/// the new surface here; an airborne one lands on it later.
pub fn apply_regeneration(
    mut requests: EventReader<RegenerateTerrain>,
    settings: Res<TerrainSettings>,
    mut sampler: ResMut<HeightFieldSampler>,
    mut published: ResMut<PublishedTerrain>,
    mut controller: ResMut<CameraController>,
    mut regenerated: EventWriter<TerrainRegenerated>,
) {
    if requests.read().count() == 0 {
        return;
    }
    if let Err(e) = settings.validate() {
        warn!("Terrain regeneration rejected: {e}");
        return;
    }
    let (new_sampler, mesh) = build_terrain(&settings);
    *sampler = new_sampler;
    if controller.state.lifecycle == Lifecycle::Grounded {
        controller.snap_to_ground(&sampler);
    }
    publish(&mut published, mesh, &mut regenerated);
}

fn publish(
    published: &mut PublishedTerrain,
    mesh: TerrainMesh,
    regenerated: &mut EventWriter<TerrainRegenerated>,
) {
    let vertex_count = mesh.vertices.len();
    let index_count = mesh.indices.len();
    let grid_size = mesh.grid_size;
    let generation = published.publish(mesh);
    info!(
        "Terrain generation {generation}: {grid_size}x{grid_size} grid, {vertex_count} vertices, {index_count} indices"
    );
    regenerated.send(TerrainRegenerated {
        generation,
        vertex_count,
        index_count,
    });
}
