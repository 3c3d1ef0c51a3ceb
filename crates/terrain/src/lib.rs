use bevy::prelude::*;

pub mod camera;
pub mod config;
pub mod height;
pub mod input;
pub mod lattice;
pub mod mesh;
pub mod noise;
pub mod regeneration;
pub mod settings;

#[cfg(test)]
pub mod test_harness;

pub use camera::{CameraController, CameraState, Lifecycle, MovementParams};
pub use height::HeightFieldSampler;
pub use input::{Action, InputState};
pub use mesh::{build_terrain_mesh, TerrainMesh, Vertex};
pub use noise::{FractalNoiseField, NoiseConfig};
pub use regeneration::{PublishedTerrain, RegenerateTerrain, TerrainRegenerated};
pub use settings::{SettingsError, TerrainSettings};

/// Per-frame ordering inside `Update`.
///
/// Input collaborators fill [`InputState`] in `Input`; the walker steps in
/// `Camera`; pending rebuilds run in `Regenerate`. Renderers read the results
/// in `PostUpdate`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    Input,
    Camera,
    Regenerate,
}

pub struct TerrainPlugin;

impl Plugin for TerrainPlugin {
    fn build(&self, app: &mut App) {
        // `init_resource` keeps anything the app inserted beforehand, e.g.
        // settings loaded from disk.
        app.init_resource::<TerrainSettings>()
            .init_resource::<HeightFieldSampler>()
            .init_resource::<PublishedTerrain>()
            .init_resource::<CameraController>()
            .init_resource::<InputState>()
            .add_event::<RegenerateTerrain>()
            .add_event::<TerrainRegenerated>()
            .configure_sets(
                Update,
                (FrameSet::Input, FrameSet::Camera, FrameSet::Regenerate).chain(),
            )
            .add_systems(Startup, regeneration::init_terrain)
            .add_systems(
                Update,
                (
                    camera::update_camera_controller.in_set(FrameSet::Camera),
                    regeneration::apply_regeneration.in_set(FrameSet::Regenerate),
                ),
            );
    }
}
