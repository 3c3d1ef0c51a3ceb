use bevy::prelude::*;

use crate::config::{
    DEFAULT_GRID_SIZE, DEFAULT_HEIGHT_SCALE, DEFAULT_NOISE_FREQUENCY, DEFAULT_WORLD_SCALE,
};
use crate::noise::{FractalNoiseField, NoiseConfig};
use crate::settings::TerrainSettings;

/// The single authoritative height function.
///
/// Both the mesh builder and the camera controller sample this resource, so
/// the rendered ground and the collision ground are always the same surface.
/// It is replaced wholesale on regeneration, never mutated in place.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct HeightFieldSampler {
    pub grid_size: u32,
    pub world_scale: f32,
    pub height_scale: f32,
    /// Horizontal frequency factor applied to grid coordinates.
    pub noise_frequency: f32,
    pub noise: FractalNoiseField,
}

impl Default for HeightFieldSampler {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            world_scale: DEFAULT_WORLD_SCALE,
            height_scale: DEFAULT_HEIGHT_SCALE,
            noise_frequency: DEFAULT_NOISE_FREQUENCY,
            noise: FractalNoiseField::default(),
        }
    }
}

impl HeightFieldSampler {
    pub fn new(grid_size: u32, world_scale: f32, height_scale: f32) -> Self {
        Self {
            grid_size,
            world_scale,
            height_scale,
            ..Default::default()
        }
    }

    pub fn from_settings(settings: &TerrainSettings) -> Self {
        Self {
            grid_size: settings.grid_size,
            world_scale: settings.world_scale,
            height_scale: settings.height_scale,
            noise_frequency: settings.noise_frequency,
            noise: FractalNoiseField::new(NoiseConfig::default()),
        }
    }

    /// Distance from the grid centre to its edge in world units. The grid is
    /// centred on the world origin.
    pub fn half_extent(&self) -> f32 {
        self.grid_size.saturating_sub(1) as f32 * 0.5 * self.world_scale
    }

    /// Terrain height at world position `(world_x, world_z)`.
    pub fn height(&self, world_x: f32, world_z: f32) -> f32 {
        let half = self.half_extent();
        let nx = (world_x + half) / self.world_scale;
        let nz = (world_z + half) / self.world_scale;
        self.noise
            .sample(nx * self.noise_frequency, nz * self.noise_frequency)
            * self.height_scale
    }
}
