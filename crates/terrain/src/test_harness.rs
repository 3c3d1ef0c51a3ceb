//! # TestTerrain — headless harness for the terrain core
//!
//! Wraps `bevy::app::App` + [`TerrainPlugin`] with a fixed frame duration so
//! integration tests can drive the walker and regeneration without a window.

use std::time::Duration;

use bevy::app::App;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::camera::{CameraController, CameraState};
use crate::height::HeightFieldSampler;
use crate::input::{Action, InputState};
use crate::regeneration::{PublishedTerrain, RegenerateTerrain, TerrainRegenerated};
use crate::settings::TerrainSettings;
use crate::TerrainPlugin;

/// Fixed step used by every harness tick.
pub const TEST_FRAME: Duration = Duration::from_micros(16_667);

pub struct TestTerrain {
    app: App,
}

impl TestTerrain {
    /// Default settings with a small grid so tests stay fast.
    pub fn new() -> Self {
        Self::with_settings(TerrainSettings {
            grid_size: 32,
            ..Default::default()
        })
    }

    pub fn with_settings(settings: TerrainSettings) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(TEST_FRAME));
        app.insert_resource(settings);
        app.add_plugins(TerrainPlugin);
        // Run Startup so the first terrain is published.
        app.update();
        Self { app }
    }

    /// Place the walker before the next tick.
    pub fn with_camera(mut self, position: Vec3, yaw: f32, pitch: f32) -> Self {
        let params = self.controller().params;
        self.app
            .insert_resource(CameraController::new(position, yaw, pitch).with_params(params));
        self
    }

    pub fn tick(&mut self, frames: u32) {
        for _ in 0..frames {
            self.app.update();
        }
    }

    pub fn press(&mut self, action: Action) {
        self.input_mut().press(action);
    }

    pub fn release(&mut self, action: Action) {
        self.input_mut().release(action);
    }

    pub fn push_look(&mut self, dx: f32, dy: f32) {
        self.input_mut().push_look(dx, dy);
    }

    pub fn settings_mut(&mut self) -> Mut<'_, TerrainSettings> {
        self.app.world_mut().resource_mut::<TerrainSettings>()
    }

    pub fn request_regeneration(&mut self) {
        self.app.world_mut().send_event(RegenerateTerrain);
    }

    pub fn camera(&self) -> CameraState {
        self.controller().state
    }

    pub fn controller(&self) -> &CameraController {
        self.app.world().resource::<CameraController>()
    }

    pub fn sampler(&self) -> &HeightFieldSampler {
        self.app.world().resource::<HeightFieldSampler>()
    }

    pub fn published(&self) -> &PublishedTerrain {
        self.app.world().resource::<PublishedTerrain>()
    }

    /// Regeneration notices sent during the most recent tick.
    pub fn regenerated_events(&self) -> Vec<TerrainRegenerated> {
        self.app
            .world()
            .resource::<Events<TerrainRegenerated>>()
            .iter_current_update_events()
            .copied()
            .collect()
    }

    /// Eye level at the walker's current horizontal position.
    pub fn standing_height(&self) -> f32 {
        self.controller().standing_height(self.sampler())
    }

    fn input_mut(&mut self) -> Mut<'_, InputState> {
        self.app.world_mut().resource_mut::<InputState>()
    }
}

impl Default for TestTerrain {
    fn default() -> Self {
        Self::new()
    }
}
