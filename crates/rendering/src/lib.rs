use bevy::prelude::*;
use bevy::transform::TransformSystem;

use terrain::FrameSet;

pub mod camera;
pub mod egui_input_guard;
pub mod input;
pub mod sky;
pub mod terrain_render;
pub mod textures;

use input::{CursorCapture, KeyBindings};
use textures::{LoadTexture, TerrainTextures};

/// Direction the sunlight travels in.
pub const LIGHT_DIRECTION: Vec3 = Vec3::new(-0.2, -1.0, -0.3);
pub const LIGHT_COLOR: Color = Color::srgb(1.0, 0.98, 0.9);

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<KeyBindings>()
            .init_resource::<CursorCapture>()
            .init_resource::<TerrainTextures>()
            .add_event::<LoadTexture>()
            .insert_resource(ClearColor(camera::SKY_COLOR))
            .add_systems(
                Startup,
                (
                    camera::setup_camera,
                    setup_lighting,
                    terrain_render::spawn_terrain_surface,
                    sky::spawn_sky_sphere,
                    input::init_cursor_capture,
                    textures::request_initial_textures,
                )
                    .chain()
                    .after(terrain::regeneration::init_terrain),
            )
            .add_systems(
                Update,
                (
                    input::toggle_cursor_capture,
                    input::collect_key_actions,
                    input::collect_mouse_look,
                    input::exit_on_escape,
                )
                    .chain()
                    .in_set(FrameSet::Input),
            )
            .add_systems(
                Update,
                (textures::start_texture_loads, textures::poll_texture_loads).chain(),
            )
            .add_systems(
                PostUpdate,
                (
                    camera::sync_camera_transform,
                    sky::follow_camera,
                    terrain_render::sync_terrain_mesh,
                    terrain_render::apply_terrain_texture,
                    sky::apply_panorama,
                )
                    .before(TransformSystem::TransformPropagate),
            );
    }
}

fn setup_lighting(mut commands: Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.9, 0.95, 1.0),
        brightness: 300.0,
    });

    commands.spawn((
        DirectionalLight {
            color: LIGHT_COLOR,
            illuminance: 10000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::default().looking_to(LIGHT_DIRECTION, Vec3::Y),
    ));
}
