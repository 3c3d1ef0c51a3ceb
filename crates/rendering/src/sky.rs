//! Panorama sky: an unlit sphere around the camera, visible from inside.

use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;

use terrain::CameraController;

use crate::camera::FAR_PLANE;
use crate::textures::TerrainTextures;

/// Inside the far plane so the sphere is never clipped.
pub const SKY_RADIUS: f32 = FAR_PLANE * 0.9;

#[derive(Component)]
pub struct SkySphere;

pub fn spawn_sky_sphere(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(SKY_RADIUS).mesh().uv(64, 32))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            fog_enabled: false,
            cull_mode: None,
            ..default()
        })),
        // Mirror horizontally so the panorama reads correctly from inside.
        Transform::from_scale(Vec3::new(-1.0, 1.0, 1.0)),
        Visibility::Hidden,
        NotShadowCaster,
        SkySphere,
    ));
}

/// Keep the sphere centred on the eye.
pub fn follow_camera(
    controller: Res<CameraController>,
    mut query: Query<&mut Transform, With<SkySphere>>,
) {
    if !controller.is_changed() {
        return;
    }
    for mut transform in &mut query {
        transform.translation = controller.state.position;
    }
}

/// Show the sky only while a panorama is ready.
pub fn apply_panorama(
    textures: Res<TerrainTextures>,
    mut query: Query<(&MeshMaterial3d<StandardMaterial>, &mut Visibility), With<SkySphere>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !textures.is_changed() {
        return;
    }
    let panorama = textures.panorama.ready_handle();
    for (material, mut visibility) in &mut query {
        *visibility = if panorama.is_some() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if let Some(material) = materials.get_mut(&material.0) {
            material.base_color_texture = panorama.clone();
        }
    }
}
