use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;

use terrain::{CameraController, CameraState};

pub const FOV_DEGREES: f32 = 60.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 500.0;

/// Sky blue, shared by the clear colour and the fog so the horizon blends.
pub const SKY_COLOR: Color = Color::srgb(0.53, 0.8, 1.0);
pub const FOG_DENSITY: f32 = 0.008;

/// Marker for the first-person camera entity.
#[derive(Component)]
pub struct WalkerCamera;

/// World transform of the eye described by `state`.
pub fn walker_transform(state: &CameraState) -> Transform {
    Transform::from_translation(state.position).looking_to(state.look_direction(), Vec3::Y)
}

pub fn setup_camera(mut commands: Commands, controller: Res<CameraController>) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: FOV_DEGREES.to_radians(),
            near: NEAR_PLANE,
            far: FAR_PLANE,
            ..default()
        }),
        walker_transform(&controller.state),
        DistanceFog {
            color: SKY_COLOR,
            falloff: FogFalloff::Exponential {
                density: FOG_DENSITY,
            },
            ..default()
        },
        WalkerCamera,
    ));
}

/// System: copy the controller state onto the camera transform.
pub fn sync_camera_transform(
    controller: Res<CameraController>,
    mut query: Query<&mut Transform, With<WalkerCamera>>,
) {
    if !controller.is_changed() {
        return;
    }
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    *transform = walker_transform(&controller.state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrain::Lifecycle;

    fn state(yaw: f32, pitch: f32) -> CameraState {
        CameraState {
            position: Vec3::new(1.0, 2.0, 3.0),
            yaw,
            pitch,
            vertical_velocity: 0.0,
            lifecycle: Lifecycle::Grounded,
        }
    }

    #[test]
    fn test_yaw_minus_90_looks_down_negative_z() {
        let t = walker_transform(&state(-90.0, 0.0));
        let forward = t.forward();
        assert!((forward.z + 1.0).abs() < 1e-5, "forward = {forward:?}");
        assert!(forward.x.abs() < 1e-5);
        assert_eq!(t.translation, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_yaw_zero_looks_down_positive_x() {
        let t = walker_transform(&state(0.0, 0.0));
        assert!((t.forward().x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_pitch_tilts_forward_vector() {
        let t = walker_transform(&state(-90.0, 30.0));
        let forward = t.forward();
        assert!((forward.y - 30.0_f32.to_radians().sin()).abs() < 1e-5);
        // Camera stays upright.
        assert!(t.up().y > 0.0);
    }

    #[test]
    fn test_transform_matches_look_direction() {
        let s = state(37.0, -12.0);
        let t = walker_transform(&s);
        assert!((*t.forward() - s.look_direction()).length() < 1e-5);
    }
}
