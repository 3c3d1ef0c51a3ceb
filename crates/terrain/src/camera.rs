//! First-person walker: mouse look, WASD movement, gravity and jumping, with
//! the ground resolved from the [`HeightFieldSampler`] every frame.

use bevy::prelude::*;

use crate::config::{
    BASE_SPEED, EYE_HEIGHT, GRAVITY, JUMP_VELOCITY, MOUSE_SENSITIVITY, PITCH_LIMIT,
    SPAWN_PITCH, SPAWN_POSITION, SPAWN_YAW, SPRINT_MULTIPLIER,
};
use crate::height::HeightFieldSampler;
use crate::input::{Action, InputState};

/// Vertical lifecycle of the walker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lifecycle {
    /// Height is locked to the ground every frame.
    #[default]
    Grounded,
    /// Height follows the jump/gravity integration until it meets the ground.
    Airborne,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    /// Heading in degrees; 0 looks along +X, 90 along +Z.
    pub yaw: f32,
    /// Degrees, clamped to `[-PITCH_LIMIT, PITCH_LIMIT]`.
    pub pitch: f32,
    pub vertical_velocity: f32,
    pub lifecycle: Lifecycle,
}

impl CameraState {
    /// Unit view direction including pitch.
    pub fn look_direction(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
    }
}

/// Tunables for walking, jumping and looking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementParams {
    pub base_speed: f32,
    pub sprint_multiplier: f32,
    pub jump_velocity: f32,
    pub gravity: f32,
    pub eye_height: f32,
    /// Degrees per pixel.
    pub mouse_sensitivity: f32,
}

impl Default for MovementParams {
    fn default() -> Self {
        Self {
            base_speed: BASE_SPEED,
            sprint_multiplier: SPRINT_MULTIPLIER,
            jump_velocity: JUMP_VELOCITY,
            gravity: GRAVITY,
            eye_height: EYE_HEIGHT,
            mouse_sensitivity: MOUSE_SENSITIVITY,
        }
    }
}

/// Horizontal walking basis for `yaw_degrees`: `(forward, right)`.
///
/// Pitch never tilts the walking plane.
pub fn horizontal_basis(yaw_degrees: f32) -> (Vec3, Vec3) {
    let yaw = yaw_degrees.to_radians();
    let forward = Vec3::new(yaw.cos(), 0.0, yaw.sin()).normalize();
    let right = forward.cross(Vec3::Y).normalize();
    (forward, right)
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CameraController {
    pub state: CameraState,
    pub params: MovementParams,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(Vec3::from_array(SPAWN_POSITION), SPAWN_YAW, SPAWN_PITCH)
    }
}

impl CameraController {
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            state: CameraState {
                position,
                yaw,
                pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
                vertical_velocity: 0.0,
                lifecycle: Lifecycle::Grounded,
            },
            params: MovementParams::default(),
        }
    }

    pub fn with_params(mut self, params: MovementParams) -> Self {
        self.params = params;
        self
    }

    /// Eye level when standing at the current horizontal position.
    pub fn standing_height(&self, sampler: &HeightFieldSampler) -> f32 {
        sampler.height(self.state.position.x, self.state.position.z) + self.params.eye_height
    }

    /// Put the camera back on the ground, cancelling any jump in progress.
    pub fn snap_to_ground(&mut self, sampler: &HeightFieldSampler) {
        self.state.position.y = self.standing_height(sampler);
        self.state.vertical_velocity = 0.0;
        self.state.lifecycle = Lifecycle::Grounded;
    }

    /// Rotate by a look delta in screen pixels (+y is down, so moving the
    /// mouse up tilts the view up).
    pub fn apply_look(&mut self, delta: Vec2) {
        let s = self.params.mouse_sensitivity;
        self.state.yaw += delta.x * s;
        self.state.pitch = (self.state.pitch - delta.y * s).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Advance one frame.
    ///
    /// Drains the look accumulator and the jump edge from `input`; held
    /// actions are left untouched.
    pub fn update(&mut self, dt: f32, input: &mut InputState, sampler: &HeightFieldSampler) {
        let look = input.take_look();
        self.apply_look(look);

        if input.take_jump() && self.state.lifecycle == Lifecycle::Grounded {
            self.state.lifecycle = Lifecycle::Airborne;
            self.state.vertical_velocity = self.params.jump_velocity;
        }

        let (forward, right) = horizontal_basis(self.state.yaw);
        let mut speed = self.params.base_speed;
        if input.is_held(Action::Sprint) {
            speed *= self.params.sprint_multiplier;
        }
        let step = speed * dt;

        // Each direction contributes independently; diagonals are faster.
        let mut motion = Vec3::ZERO;
        if input.is_held(Action::MoveForward) {
            motion += forward * step;
        }
        if input.is_held(Action::MoveBack) {
            motion -= forward * step;
        }
        if input.is_held(Action::MoveLeft) {
            motion -= right * step;
        }
        if input.is_held(Action::MoveRight) {
            motion += right * step;
        }
        self.state.position += motion;

        let ground = self.standing_height(sampler);
        match self.state.lifecycle {
            Lifecycle::Grounded => {
                self.state.position.y = ground;
            }
            Lifecycle::Airborne => {
                self.state.position.y += self.state.vertical_velocity * dt;
                self.state.vertical_velocity -= self.params.gravity * dt;
                if self.state.position.y <= ground {
                    self.state.position.y = ground;
                    self.state.vertical_velocity = 0.0;
                    self.state.lifecycle = Lifecycle::Grounded;
                }
            }
        }
    }
}

/// System: step the walker once per frame with the virtual-clock delta.
pub fn update_camera_controller(
    time: Res<Time>,
    sampler: Res<HeightFieldSampler>,
    mut input: ResMut<InputState>,
    mut controller: ResMut<CameraController>,
) {
    controller.update(time.delta_secs(), &mut input, &sampler);
}
