/// Vertices per side of the terrain grid.
pub const DEFAULT_GRID_SIZE: u32 = 512;
pub const MIN_GRID_SIZE: u32 = 2;
/// Largest accepted grid; keeps vertex buffers allocatable and every index
/// inside `u32`.
pub const MAX_GRID_SIZE: u32 = 2048;
/// World spacing between neighbouring grid vertices.
pub const DEFAULT_WORLD_SCALE: f32 = 1.0;
/// Amplitude applied to the raw fractal noise.
pub const DEFAULT_HEIGHT_SCALE: f32 = 6.0;
/// How many times the terrain texture repeats across the whole grid.
pub const DEFAULT_TEXTURE_TILE: f32 = 22.0;
/// Horizontal frequency factor applied before sampling the noise field.
pub const DEFAULT_NOISE_FREQUENCY: f32 = 0.06;
pub const DEFAULT_TERRAIN_TEXTURE: &str = "grass.png";

pub const NOISE_OCTAVES: u32 = 6;
pub const NOISE_GAIN: f32 = 0.5;
pub const NOISE_LACUNARITY: f32 = 2.0;

/// Camera offset above the ground while standing.
pub const EYE_HEIGHT: f32 = 1.7;
/// Walking speed in world units per second.
pub const BASE_SPEED: f32 = 6.0;
pub const SPRINT_MULTIPLIER: f32 = 1.9;
/// Initial upward velocity of a jump (units/s).
pub const JUMP_VELOCITY: f32 = 7.0;
/// Downward acceleration while airborne (units/s²).
pub const GRAVITY: f32 = 18.0;
/// Degrees of rotation per pixel of mouse motion.
pub const MOUSE_SENSITIVITY: f32 = 0.12;
pub const PITCH_LIMIT: f32 = 89.0;

pub const SPAWN_POSITION: [f32; 3] = [0.0, 6.0, 12.0];
pub const SPAWN_YAW: f32 = -90.0;
pub const SPAWN_PITCH: f32 = -15.0;
