//! Fractal (fBm) value noise built on [`lattice_value`].

use crate::config::{NOISE_GAIN, NOISE_LACUNARITY, NOISE_OCTAVES};
use crate::lattice::lattice_value;

/// Octave schedule for the fractal sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseConfig {
    pub octaves: u32,
    /// Amplitude multiplier applied after each octave.
    pub gain: f32,
    /// Frequency multiplier applied after each octave.
    pub lacunarity: f32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            octaves: NOISE_OCTAVES,
            gain: NOISE_GAIN,
            lacunarity: NOISE_LACUNARITY,
        }
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Smoothstep fade curve `t²(3 − 2t)`.
#[inline]
pub fn fade(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// One octave of value noise: bilinear blend of the four surrounding lattice
/// values, weighted by the fade curve.
pub fn smooth_noise(x: f32, y: f32) -> f32 {
    let x0 = x.floor();
    let y0 = y.floor();
    let ix = x0 as i32;
    let iy = y0 as i32;
    let fx = fade(x - x0);
    let fy = fade(y - y0);

    let v00 = lattice_value(ix, iy);
    let v10 = lattice_value(ix.wrapping_add(1), iy);
    let v01 = lattice_value(ix, iy.wrapping_add(1));
    let v11 = lattice_value(ix.wrapping_add(1), iy.wrapping_add(1));

    let top = lerp(v00, v10, fx);
    let bottom = lerp(v01, v11, fx);
    lerp(top, bottom, fy)
}

/// Continuous 2D noise summed over several octaves.
///
/// The output is not normalized; with the default schedule it stays within
/// roughly `[-2, 2]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FractalNoiseField {
    pub config: NoiseConfig,
}

impl FractalNoiseField {
    pub fn new(config: NoiseConfig) -> Self {
        Self { config }
    }

    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        for _ in 0..self.config.octaves {
            total += amplitude * smooth_noise(x * frequency, y * frequency);
            frequency *= self.config.lacunarity;
            amplitude *= self.config.gain;
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_endpoints() {
        assert_eq!(fade(0.0), 0.0);
        assert_eq!(fade(1.0), 1.0);
        assert_eq!(fade(0.5), 0.5);
    }

    #[test]
    fn test_smooth_noise_hits_lattice_values() {
        for y in -10..10 {
            for x in -10..10 {
                assert_eq!(
                    smooth_noise(x as f32, y as f32),
                    lattice_value(x, y),
                    "mismatch at ({x},{y})"
                );
            }
        }
    }

    #[test]
    fn test_sample_continuous() {
        let field = FractalNoiseField::default();
        let eps = 1e-4;
        let points = [
            (0.3, 0.7),
            (5.5, -2.25),
            (2.9999, 4.0),
            (-7.01, 13.37),
            (15.36, 15.36),
        ];
        for &(x, y) in &points {
            let a = field.sample(x, y);
            let dx = field.sample(x + eps, y);
            let dy = field.sample(x, y + eps);
            assert!((dx - a).abs() < 1e-2, "x jump {} at ({x},{y})", dx - a);
            assert!((dy - a).abs() < 1e-2, "y jump {} at ({x},{y})", dy - a);
        }
    }

    #[test]
    fn test_continuous_across_cell_boundary() {
        let field = FractalNoiseField::default();
        let below = field.sample(3.0 - 1e-4, 1.5);
        let at = field.sample(3.0, 1.5);
        assert!((below - at).abs() < 1e-2);
    }

    #[test]
    fn test_sample_deterministic() {
        let field = FractalNoiseField::default();
        for i in 0..200 {
            let x = i as f32 * 0.173;
            let y = i as f32 * -0.291;
            assert_eq!(field.sample(x, y).to_bits(), field.sample(x, y).to_bits());
        }
    }

    #[test]
    fn test_typical_magnitude() {
        let field = FractalNoiseField::default();
        for i in 0..1000 {
            let v = field.sample(i as f32 * 0.37, i as f32 * 0.11);
            assert!(v.abs() <= 2.0, "sample {v} outside the expected envelope");
        }
    }

    #[test]
    fn test_single_octave_equals_smooth_noise() {
        let field = FractalNoiseField::new(NoiseConfig {
            octaves: 1,
            ..Default::default()
        });
        assert_eq!(field.sample(1.25, 3.75), smooth_noise(1.25, 3.75));
    }

    #[test]
    fn test_zero_octaves_is_flat() {
        let field = FractalNoiseField::new(NoiseConfig {
            octaves: 0,
            ..Default::default()
        });
        assert_eq!(field.sample(4.2, -1.0), 0.0);
    }
}
