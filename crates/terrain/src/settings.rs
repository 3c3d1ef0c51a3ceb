//! User-editable terrain configuration and its validation.

use std::fmt;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_GRID_SIZE, DEFAULT_HEIGHT_SCALE, DEFAULT_NOISE_FREQUENCY, DEFAULT_TERRAIN_TEXTURE,
    DEFAULT_TEXTURE_TILE, DEFAULT_WORLD_SCALE, MAX_GRID_SIZE, MIN_GRID_SIZE,
};

/// Configuration surface edited by the overlay or loaded from a JSON file.
///
/// Edits take effect on the next [`crate::RegenerateTerrain`] request; until
/// then the active [`crate::HeightFieldSampler`] keeps the old values.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    /// Vertices per side, within `MIN_GRID_SIZE..=MAX_GRID_SIZE`.
    pub grid_size: u32,
    /// World spacing between vertices (must be positive).
    pub world_scale: f32,
    pub height_scale: f32,
    /// Texture repetitions across the grid.
    pub texture_tile: f32,
    pub noise_frequency: f32,
    pub terrain_texture_path: String,
    /// Equirectangular sky image, if any.
    pub panorama_path: Option<String>,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            world_scale: DEFAULT_WORLD_SCALE,
            height_scale: DEFAULT_HEIGHT_SCALE,
            texture_tile: DEFAULT_TEXTURE_TILE,
            noise_frequency: DEFAULT_NOISE_FREQUENCY,
            terrain_texture_path: DEFAULT_TERRAIN_TEXTURE.to_string(),
            panorama_path: None,
        }
    }
}

impl TerrainSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.grid_size < MIN_GRID_SIZE {
            return Err(SettingsError::GridTooSmall(self.grid_size));
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(SettingsError::GridTooLarge(self.grid_size));
        }
        if !self.world_scale.is_finite() || self.world_scale <= 0.0 {
            return Err(SettingsError::NonPositiveScale(self.world_scale));
        }
        Ok(())
    }

    /// Parse settings from JSON text and validate them.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// Errors produced while loading or validating [`TerrainSettings`].
#[derive(Debug)]
pub enum SettingsError {
    /// The settings file could not be read.
    Io(std::io::Error),
    /// The settings file is not valid JSON for [`TerrainSettings`].
    Parse(String),
    /// Grid must have at least two vertices per side.
    GridTooSmall(u32),
    GridTooLarge(u32),
    /// World scale must be finite and strictly positive.
    NonPositiveScale(f32),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "I/O error: {e}"),
            SettingsError::Parse(msg) => write!(f, "Parse error: {msg}"),
            SettingsError::GridTooSmall(n) => {
                write!(f, "Grid size {n} is too small (minimum is {MIN_GRID_SIZE})")
            }
            SettingsError::GridTooLarge(n) => {
                write!(f, "Grid size {n} is too large (maximum is {MAX_GRID_SIZE})")
            }
            SettingsError::NonPositiveScale(s) => {
                write!(f, "World scale {s} must be greater than zero")
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(TerrainSettings::default().validate().is_ok());
    }

    #[test]
    fn test_grid_size_below_two_rejected() {
        for n in [0, 1] {
            let settings = TerrainSettings {
                grid_size: n,
                ..Default::default()
            };
            assert!(matches!(
                settings.validate(),
                Err(SettingsError::GridTooSmall(found)) if found == n
            ));
        }
        let two = TerrainSettings {
            grid_size: 2,
            ..Default::default()
        };
        assert!(two.validate().is_ok());
    }

    #[test]
    fn test_bad_world_scale_rejected() {
        for scale in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let settings = TerrainSettings {
                world_scale: scale,
                ..Default::default()
            };
            assert!(
                matches!(settings.validate(), Err(SettingsError::NonPositiveScale(_))),
                "scale {scale} accepted"
            );
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = TerrainSettings::from_json_str(r#"{ "grid_size": 64 }"#)
            .expect("partial settings should parse");
        assert_eq!(settings.grid_size, 64);
        assert_eq!(settings.height_scale, DEFAULT_HEIGHT_SCALE);
        assert_eq!(settings.terrain_texture_path, DEFAULT_TERRAIN_TEXTURE);
        assert_eq!(settings.panorama_path, None);
    }

    #[test]
    fn test_json_with_invalid_values_rejected() {
        let err = TerrainSettings::from_json_str(r#"{ "grid_size": 1 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::GridTooSmall(1)));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = TerrainSettings::from_json_str("{ grid_size: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
        assert!(format!("{err}").contains("Parse error"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TerrainSettings::from_json_file("/definitely/not/here/terrain.json")
            .unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_grid_size_above_max_rejected() {
        let at_max = TerrainSettings {
            grid_size: MAX_GRID_SIZE,
            ..Default::default()
        };
        assert!(at_max.validate().is_ok());

        let over = TerrainSettings {
            grid_size: MAX_GRID_SIZE + 1,
            ..Default::default()
        };
        assert!(matches!(
            over.validate(),
            Err(SettingsError::GridTooLarge(n)) if n == MAX_GRID_SIZE + 1
        ));
    }

    #[test]
    fn test_json_with_huge_grid_rejected() {
        let err = TerrainSettings::from_json_str(r#"{ "grid_size": 100000 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::GridTooLarge(100000)));
    }

    #[test]
    fn test_saved_json_reloads() {
        let settings = TerrainSettings {
            grid_size: 100,
            panorama_path: Some("sky.hdr".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string_pretty(&settings).expect("serialize");
        assert_eq!(TerrainSettings::from_json_str(&json).expect("reload"), settings);
    }

    #[test]
    fn test_error_display() {
        let msg = format!("{}", SettingsError::GridTooSmall(1));
        assert!(msg.contains("minimum is 2"), "got: {msg}");
        let msg = format!("{}", SettingsError::GridTooLarge(4096));
        assert!(msg.contains("maximum is 2048"), "got: {msg}");
        let msg = format!("{}", SettingsError::NonPositiveScale(-2.0));
        assert!(msg.contains("-2"), "got: {msg}");
    }
}
