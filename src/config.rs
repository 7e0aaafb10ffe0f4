//! Cursor configuration
//!
//! Snap steps and height floors are configuration, not drag state: they
//! are read at each drag step and never change because of a drag.
//! Stored as RON so build-mode presets can ship next to level files.

use std::path::Path;

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::cursor::CursorKindTag;

/// Error type for configuration loading and saving
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Tunables for one cursor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Linear grid step for dragged positions (0 = no snapping)
    pub snap_interval: f32,
    /// Yaw step in degrees for rotate drags (0 = no snapping)
    pub rotation_snap_degrees: f32,
    /// Lowest height a vertical drag may reach
    pub min_height: f32,
    /// Yaw change (degrees) below which no snap cue is played
    pub rotation_cue_epsilon: f32,
    /// Visual template for the virtual grid plane; None builds a plain quad
    pub grid_template: Option<String>,
    /// Grid plane edge length when no buildable volume is known
    pub grid_fallback_size: f32,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            snap_interval: 0.5,
            rotation_snap_degrees: 15.0,
            min_height: 0.0,
            rotation_cue_epsilon: 0.01,
            grid_template: None,
            grid_fallback_size: 20.0,
        }
    }
}

impl CursorConfig {
    /// Defaults for a given cursor kind. Control points keep a small
    /// floor so they never sink into the ground they shape.
    pub fn for_kind(kind: CursorKindTag) -> Self {
        let min_height = match kind {
            CursorKindTag::Object => 0.0,
            CursorKindTag::FullControlPoint
            | CursorKindTag::GroundControlPoint
            | CursorKindTag::HeightControlPoint => 0.1,
        };
        Self {
            min_height,
            ..Self::default()
        }
    }

    pub fn with_snap_interval(mut self, snap_interval: f32) -> Self {
        self.snap_interval = snap_interval;
        self
    }

    pub fn with_rotation_snap(mut self, degrees: f32) -> Self {
        self.rotation_snap_degrees = degrees;
        self
    }

    pub fn with_min_height(mut self, min_height: f32) -> Self {
        self.min_height = min_height;
        self
    }

    /// Reject values the drag math can't work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("snap_interval", self.snap_interval),
            ("rotation_snap_degrees", self.rotation_snap_degrees),
            ("rotation_cue_epsilon", self.rotation_cue_epsilon),
            ("grid_fallback_size", self.grid_fallback_size),
        ];
        for (name, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be finite and >= 0 (got {})",
                    name, value
                )));
            }
        }
        if !self.min_height.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "min_height must be finite (got {})",
                self.min_height
            )));
        }
        Ok(())
    }

    /// Parse and validate a RON document
    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(s)?;
        if let Err(e) = config.validate() {
            tracing::warn!("rejecting cursor config: {}", e);
            return Err(e);
        }
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .struct_names(true);
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_ron_str(&contents)?;
        tracing::debug!(path = %path.display(), "loaded cursor config");
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;
        std::fs::write(path, self.to_ron_string()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_kind_defaults() {
        let object = CursorConfig::for_kind(CursorKindTag::Object);
        assert_eq!(object.min_height, 0.0);
        assert_eq!(object.snap_interval, 0.5);
        assert_eq!(object.rotation_snap_degrees, 15.0);

        let point = CursorConfig::for_kind(CursorKindTag::HeightControlPoint);
        assert!(point.min_height > 0.0);
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let config = CursorConfig::from_ron_str("(snap_interval: 0.25)").unwrap();
        assert_eq!(config.snap_interval, 0.25);
        assert_eq!(config.rotation_snap_degrees, 15.0);
        assert!(config.grid_template.is_none());
    }

    #[test]
    fn test_negative_snap_rejected() {
        let err = CursorConfig::from_ron_str("(snap_interval: -1.0)").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let err = CursorConfig::from_ron_str("not ron at all {").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cursors.ron");

        let config = CursorConfig::for_kind(CursorKindTag::Object)
            .with_snap_interval(1.0)
            .with_rotation_snap(45.0)
            .with_min_height(0.25);
        let config = CursorConfig {
            grid_template: Some("grid_blue".to_string()),
            ..config
        };
        config.save(&path).unwrap();

        let loaded = CursorConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = CursorConfig::load(&dir.path().join("nope.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
