//! Configuration system
//!
//! Configuration files are TOML or RON, selected by file extension.

pub use serde::{Serialize, Deserialize};

use crate::input::MouseButton;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Load configuration from file, falling back to defaults when it is missing
    fn load_or_default(path: &str) -> Result<Self, ConfigError> {
        if std::path::Path::new(path).exists() {
            Self::load_from_file(path)
        } else {
            log::info!("No config at {}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Default parameters for newly attached cameras
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Vertical field of view in degrees
    pub field_of_view: f32,
    /// Near plane distance
    pub near_plane: f32,
    /// Far plane distance
    pub far_plane: f32,
    /// Colour used when drawing debug frustums (RGBA)
    pub debug_color: [f32; 4],
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            field_of_view: 60.0,
            near_plane: 1.0,
            far_plane: 1000.0,
            debug_color: [0.0, 1.0, 0.0, 1.0],
        }
    }
}

/// Scene manager configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Path the scene document is saved to and loaded from
    pub scene_path: String,
    /// Viewport width in pixels (screen-space picking)
    pub viewport_width: u32,
    /// Viewport height in pixels (screen-space picking)
    pub viewport_height: u32,
    /// Mouse button that triggers a pick when pressed
    pub pick_button: MouseButton,
    /// Defaults for new cameras
    pub camera: CameraSettings,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            scene_path: "Scene.json".to_string(),
            viewport_width: 1280,
            viewport_height: 1024,
            pick_button: MouseButton::Right,
            camera: CameraSettings::default(),
        }
    }
}

impl SceneConfig {
    /// Viewport aspect ratio (width / height)
    pub fn aspect_ratio(&self) -> f32 {
        if self.viewport_height == 0 {
            1.0
        } else {
            self.viewport_width as f32 / self.viewport_height as f32
        }
    }
}

impl Config for SceneConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("scene_engine_{}_{}", std::process::id(), name))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn test_toml_roundtrip() {
        let path = temp_path("config.toml");
        let mut config = SceneConfig::default();
        config.viewport_width = 800;
        config.pick_button = MouseButton::Left;

        config.save_to_file(&path).unwrap();
        let loaded = SceneConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_ron_roundtrip() {
        let path = temp_path("config.ron");
        let mut config = SceneConfig::default();
        config.camera.field_of_view = 75.0;

        config.save_to_file(&path).unwrap();
        let loaded = SceneConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: SceneConfig = toml::from_str("viewport_width = 640").unwrap();
        assert_eq!(config.viewport_width, 640);
        assert_eq!(config.viewport_height, 1024);
        assert_eq!(config.camera, CameraSettings::default());
    }

    #[test]
    fn test_unsupported_format() {
        let result = SceneConfig::default().save_to_file("config.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let config = SceneConfig::load_or_default(&temp_path("missing.toml")).unwrap();
        assert_eq!(config, SceneConfig::default());
    }
}
