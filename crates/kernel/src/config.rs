//! Application configuration, loaded from an optional YAML file.
//!
//! Every section has complete defaults, so an empty file (or none at all)
//! reproduces the stock scene.

use crate::scene::SceneConfig;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::path::{Path, PathBuf};

/// Render-resolution divisors offered by the resolution selector.
pub const RESOLUTION_PRESETS: [u32; 4] = [1, 2, 4, 8];

/// Largest Gaussian kernel the bloom shader accepts.
pub const MAX_BLOOM_KERNEL: u32 = 25;

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration file layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scene: SceneConfig,
    pub controls: ControlsConfig,
    pub post: PostConfig,
    pub display: DisplayConfig,
}

/// Camera control tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Keyboard fly speed, world units per second.
    pub keyboard_movement_speed: f32,
    /// Keyboard/pointer turn rate, radians per second.
    pub roll_speed: f32,
    /// Touch fly speed, world units per second.
    pub tablet_movement_speed: f32,
    /// Start in drag-to-look mode.
    pub drag_to_look: bool,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            keyboard_movement_speed: 1.0,
            roll_speed: PI / 3.0,
            tablet_movement_speed: 1.3,
            drag_to_look: false,
        }
    }
}

/// Post-processing chain parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostConfig {
    pub bloom: BloomSettings,
    pub film: FilmSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloomSettings {
    /// Additive strength of the blurred image.
    pub strength: f32,
    /// Taps per blur direction. Odd, at most [`MAX_BLOOM_KERNEL`].
    pub kernel_size: u32,
    pub sigma: f32,
    /// Edge length of the square blur targets, in pixels.
    pub resolution: u32,
}

impl Default for BloomSettings {
    fn default() -> Self {
        Self {
            strength: 1.25,
            kernel_size: 25,
            sigma: 4.0,
            resolution: 256,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilmSettings {
    pub noise_intensity: f32,
    pub scanline_intensity: f32,
    pub scanline_count: f32,
    pub grayscale: bool,
    /// Film clock advance per composed frame.
    pub time_step: f32,
}

impl Default for FilmSettings {
    fn default() -> Self {
        Self {
            noise_intensity: 0.35,
            scanline_intensity: 0.95,
            scanline_count: 2048.0,
            grayscale: false,
            time_step: 0.01,
        }
    }
}

/// Window and asset settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Initial render-resolution divisor, one of [`RESOLUTION_PRESETS`].
    pub resolution_scale: u32,
    /// Directory holding the scene textures.
    pub asset_dir: PathBuf,
    /// Show the statistics/controls overlay on start.
    pub show_overlay: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            resolution_scale: 2,
            asset_dir: PathBuf::from("assets"),
            show_overlay: true,
        }
    }
}

impl AppConfig {
    /// Read and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&text)?;
        tracing::info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as an empty map.
        let config: Self = if text.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(text)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = self.scene.problems();

        if !RESOLUTION_PRESETS.contains(&self.display.resolution_scale) {
            problems.push(format!(
                "display.resolution_scale must be one of {RESOLUTION_PRESETS:?}, got {}",
                self.display.resolution_scale
            ));
        }
        let bloom = &self.post.bloom;
        if bloom.kernel_size == 0
            || bloom.kernel_size % 2 == 0
            || bloom.kernel_size > MAX_BLOOM_KERNEL
        {
            problems.push(format!(
                "post.bloom.kernel_size must be odd and at most {MAX_BLOOM_KERNEL}, got {}",
                bloom.kernel_size
            ));
        }
        if !(bloom.sigma > 0.0) {
            problems.push(format!("post.bloom.sigma must be positive, got {}", bloom.sigma));
        }
        if bloom.resolution == 0 {
            problems.push("post.bloom.resolution must be non-zero".into());
        }
        if self.controls.keyboard_movement_speed < 0.0 || self.controls.tablet_movement_speed < 0.0
        {
            problems.push("controls movement speeds must not be negative".into());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wormhole_common::Galaxy;

    #[test]
    fn defaults_validate() {
        AppConfig::default().validate().unwrap();
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(AppConfig::from_yaml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_yaml_overrides_only_named_fields() {
        let yaml = "
scene:
  wormhole:
    center: [0.0, 0.0, -10.0]
    radius: 0.5
  start_galaxy: Far
display:
  resolution_scale: 4
";
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.scene.wormhole.radius, 0.5);
        assert_eq!(config.scene.wormhole.center.z, -10.0);
        assert_eq!(config.scene.start_galaxy, Galaxy::Far);
        assert_eq!(config.display.resolution_scale, 4);
        assert_eq!(config.scene.saturn, SceneConfig::default().saturn);
        assert_eq!(config.post, PostConfig::default());
    }

    #[test]
    fn yaml_round_trip_keeps_values() {
        let mut config = AppConfig::default();
        config.controls.drag_to_look = true;
        config.post.film.grayscale = true;
        let text = config.to_yaml().unwrap();
        assert_eq!(AppConfig::from_yaml(&text).unwrap(), config);
    }

    #[test]
    fn rejects_unknown_resolution_and_even_kernel() {
        let err = AppConfig::from_yaml(
            "display:\n  resolution_scale: 3\npost:\n  bloom:\n    kernel_size: 24\n",
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("resolution_scale"));
        assert!(msg.contains("kernel_size"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = AppConfig::load("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("here.yaml"));
    }
}
