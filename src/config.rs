//! Configuration management for the hand actuator

use crate::{
    constants::{
        ACTION_MARKER_RADIUS, DEFAULT_HAND_MODEL_PATH, DEFAULT_HYSTERESIS_DISTANCE,
        DEFAULT_MIN_HAND_PRESENCE, DEFAULT_MOTION_FILTER_FACTOR, DEFAULT_NOISE_FILTER_FACTOR,
        DEFAULT_ZONE_BOTTOM_WIDTH_FRACTION, DEFAULT_ZONE_MARGIN_X_FRACTION, DEFAULT_ZONE_TOP_FRACTION,
        FRAME_HEIGHT, FRAME_WIDTH,
    },
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Camera configuration
    pub camera: CameraConfig,

    /// Active zone configuration
    pub zone: ZoneConfig,

    /// Position filter configuration
    pub filter: FilterConfig,

    /// Landmark detector configuration
    pub detector: DetectorConfig,

    /// Display configuration
    pub display: DisplayConfig,
}

/// Camera device parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera index passed to the capture backend
    pub index: i32,

    /// Requested frame width in pixels
    pub width: i32,

    /// Requested frame height in pixels
    pub height: i32,
}

/// Active zone fractions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    /// Left and right margin as a fraction of the frame width
    pub margin_x_fraction: f64,

    /// Top margin as a fraction of the frame height
    pub top_fraction: f64,

    /// Bottom margin as a fraction of the zone width
    pub bottom_width_fraction: f64,
}

/// Position filter parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Filter type ("hysteresis" or "none")
    pub kind: String,

    /// Divisor applied to movements shorter than the hysteresis distance
    pub noise_factor: f64,

    /// Divisor applied to movements at or beyond the hysteresis distance
    pub motion_factor: f64,

    /// Chebyshev distance in screen pixels separating noise from motion
    pub hysteresis_distance: f64,
}

/// Landmark detector parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Path to the hand landmark ONNX model
    pub model: PathBuf,

    /// Minimum hand presence score (0.0-1.0)
    pub min_presence: f32,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show the annotated camera feed in a window
    pub gui: bool,

    /// Outline the active zone
    pub draw_zone: bool,

    /// Draw the action marker at the index fingertip
    pub draw_marker: bool,

    /// Draw the hand skeleton
    pub draw_skeleton: bool,

    /// Mirror published frames horizontally
    pub mirror: bool,

    /// Radius of the action marker in pixels
    pub marker_radius: i32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: 0,
            width: FRAME_WIDTH,
            height: FRAME_HEIGHT,
        }
    }
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            margin_x_fraction: DEFAULT_ZONE_MARGIN_X_FRACTION,
            top_fraction: DEFAULT_ZONE_TOP_FRACTION,
            bottom_width_fraction: DEFAULT_ZONE_BOTTOM_WIDTH_FRACTION,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            kind: "hysteresis".to_string(),
            noise_factor: DEFAULT_NOISE_FILTER_FACTOR,
            motion_factor: DEFAULT_MOTION_FILTER_FACTOR,
            hysteresis_distance: DEFAULT_HYSTERESIS_DISTANCE,
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model: PathBuf::from(DEFAULT_HAND_MODEL_PATH),
            min_presence: DEFAULT_MIN_HAND_PRESENCE,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            gui: true,
            draw_zone: true,
            draw_marker: true,
            draw_skeleton: true,
            mirror: true,
            marker_radius: ACTION_MARKER_RADIUS,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the YAML is malformed
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` describing the first invalid value
    pub fn validate(&self) -> Result<()> {
        if self.camera.width <= 0 || self.camera.height <= 0 {
            return Err(Error::ConfigError(format!(
                "Camera resolution must be positive, got {}x{}",
                self.camera.width, self.camera.height
            )));
        }

        if !(0.0..0.5).contains(&self.zone.margin_x_fraction) {
            return Err(Error::ConfigError(
                "Zone horizontal margin must be in [0.0, 0.5)".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.zone.top_fraction) {
            return Err(Error::ConfigError("Zone top fraction must be in [0.0, 1.0)".to_string()));
        }
        if !self.zone.bottom_width_fraction.is_finite() || self.zone.bottom_width_fraction < 0.0 {
            return Err(Error::ConfigError(
                "Zone bottom fraction must be a non-negative number".to_string(),
            ));
        }

        if self.filter.noise_factor < 1.0 || self.filter.motion_factor < 1.0 {
            return Err(Error::ConfigError(
                "Filter factors must be at least 1.0".to_string(),
            ));
        }
        if !self.filter.hysteresis_distance.is_finite() || self.filter.hysteresis_distance < 0.0 {
            return Err(Error::ConfigError(
                "Hysteresis distance must be a non-negative number".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.detector.min_presence) {
            return Err(Error::ConfigError(
                "Minimum hand presence must be between 0.0 and 1.0".to_string(),
            ));
        }

        if self.display.marker_radius <= 0 {
            return Err(Error::ConfigError("Marker radius must be positive".to_string()));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Hand Actuator Configuration

# Camera device
camera:
  index: 0
  width: 640
  height: 480

# Active zone inside the camera frame
zone:
  margin_x_fraction: 0.15
  top_fraction: 0.02
  bottom_width_fraction: 0.45

# Cursor smoothing
filter:
  kind: "hysteresis"
  noise_factor: 6.0
  motion_factor: 4.0
  hysteresis_distance: 10.0

# Hand landmark model
detector:
  model: "assets/hand_landmark.onnx"
  min_presence: 0.8

# Camera preview
display:
  gui: true
  draw_zone: true
  draw_marker: true
  draw_skeleton: true
  mirror: true
  marker_radius: 50
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let parsed = Config::from_yaml(EXAMPLE_CONFIG).unwrap();
        let defaults = Config::default();
        assert_eq!(parsed.camera.width, defaults.camera.width);
        assert_eq!(parsed.zone.margin_x_fraction, defaults.zone.margin_x_fraction);
        assert_eq!(parsed.filter.noise_factor, defaults.filter.noise_factor);
        assert_eq!(parsed.detector.model, defaults.detector.model);
        assert_eq!(parsed.display.marker_radius, defaults.display.marker_radius);
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let parsed = Config::from_yaml("filter:\n  motion_factor: 2.0\n").unwrap();
        assert_eq!(parsed.filter.motion_factor, 2.0);
        assert_eq!(parsed.filter.noise_factor, DEFAULT_NOISE_FILTER_FACTOR);
        assert_eq!(parsed.camera.height, FRAME_HEIGHT);
    }

    #[test]
    fn test_filter_factor_below_one_rejected() {
        let mut config = Config::default();
        config.filter.motion_factor = 0.5;
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(Config::from_yaml("camera: [1, 2"), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_non_finite_zone_fraction_rejected() {
        let mut config = Config::default();
        config.zone.bottom_width_fraction = f64::NAN;
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));
    }
}
