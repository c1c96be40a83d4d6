//! Field configuration loaded from YAML.
//!
//! Every key is optional; missing keys fall back to [`FieldConfig::default`].
//!
//! ```yaml
//! width: 1280.0
//! height: 720.0
//! initial_count: 30
//! count_cycle: [30, 50, 100, 10]
//! speed_cycle: [1.0, 2.0, 0.5]
//! gravity: 0.1              # added to vy every tick while enabled
//! attraction_radius: 100.0
//! attraction_factor: 0.02
//! max_speed: 7.0            # spawn velocity range is [-max_speed, max_speed)
//! radius_range: [10.0, 20.0]
//! fade_opacity: 0.25        # strength of the trail fade per frame
//! fps_window: 10
//! fps_refresh_ms: 100
//! seed: 42                  # omit for a random seed
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::particle::SpawnRanges;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    pub width: f32,
    pub height: f32,
    pub initial_count: usize,
    pub count_cycle: Vec<usize>,
    pub speed_cycle: Vec<f32>,
    pub gravity: f32,
    pub attraction_radius: f32,
    pub attraction_factor: f32,
    pub max_speed: f32,
    pub radius_range: [f32; 2],
    pub fade_opacity: f32,
    pub fps_window: usize,
    pub fps_refresh_ms: u64,
    pub contribute_url: String,
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            initial_count: 30,
            count_cycle: vec![30, 50, 100, 10],
            speed_cycle: vec![1.0, 2.0, 0.5],
            gravity: 0.1,
            attraction_radius: 100.0,
            attraction_factor: 0.02,
            max_speed: 7.0,
            radius_range: [10.0, 20.0],
            fade_opacity: 0.25,
            fps_window: 10,
            fps_refresh_ms: 100,
            contribute_url: "https://github.com/".to_owned(),
            seed: None,
        }
    }
}

impl FieldConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let reader = BufReader::new(File::open(path)?);
        let config: FieldConfig = serde_yaml::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: FieldConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // negated comparisons so NaN is rejected too
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::InvalidFieldSize {
                width: self.width,
                height: self.height,
            });
        }
        if self.count_cycle.is_empty() {
            return Err(ConfigError::EmptyCycle("count_cycle"));
        }
        if self.speed_cycle.is_empty() {
            return Err(ConfigError::EmptyCycle("speed_cycle"));
        }
        if let Some(&speed) = self.speed_cycle.iter().find(|s| !(**s > 0.0)) {
            return Err(ConfigError::NonPositiveSpeed(speed));
        }
        let [min, max] = self.radius_range;
        if !(min > 0.0 && min <= max) {
            return Err(ConfigError::InvalidRadiusRange { min, max });
        }
        if !(self.max_speed >= 0.0) {
            return Err(ConfigError::NegativeMaxSpeed(self.max_speed));
        }
        if !(self.fade_opacity > 0.0 && self.fade_opacity <= 1.0) {
            return Err(ConfigError::FadeOpacity(self.fade_opacity));
        }
        if self.fps_window == 0 {
            return Err(ConfigError::ZeroFpsWindow);
        }
        if !(self.attraction_radius > 0.0) {
            return Err(ConfigError::NonPositiveAttractionRadius(self.attraction_radius));
        }
        Ok(())
    }

    pub fn spawn_ranges(&self) -> SpawnRanges {
        SpawnRanges {
            max_speed: self.max_speed,
            min_radius: self.radius_range[0],
            max_radius: self.radius_range[1],
        }
    }

    pub fn fps_refresh(&self) -> Duration {
        Duration::from_millis(self.fps_refresh_ms)
    }
}
