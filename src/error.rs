//! Error types.
//!
//! The simulation itself cannot fail; only loading and validating a
//! [`FieldConfig`](crate::config::FieldConfig) can.

use std::fmt;

/// Errors that can occur while loading a field configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    Io(std::io::Error),
    /// The file is not valid YAML for a configuration.
    Parse(serde_yaml::Error),
    /// A control cycle has no entries.
    EmptyCycle(&'static str),
    /// A speed multiplier is zero, negative or not a number.
    NonPositiveSpeed(f32),
    /// Radii must be positive with `min <= max`.
    InvalidRadiusRange { min: f32, max: f32 },
    /// The spawn velocity bound is negative or not a number.
    NegativeMaxSpeed(f32),
    /// Fade opacity must lie in `(0, 1]`.
    FadeOpacity(f32),
    /// The FPS average needs at least one sample.
    ZeroFpsWindow,
    NonPositiveAttractionRadius(f32),
    InvalidFieldSize { width: f32, height: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::EmptyCycle(name) => write!(f, "{} must contain at least one value", name),
            ConfigError::NonPositiveSpeed(speed) => {
                write!(f, "Speed multipliers must be positive, got {}", speed)
            }
            ConfigError::InvalidRadiusRange { min, max } => write!(
                f,
                "Radius range must be positive and ordered, got [{}, {}]",
                min, max
            ),
            ConfigError::NegativeMaxSpeed(speed) => {
                write!(f, "max_speed must not be negative, got {}", speed)
            }
            ConfigError::FadeOpacity(opacity) => {
                write!(f, "fade_opacity must be in (0, 1], got {}", opacity)
            }
            ConfigError::ZeroFpsWindow => write!(f, "fps_window must be at least 1"),
            ConfigError::NonPositiveAttractionRadius(radius) => {
                write!(f, "attraction_radius must be positive, got {}", radius)
            }
            ConfigError::InvalidFieldSize { width, height } => {
                write!(f, "Field size must be positive, got {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        ConfigError::Parse(e)
    }
}
