//! Bouncing particle field.
//!
//! Circular particles bounce inside a rectangular field, optionally pulled by
//! uniform gravity and toward the pointer, and swap to a shared random color
//! whenever two of them touch. [`ParticleField`] owns the particles and all
//! toggles; a host drives it one [`ParticleField::tick`] per frame, draws
//! through a [`Surface`] and feeds it [`Command`]s.

pub mod color;
pub mod commands;
pub mod config;
pub mod error;
pub mod field;
pub mod fps;
pub mod particle;
pub mod state;
pub mod surface;

pub use color::{Rgb, Rgba};
pub use commands::{Command, HostAction, KeyRepeatGuard};
pub use config::FieldConfig;
pub use error::ConfigError;
pub use field::ParticleField;
pub use fps::{FpsHealth, FpsMeter};
pub use particle::{Particle, SpawnRanges};
pub use state::{Attraction, Cycle, Gravity, SimulationState};
pub use surface::{Primitive, Surface, TrailCanvas};
