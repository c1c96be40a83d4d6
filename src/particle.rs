use cgmath::prelude::*;
use cgmath::Vector2;
use rand::Rng;

use crate::color::Rgb;
use crate::state::{Attraction, SimulationState};

/// Ranges new particles are drawn from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnRanges {
    /// Velocity components are drawn from `[-max_speed, max_speed)`.
    pub max_speed: f32,
    pub min_radius: f32,
    pub max_radius: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vector2<f32>,
    pub velocity: Vector2<f32>,
    pub radius: f32,
    pub color: Rgb,
}

impl Particle {
    pub fn new(position: Vector2<f32>, velocity: Vector2<f32>, radius: f32, color: Rgb) -> Self {
        Self {
            position,
            velocity,
            radius,
            color,
        }
    }

    /// A particle somewhere inside `bounds` with random velocity, size and color.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: Vector2<f32>, ranges: &SpawnRanges) -> Self {
        let position = cgmath::vec2(rng.gen::<f32>() * bounds.x, rng.gen::<f32>() * bounds.y);
        let velocity = cgmath::vec2(
            (rng.gen::<f32>() * 2.0 - 1.0) * ranges.max_speed,
            (rng.gen::<f32>() * 2.0 - 1.0) * ranges.max_speed,
        );
        let radius = ranges.min_radius + rng.gen::<f32>() * (ranges.max_radius - ranges.min_radius);

        Self::new(position, velocity, radius, Rgb::random(rng))
    }

    /// Advances the particle by one tick inside a field of size `bounds`.
    pub fn update(&mut self, state: &SimulationState, bounds: Vector2<f32>) {
        if state.gravity.enabled {
            self.velocity.y += state.gravity.acceleration;
        }

        self.reflect(bounds);

        if state.attraction.enabled {
            self.attract(state.pointer, &state.attraction);
        }

        self.position += self.velocity * state.speed();
        self.confine(bounds);
    }

    /// Points the velocity back inward on every axis where the particle's edge
    /// touches or crosses the boundary. Applying it twice changes nothing.
    pub fn reflect(&mut self, bounds: Vector2<f32>) {
        let radius = self.radius;

        macro_rules! handle_boundary {
            ($coord:expr, $vel:expr, $extent:expr) => {
                if $coord + radius >= $extent {
                    $vel = -$vel.abs();
                }
                if $coord - radius <= 0.0 {
                    $vel = $vel.abs();
                }
            };
        }

        handle_boundary!(self.position.x, self.velocity.x, bounds.x);
        handle_boundary!(self.position.y, self.velocity.y, bounds.y);
    }

    /// Pulls the particle toward `pointer` with a force that falls off linearly
    /// to zero at the attraction radius.
    pub fn attract(&mut self, pointer: Vector2<f32>, attraction: &Attraction) {
        let offset = pointer - self.position;
        let distance = offset.magnitude();

        if distance < attraction.radius {
            let force = attraction.factor * (1.0 - distance / attraction.radius);
            self.velocity += offset * force;
        }
    }

    /// Clamps the position into `[radius, extent - radius]` on both axes.
    pub fn confine(&mut self, bounds: Vector2<f32>) {
        self.position.x = confine_axis(self.position.x, self.radius, bounds.x);
        self.position.y = confine_axis(self.position.y, self.radius, bounds.y);
    }

    pub fn overlaps(&self, other: &Particle) -> bool {
        let reach = self.radius + other.radius;
        (other.position - self.position).magnitude2() < reach * reach
    }
}

fn confine_axis(coord: f32, radius: f32, extent: f32) -> f32 {
    if extent < 2.0 * radius {
        extent * 0.5
    } else {
        coord.clamp(radius, extent - radius)
    }
}
