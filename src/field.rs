use std::time::Duration;

use cgmath::Vector2;
use rand::rngs::StdRng;
use rand::Rng;

use crate::color::Rgb;
use crate::commands::{Command, HostAction};
use crate::config::FieldConfig;
use crate::fps::FpsMeter;
use crate::particle::{Particle, SpawnRanges};
use crate::state::SimulationState;
use crate::surface::Surface;

const CURSOR_RADIUS: f32 = 10.0;
const FPS_POSITION: Vector2<f32> = Vector2 { x: 10.0, y: 20.0 };
const FPS_FONT_SIZE: f32 = 16.0;

/// The bouncing particles plus every toggle that drives them.
///
/// The driver calls [`ParticleField::tick`] once per displayed frame while the
/// simulation is not paused, and forwards pointer moves, resizes and commands
/// in between.
pub struct ParticleField<R: Rng = StdRng> {
    particles: Vec<Particle>,
    state: SimulationState,
    bounds: Vector2<f32>,
    spawn: SpawnRanges,
    fade_opacity: f32,
    fps: FpsMeter,
    rng: R,
}

impl<R: Rng> ParticleField<R> {
    /// `config` must have passed [`FieldConfig::validate`].
    pub fn new(config: &FieldConfig, bounds: Vector2<f32>, rng: R) -> Self {
        Self {
            particles: Vec::with_capacity(config.initial_count),
            state: SimulationState::from_config(config, bounds),
            bounds,
            spawn: config.spawn_ranges(),
            fade_opacity: config.fade_opacity,
            fps: FpsMeter::new(config.fps_window, config.fps_refresh()),
            rng,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut Vec<Particle> {
        &mut self.particles
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn bounds(&self) -> Vector2<f32> {
        self.bounds
    }

    pub fn fps(&self) -> &FpsMeter {
        &self.fps
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.state.pointer = cgmath::vec2(x, y);
    }

    pub fn set_target_count(&mut self, count: usize) {
        self.state.set_target_count(count);
    }

    pub fn apply(&mut self, command: Command) -> Option<HostAction> {
        self.state.apply(command)
    }

    /// Spawns or trims particles until the live count equals the target.
    /// Trimming removes the most recently added particles first.
    pub fn maintain_population(&mut self) {
        let target = self.state.target_count();
        let before = self.particles.len();

        while self.particles.len() < target {
            let particle = Particle::spawn(&mut self.rng, self.bounds, &self.spawn);
            self.particles.push(particle);
        }
        self.particles.truncate(target);

        if before != target {
            log::debug!("population {} -> {}", before, target);
        }
    }

    /// Moves every particle one tick and recolors the ones that touch.
    pub fn step(&mut self) {
        for i in 0..self.particles.len() {
            self.particles[i].update(&self.state, self.bounds);
            self.collision_detect(i);
        }
    }

    /// Gives particle `index` and every particle overlapping it one shared new
    /// color. A fresh color is drawn for each overlapping pair.
    pub fn collision_detect(&mut self, index: usize) {
        for other in 0..self.particles.len() {
            if other == index {
                continue;
            }
            if self.particles[index].overlaps(&self.particles[other]) {
                let color = Rgb::random(&mut self.rng);
                self.particles[index].color = color;
                self.particles[other].color = color;
            }
        }
    }

    /// Adopts new field dimensions. Particles whose far edge now lies past a
    /// boundary are pulled back inside; everything else keeps its position.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            log::warn!("ignoring degenerate resize to {}x{}", width, height);
            return;
        }

        log::debug!(
            "field resized {}x{} -> {}x{}",
            self.bounds.x,
            self.bounds.y,
            width,
            height
        );
        self.bounds = cgmath::vec2(width, height);

        for particle in &mut self.particles {
            particle.position.x = particle.position.x.min((width - particle.radius).max(0.0));
            particle.position.y = particle.position.y.min((height - particle.radius).max(0.0));
        }
    }

    /// Runs one frame: fades the previous one, reconciles the population,
    /// advances the physics and draws the result.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S, frame_interval: Duration) {
        let size = surface.size();
        if size != self.bounds {
            self.resize(size.x, size.y);
        }

        self.fps.observe(frame_interval);
        surface.fade(self.fade_opacity);

        self.maintain_population();
        self.step();
        self.render(surface);
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        for particle in &self.particles {
            surface.fill_circle(particle.position, particle.radius, particle.color.into());
        }

        if self.state.attraction.enabled {
            let pointer = self.state.pointer;
            surface.stroke_circle(
                pointer,
                self.state.attraction.radius,
                Rgb::WHITE.with_alpha(0.2),
                1.0,
            );
            surface.fill_circle(pointer, CURSOR_RADIUS, Rgb::WHITE.with_alpha(0.8));
            surface.stroke_circle(pointer, CURSOR_RADIUS, Rgb::BLACK.into(), 2.0);
        }

        surface.draw_text(
            FPS_POSITION,
            &self.fps.label(),
            self.fps.health().color().into(),
            FPS_FONT_SIZE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::vec2;
    use rand::SeedableRng;

    fn field(target: usize) -> ParticleField {
        let mut field = ParticleField::new(
            &FieldConfig::default(),
            vec2(1000.0, 1000.0),
            StdRng::seed_from_u64(3),
        );
        field.set_target_count(target);
        field
    }

    #[test]
    fn population_converges_in_one_call() {
        let target = 60;
        for start in [0, target, target + 50, target - 50] {
            let mut field = field(start);
            field.maintain_population();
            assert_eq!(field.particles().len(), start);

            field.set_target_count(target);
            field.maintain_population();
            assert_eq!(field.particles().len(), target, "starting from {start}");
        }
    }

    #[test]
    fn trim_removes_newest_first() {
        let mut field = field(5);
        field.maintain_population();
        let oldest: Vec<Particle> = field.particles()[..2].to_vec();

        field.set_target_count(2);
        field.maintain_population();

        assert_eq!(field.particles(), &oldest[..]);
    }

    #[test]
    fn overlapping_pair_shares_new_color() {
        let mut field = field(0);
        let a = Rgb::new(1, 2, 3);
        let b = Rgb::new(4, 5, 6);
        field.particles_mut().push(Particle::new(vec2(100.0, 100.0), vec2(0.0, 0.0), 10.0, a));
        field.particles_mut().push(Particle::new(vec2(115.0, 100.0), vec2(0.0, 0.0), 10.0, b));

        field.collision_detect(0);

        let [first, second] = [field.particles()[0].color, field.particles()[1].color];
        assert_eq!(first, second);
        assert_ne!(first, a);
        assert_ne!(first, b);
    }

    #[test]
    fn distant_particles_keep_their_colors() {
        let mut field = field(0);
        let a = Rgb::new(10, 20, 30);
        field.particles_mut().push(Particle::new(vec2(100.0, 100.0), vec2(0.0, 0.0), 10.0, a));
        field.particles_mut().push(Particle::new(vec2(300.0, 100.0), vec2(0.0, 0.0), 10.0, a));

        field.collision_detect(0);
        field.collision_detect(1);

        assert!(field.particles().iter().all(|p| p.color == a));
    }

    #[test]
    fn lone_particle_never_collides_with_itself() {
        let mut field = field(0);
        let a = Rgb::new(7, 7, 7);
        field.particles_mut().push(Particle::new(vec2(50.0, 50.0), vec2(0.0, 0.0), 10.0, a));

        field.collision_detect(0);

        assert_eq!(field.particles()[0].color, a);
    }

    #[test]
    fn resize_clamps_only_escaped_particles() {
        let mut field = field(0);
        field.particles_mut().push(Particle::new(vec2(990.0, 10.0), vec2(1.0, 1.0), 10.0, Rgb::WHITE));

        field.resize(500.0, 500.0);

        let p = field.particles()[0];
        assert!(p.position.x <= 500.0);
        assert_eq!(p.position.x, 490.0);
        assert_eq!(p.position.y, 10.0);
        assert_eq!(field.bounds(), vec2(500.0, 500.0));
    }

    #[test]
    fn degenerate_resize_is_ignored() {
        let mut field = field(0);
        field.resize(0.0, 300.0);
        assert_eq!(field.bounds(), vec2(1000.0, 1000.0));
    }
}
