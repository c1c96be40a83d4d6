use cgmath::Vector2;

use crate::config::FieldConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gravity {
    pub enabled: bool,
    /// Added to the vertical velocity once per tick.
    pub acceleration: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attraction {
    pub enabled: bool,
    pub radius: f32,
    pub factor: f32,
}

/// Fixed ordered set of values a control rotates through.
#[derive(Clone, Debug, PartialEq)]
pub struct Cycle<T> {
    values: Vec<T>,
}

impl<T: Copy + PartialEq> Cycle<T> {
    pub fn new(values: Vec<T>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// The value following `current`, wrapping around. A value that is not
    /// part of the cycle restarts it from the first entry.
    pub fn after(&self, current: T) -> T {
        match self.values.iter().position(|v| *v == current) {
            Some(i) => self.values[(i + 1) % self.values.len()],
            None => self.values[0],
        }
    }
}

/// Every global toggle of the simulation. Owned by a single `ParticleField`
/// and only touched between ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationState {
    pub paused: bool,
    pub gravity: Gravity,
    pub attraction: Attraction,
    pub pointer: Vector2<f32>,
    pub contribute_url: String,
    speed: f32,
    speed_cycle: Cycle<f32>,
    target_count: usize,
    count_cycle: Cycle<usize>,
}

impl SimulationState {
    /// Expects a validated config: both cycles non-empty.
    pub fn from_config(config: &FieldConfig, bounds: Vector2<f32>) -> Self {
        Self {
            paused: false,
            gravity: Gravity {
                enabled: false,
                acceleration: config.gravity,
            },
            attraction: Attraction {
                enabled: false,
                radius: config.attraction_radius,
                factor: config.attraction_factor,
            },
            pointer: bounds * 0.5,
            contribute_url: config.contribute_url.clone(),
            speed: config.speed_cycle[0],
            speed_cycle: Cycle::new(config.speed_cycle.clone()),
            target_count: config.initial_count,
            count_cycle: Cycle::new(config.count_cycle.clone()),
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn cycle_speed(&mut self) -> f32 {
        self.speed = self.speed_cycle.after(self.speed);
        self.speed
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    pub fn set_target_count(&mut self, count: usize) {
        self.target_count = count;
    }

    pub fn cycle_count(&mut self) -> usize {
        self.target_count = self.count_cycle.after(self.target_count);
        self.target_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::vec2;

    fn state() -> SimulationState {
        SimulationState::from_config(&FieldConfig::default(), vec2(800.0, 600.0))
    }

    #[test]
    fn speed_cycles_back_to_one() {
        let mut state = state();
        assert_eq!(state.speed(), 1.0);

        let seen: Vec<f32> = (0..3).map(|_| state.cycle_speed()).collect();
        assert_eq!(seen, vec![2.0, 0.5, 1.0]);
    }

    #[test]
    fn count_cycles_back_to_thirty() {
        let mut state = state();
        assert_eq!(state.target_count(), 30);

        let seen: Vec<usize> = (0..4).map(|_| state.cycle_count()).collect();
        assert_eq!(seen, vec![50, 100, 10, 30]);
    }

    #[test]
    fn unknown_value_restarts_cycle() {
        let mut state = state();
        state.set_target_count(42);
        assert_eq!(state.cycle_count(), 30);
    }

    #[test]
    fn pointer_starts_centered() {
        assert_eq!(state().pointer, vec2(400.0, 300.0));
    }
}
