use std::collections::VecDeque;
use std::time::Duration;

use crate::color::Rgb;

/// Rolling frames-per-second estimate.
///
/// The average covers the last `window` frame intervals. The displayed value
/// only changes once `refresh` worth of frame time has gone by since the
/// previous change, which keeps the readout from flickering.
#[derive(Clone, Debug)]
pub struct FpsMeter {
    samples: VecDeque<Duration>,
    window: usize,
    refresh: Duration,
    since_refresh: Duration,
    displayed: f32,
}

impl FpsMeter {
    pub fn new(window: usize, refresh: Duration) -> Self {
        let window = window.max(1);
        Self {
            samples: VecDeque::with_capacity(window),
            window,
            refresh,
            // the first observed frame refreshes immediately
            since_refresh: refresh,
            displayed: 0.0,
        }
    }

    pub fn observe(&mut self, frame_interval: Duration) -> f32 {
        if self.samples.len() == self.window {
            self.samples.pop_front();
        }
        self.samples.push_back(frame_interval);
        self.since_refresh += frame_interval;

        if self.since_refresh >= self.refresh {
            self.since_refresh = Duration::ZERO;
            if let Some(fps) = self.average() {
                self.displayed = fps;
            }
        }

        self.displayed
    }

    pub fn average(&self) -> Option<f32> {
        let total: Duration = self.samples.iter().sum();
        if total.is_zero() {
            return None;
        }
        Some(self.samples.len() as f32 / total.as_secs_f32())
    }

    pub fn displayed(&self) -> f32 {
        self.displayed
    }

    pub fn health(&self) -> FpsHealth {
        FpsHealth::classify(self.displayed)
    }

    pub fn label(&self) -> String {
        format!("FPS: {}", self.displayed.round() as u32)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FpsHealth {
    Good,
    Fair,
    Poor,
}

impl FpsHealth {
    /// Thresholds apply to the rounded value so the text and its color agree.
    pub fn classify(fps: f32) -> Self {
        let fps = fps.round();
        if fps >= 40.0 {
            FpsHealth::Good
        } else if fps >= 20.0 {
            FpsHealth::Fair
        } else {
            FpsHealth::Poor
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            FpsHealth::Good => Rgb::GREEN,
            FpsHealth::Fair => Rgb::YELLOW,
            FpsHealth::Poor => Rgb::RED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn first_frame_is_shown() {
        let mut meter = FpsMeter::new(10, ms(100));
        assert!((meter.observe(ms(20)) - 50.0).abs() < 0.01);
    }

    #[test]
    fn refresh_is_gated() {
        let mut meter = FpsMeter::new(10, ms(100));
        let first = meter.observe(ms(20));

        for _ in 0..9 {
            assert_eq!(meter.observe(ms(10)), first);
        }
        // the tenth 10ms frame completes the interval and evicts the 20ms sample
        assert!((meter.observe(ms(10)) - 100.0).abs() < 0.01);
    }

    #[test]
    fn window_drops_old_samples() {
        let mut meter = FpsMeter::new(10, ms(0));
        meter.observe(ms(1000));
        for _ in 0..10 {
            meter.observe(ms(25));
        }
        assert!((meter.displayed() - 40.0).abs() < 0.01);
    }

    #[test]
    fn zero_intervals_keep_previous_value() {
        let mut meter = FpsMeter::new(3, ms(0));
        assert_eq!(meter.observe(Duration::ZERO), 0.0);
        assert!(meter.displayed().is_finite());
    }

    #[test]
    fn health_thresholds() {
        assert_eq!(FpsHealth::classify(60.0), FpsHealth::Good);
        assert_eq!(FpsHealth::classify(40.0), FpsHealth::Good);
        assert_eq!(FpsHealth::classify(39.0), FpsHealth::Fair);
        assert_eq!(FpsHealth::classify(20.0), FpsHealth::Fair);
        assert_eq!(FpsHealth::classify(19.0), FpsHealth::Poor);
        assert_eq!(FpsHealth::classify(0.0), FpsHealth::Poor);
    }

    #[test]
    fn label_rounds() {
        let mut meter = FpsMeter::new(10, ms(100));
        meter.observe(Duration::from_micros(16_667));
        assert_eq!(meter.label(), "FPS: 60");
    }
}
