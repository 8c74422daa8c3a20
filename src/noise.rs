//! Slow sinusoidal drift on noise generator base frequencies.
//!
//! Every frame reads the target's current value and writes it back shifted by
//! `amplitude * sin(counter * (i + 1) * rate)`. The baseline is never
//! captured, so rounding to `decimals` places feeds back into the next frame.

use crate::config::NoiseConfig;

/// Read-modify-write access to a noise generator's base frequency.
pub trait NoiseTarget {
    /// `None` when the current value is not a number.
    fn base_frequency(&self) -> Option<f64>;
    fn set_base_frequency(&self, value: f64);
}

pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[derive(Clone, Debug)]
pub struct NoiseModulator {
    config: NoiseConfig,
    counter: f64,
}

impl NoiseModulator {
    pub fn new(config: NoiseConfig) -> Self {
        Self {
            config,
            counter: 0.0,
        }
    }

    pub fn counter(&self) -> f64 {
        self.counter
    }

    /// Offset for the target discovered at `index`. Bounded by the amplitude.
    pub fn modulation(&self, index: usize) -> f64 {
        self.config.amplitude * (self.counter * (index + 1) as f64 * self.config.rate).sin()
    }

    /// Advances the counter, then re-modulates every target in discovery order.
    pub fn tick<T: NoiseTarget>(&mut self, targets: &[T]) {
        self.counter += self.config.step;
        for (index, target) in targets.iter().enumerate() {
            let Some(current) = target.base_frequency() else {
                continue;
            };
            let next = round_to(current + self.modulation(index), self.config.decimals);
            target.set_base_frequency(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_to(0.012_34, 4), 0.0123);
        assert_eq!(round_to(0.012_36, 4), 0.0124);
        assert_eq!(round_to(1.0, 4), 1.0);
    }

    #[test]
    fn modulation_scales_with_index() {
        let mut noise = NoiseModulator::new(NoiseConfig::default());
        noise.counter = 1.0;
        assert_eq!(noise.modulation(0), 0.002 * 0.5f64.sin());
        assert_eq!(noise.modulation(3), 0.002 * 2.0f64.sin());
    }

    #[test]
    fn modulation_is_bounded() {
        let mut noise = NoiseModulator::new(NoiseConfig::default());
        for step in 0..5_000 {
            noise.counter = step as f64 * 0.37;
            for index in 0..8 {
                assert!(noise.modulation(index).abs() <= 0.002);
            }
        }
    }
}
