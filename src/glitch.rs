//! Randomly timed spikes on a single layer.
//!
//! Each decision draws one unit sample for fire/no-fire, one for the recovery
//! delay (only when firing) and one for the re-arm delay. Bursts are
//! memoryless: nothing about one decision influences the next.

use rand::{Rng, RngCore};

use crate::config::GlitchConfig;
use crate::layers::{DisplacementSink, OpacitySink, ResolvedLayer};

/// Uniform samples in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: RngCore> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Outcome of one decision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlitchStep {
    /// Delay until the spike is restored, when a spike fired.
    pub restore_in: Option<f64>,
    /// Delay until the next decision. Always present.
    pub next_decision_in: f64,
}

impl GlitchStep {
    pub fn fired(&self) -> bool {
        self.restore_in.is_some()
    }
}

#[derive(Clone, Debug)]
pub struct GlitchScheduler {
    config: GlitchConfig,
}

impl GlitchScheduler {
    pub fn new(config: GlitchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GlitchConfig {
        &self.config
    }

    pub fn target_layer(&self) -> &str {
        &self.config.target_layer
    }

    pub fn initial_delay(&self) -> f64 {
        self.config.initial_delay
    }

    /// Draws the fire/no-fire decision and both delays.
    ///
    /// With no target layer resolved the draw still happens, so the timer keeps
    /// re-arming on the same cadence, but the decision never fires.
    pub fn decide<R: RandomSource + ?Sized>(&self, rng: &mut R, has_target: bool) -> GlitchStep {
        let fire = rng.next_unit() > self.config.fire_threshold && has_target;
        let restore_in = fire.then(|| self.config.recovery_delay.pick(rng.next_unit()));
        let next_decision_in = self.config.rearm_delay.pick(rng.next_unit());
        GlitchStep {
            restore_in,
            next_decision_in,
        }
    }

    pub fn spike<D: DisplacementSink, O: OpacitySink>(&self, layer: &ResolvedLayer<D, O>) {
        layer.displacement.set_scale(self.config.spike_scale);
        layer.layer.set_opacity(self.config.spike_opacity);
    }

    pub fn restore<D: DisplacementSink, O: OpacitySink>(&self, layer: &ResolvedLayer<D, O>) {
        layer.displacement.set_scale(self.config.restore_scale);
        layer.layer.set_opacity(self.config.restore_opacity);
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;

    struct Fixed(Vec<f64>);

    impl RandomSource for Fixed {
        fn next_unit(&mut self) -> f64 {
            self.0.remove(0)
        }
    }

    #[test]
    fn unit_samples_stay_in_range() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let u = rng.next_unit();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn fires_above_threshold() {
        let glitch = GlitchScheduler::new(GlitchConfig::default());
        let step = glitch.decide(&mut Fixed(vec![0.71, 0.5, 0.0]), true);
        assert_eq!(step.restore_in, Some(100.0));
        assert_eq!(step.next_decision_in, 2000.0);
    }

    #[test]
    fn threshold_itself_does_not_fire() {
        let glitch = GlitchScheduler::new(GlitchConfig::default());
        let step = glitch.decide(&mut Fixed(vec![0.7, 0.5]), true);
        assert!(!step.fired());
        assert_eq!(step.next_decision_in, 4500.0);
    }

    #[test]
    fn missing_target_never_fires() {
        let glitch = GlitchScheduler::new(GlitchConfig::default());
        let step = glitch.decide(&mut Fixed(vec![0.99, 0.2]), false);
        assert!(!step.fired());
        assert_eq!(step.next_decision_in, 3000.0);
    }

    #[test]
    fn same_seed_same_schedule() {
        let glitch = GlitchScheduler::new(GlitchConfig::default());
        let mut a = SmallRng::seed_from_u64(42);
        let mut b = SmallRng::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(glitch.decide(&mut a, true), glitch.decide(&mut b, true));
        }
    }
}
