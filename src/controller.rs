use crate::clock::AnimationClock;
use crate::config::WarpConfig;
use crate::glitch::{GlitchScheduler, GlitchStep, RandomSource};
use crate::layers::{DisplacementSink, LayerHost, LayerRegistry, OpacitySink};
use crate::noise::{NoiseModulator, NoiseTarget};

/// Owns all animation state for one effect instance.
///
/// The three loops never call each other. Whoever drives the controller
/// (the browser frame/timer callbacks, or [`crate::timeline::Timeline`])
/// calls one step method per callback.
pub struct AnimationController<D, O, N, R> {
    layers: LayerRegistry<D, O>,
    clock: AnimationClock,
    noise: NoiseModulator,
    noise_targets: Vec<N>,
    glitch: GlitchScheduler,
    rng: R,
}

impl<D, O, N, R> AnimationController<D, O, N, R>
where
    D: DisplacementSink,
    O: OpacitySink,
    N: NoiseTarget,
    R: RandomSource,
{
    /// Resolves the layer table against `host` and takes the noise targets in
    /// discovery order. Neither set is ever re-queried.
    pub fn new<H>(config: &WarpConfig, host: &H, noise_targets: Vec<N>, rng: R) -> Self
    where
        H: LayerHost<Displacement = D, Opacity = O>,
    {
        let layers = LayerRegistry::resolve(&config.layers, host);
        log::info!(
            "artifact warp initialized: {}/{} layers, {} noise targets",
            layers.len(),
            config.layers.len(),
            noise_targets.len()
        );
        Self {
            layers,
            clock: AnimationClock::new(),
            noise: NoiseModulator::new(config.noise.clone()),
            noise_targets,
            glitch: GlitchScheduler::new(config.glitch.clone()),
            rng,
        }
    }

    pub fn layers(&self) -> &LayerRegistry<D, O> {
        &self.layers
    }

    pub fn noise_targets(&self) -> &[N] {
        &self.noise_targets
    }

    pub fn glitch(&self) -> &GlitchScheduler {
        &self.glitch
    }

    /// One envelope frame at host timestamp `timestamp` (milliseconds).
    pub fn envelope_frame(&mut self, timestamp: f64) {
        let elapsed = self.clock.elapsed(timestamp);
        self.layers.apply_envelope(elapsed);
    }

    /// One noise frame.
    pub fn noise_frame(&mut self) {
        self.noise.tick(&self.noise_targets);
    }

    /// One glitch decision. Applies the spike immediately when it fires; the
    /// caller schedules [`Self::glitch_restore`] and the next decision.
    pub fn glitch_decide(&mut self) -> GlitchStep {
        let target = self.layers.get(self.glitch.target_layer());
        let step = self.glitch.decide(&mut self.rng, target.is_some());
        if let (true, Some(layer)) = (step.fired(), target) {
            log::trace!("glitch burst on `{}`", layer.config.id);
            self.glitch.spike(layer);
        }
        step
    }

    pub fn glitch_restore(&mut self) {
        if let Some(layer) = self.layers.get(self.glitch.target_layer()) {
            self.glitch.restore(layer);
        }
    }
}
