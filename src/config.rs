//! Static animation table and its JSON override.
//!
//! `WarpConfig::default()` is the table the page ships with. An embedding page
//! may supply a JSON document (the `#artifact-warp-config` script element or
//! `startWithConfig`); any section it leaves out falls back to the defaults
//! below.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{WarpError, WarpResult};

/// Per-layer envelope parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerConfig {
    /// Id of the visual layer element whose opacity is driven.
    pub id: String,
    /// Id of the SVG filter holding the `feDisplacementMap`.
    pub filter_id: String,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Length of one full envelope period, in milliseconds.
    pub cycle_time: f64,
    /// Radians; shifts this layer inside its own cycle.
    pub phase_offset: f64,
    pub min_opacity: f64,
    pub max_opacity: f64,
}

impl LayerConfig {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: &str,
        filter_id: &str,
        min_scale: f64,
        max_scale: f64,
        cycle_time: f64,
        phase_offset: f64,
        min_opacity: f64,
        max_opacity: f64,
    ) -> Self {
        Self {
            id: id.to_owned(),
            filter_id: filter_id.to_owned(),
            min_scale,
            max_scale,
            cycle_time,
            phase_offset,
            min_opacity,
            max_opacity,
        }
    }

    pub fn validate(&self) -> WarpResult<()> {
        let fields = [
            self.min_scale,
            self.max_scale,
            self.cycle_time,
            self.phase_offset,
            self.min_opacity,
            self.max_opacity,
        ];
        if fields.iter().any(|v| !v.is_finite()) {
            return Err(WarpError::invalid_config(format!(
                "layer `{}` has a non-finite parameter",
                self.id
            )));
        }
        if self.min_scale > self.max_scale {
            return Err(WarpError::invalid_config(format!(
                "layer `{}`: minScale {} > maxScale {}",
                self.id, self.min_scale, self.max_scale
            )));
        }
        if self.cycle_time <= 0.0 {
            return Err(WarpError::invalid_config(format!(
                "layer `{}`: cycleTime must be > 0, got {}",
                self.id, self.cycle_time
            )));
        }
        if !(0.0..=1.0).contains(&self.min_opacity)
            || !(0.0..=1.0).contains(&self.max_opacity)
            || self.min_opacity > self.max_opacity
        {
            return Err(WarpError::invalid_config(format!(
                "layer `{}`: opacity range [{}, {}] must be ordered and inside [0, 1]",
                self.id, self.min_opacity, self.max_opacity
            )));
        }
        Ok(())
    }
}

/// Half-open `[min, max)` delay window in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DelayRange {
    pub min: f64,
    pub max: f64,
}

impl DelayRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Maps a unit sample in `[0, 1)` into the window.
    pub fn pick(&self, unit: f64) -> f64 {
        self.min + unit * (self.max - self.min)
    }

    fn validate(&self, what: &str) -> WarpResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min < 0.0 || self.min >= self.max
        {
            return Err(WarpError::invalid_config(format!(
                "{what} delay range [{}, {}) is not a valid window",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Random spike injected into one layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlitchConfig {
    /// Layer id whose sinks the burst overrides.
    pub target_layer: String,
    /// A burst fires when the unit sample is strictly greater than this.
    pub fire_threshold: f64,
    pub spike_scale: f64,
    pub spike_opacity: f64,
    pub restore_scale: f64,
    pub restore_opacity: f64,
    pub recovery_delay: DelayRange,
    pub rearm_delay: DelayRange,
    /// Delay before the very first decision.
    pub initial_delay: f64,
}

impl Default for GlitchConfig {
    fn default() -> Self {
        Self {
            target_layer: "ai-layer-3".to_owned(),
            fire_threshold: 0.7,
            spike_scale: 150.0,
            spike_opacity: 0.7,
            restore_scale: 0.0,
            restore_opacity: 0.0,
            recovery_delay: DelayRange::new(50.0, 150.0),
            rearm_delay: DelayRange::new(2000.0, 7000.0),
            initial_delay: 3000.0,
        }
    }
}

impl GlitchConfig {
    pub fn validate(&self) -> WarpResult<()> {
        if !(0.0..=1.0).contains(&self.fire_threshold) {
            return Err(WarpError::invalid_config(format!(
                "glitch fireThreshold {} must be inside [0, 1]",
                self.fire_threshold
            )));
        }
        if !self.initial_delay.is_finite() || self.initial_delay < 0.0 {
            return Err(WarpError::invalid_config(format!(
                "glitch initialDelay {} must be >= 0",
                self.initial_delay
            )));
        }
        self.recovery_delay.validate("glitch recovery")?;
        self.rearm_delay.validate("glitch re-arm")
    }
}

/// Drift applied to the `baseFrequency` of noise generator elements.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoiseConfig {
    /// Noise targets are every element whose id starts with this.
    pub id_prefix: String,
    /// Counter increment per frame.
    pub step: f64,
    pub amplitude: f64,
    pub rate: f64,
    /// Decimal places kept when writing back.
    pub decimals: u32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            id_prefix: "turbulence-".to_owned(),
            step: 0.0001,
            amplitude: 0.002,
            rate: 0.5,
            decimals: 4,
        }
    }
}

impl NoiseConfig {
    pub fn validate(&self) -> WarpResult<()> {
        if !self.step.is_finite() || !self.amplitude.is_finite() || !self.rate.is_finite() {
            return Err(WarpError::invalid_config("noise parameters must be finite"));
        }
        // 10^15 is the last power of ten an f64 still holds exactly.
        if self.decimals > 15 {
            return Err(WarpError::invalid_config(format!(
                "noise decimals {} must be <= 15",
                self.decimals
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarpConfig {
    pub layers: Vec<LayerConfig>,
    pub glitch: GlitchConfig,
    pub noise: NoiseConfig,
}

impl Default for WarpConfig {
    fn default() -> Self {
        Self {
            layers: default_layers(),
            glitch: GlitchConfig::default(),
            noise: NoiseConfig::default(),
        }
    }
}

impl WarpConfig {
    /// Parses and validates a JSON override.
    pub fn from_json(json: &str) -> WarpResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> WarpResult<()> {
        let mut seen = std::collections::HashSet::new();
        for layer in &self.layers {
            layer.validate()?;
            if !seen.insert(layer.id.as_str()) {
                return Err(WarpError::invalid_config(format!(
                    "layer id `{}` appears more than once",
                    layer.id
                )));
            }
        }
        self.glitch.validate()?;
        self.noise.validate()
    }
}

/// The four shipped layers. Layer 3 is the aggressive one the glitch targets.
pub fn default_layers() -> Vec<LayerConfig> {
    vec![
        LayerConfig::new("ai-layer-1", "ai-warp-1", 0.0, 80.0, 12000.0, 0.0, 0.0, 0.5),
        LayerConfig::new("ai-layer-2", "ai-warp-2", 0.0, 60.0, 9000.0, PI * 0.5, 0.0, 0.45),
        LayerConfig::new("ai-layer-3", "ai-warp-3", 0.0, 100.0, 6000.0, PI, 0.0, 0.4),
        // slow deep warp
        LayerConfig::new("ai-layer-4", "ai-warp-4", 0.0, 50.0, 18000.0, PI * 1.5, 0.05, 0.35),
    ]
}
