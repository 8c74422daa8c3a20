//! Emergence/dissolve envelope shared by every layer.
//!
//! One cycle is split into four segments:
//!
//! | progress      | segment                                   |
//! |---------------|-------------------------------------------|
//! | `[0, 0.15)`   | eased ramp up from 0 to 1                 |
//! | `[0.15, 0.5)` | held near 1 with five small ripples       |
//! | `[0.5, 0.65)` | flat at 0.9                               |
//! | `[0.65, 1)`   | eased ramp back down to 0                 |

use std::f64::consts::PI;

use crate::config::LayerConfig;

const EMERGE_END: f64 = 0.15;
const FLUCTUATE_END: f64 = 0.5;
const HOLD_END: f64 = 0.65;
const HOLD_LEVEL: f64 = 0.9;
const RIPPLE_DEPTH: f64 = 0.1;
const RIPPLES: f64 = 5.0;

/// `(1 - cos(pi t)) / 2`: 0 -> 1 with zero slope at both ends.
pub fn ease_in_out_sine(t: f64) -> f64 {
    (1.0 - (PI * t).cos()) / 2.0
}

/// Intensity in `[0, 1]` for a position inside the cycle.
pub fn intensity(progress: f64) -> f64 {
    let value = if progress < EMERGE_END {
        ease_in_out_sine(progress / EMERGE_END)
    } else if progress < FLUCTUATE_END {
        1.0 - RIPPLE_DEPTH * ((progress - EMERGE_END) * PI * RIPPLES).sin()
    } else if progress < HOLD_END {
        HOLD_LEVEL
    } else {
        ease_in_out_sine(1.0 - (progress - HOLD_END) / (1.0 - HOLD_END))
    };
    // The ripple overshoots 1 in the second half of its segment.
    value.clamp(0.0, 1.0)
}

/// Position of `elapsed` inside the layer's phase-shifted cycle, in `[0, 1)`.
pub fn cycle_progress(elapsed: f64, cycle_time: f64, phase_offset: f64) -> f64 {
    let raw = elapsed / cycle_time + phase_offset / (2.0 * PI);
    let progress = raw.rem_euclid(1.0);
    // rem_euclid may round up to exactly 1.0 for tiny negative inputs.
    if progress >= 1.0 { 0.0 } else { progress }
}

pub fn lerp(min: f64, max: f64, t: f64) -> f64 {
    min + (max - min) * t
}

/// Values written to a layer's two sinks for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerOutput {
    pub scale: f64,
    pub opacity: f64,
}

impl LayerConfig {
    /// Maps an intensity onto this layer's scale and opacity ranges.
    pub fn output_at(&self, intensity: f64) -> LayerOutput {
        LayerOutput {
            scale: lerp(self.min_scale, self.max_scale, intensity),
            opacity: lerp(self.min_opacity, self.max_opacity, intensity),
        }
    }

    pub fn intensity_at(&self, elapsed: f64) -> f64 {
        intensity(cycle_progress(elapsed, self.cycle_time, self.phase_offset))
    }

    /// Full per-frame evaluation for `elapsed` milliseconds since the first frame.
    pub fn sample(&self, elapsed: f64) -> LayerOutput {
        self.output_at(self.intensity_at(elapsed))
    }
}
