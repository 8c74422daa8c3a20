//! Virtual-time driver for an [`AnimationController`].
//!
//! Plays the role the browser plays in production: a display frame every
//! `frame_interval` milliseconds (driving both the envelope and the noise
//! loop) plus one-shot timers for glitch decisions and restorations. Time only
//! moves when [`Timeline::advance_to`] or [`Timeline::advance_by`] is called.

use crate::controller::AnimationController;
use crate::error::{WarpError, WarpResult};
use crate::glitch::RandomSource;
use crate::layers::{DisplacementSink, OpacitySink};
use crate::noise::NoiseTarget;

/// 60 Hz display.
pub const DEFAULT_FRAME_INTERVAL: f64 = 1000.0 / 60.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    GlitchDecision,
    GlitchRestore,
}

#[derive(Clone, Copy, Debug)]
struct Timer {
    due: f64,
    seq: u64,
    kind: TimerKind,
}

pub struct Timeline<D, O, N, R> {
    controller: AnimationController<D, O, N, R>,
    now: f64,
    frame_interval: f64,
    next_frame: f64,
    frames: u64,
    timers: Vec<Timer>,
    seq: u64,
}

impl<D, O, N, R> Timeline<D, O, N, R>
where
    D: DisplacementSink,
    O: OpacitySink,
    N: NoiseTarget,
    R: RandomSource,
{
    /// Starts all three loops at `start`: the first frame is due immediately,
    /// the first glitch decision after the configured initial delay.
    pub fn new(
        controller: AnimationController<D, O, N, R>,
        start: f64,
        frame_interval: f64,
    ) -> WarpResult<Self> {
        if !(frame_interval.is_finite() && frame_interval > 0.0) {
            return Err(WarpError::invalid_config(format!(
                "frame interval must be a positive number, got {frame_interval}"
            )));
        }
        if !start.is_finite() {
            return Err(WarpError::invalid_config(format!(
                "timeline start must be finite, got {start}"
            )));
        }
        let first_decision = start + controller.glitch().initial_delay();
        let mut timeline = Self {
            controller,
            now: start,
            frame_interval,
            next_frame: start,
            frames: 0,
            timers: Vec::new(),
            seq: 0,
        };
        timeline.schedule(first_decision, TimerKind::GlitchDecision);
        Ok(timeline)
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn controller(&self) -> &AnimationController<D, O, N, R> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut AnimationController<D, O, N, R> {
        &mut self.controller
    }

    /// Due time of the earliest pending timer of `kind`.
    pub fn pending(&self, kind: TimerKind) -> Option<f64> {
        self.timers
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.due)
            .min_by(f64::total_cmp)
    }

    pub fn advance_by(&mut self, delta: f64) {
        self.advance_to(self.now + delta);
    }

    /// Runs every frame and timer due at or before `target`, in time order.
    /// A frame and a timer due at the same instant run frame first.
    /// A non-finite `target` is ignored.
    pub fn advance_to(&mut self, target: f64) {
        if !target.is_finite() {
            return;
        }
        loop {
            let timer = self.earliest_timer();
            let frame_first = match timer {
                Some((_, t)) => self.next_frame <= t.due,
                None => true,
            };
            if frame_first {
                if self.next_frame > target {
                    break;
                }
                self.now = self.next_frame;
                self.run_frame();
                self.next_frame += self.frame_interval;
            } else if let Some((index, t)) = timer {
                if t.due > target {
                    break;
                }
                self.timers.swap_remove(index);
                self.now = t.due;
                self.run_timer(t.kind);
            }
        }
        self.now = target.max(self.now);
    }

    fn run_frame(&mut self) {
        self.frames += 1;
        self.controller.envelope_frame(self.now);
        self.controller.noise_frame();
    }

    fn run_timer(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::GlitchDecision => {
                let step = self.controller.glitch_decide();
                if let Some(delay) = step.restore_in {
                    self.schedule(self.now + delay, TimerKind::GlitchRestore);
                }
                self.schedule(self.now + step.next_decision_in, TimerKind::GlitchDecision);
            }
            TimerKind::GlitchRestore => self.controller.glitch_restore(),
        }
    }

    fn schedule(&mut self, due: f64, kind: TimerKind) {
        self.timers.push(Timer {
            due,
            seq: self.seq,
            kind,
        });
        self.seq += 1;
    }

    fn earliest_timer(&self) -> Option<(usize, Timer)> {
        self.timers
            .iter()
            .copied()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)))
    }
}
