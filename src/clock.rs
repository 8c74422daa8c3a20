/// Elapsed-time source for the envelope loop.
///
/// The origin is latched from the first frame timestamp and never reset, so
/// the first frame always evaluates at `elapsed == 0`.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnimationClock {
    origin: Option<f64>,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds since the first timestamp this clock saw.
    pub fn elapsed(&mut self, timestamp: f64) -> f64 {
        let origin = *self.origin.get_or_insert(timestamp);
        timestamp - origin
    }

    pub fn origin(&self) -> Option<f64> {
        self.origin
    }
}
