//! Frame timing
//!
//! Turns host timestamps into clamped frame deltas.

use crate::consts::MAX_FRAME_DT;

/// Delta-time source fed by the host's frame callback
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DT)
    }
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Seconds since the previous tick, clamped to `max_dt`.
    /// The first tick (and a clock running backwards) yields 0.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => (((now_ms - last) / 1000.0) as f32).max(0.0),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt.min(self.max_dt)
    }

    /// Drop timing history (after a pause in frame delivery)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
