//! Frame clock: turns display timestamps into clamped frame deltas

use crate::consts::MAX_FRAME_DT;

/// Converts monotonically increasing millisecond timestamps (as handed to a
/// `requestAnimationFrame` callback) into per-frame deltas in seconds.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous call, clamped to `[0, MAX_FRAME_DT]`.
    ///
    /// The first call and any non-increasing timestamp yield 0.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) if now_ms > last => ((now_ms - last) / 1000.0) as f32,
            _ => 0.0,
        };
        if self.last_ms.is_none_or(|last| now_ms > last) {
            self.last_ms = Some(now_ms);
        }
        dt.min(MAX_FRAME_DT)
    }

    /// Forget the last timestamp so the next frame starts from zero
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
