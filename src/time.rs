//! Fixed-timestep game clock using an accumulator pattern.
//!
//! `draw_web()` calls at ~60fps with variable delta. GameTime converts
//! this into a fixed number of discrete ticks per second, so particle
//! expiry and click feedback run on a deterministic, testable clock.
//!
//! Frame gaps are not clamped: a tab that was in the background catches up
//! on every tick it missed. A tick here is a few counter decrements, so a
//! long catch-up costs nothing noticeable.

/// Game ticks per real-time second.
pub const TICKS_PER_SEC: u32 = 10;

/// Milliseconds covered by one tick.
pub const MS_PER_TICK: u32 = 1000 / TICKS_PER_SEC;

/// Convert a millisecond duration to whole ticks, rounding up.
pub const fn ms_to_ticks(ms: u32) -> u32 {
    ms.div_ceil(MS_PER_TICK)
}

pub struct GameTime {
    /// Milliseconds per tick (e.g. 100ms = 10 ticks/sec)
    ms_per_tick: f64,
    /// Accumulated milliseconds not yet consumed as ticks
    accumulator: f64,
    /// Timestamp of the last update (ms), None if first frame
    last_timestamp: Option<f64>,
}

impl GameTime {
    /// Create a new GameTime with the given tick rate.
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec as f64,
            accumulator: 0.0,
            last_timestamp: None,
        }
    }

    /// Feed wall-clock timestamp (from `performance.now()`).
    /// Returns the number of discrete ticks to process this frame.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).max(0.0),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        ticks
    }

    /// Wall time already elapsed past the last whole tick, rounded up.
    /// Always below one tick's worth.
    pub fn pending_ms(&self) -> u32 {
        self.accumulator.ceil() as u32
    }
}

impl Default for GameTime {
    fn default() -> Self {
        Self::new(TICKS_PER_SEC)
    }
}
