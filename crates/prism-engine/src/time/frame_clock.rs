use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Number of recent frame deltas averaged into `FrameTime::dt`.
const SMOOTHING_WINDOW: usize = 32;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Smoothed frame duration in seconds (clamped average of recent deltas).
    pub dt: f32,

    /// Clamped duration of this frame alone, in seconds.
    pub raw_dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Each delta is clamped before it enters the averaging window so a debugger
/// pause or a minimized window cannot produce a huge step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
    recent: VecDeque<f32>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            frame_index: 0,
            dt_min,
            dt_max,
            recent: VecDeque::with_capacity(SMOOTHING_WINDOW),
        }
    }

    /// Resets the baseline and forgets the averaging history.
    pub fn reset(&mut self) {
        self.last = Instant::now();
        self.recent.clear();
    }

    /// Advances the clock using the current time.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to `now`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max)
            .as_secs_f32();
        self.last = now;

        if self.recent.len() == SMOOTHING_WINDOW {
            self.recent.pop_front();
        }
        self.recent.push_back(dt);
        let smoothed = self.recent.iter().sum::<f32>() / self.recent.len() as f32;

        let ft = FrameTime {
            dt: smoothed,
            raw_dt: dt,
            now,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock_at(start: Instant) -> FrameClock {
        let mut clock = FrameClock::new();
        clock.last = start;
        clock
    }

    #[test]
    fn frame_index_increments() {
        let start = Instant::now();
        let mut clock = clock_at(start);
        let a = clock.tick_at(start + Duration::from_millis(16));
        let b = clock.tick_at(start + Duration::from_millis(32));
        assert_eq!(a.frame_index, 0);
        assert_eq!(b.frame_index, 1);
    }

    #[test]
    fn long_stall_is_clamped() {
        let start = Instant::now();
        let mut clock = clock_at(start);
        let ft = clock.tick_at(start + Duration::from_secs(5));
        assert!((ft.raw_dt - 0.25).abs() < 1e-6);
        assert!((ft.dt - 0.25).abs() < 1e-6);
    }

    #[test]
    fn zero_delta_is_clamped_to_minimum() {
        let start = Instant::now();
        let mut clock = clock_at(start);
        let ft = clock.tick_at(start);
        assert!((ft.raw_dt - 0.0001).abs() < 1e-7);
    }

    #[test]
    fn dt_is_averaged_over_recent_frames() {
        let start = Instant::now();
        let mut clock = clock_at(start);
        clock.tick_at(start + Duration::from_millis(10));
        let ft = clock.tick_at(start + Duration::from_millis(40));
        assert!((ft.raw_dt - 0.030).abs() < 1e-5);
        assert!((ft.dt - 0.020).abs() < 1e-5);
    }

    #[test]
    fn window_forgets_old_frames() {
        let start = Instant::now();
        let mut clock = clock_at(start);
        let mut t = start + Duration::from_millis(200);
        clock.tick_at(t);
        for _ in 0..SMOOTHING_WINDOW {
            t += Duration::from_millis(10);
            clock.tick_at(t);
        }
        t += Duration::from_millis(10);
        let ft = clock.tick_at(t);
        assert!((ft.dt - 0.010).abs() < 1e-5);
    }
}
