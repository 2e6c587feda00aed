//! Frame clock.
//!
//! Tracks elapsed time since the demo started, time since last frame and a
//! periodically refreshed FPS figure. Animations read [`Clock::elapsed`].
//!
//! # Example
//!
//! ```ignore
//! use pointfield::time::Clock;
//!
//! let mut clock = Clock::new();
//!
//! // Once per frame:
//! let elapsed = clock.tick();
//! scene.tick(elapsed);
//! ```

use std::time::{Duration, Instant};

/// Elapsed-time source for the frame loop.
#[derive(Debug)]
pub struct Clock {
    start: Instant,
    last_frame: Instant,
    elapsed_secs: f32,
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
    paused: bool,
    /// Time spent paused, excluded from `elapsed`.
    pause_elapsed: Duration,
}

impl Clock {
    /// Start a clock at the current instant.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            paused: false,
            pause_elapsed: Duration::ZERO,
        }
    }

    /// Advance to now. Call once per frame; returns elapsed seconds.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Advance to `now`.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        if self.paused {
            self.delta_secs = 0.0;
            return self.elapsed_secs;
        }

        self.delta_secs = now.saturating_duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        let raw = now.saturating_duration_since(self.start).saturating_sub(self.pause_elapsed);
        self.elapsed_secs = raw.as_secs_f32();

        self.frame_count += 1;

        let since_fps = now.saturating_duration_since(self.fps_update_time);
        if since_fps >= self.fps_update_interval {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 / since_fps.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.elapsed_secs
    }

    /// Seconds since start, excluding pauses, as of the last tick.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Seconds between the last two ticks.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Freeze elapsed time.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Continue after [`pause`](Self::pause); the paused span is skipped.
    pub fn resume(&mut self) {
        self.resume_at(Instant::now());
    }

    fn resume_at(&mut self, now: Instant) {
        if self.paused {
            self.pause_elapsed += now.saturating_duration_since(self.last_frame);
            self.last_frame = now;
            self.paused = false;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_new() {
        let clock = Clock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.elapsed(), 0.0);
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_tick_at_advances() {
        let mut clock = Clock::new();
        let t0 = clock.start;
        let elapsed = clock.tick_at(t0 + Duration::from_millis(250));
        assert!((elapsed - 0.25).abs() < 1e-4);
        assert!((clock.delta() - 0.25).abs() < 1e-4);
        clock.tick_at(t0 + Duration::from_millis(300));
        assert!((clock.delta() - 0.05).abs() < 1e-4);
        assert_eq!(clock.frame(), 2);
    }

    #[test]
    fn test_pause_excludes_time() {
        let mut clock = Clock::new();
        let t0 = clock.start;
        clock.tick_at(t0 + Duration::from_secs(1));

        clock.pause();
        let frozen = clock.tick_at(t0 + Duration::from_secs(3));
        assert_eq!(frozen, clock.elapsed());
        assert!((frozen - 1.0).abs() < 1e-4);
        assert_eq!(clock.delta(), 0.0);

        clock.resume_at(t0 + Duration::from_secs(3));
        let after = clock.tick_at(t0 + Duration::from_secs(4));
        assert!((after - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_fps_after_interval() {
        let mut clock = Clock::new();
        let t0 = clock.start;
        for i in 1..=30 {
            clock.tick_at(t0 + Duration::from_millis(i * 1000 / 60));
        }
        assert!(clock.fps() > 50.0 && clock.fps() < 70.0, "fps {}", clock.fps());
    }
}
