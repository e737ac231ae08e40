//! Frame timing.
//!
//! [`Clock`] is owned by the application loop and passed to whatever needs
//! frame timing. [`FrameLimiter`] sleeps away the rest of a frame to hold a
//! target frame rate.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Clock {
    start: Instant,
    last_update: Instant,
    delta: Duration,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            last_update: start,
            delta: Duration::ZERO,
        }
    }

    /// Advances the clock to now; call once per frame.
    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    /// Advances the clock to `now`. Times earlier than the last update
    /// yield a zero delta.
    pub fn update_at(&mut self, now: Instant) {
        self.delta = now.saturating_duration_since(self.last_update);
        self.last_update = self.last_update.max(now);
    }

    /// Time between the last two updates.
    pub fn delta(&self) -> Duration {
        self.delta
    }

    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Time from the start to the last update.
    pub fn elapsed(&self) -> Duration {
        self.last_update - self.start
    }

    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed().as_secs_f32()
    }
}

pub struct FrameLimiter {
    frame_time: Duration,
    previous_frame: Instant,
}

impl FrameLimiter {
    /// A zero `frame_time` disables limiting.
    pub fn new(frame_time: Duration) -> Self {
        Self {
            frame_time,
            previous_frame: Instant::now(),
        }
    }

    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    /// Waits if necessary to maintain the frame rate and returns the time
    /// elapsed since the previous call.
    pub fn wait(&mut self) -> Duration {
        let mut elapsed = self.previous_frame.elapsed();
        if elapsed < self.frame_time {
            std::thread::sleep(self.frame_time - elapsed);
            elapsed = self.previous_frame.elapsed();
        }
        self.previous_frame = Instant::now();
        elapsed
    }
}
