//! Frame timing for the simulation loop.
//!
//! [`FrameClock`] is the single source of truth for engine time: elapsed
//! seconds, per-frame delta, and an FPS estimate computed over a rolling
//! one-second window (count frames, divide by the window's wall time, reset).
//!
//! # Example
//!
//! ```ignore
//! use embers::time::FrameClock;
//!
//! let mut clock = FrameClock::new();
//!
//! // Each frame:
//! let (now, delta) = clock.update();
//! println!("t={now:.2}s dt={delta:.4}s fps={:.0}", clock.fps());
//! ```

use std::time::{Duration, Instant};

/// How long FPS samples accumulate before the counter resets.
const FPS_WINDOW: Duration = Duration::from_secs(1);

/// Time tracking for the engine's frame loop.
#[derive(Debug)]
pub struct FrameClock {
    /// When the clock was created.
    start: Instant,
    /// When the last frame occurred.
    last_frame: Instant,
    /// Elapsed engine time in seconds.
    elapsed_secs: f32,
    /// Time since last frame in seconds.
    delta_secs: f32,
    /// Total frames since start.
    frame_count: u64,
    /// FPS over the last completed window.
    fps: f32,
    /// Frame count when the current window opened.
    fps_frame_count: u64,
    /// When the current window opened.
    fps_window_start: Instant,
    /// Whether the clock is paused.
    paused: bool,
    /// Accumulated time spent paused, excluded from elapsed time.
    pause_elapsed: Duration,
    /// Fixed step for deterministic updates; elapsed time advances by this
    /// step instead of wall time while set.
    fixed_delta: Option<f32>,
}

impl FrameClock {
    /// Create a clock starting from now.
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
            fps_window_start: now,
            paused: false,
            pause_elapsed: Duration::ZERO,
            fixed_delta: None,
        }
    }

    /// Advance the clock by one frame. Call once per tick.
    ///
    /// Returns `(elapsed, delta)` in seconds. While paused, delta is zero and
    /// elapsed does not advance.
    pub fn update(&mut self) -> (f32, f32) {
        let now = Instant::now();

        if self.paused {
            self.delta_secs = 0.0;
            return (self.elapsed_secs, 0.0);
        }

        match self.fixed_delta {
            Some(step) => {
                self.delta_secs = step;
                self.elapsed_secs += step;
                self.last_frame = now;
            }
            None => {
                self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
                self.last_frame = now;
                self.elapsed_secs =
                    (now.duration_since(self.start) - self.pause_elapsed).as_secs_f32();
            }
        }

        self.frame_count += 1;

        let window = now.duration_since(self.fps_window_start);
        if window >= FPS_WINDOW {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 / window.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_window_start = now;
        }

        (self.elapsed_secs, self.delta_secs)
    }

    /// Elapsed engine time in seconds, excluding paused spans.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Time since last frame in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// FPS over the last completed one-second window.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Whether the clock is currently paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop time progression. Idempotent.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume after a pause. Idempotent.
    ///
    /// Resets the last-frame timestamp so the first delta after resuming
    /// stays small instead of spanning the whole paused interval.
    pub fn resume(&mut self) {
        if self.paused {
            let now = Instant::now();
            self.pause_elapsed += now.duration_since(self.last_frame);
            self.last_frame = now;
            self.fps_window_start = now;
            self.fps_frame_count = self.frame_count;
            self.paused = false;
        }
    }

    /// Set a fixed per-frame step for deterministic updates, or `None` to
    /// use real frame timing.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
