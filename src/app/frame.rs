//! Frame timing: delta time, frame statistics and frame-rate capping

use std::time::{Duration, Instant};

/// Timing information for a single frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous frame (clamped)
    pub delta: f32,
    /// Seconds since the first frame
    pub elapsed: f64,
    /// Zero-based frame index
    pub frame: u64,
}

/// Measures time between frames
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Option<Instant>,
    last: Option<Instant>,
    frame: u64,
    max_delta: f32,
}

impl FrameClock {
    /// Creates a clock that clamps deltas to `max_delta` seconds
    pub fn new(max_delta: f32) -> Self {
        Self {
            start: None,
            last: None,
            frame: 0,
            max_delta: max_delta.max(0.0),
        }
    }

    /// Advances the clock to `now`
    ///
    /// The first tick reports a zero delta.
    pub fn tick(&mut self, now: Instant) -> FrameTime {
        let start = *self.start.get_or_insert(now);
        let delta = match self.last {
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
            None => 0.0,
        };
        self.last = Some(now);

        let frame = self.frame;
        self.frame += 1;

        FrameTime {
            delta: delta.min(self.max_delta),
            elapsed: now.saturating_duration_since(start).as_secs_f64(),
            frame,
        }
    }

    /// Number of frames ticked so far
    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}

/// Counts frames over a fixed interval to report frames per second
#[derive(Debug, Clone)]
pub struct FrameStats {
    interval: Duration,
    window_start: Option<Instant>,
    frames_in_window: u32,
    fps: Option<f32>,
}

impl FrameStats {
    pub fn new(interval_secs: f32) -> Self {
        Self {
            interval: Duration::from_secs_f32(interval_secs.max(0.01)),
            window_start: None,
            frames_in_window: 0,
            fps: None,
        }
    }

    /// Records a frame; returns the new fps value when an interval completes
    pub fn record(&mut self, now: Instant) -> Option<f32> {
        let window_start = *self.window_start.get_or_insert(now);
        self.frames_in_window += 1;

        let elapsed = now.saturating_duration_since(window_start);
        if elapsed < self.interval {
            return None;
        }

        let fps = self.frames_in_window as f32 / elapsed.as_secs_f32();
        self.fps = Some(fps);
        self.window_start = Some(now);
        self.frames_in_window = 0;
        Some(fps)
    }

    /// Last completed fps measurement
    pub fn fps(&self) -> Option<f32> {
        self.fps
    }
}

/// Spaces frames to honor an optional frame-rate cap
#[derive(Debug, Clone)]
pub struct FramePacer {
    frame_duration: Option<Duration>,
    last_frame: Option<Instant>,
}

impl FramePacer {
    /// `None` or `Some(0)` disables the cap
    pub fn new(target_fps: Option<u32>) -> Self {
        let frame_duration = target_fps
            .filter(|fps| *fps > 0)
            .map(|fps| Duration::from_secs_f64(1.0 / fps as f64));

        Self {
            frame_duration,
            last_frame: None,
        }
    }

    pub fn is_capped(&self) -> bool {
        self.frame_duration.is_some()
    }

    /// When the next frame may start; `None` means immediately
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.last_frame, self.frame_duration) {
            (Some(last), Some(duration)) => Some(last + duration),
            _ => None,
        }
    }

    /// Returns true if a frame may start at `now`
    pub fn is_due(&self, now: Instant) -> bool {
        self.next_deadline().is_none_or(|deadline| now >= deadline)
    }

    /// Marks the start of a frame
    pub fn frame_started(&mut self, now: Instant) {
        self.last_frame = Some(now);
    }
}

/// Counts presented frames against an optional limit
#[derive(Debug, Clone, Default)]
pub struct FrameLimit {
    max: Option<u64>,
    presented: u64,
}

impl FrameLimit {
    pub fn new(max: Option<u64>) -> Self {
        Self { max, presented: 0 }
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// True once `max` frames have been presented; a limit of 0 is reached immediately
    pub fn is_reached(&self) -> bool {
        self.max.is_some_and(|max| self.presented >= max)
    }

    /// Records a presented frame and reports whether the limit is now reached
    pub fn record_presented(&mut self) -> bool {
        self.presented += 1;
        self.is_reached()
    }
}
