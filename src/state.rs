use crate::demo::Demo;
use std::time::Instant;

/// Application state
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// Demo being shown
    pub demo: Demo,
    /// Enable debug mode
    pub debug: bool,
    /// Simulation paused
    pub paused: bool,
    /// Cleared when the user asks to quit
    pub running: bool,
    /// Last pointer position in surface pixels
    pub pointer: Option<[f64; 2]>,
}

impl AppState {
    pub fn new(demo: Demo) -> Self {
        AppState {
            demo,
            debug: false,
            paused: false,
            running: true,
            pointer: None,
        }
    }
}

/// Frames-per-second counter, refreshed once a second
#[derive(Debug, Clone)]
pub struct FrameStats {
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
}

impl FrameStats {
    pub fn new() -> Self {
        FrameStats {
            frames_since_last_update: 0,
            last_fps_calculation: Instant::now(),
            fps: 0.0,
        }
    }

    /// Counts a frame painted at `now`
    pub fn tick(&mut self, now: Instant) {
        self.frames_since_last_update += 1;
        let duration = now.duration_since(self.last_fps_calculation);
        if duration.as_secs_f64() >= 1.0 {
            self.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
        }
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}
