/// Emulation frame clock
///
/// Fixed timestep loop that owns the tick counter the input engine is
/// keyed to. Each fixed step is one emulated frame.
use crate::engine::input::Tick;
use std::time::{Duration, Instant};

/// Target emulation rate (60 frames per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of emulated frames per host frame to prevent spiral of death
const MAX_FRAME_STEPS: u32 = 5;

/// Step cap while fast-forwarding
const MAX_FAST_FORWARD_STEPS: u32 = 20;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Frame clock state
pub struct GameLoop {
    /// Accumulated time for fixed timestep updates
    accumulator: Duration,

    /// Time of last host frame
    last_frame_time: Instant,

    /// Whether emulation is paused
    paused: bool,

    /// Whether emulation runs as fast as the step cap allows
    fast_forward: bool,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Current emulated frame; goes backwards on rewind
    tick: Tick,

    /// Host frames rendered
    frame_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,
}

impl GameLoop {
    /// Create a new frame clock at tick 0
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            paused: false,
            fast_forward: false,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            tick: 0,
            frame_count: 0,
            current_fps: 0.0,
        }
    }

    /// Begin a host frame, returns the number of emulated frames to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        if self.paused {
            return 0;
        }

        if self.fast_forward {
            self.accumulator = Duration::ZERO;
            return MAX_FAST_FORWARD_STEPS;
        }

        self.accumulator += frame_time;

        let mut updates = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && updates < MAX_FRAME_STEPS {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            updates += 1;
        }
        updates
    }

    /// Current emulated frame
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Move to the next emulated frame, returns the new tick
    pub fn advance(&mut self) -> Tick {
        self.tick += 1;
        self.tick
    }

    /// Step back `frames` emulated frames, returns the new tick
    pub fn rewind(&mut self, frames: u32) -> Tick {
        self.tick -= Tick::from(frames);
        self.tick
    }

    /// Get the fixed timestep (in seconds)
    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total number of host frames
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Check if emulation is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause emulation
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Emulation paused at tick {}", self.tick);
        }
    }

    /// Resume emulation
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            log::info!("Emulation resumed at tick {}", self.tick);
        }
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Check if fast-forward is on
    pub fn is_fast_forward(&self) -> bool {
        self.fast_forward
    }

    /// Toggle fast-forward
    pub fn toggle_fast_forward(&mut self) {
        self.fast_forward = !self.fast_forward;
        self.accumulator = Duration::ZERO;
        log::info!(
            "Fast-forward {}",
            if self.fast_forward { "on" } else { "off" }
        );
    }

    /// Update FPS calculation
    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
