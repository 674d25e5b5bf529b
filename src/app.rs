//! Frame pipeline: drain input, simulate, render, present
//!
//! The host calls `App::frame` once per tick (nominally every 16 ms). A frame
//! is atomic with respect to input: every queued event is applied before the
//! world moves.

use crate::consts::{FPS_REPORT_WINDOW_MS, FRAME_PERIOD_MS};
use crate::error::Result;
use crate::platform::Platform;
use crate::renderer::{Canvas, render_frame};
use crate::sim::{Control, GameState, InputEvent, frame_dt, handle_event, tick};
use crate::tuning::Tuning;

/// Frames-per-second over a fixed reporting window
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    frames: u64,
    window_end_ms: Option<u64>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a frame; yields the average once per window
    pub fn frame(&mut self, now_ms: u64) -> Option<u32> {
        let window_end = *self
            .window_end_ms
            .get_or_insert(now_ms + FPS_REPORT_WINDOW_MS);
        self.frames += 1;
        if now_ms <= window_end {
            return None;
        }

        let fps = self.frames / (FPS_REPORT_WINDOW_MS / 1000);
        self.frames = 0;
        self.window_end_ms = Some(now_ms + FPS_REPORT_WINDOW_MS);
        Some(fps as u32)
    }
}

pub struct App {
    state: GameState,
    canvas: Canvas,
    fps: FpsCounter,
    fps_report: Option<u32>,
    last_frame_ms: Option<u64>,
}

impl App {
    /// Acquire the canvas and start the first round
    pub fn new(seed: u64, width: u32, height: u32, tuning: Tuning, now_ms: u64) -> Result<Self> {
        tuning.validate()?;
        let canvas = Canvas::new(width, height)?;
        let state = GameState::new(seed, width, height, tuning, now_ms);
        log::info!("Game initialized with seed: {} ({}x{})", seed, width, height);
        Ok(Self {
            state,
            canvas,
            fps: FpsCounter::new(),
            fps_report: None,
            last_frame_ms: None,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// FPS average produced by the last completed window, if not yet taken
    pub fn take_fps_report(&mut self) -> Option<u32> {
        self.fps_report.take()
    }

    /// Run one frame at clock reading `now_ms`
    pub fn frame<P: Platform>(&mut self, platform: &mut P, now_ms: u64) -> Result<Control> {
        while let Some(event) = platform.poll_event() {
            if let InputEvent::Resize { width, height } = event {
                self.canvas.resize(width, height)?;
            }
            if handle_event(&mut self.state, event, now_ms) == Control::Quit {
                return Ok(Control::Quit);
            }
        }

        let elapsed = self
            .last_frame_ms
            .map_or(FRAME_PERIOD_MS, |last| now_ms.saturating_sub(last));
        self.last_frame_ms = Some(now_ms);
        let dt = frame_dt(elapsed, &self.state.tuning);

        let events = tick(&mut self.state, dt, now_ms);
        if !events.is_empty() {
            log::trace!("Frame events: {:?}", events);
        }

        render_frame(&self.state, &mut self.canvas);
        platform.present(&self.canvas)?;

        if let Some(fps) = self.fps.frame(now_ms) {
            self.fps_report = Some(fps);
        }
        Ok(Control::Continue)
    }
}
