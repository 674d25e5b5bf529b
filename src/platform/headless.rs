//! Windowless platform: input is queued by the caller, frames are counted and
//! the status overlay is logged whenever it changes.

use std::collections::VecDeque;

use super::Platform;
use crate::error::{GameError, Result};
use crate::renderer::Canvas;
use crate::sim::InputEvent;

#[derive(Debug)]
pub struct HeadlessPlatform {
    width: u32,
    height: u32,
    queue: VecDeque<InputEvent>,
    frames_presented: u64,
    last_overlay: Option<String>,
}

impl HeadlessPlatform {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::SurfaceUnavailable(format!(
                "headless surface cannot be {}x{}",
                width, height
            )));
        }
        Ok(Self {
            width,
            height,
            queue: VecDeque::new(),
            frames_presented: 0,
            last_overlay: None,
        })
    }

    /// Queue an event for the next frame
    pub fn push(&mut self, event: InputEvent) {
        if let InputEvent::Resize { width, height } = event {
            self.width = width;
            self.height = height;
        }
        self.queue.push_back(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        for event in events {
            self.push(event);
        }
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Status text of the last presented frame
    pub fn last_overlay(&self) -> Option<&str> {
        self.last_overlay.as_deref()
    }
}

impl Platform for HeadlessPlatform {
    fn surface_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        self.queue.pop_front()
    }

    fn present(&mut self, canvas: &Canvas) -> Result<()> {
        self.frames_presented += 1;
        let text = canvas.overlay().map(|o| o.text.as_str());
        if text != self.last_overlay.as_deref() {
            if let Some(text) = text {
                log::info!("{}", text);
            }
            self.last_overlay = text.map(str::to_string);
        }
        Ok(())
    }
}
