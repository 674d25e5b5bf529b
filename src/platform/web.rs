//! Browser platform: blits the software canvas into a `<canvas>` 2D context
//! and turns DOM events into `InputEvent`s.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData, KeyboardEvent, MouseEvent};

use super::Platform;
use crate::error::{GameError, Result};
use crate::renderer::Canvas;
use crate::sim::{InputEvent, KeyCode, MouseButton};

const OVERLAY_FONT: &str = "14px monospace";
const OVERLAY_COLOR: &str = "#ffffff";

type EventQueue = Rc<RefCell<VecDeque<InputEvent>>>;

pub struct WebPlatform {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    queue: EventQueue,
}

impl WebPlatform {
    /// Attach to the `<canvas>` with id `canvas_id`
    pub fn new(canvas_id: &str) -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| GameError::SurfaceUnavailable("no document".into()))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| GameError::SurfaceUnavailable(format!("no #{} element", canvas_id)))?
            .dyn_into()
            .map_err(|_| GameError::SurfaceUnavailable(format!("#{} is not a canvas", canvas_id)))?;
        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(js_error)?
            .ok_or_else(|| GameError::SurfaceUnavailable("2d context refused".into()))?
            .dyn_into()
            .map_err(|_| GameError::SurfaceUnavailable("unexpected context type".into()))?;

        fit_to_client(&canvas);

        let platform = Self {
            canvas,
            context,
            queue: Rc::new(RefCell::new(VecDeque::new())),
        };
        platform.install_listeners()?;
        log::info!(
            "Canvas attached ({}x{})",
            platform.canvas.width(),
            platform.canvas.height()
        );
        Ok(platform)
    }

    fn install_listeners(&self) -> Result<()> {
        let window =
            web_sys::window().ok_or_else(|| GameError::SurfaceUnavailable("no window".into()))?;

        // Mouse move
        {
            let queue = self.queue.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                queue.borrow_mut().push_back(InputEvent::MouseMove {
                    x: event.offset_x() as f32,
                    y: event.offset_y() as f32,
                });
            });
            self.canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())
                .map_err(js_error)?;
            closure.forget();
        }

        // Mouse buttons
        {
            let queue = self.queue.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let button = match event.button() {
                    0 => MouseButton::Left,
                    1 => MouseButton::Middle,
                    _ => MouseButton::Right,
                };
                queue.borrow_mut().push_back(InputEvent::MouseDown(button));
            });
            self.canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())
                .map_err(js_error)?;
            closure.forget();
        }

        // Keyboard
        {
            let queue = self.queue.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let mut chars = key.chars();
                let code = match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => KeyCode::Other,
                };
                queue.borrow_mut().push_back(InputEvent::KeyDown(code));
            });
            window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
                .map_err(js_error)?;
            closure.forget();
        }

        // Window resize
        {
            let queue = self.queue.clone();
            let canvas = self.canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                fit_to_client(&canvas);
                queue.borrow_mut().push_back(InputEvent::Resize {
                    width: canvas.width(),
                    height: canvas.height(),
                });
            });
            window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
                .map_err(js_error)?;
            closure.forget();
        }

        Ok(())
    }
}

impl Platform for WebPlatform {
    fn surface_size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        self.queue.borrow_mut().pop_front()
    }

    fn present(&mut self, canvas: &Canvas) -> Result<()> {
        let image = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(canvas.as_bytes()),
            canvas.width(),
            canvas.height(),
        )
        .map_err(js_error)?;
        self.context
            .put_image_data(&image, 0.0, 0.0)
            .map_err(js_error)?;

        if let Some(overlay) = canvas.overlay() {
            self.context.set_font(OVERLAY_FONT);
            self.context.set_text_baseline("top");
            self.context.set_fill_style_str(OVERLAY_COLOR);
            self.context
                .fill_text(&overlay.text, overlay.x as f64, overlay.y as f64)
                .map_err(js_error)?;
        }
        Ok(())
    }
}

/// Match the backing store to the element's laid-out size
fn fit_to_client(canvas: &HtmlCanvasElement) {
    canvas.set_width(canvas.client_width().max(1) as u32);
    canvas.set_height(canvas.client_height().max(1) as u32);
}

fn js_error(value: JsValue) -> GameError {
    GameError::SurfaceUnavailable(format!("{:?}", value))
}
