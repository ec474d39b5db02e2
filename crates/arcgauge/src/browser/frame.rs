//! `requestAnimationFrame`-driven frame scheduler.

use arcgauge_core::{FrameCallback, FrameHandle, FrameScheduler, GaugeError, Result, FRAME_RATE};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{window, Window};

/// Fallback delay when `requestAnimationFrame` is unavailable.
const FRAME_MS: i32 = (1000.0 / FRAME_RATE) as i32;

#[derive(Debug, Clone, Copy)]
enum Timer {
    AnimationFrame(i32),
    Timeout(i32),
}

/// Runs gauge frames on the browser's animation clock.
#[derive(Debug)]
pub struct AnimationFrameScheduler {
    window: Window,
    next_id: Cell<u64>,
    pending: Rc<RefCell<HashMap<u64, Timer>>>,
}

impl AnimationFrameScheduler {
    /// Create a scheduler for `window`.
    pub fn new(window: Window) -> Self {
        Self {
            window,
            next_id: Cell::new(0),
            pending: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Scheduler for the current window.
    pub fn from_window() -> Result<Self> {
        window()
            .map(Self::new)
            .ok_or_else(|| GaugeError::Surface("No window".into()))
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let pending = Rc::clone(&self.pending);
        let js = Closure::once_into_js(move || {
            pending.borrow_mut().remove(&id);
            callback();
        });
        let func: &js_sys::Function = js.unchecked_ref();

        let timer = match self.window.request_animation_frame(func) {
            Ok(raf) => Some(Timer::AnimationFrame(raf)),
            Err(err) => {
                tracing::debug!(?err, "requestAnimationFrame failed, falling back to setTimeout");
                self.window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(func, FRAME_MS)
                    .ok()
                    .map(Timer::Timeout)
            }
        };

        match timer {
            Some(timer) => {
                self.pending.borrow_mut().insert(id, timer);
            }
            None => tracing::warn!("could not schedule gauge frame"),
        }
        FrameHandle(id)
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        let Some(timer) = self.pending.borrow_mut().remove(&handle.0) else {
            return;
        };
        match timer {
            Timer::AnimationFrame(raf) => {
                if let Err(err) = self.window.cancel_animation_frame(raf) {
                    tracing::debug!(?err, "cancelAnimationFrame failed");
                }
            }
            Timer::Timeout(id) => self.window.clear_timeout_with_handle(id),
        }
    }
}
