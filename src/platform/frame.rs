//! `requestAnimationFrame` scheduler

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::sim::{FrameHandle, FrameScheduler};

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Requests frames for a single long-lived callback
#[derive(Clone, Default)]
pub struct RafScheduler {
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl RafScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the per-frame callback (receives the frame timestamp in ms)
    pub fn set_callback(&self, callback: FrameCallback) {
        *self.callback.borrow_mut() = Some(callback);
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let window = web_sys::window()?;
        let callback = self.callback.borrow();
        let callback = callback.as_ref()?;
        window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .ok()
            .map(FrameHandle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(handle.0);
        }
    }
}
