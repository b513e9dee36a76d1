use std::collections::BTreeMap;

use foundation::time::Millis;
use runtime::timer::{TimerDriver, TimerError, TimerHandle};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::Window;

/// `setTimeout`-backed [`TimerDriver`].
///
/// A single dispatch closure serves every timer; the handle travels as the
/// timeout argument, so no per-timer closure has to be kept alive or leaked.
pub struct BrowserTimers {
    window: Window,
    dispatch: Closure<dyn FnMut(JsValue)>,
    /// handle -> browser timeout id
    live: BTreeMap<TimerHandle, i32>,
    next_handle: u64,
}

impl BrowserTimers {
    pub fn new(window: Window, mut on_fire: impl FnMut(TimerHandle) + 'static) -> Self {
        let dispatch = Closure::wrap(Box::new(move |arg: JsValue| {
            if let Some(raw) = arg.as_f64() {
                on_fire(TimerHandle::new(raw as u64));
            }
        }) as Box<dyn FnMut(JsValue)>);

        Self {
            window,
            dispatch,
            live: BTreeMap::new(),
            next_handle: 0,
        }
    }
}

impl TimerDriver for BrowserTimers {
    fn schedule(&mut self, delay: Millis) -> Result<TimerHandle, TimerError> {
        let handle = TimerHandle::new(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);

        let callback: &js_sys::Function = self.dispatch.as_ref().unchecked_ref();
        let id = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_1(
                callback,
                delay.as_timeout_i32(),
                &JsValue::from_f64(handle.raw() as f64),
            )
            .map_err(|e| TimerError::Host(format!("{:?}", e)))?;
        self.live.insert(handle, id);
        Ok(handle)
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.live.remove(&handle) {
            Some(id) => {
                self.window.clear_timeout_with_handle(id);
                true
            }
            None => false,
        }
    }

    fn release(&mut self, handle: TimerHandle) {
        self.live.remove(&handle);
    }
}

impl Drop for BrowserTimers {
    // The dispatch closure dies with us; nothing may call into it afterwards.
    fn drop(&mut self) {
        for id in self.live.values() {
            self.window.clear_timeout_with_handle(*id);
        }
    }
}
