//! `setInterval`/`setTimeout` scheduler.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Weak;
use std::time::Duration;

use variation_player::{Scheduler, TimerHandle};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::dispatch;
use crate::Controller;

/// Converts a delay to the millisecond argument of the browser timer API.
pub fn timeout_millis(delay: Duration) -> i32 {
    i32::try_from(delay.as_millis()).unwrap_or(i32::MAX)
}

struct Interval {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

/// [`Scheduler`] backed by the window's timers.
///
/// Timer callbacks hold a weak reference to the controller and go through
/// [`dispatch`], so a tick arriving after the viewer is gone does nothing.
pub struct BrowserScheduler {
    window: Window,
    controller: Weak<RefCell<Controller>>,
    intervals: HashMap<TimerHandle, Interval>,
    // Cancelled callbacks may still be on the stack; freed on the next start.
    retired: Vec<Interval>,
    next_handle: u64,
}

impl BrowserScheduler {
    /// Creates a scheduler whose callbacks reach `controller`.
    pub fn new(window: Window, controller: Weak<RefCell<Controller>>) -> Self {
        Self {
            window,
            controller,
            intervals: HashMap::new(),
            retired: Vec::new(),
            next_handle: 0,
        }
    }

    /// Number of running autoplay intervals.
    pub fn running(&self) -> usize {
        self.intervals.len()
    }

    /// Runs `callback` every `interval` until the returned handle is
    /// cancelled or the scheduler is dropped.
    pub fn start_interval(
        &mut self,
        interval: Duration,
        callback: impl FnMut() + 'static,
    ) -> TimerHandle {
        let handle = self.allocate_handle();
        self.run_every(handle, interval, callback);
        handle
    }

    fn allocate_handle(&mut self) -> TimerHandle {
        self.retired.clear();
        self.next_handle += 1;
        TimerHandle(self.next_handle)
    }

    fn run_every(
        &mut self,
        handle: TimerHandle,
        interval: Duration,
        callback: impl FnMut() + 'static,
    ) {
        let callback = Closure::<dyn FnMut()>::new(callback);
        match self.window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            timeout_millis(interval),
        ) {
            Ok(id) => {
                self.intervals.insert(
                    handle,
                    Interval {
                        id,
                        _callback: callback,
                    },
                );
            }
            Err(err) => tracing::error!("setInterval failed for {:?}: {:?}", handle, err),
        }
    }
}

impl Drop for BrowserScheduler {
    fn drop(&mut self) {
        for interval in self.intervals.values() {
            self.window.clear_interval_with_handle(interval.id);
        }
    }
}

impl Scheduler for BrowserScheduler {
    fn start_autoplay(&mut self, variation_id: &str, interval: Duration) -> TimerHandle {
        let handle = self.allocate_handle();
        let controller = self.controller.clone();
        let id = variation_id.to_string();
        self.run_every(handle, interval, move || {
            dispatch(&controller, |c| c.on_autoplay_tick(&id, handle));
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(interval) = self.intervals.remove(&handle) {
            self.window.clear_interval_with_handle(interval.id);
            self.retired.push(interval);
        }
    }

    fn schedule_resize(&mut self, variation_id: &str, delay: Duration) {
        let controller = self.controller.clone();
        let id = variation_id.to_string();
        let callback = Closure::once_into_js(move || {
            dispatch(&controller, |c| {
                c.on_resize_due(&id);
                Ok(())
            });
        });
        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                timeout_millis(delay),
            )
        {
            tracing::warn!("setTimeout failed for {}: {:?}", variation_id, err);
        }
    }
}
