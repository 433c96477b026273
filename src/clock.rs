//! Periodic tick drivers
//!
//! The game never reads wall-clock time itself. A [`Clock`] fires a callback
//! every period; changing speed reschedules the timer so the new period
//! applies from the next boundary.
//!
//! - [`ManualClock`]: virtual time advanced by hand (tests, headless runs)
//! - `IntervalClock`: `window.setInterval` on wasm32

use std::cell::RefCell;
use std::rc::Rc;

/// Callback fired on every period boundary
pub type TickCallback = Box<dyn FnMut()>;

/// Abstraction over a periodic timer
pub trait Clock {
    type Handle: Copy + std::fmt::Debug + PartialEq + 'static;

    fn schedule(&self, period_ms: u32, callback: TickCallback) -> Self::Handle;

    /// Change the period; the next fire is one new period from now
    fn reschedule(&self, handle: Self::Handle, period_ms: u32);

    fn cancel(&self, handle: Self::Handle);
}

struct ManualTimer {
    id: u32,
    period_ms: u32,
    due_ms: u64,
    /// Taken out while the callback runs so it may call back into the clock
    callback: Option<TickCallback>,
}

#[derive(Default)]
struct ManualInner {
    now_ms: u64,
    next_id: u32,
    timers: Vec<ManualTimer>,
}

/// Virtual-time clock; cloning shares the same timeline
#[derive(Clone, Default)]
pub struct ManualClock {
    inner: Rc<RefCell<ManualInner>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }

    /// Period of a live timer
    pub fn period_ms(&self, handle: u32) -> Option<u32> {
        self.inner
            .borrow()
            .timers
            .iter()
            .find(|t| t.id == handle)
            .map(|t| t.period_ms)
    }

    /// Run virtual time forward, firing every due callback in time order.
    /// Returns the number of callbacks fired.
    pub fn advance(&self, ms: u64) -> usize {
        let target = self.inner.borrow().now_ms + ms;
        let mut fired = 0;

        loop {
            let next = {
                let mut inner = self.inner.borrow_mut();
                let Some(idx) = inner
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due_ms <= target && t.callback.is_some())
                    .min_by_key(|(_, t)| (t.due_ms, t.id))
                    .map(|(i, _)| i)
                else {
                    break;
                };
                let timer = &mut inner.timers[idx];
                let due = timer.due_ms;
                let id = timer.id;
                timer.due_ms += u64::from(timer.period_ms);
                let callback = timer.callback.take();
                inner.now_ms = due;
                callback.map(|cb| (id, cb))
            };

            let Some((id, mut callback)) = next else { break };
            callback();
            fired += 1;

            let mut inner = self.inner.borrow_mut();
            if let Some(timer) = inner.timers.iter_mut().find(|t| t.id == id) {
                timer.callback = Some(callback);
            }
        }

        self.inner.borrow_mut().now_ms = target;
        fired
    }
}

impl Clock for ManualClock {
    type Handle = u32;

    fn schedule(&self, period_ms: u32, callback: TickCallback) -> u32 {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let due_ms = inner.now_ms + u64::from(period_ms.max(1));
        inner.timers.push(ManualTimer {
            id,
            period_ms: period_ms.max(1),
            due_ms,
            callback: Some(callback),
        });
        id
    }

    fn reschedule(&self, handle: u32, period_ms: u32) {
        let mut inner = self.inner.borrow_mut();
        let now = inner.now_ms;
        if let Some(timer) = inner.timers.iter_mut().find(|t| t.id == handle) {
            timer.period_ms = period_ms.max(1);
            timer.due_ms = now + u64::from(timer.period_ms);
        }
    }

    fn cancel(&self, handle: u32) {
        self.inner.borrow_mut().timers.retain(|t| t.id != handle);
    }
}

#[cfg(target_arch = "wasm32")]
pub use self::web::IntervalClock;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use super::{Clock, TickCallback};

    struct Interval {
        js_id: i32,
        closure: Closure<dyn FnMut()>,
    }

    /// `setInterval`-backed clock
    #[derive(Clone, Default)]
    pub struct IntervalClock {
        intervals: Rc<RefCell<HashMap<u32, Interval>>>,
        next_id: Rc<Cell<u32>>,
    }

    impl IntervalClock {
        pub fn new() -> Self {
            Self::default()
        }

        fn set_interval(closure: &Closure<dyn FnMut()>, period_ms: u32) -> i32 {
            let Some(window) = web_sys::window() else {
                log::warn!("No window - clock disabled");
                return -1;
            };
            window
                .set_interval_with_callback_and_timeout_and_arguments_0(
                    closure.as_ref().unchecked_ref(),
                    period_ms as i32,
                )
                .unwrap_or_else(|e| {
                    log::warn!("setInterval failed: {:?}", e);
                    -1
                })
        }

        fn clear_interval(js_id: i32) {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(js_id);
            }
        }
    }

    impl Clock for IntervalClock {
        type Handle = u32;

        fn schedule(&self, period_ms: u32, callback: TickCallback) -> u32 {
            let id = self.next_id.get() + 1;
            self.next_id.set(id);
            let closure = Closure::wrap(callback);
            let js_id = Self::set_interval(&closure, period_ms);
            self.intervals
                .borrow_mut()
                .insert(id, Interval { js_id, closure });
            id
        }

        fn reschedule(&self, handle: u32, period_ms: u32) {
            let mut intervals = self.intervals.borrow_mut();
            if let Some(interval) = intervals.get_mut(&handle) {
                Self::clear_interval(interval.js_id);
                interval.js_id = Self::set_interval(&interval.closure, period_ms);
                log::debug!("Clock rescheduled to {}ms", period_ms);
            }
        }

        fn cancel(&self, handle: u32) {
            if let Some(interval) = self.intervals.borrow_mut().remove(&handle) {
                Self::clear_interval(interval.js_id);
            }
        }
    }
}
