use std::cell::Cell;

/// Source of wall-clock time in milliseconds. Only differences between
/// readings are meaningful.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            if let Some(window) = web_sys::window() {
                return window.performance().map(|p| p.now()).unwrap_or(0.0);
            }
            let global = js_sys::global();
            if let Ok(worker) = global.dyn_into::<web_sys::WorkerGlobalScope>() {
                return worker.performance().map(|p| p.now()).unwrap_or(0.0);
            }
            0.0 // Fail safe instead of panic
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            use std::time::{SystemTime, UNIX_EPOCH};
            let since_the_epoch = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default();
            since_the_epoch.as_secs_f64() * 1000.0
        }
    }
}

/// Hand-driven clock. Every reading returns the current time and then moves
/// it forward by `step_ms`, which lets tests burn through a budget at a
/// known rate.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
    step_ms: Cell<f64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_step(step_ms: f64) -> Self {
        let clock = Self::new();
        clock.step_ms.set(step_ms);
        clock
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        let now = self.now.get();
        self.now.set(now + self.step_ms.get());
        now
    }
}

/// The instant a search must stop by, fixed once per top-level call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deadline {
    start_ms: f64,
    at_ms: f64,
}

impl Deadline {
    #[allow(clippy::cast_precision_loss)]
    pub fn after<C: Clock + ?Sized>(clock: &C, budget_ms: u64) -> Self {
        let start_ms = clock.now_ms();
        Self {
            start_ms,
            at_ms: start_ms + budget_ms as f64,
        }
    }

    pub fn expired<C: Clock + ?Sized>(&self, clock: &C) -> bool {
        clock.now_ms() > self.at_ms
    }

    pub fn elapsed_ms<C: Clock + ?Sized>(&self, clock: &C) -> f64 {
        clock.now_ms() - self.start_ms
    }
}
