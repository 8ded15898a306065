//! Clock adapters.
//!
//! - [`MonotonicClock`] — uptime seconds. On **`target_os = "espidf"`** it
//!   wraps `esp_timer_get_time()` (microsecond, monotonic); elsewhere it
//!   uses `std::time::Instant` for host-side simulation.
//! - [`ManualClock`] — a shared, settable clock for tests and replaying
//!   recorded sessions. Clones observe the same time. Host only: it needs
//!   64-bit atomics.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicI64, Ordering};
#[cfg(not(target_os = "espidf"))]
use std::sync::Arc;

use crate::app::ports::ClockPort;

/// Uptime clock for the ESP32 platform.
pub struct MonotonicClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Seconds since boot (monotonic).
    #[cfg(target_os = "espidf")]
    pub fn uptime_secs(&self) -> u64 {
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64 / 1_000_000
    }

    /// Seconds since construction (monotonic).
    #[cfg(not(target_os = "espidf"))]
    pub fn uptime_secs(&self) -> u64 {
        self.start.elapsed().as_secs()
    }
}

impl ClockPort for MonotonicClock {
    fn now_secs(&self) -> i64 {
        self.uptime_secs() as i64
    }
}

/// Settable clock; clones share one time value.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

#[cfg(not(target_os = "espidf"))]
impl ManualClock {
    pub fn new(start_secs: i64) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(start_secs)),
        }
    }

    pub fn set(&self, secs: i64) {
        self.now.store(secs, Ordering::Relaxed);
    }

    pub fn advance(&self, secs: i64) {
        self.now.fetch_add(secs, Ordering::Relaxed);
    }
}

#[cfg(not(target_os = "espidf"))]
impl ClockPort for ManualClock {
    fn now_secs(&self) -> i64 {
        self.now.load(Ordering::Relaxed)
    }
}
