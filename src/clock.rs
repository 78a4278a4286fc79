//! Time sources for latency measurement.
//!
//! Callers receive a [`Clock`] instead of reading the system time directly,
//! so tests can substitute a [`ManualClock`].
use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::{Duration, Instant},
};

use chrono::Utc;

pub trait Clock {
    /// Milliseconds since the Unix epoch.
    ///
    /// Successive calls never return a smaller value.
    fn now(&self) -> f64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> f64 {
        (**self).now()
    }
}

/// Monotonic clock anchored to the wall-clock time at construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
    origin_ms: f64,
}

impl SystemClock {
    pub fn new() -> Self {
        let origin = Instant::now();
        let origin_ms = Utc::now().timestamp_micros() as f64 / 1000.0;

        Self { origin, origin_ms }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin_ms + self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    millis: AtomicU64,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            millis: AtomicU64::new(start_ms.to_bits()),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, duration: Duration) {
        let delta = duration.as_secs_f64() * 1000.0;

        let _ = self
            .millis
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                Some((f64::from_bits(bits) + delta).to_bits())
            });
    }

    /// Move the clock to `millis`.
    ///
    /// Times earlier than the current reading are ignored.
    pub fn set(&self, millis: f64) {
        let _ = self
            .millis
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                Some(f64::from_bits(bits).max(millis).to_bits())
            });
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        f64::from_bits(self.millis.load(Ordering::Acquire))
    }
}

/// Current timestamp in milliseconds from the given clock.
pub fn performance_now<C: Clock + ?Sized>(clock: &C) -> f64 {
    clock.now()
}

/// Milliseconds elapsed since `start`, a value previously returned by the clock.
pub fn elapsed_since<C: Clock + ?Sized>(clock: &C, start: f64) -> f64 {
    (clock.now() - start).max(0.0)
}
