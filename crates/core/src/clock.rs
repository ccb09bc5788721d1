// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A clock that provides the current wall-clock time.
///
/// Run records are stamped in nanoseconds since the Unix epoch, so that is
/// the only unit the clock exposes.
pub trait Clock: Clone + Send + Sync {
    fn epoch_ns(&self) -> i64;
}

/// Real system clock
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn epoch_ns(&self) -> i64 {
        let since_epoch = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
        i64::try_from(since_epoch.as_nanos()).unwrap_or(i64::MAX)
    }
}

/// Fake clock for testing with controllable time
#[derive(Clone)]
pub struct FakeClock {
    epoch_ns: Arc<Mutex<i64>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self { epoch_ns: Arc::new(Mutex::new(1_000_000)) }
    }

    /// Create a clock frozen at the given timestamp
    pub fn at(epoch_ns: i64) -> Self {
        Self { epoch_ns: Arc::new(Mutex::new(epoch_ns)) }
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        let nanos = i64::try_from(duration.as_nanos()).unwrap_or(i64::MAX);
        let mut current = self.epoch_ns.lock();
        *current = current.saturating_add(nanos);
    }

    /// Set the epoch nanoseconds value
    pub fn set_epoch_ns(&self, ns: i64) {
        *self.epoch_ns.lock() = ns;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn epoch_ns(&self) -> i64 {
        *self.epoch_ns.lock()
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
