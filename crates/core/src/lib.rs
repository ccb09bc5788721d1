// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jt-core: Core types for the job timer

pub mod macros;

pub mod clock;
pub mod job;
pub mod params;
pub mod stats;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
#[cfg(any(test, feature = "test-support"))]
pub use job::RunRecordBuilder;
pub use job::{JobName, JobNameError, RunRecord, RunningJob, Transition, OPEN_STOP};
pub use params::{Params, PARAMS_SEPARATOR};
pub use stats::{JobStats, MedianAccumulator, Welford};
