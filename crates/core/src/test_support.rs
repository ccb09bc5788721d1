// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::JobName;

/// Parse a job name known to be valid in test code.
pub fn job(name: &str) -> JobName {
    match JobName::parse(name) {
        Ok(name) => name,
        Err(e) => unreachable!("invalid test job name {name:?}: {e}"),
    }
}

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for job names and run durations.
pub mod strategies {
    use crate::JobName;
    use proptest::prelude::*;

    pub fn arb_job_name() -> impl Strategy<Value = JobName> {
        "[a-z][a-z0-9/_-]{0,15}".prop_filter_map("non-empty job name", |s| JobName::parse(s).ok())
    }

    /// Durations between one microsecond and one day, in nanoseconds.
    pub fn arb_durations() -> impl Strategy<Value = Vec<i64>> {
        proptest::collection::vec(1_000i64..86_400_000_000_000, 1..32)
    }
}
