// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-job mutual exclusion.

use std::collections::HashMap;
use std::sync::Arc;

use jt_core::JobName;
use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// One async lock per job name.
///
/// The engine holds a job's lock across "read state, write, update cache",
/// so two requests for the same job never interleave while requests for
/// different jobs run in parallel. Locks are never evicted.
#[derive(Debug, Default)]
pub struct JobLocks {
    locks: Mutex<HashMap<JobName, Arc<AsyncMutex<()>>>>,
}

impl JobLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `job`.
    pub async fn lock(&self, job: &JobName) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock();
            Arc::clone(locks.entry(job.clone()).or_default())
        };
        lock.lock_owned().await
    }

    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.lock().is_empty()
    }
}

#[cfg(test)]
#[path = "locks_tests.rs"]
mod tests;
