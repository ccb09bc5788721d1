// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory running state per job.

use std::collections::HashMap;

use jt_core::JobName;
use parking_lot::Mutex;

/// Last known "is running" state per job name.
///
/// Entries are created lazily on first reference and live for the whole
/// process. Only the engine writes entries, and only after a committed
/// write (or a store lookup) established the value.
#[derive(Debug, Default)]
pub struct RunningCache {
    entries: Mutex<HashMap<JobName, bool>>,
}

impl RunningCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached state, `None` if the job has not been seen yet.
    pub fn get(&self, job: &JobName) -> Option<bool> {
        self.entries.lock().get(job).copied()
    }

    pub fn set_running(&self, job: &JobName, running: bool) {
        self.entries.lock().insert(job.clone(), running);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
