// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job lifecycle engine.
//!
//! Decides whether a start or stop is legal, records it, keeps the running
//! cache in step with the store, and queues stats recomputation on stop.

mod cache;
mod error;
mod fault;
mod locks;
mod stats;

#[cfg(test)]
pub(crate) mod test_helpers;

use std::sync::Arc;

use jt_core::{Clock, JobName, Params, Transition};
use jt_storage::{RunEvent, Store, StoreError};
use tracing::{info, warn};

pub use cache::RunningCache;
pub use error::{Conflict, EngineError};
pub use fault::{ExecutionMode, FaultPolicy};
pub use locks::JobLocks;
pub use stats::{StatsQueue, StatsWorker};

/// Run a blocking store operation on the blocking thread pool.
pub(crate) async fn blocking<T, F>(store: &Arc<Store>, op: F) -> Result<T, EngineError>
where
    F: FnOnce(&Store) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(store);
    let result = tokio::task::spawn_blocking(move || op(&store)).await?;
    Ok(result?)
}

/// The lifecycle engine.
///
/// Owns the running cache and the per-job locks. The store is shared with
/// the query surface and the stats worker.
pub struct Engine<C: Clock> {
    store: Arc<Store>,
    cache: RunningCache,
    locks: JobLocks,
    stats: StatsQueue,
    faults: FaultPolicy,
    clock: C,
}

impl<C: Clock + 'static> Engine<C> {
    pub fn new(store: Arc<Store>, stats: StatsQueue, faults: FaultPolicy, clock: C) -> Self {
        Self { store, cache: RunningCache::new(), locks: JobLocks::new(), stats, faults, clock }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn cache(&self) -> &RunningCache {
        &self.cache
    }

    pub fn faults(&self) -> FaultPolicy {
        self.faults
    }

    pub fn stats_queue(&self) -> &StatsQueue {
        &self.stats
    }

    /// Whether `job` currently has an open run.
    ///
    /// Answers from the cache when possible. On a miss the store is asked
    /// for an open run and the answer is cached. If that lookup fails the job
    /// is treated (and cached) as running, so a duplicate start is rejected
    /// rather than allowed.
    pub async fn is_running(&self, job: &JobName) -> bool {
        if let Some(running) = self.cache.get(job) {
            return running;
        }

        let lookup = {
            let job = job.clone();
            blocking(&self.store, move |store| store.open_run(&job)).await
        };
        let running = match lookup {
            Ok(open) => open.is_some(),
            Err(e) => {
                self.faults.report(&format!("checking if {job} is already running"), &e);
                true
            }
        };
        self.cache.set_running(job, running);
        running
    }

    /// Apply a start or stop of `job`.
    ///
    /// Illegal transitions (starting a running job, stopping an idle one)
    /// return a [`Conflict`] without writing anything. Legal ones are written
    /// atomically together with one parameter row per entry of `params`;
    /// the cache is updated only after the write commits. A stop also queues
    /// a stats recomputation, which the caller does not wait for.
    ///
    /// The work runs on its own task, so once called it finishes even if the
    /// returned future is dropped (a client hanging up mid-request).
    pub async fn record_event(
        self: &Arc<Self>,
        job: JobName,
        transition: Transition,
        params: Params,
    ) -> Result<(), EngineError> {
        let engine = Arc::clone(self);
        tokio::spawn(async move { engine.apply(job, transition, params).await }).await?
    }

    async fn apply(
        &self,
        job: JobName,
        transition: Transition,
        params: Params,
    ) -> Result<(), EngineError> {
        let _guard = self.locks.lock(&job).await;
        let now = self.clock.epoch_ns();

        let running = self.is_running(&job).await;
        if !transition.is_legal(running) {
            let conflict = Conflict::rejecting(transition, job);
            info!(%transition, "rejected: {conflict}");
            return Err(conflict.into());
        }

        let event = RunEvent { job: job.clone(), transition, at: now, params };
        match blocking(&self.store, move |store| store.record(&event)).await {
            Ok(()) => {}
            Err(EngineError::Store(StoreError::NoOpenRun(_))) => {
                warn!(job = %job, "cached as running but the store has no open run");
                self.cache.set_running(&job, false);
                return Err(Conflict::NotRunning(job).into());
            }
            Err(e) => {
                self.faults.report(&format!("recording {transition} of {job}"), &e);
                return Err(e);
            }
        }

        self.cache.set_running(&job, transition.running_after());
        info!(job = %job, %transition, at = now, "recorded");

        if transition == Transition::Stop {
            self.stats.submit(job);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
