// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background statistics recomputation.
//!
//! Every accepted stop submits exactly one recompute request. Requests are
//! processed in submission order by a single worker task, outside the
//! request/response path. A failed recomputation is reported and dropped;
//! the next stop of the same job recomputes from scratch, so nothing is
//! retried.

use std::sync::Arc;

use jt_core::JobName;
use jt_storage::Store;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::blocking;
use super::fault::FaultPolicy;

enum StatsRequest {
    Recompute(JobName),
    Flush(oneshot::Sender<()>),
}

/// Handle for submitting work to the [`StatsWorker`].
#[derive(Clone)]
pub struct StatsQueue {
    tx: mpsc::UnboundedSender<StatsRequest>,
}

impl StatsQueue {
    /// Queue a recomputation of `job`'s stats. Returns `false` if the worker
    /// has stopped.
    pub fn submit(&self, job: JobName) -> bool {
        match self.tx.send(StatsRequest::Recompute(job)) {
            Ok(()) => true,
            Err(mpsc::error::SendError(StatsRequest::Recompute(job))) => {
                warn!(job = %job, "stats worker stopped, recomputation dropped");
                false
            }
            Err(_) => false,
        }
    }

    /// Resolve once every request submitted before this call was processed.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(StatsRequest::Flush(done_tx)).is_ok() {
            let _ = done_rx.await;
        }
    }
}

/// Worker task that recomputes job stats one request at a time.
pub struct StatsWorker {
    rx: mpsc::UnboundedReceiver<StatsRequest>,
    store: Arc<Store>,
    faults: FaultPolicy,
}

impl StatsWorker {
    /// Spawn the worker. It runs until every [`StatsQueue`] clone is dropped.
    pub fn spawn(store: Arc<Store>, faults: FaultPolicy) -> (StatsQueue, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = StatsWorker { rx, store, faults };
        let handle = tokio::spawn(worker.run());
        (StatsQueue { tx }, handle)
    }

    async fn run(mut self) {
        while let Some(request) = self.rx.recv().await {
            match request {
                StatsRequest::Recompute(job) => self.recompute(job).await,
                StatsRequest::Flush(done) => {
                    let _ = done.send(());
                }
            }
        }
        info!("stats worker stopped");
    }

    async fn recompute(&self, job: JobName) {
        let name = job.clone();
        match blocking(&self.store, move |store| store.recompute_stats(&job)).await {
            Ok(Some(stats)) => debug!(
                job = %name,
                average = stats.average,
                stddev = stats.stddev,
                median = stats.median,
                "recomputed job stats"
            ),
            Ok(None) => debug!(job = %name, "no completed runs, stats left absent"),
            Err(e) => self.faults.report(&format!("recomputing stats for {name}"), &e),
        }
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
