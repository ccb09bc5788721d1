// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine errors.

use jt_core::{JobName, Transition};
use jt_storage::StoreError;
use thiserror::Error;

/// A start or stop that is illegal for the job's current state.
///
/// The display text is the client-visible rejection message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Conflict {
    #[error("Error: {0} already started.")]
    AlreadyStarted(JobName),

    #[error("Error: {0} not running.")]
    NotRunning(JobName),
}

impl Conflict {
    /// The conflict raised when `transition` is illegal for `job`.
    pub fn rejecting(transition: Transition, job: JobName) -> Self {
        match transition {
            Transition::Start => Conflict::AlreadyStarted(job),
            Transition::Stop => Conflict::NotRunning(job),
        }
    }
}

/// Errors from engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Conflict(#[from] Conflict),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("blocking store task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
