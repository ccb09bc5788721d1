// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only handlers. These read the store directly.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use jt_core::{Clock, JobStats, RunRecord, RunningJob};
use jt_storage::{Store, StoreError};

use super::{parse_job, ApiError, ListenCtx};
use crate::engine::{blocking, EngineError};

/// Run a store read, reporting failures as internal faults.
async fn read<C, T, F>(ctx: &ListenCtx<C>, what: &str, op: F) -> Result<T, ApiError>
where
    C: Clock + 'static,
    F: FnOnce(&Store) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let engine = &ctx.engine;
    blocking(engine.store(), op).await.map_err(|e: EngineError| {
        engine.faults().report(what, &e);
        ApiError::Internal
    })
}

pub(super) async fn status<C: Clock + 'static>(
    State(ctx): State<Arc<ListenCtx<C>>>,
) -> Result<Json<Vec<RunningJob>>, ApiError> {
    let running = read(&ctx, "reading job status", |store| store.status()).await?;
    Ok(Json(running))
}

pub(super) async fn history<C: Clock + 'static>(
    State(ctx): State<Arc<ListenCtx<C>>>,
    Path(job): Path<String>,
) -> Result<Json<Vec<RunRecord>>, ApiError> {
    let prefix = parse_job(job)?;
    let what = format!("reading history of {prefix}");
    let records = read(&ctx, &what, move |store| store.history(prefix.as_str())).await?;
    Ok(Json(records))
}

pub(super) async fn stats<C: Clock + 'static>(
    State(ctx): State<Arc<ListenCtx<C>>>,
    Path(job): Path<String>,
) -> Result<Json<JobStats>, ApiError> {
    let job = parse_job(job)?;
    let what = format!("reading stats of {job}");
    let lookup = job.clone();
    let stats = read(&ctx, &what, move |store| store.stats(&lookup)).await?;
    stats.map(Json).ok_or(ApiError::NoStats(job))
}
