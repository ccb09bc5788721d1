// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Start and stop handlers.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use jt_core::{Clock, Params, Transition};

use super::{parse_job, ApiError, ListenCtx};

type QueryPairs = Query<Vec<(String, String)>>;

pub(super) async fn start<C: Clock + 'static>(
    State(ctx): State<Arc<ListenCtx<C>>>,
    Path(job): Path<String>,
    Query(pairs): QueryPairs,
) -> Result<StatusCode, ApiError> {
    apply(&ctx, job, Transition::Start, pairs).await
}

pub(super) async fn stop<C: Clock + 'static>(
    State(ctx): State<Arc<ListenCtx<C>>>,
    Path(job): Path<String>,
    Query(pairs): QueryPairs,
) -> Result<StatusCode, ApiError> {
    apply(&ctx, job, Transition::Stop, pairs).await
}

async fn apply<C: Clock + 'static>(
    ctx: &ListenCtx<C>,
    job: String,
    transition: Transition,
    pairs: Vec<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let job = parse_job(job)?;
    ctx.engine.record_event(job, transition, Params::from(pairs)).await?;
    Ok(StatusCode::OK)
}
