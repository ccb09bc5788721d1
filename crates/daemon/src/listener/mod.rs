// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP listener.
//!
//! Every route is a `GET`. The job name is the rest of the path after the
//! route prefix and may itself contain `/`. Mutations go through the
//! [`Engine`]; queries read the store directly and never touch the running
//! cache.

mod error;
mod mutations;
mod query;

use std::path::PathBuf;
use std::sync::Arc;

use axum::http::Uri;
use axum::routing::get;
use axum::Router;
use jt_core::{Clock, JobName, JobNameError};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::engine::Engine;

pub use error::ApiError;

/// Shared context for all request handlers.
pub struct ListenCtx<C: Clock> {
    pub engine: Arc<Engine<C>>,
    /// Root of the `www/` and `bower_components/` trees.
    pub static_dir: PathBuf,
}

/// Build the HTTP router.
pub fn router<C: Clock + 'static>(ctx: Arc<ListenCtx<C>>) -> Router {
    let www = ServeDir::new(ctx.static_dir.join("www"));
    let bower = ServeDir::new(ctx.static_dir.join("bower_components"));

    Router::new()
        .route("/start/*job", get(mutations::start::<C>))
        .route("/stop/*job", get(mutations::stop::<C>))
        .route("/status", get(query::status::<C>))
        .route("/history/*job", get(query::history::<C>))
        .route("/stats/*job", get(query::stats::<C>))
        .nest_service("/www", www)
        .nest_service("/bower_components", bower)
        .fallback(unmatched)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Prefixes of the routes that take a job name.
const JOB_ROUTES: [&str; 4] = ["/start/", "/stop/", "/history/", "/stats/"];

/// A wildcard never captures an empty name, so `/start/` and friends land
/// here and are rejected like any other invalid name.
async fn unmatched(uri: Uri) -> ApiError {
    if JOB_ROUTES.contains(&uri.path()) {
        ApiError::BadRequest(JobNameError::Empty.to_string())
    } else {
        ApiError::NotFound
    }
}

/// Parse the job name captured from the path.
fn parse_job(raw: String) -> Result<JobName, ApiError> {
    JobName::parse(raw).map_err(|e| ApiError::BadRequest(e.to_string()))
}

#[cfg(test)]
mod test_fixtures;

#[cfg(test)]
#[path = "../listener_tests.rs"]
mod tests;
