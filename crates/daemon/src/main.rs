// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jtd`: the job timer daemon.
//!
//! Usage: `jtd [dev]`. Configuration comes from `JT_*` environment variables.

use std::process::ExitCode;

use jt_daemon::lifecycle::{self, StartupResult};
use jt_daemon::{logging, router, Config, LifecycleError};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let first_arg = std::env::args().nth(1);
    let config = match Config::load(first_arg.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("jtd: {e}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match logging::init(&config.log_path) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("jtd: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("daemon failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<(), LifecycleError> {
    let StartupResult { daemon, listener } = lifecycle::startup(&config).await?;
    let app = router(daemon.listen_ctx());

    let shutdown = CancellationToken::new();
    tokio::spawn(wait_for_signal(shutdown.clone()));

    info!(version = env!("CARGO_PKG_VERSION"), "READY");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    daemon.shutdown().await
}

/// Cancel `token` on SIGINT or SIGTERM.
async fn wait_for_signal(token: CancellationToken) {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = sigterm.recv() => {}
            }
        }
        Err(e) => {
            warn!("failed to install SIGTERM handler: {e}");
            let _ = tokio::signal::ctrl_c().await;
        }
    }
    info!("shutdown signal received");
    token.cancel();
}
