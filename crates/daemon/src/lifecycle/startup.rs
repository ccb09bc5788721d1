// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon startup and initialization logic.

use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use fs2::FileExt;
use jt_core::SystemClock;
use jt_storage::{StatementCatalog, Store};
use tokio::net::TcpListener;
use tracing::info;

use crate::engine::{Engine, FaultPolicy, StatsWorker};

use super::{Config, DaemonState, LifecycleError};

/// Result of daemon startup: the daemon state and the bound listener.
pub struct StartupResult {
    pub daemon: DaemonState,
    /// The TCP listener to serve the router on
    pub listener: TcpListener,
}

/// Start the daemon
pub async fn startup(config: &Config) -> Result<StartupResult, LifecycleError> {
    match startup_inner(config).await {
        Ok(result) => Ok(result),
        Err(e) => {
            // Don't clean up if we failed to acquire the lock:
            // the PID file belongs to the already-running daemon.
            if !matches!(e, LifecycleError::LockFailed(_)) {
                cleanup_on_failure(config);
            }
            Err(e)
        }
    }
}

/// Inner startup logic - cleanup_on_failure called if this fails
async fn startup_inner(config: &Config) -> Result<StartupResult, LifecycleError> {
    // 1. Create state directory
    std::fs::create_dir_all(&config.state_dir)?;

    // 2. Acquire lock file FIRST - prevents two daemons sharing one store.
    // Use OpenOptions to avoid truncating the file before we hold the lock,
    // which would wipe the running daemon's PID.
    let lock_file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&config.lock_path)?;
    lock_file.try_lock_exclusive().map_err(LifecycleError::LockFailed)?;

    // Write PID to lock file (truncate now that we hold the lock)
    let mut lock_file = lock_file;
    lock_file.set_len(0)?;
    writeln!(lock_file, "{}", std::process::id())?;
    let lock_file = lock_file; // Drop mutability

    let faults = FaultPolicy::new(config.mode);

    // 3. Statement catalog; a bad override falls back to the built-in one
    let catalog = load_catalog(config, faults);

    // 4. Open the store (fatal on failure) and create the schema
    let store = Store::open(&config.db_path, catalog)?;
    if let Err(e) = store.migrate() {
        faults.report("creating schema", &e);
    }
    let store = Arc::new(store);
    info!(path = %config.db_path.display(), "opened store");

    // 5. Stats worker and engine
    let (stats, _worker) = StatsWorker::spawn(Arc::clone(&store), faults);
    let engine = Arc::new(Engine::new(store, stats, faults, SystemClock));

    // 6. Bind (LAST - only after all validation passes)
    let listener = TcpListener::bind(config.bind)
        .await
        .map_err(|e| LifecycleError::BindFailed(config.bind, e))?;
    info!(addr = %listener.local_addr()?, mode = %config.mode, "daemon listening");

    let daemon =
        DaemonState { config: config.clone(), lock_file, engine, start_time: Instant::now() };
    Ok(StartupResult { daemon, listener })
}

fn load_catalog(config: &Config, faults: FaultPolicy) -> StatementCatalog {
    let Some(path) = &config.statements_path else {
        return StatementCatalog::builtin();
    };
    match StatementCatalog::load(path) {
        Ok(catalog) => {
            info!(path = %path.display(), "loaded statement overrides");
            catalog
        }
        Err(e) => {
            faults.report(&format!("loading statement catalog {}", path.display()), &e);
            StatementCatalog::builtin()
        }
    }
}

/// Clean up resources on startup failure
fn cleanup_on_failure(config: &Config) {
    // Remove PID/lock file
    if config.lock_path.exists() {
        let _ = std::fs::remove_file(&config.lock_path);
    }
}

#[cfg(test)]
#[path = "startup_tests.rs"]
mod tests;
