// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup and shutdown.

mod startup;
pub use startup::{startup, StartupResult};

use std::fs::File;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use jt_core::SystemClock;
use jt_storage::StoreError;
use thiserror::Error;
use tracing::{info, warn};

use crate::engine::{Engine, ExecutionMode};
use crate::env;
use crate::listener::ListenCtx;

/// Engine with the real clock.
pub type DaemonEngine = Engine<SystemClock>;

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Root state directory (e.g. ~/.local/state/jt)
    pub state_dir: PathBuf,
    /// SQLite database file
    pub db_path: PathBuf,
    /// Path to lock/PID file
    pub lock_path: PathBuf,
    /// Path to daemon log file
    pub log_path: PathBuf,
    /// HTTP bind address
    pub bind: SocketAddr,
    /// Optional statement catalog override
    pub statements_path: Option<PathBuf>,
    /// Root of the static file trees
    pub static_dir: PathBuf,
    /// How long shutdown waits for queued stats recomputations
    pub drain_timeout: Duration,
    pub mode: ExecutionMode,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// `first_arg` is the first command-line argument; `dev` selects
    /// development mode.
    pub fn load(first_arg: Option<&str>) -> Result<Self, LifecycleError> {
        let mut config = Self::in_state_dir(env::state_dir()?);
        config.bind = env::bind_addr()?;
        config.statements_path = env::statements_path();
        config.static_dir = env::static_dir();
        config.drain_timeout = env::drain_timeout();
        config.mode = env::execution_mode(first_arg);
        Ok(config)
    }

    /// Defaults with every state file under `state_dir`.
    pub fn in_state_dir(state_dir: PathBuf) -> Self {
        Self {
            db_path: state_dir.join("jobs.db"),
            lock_path: state_dir.join("daemon.pid"),
            log_path: state_dir.join("daemon.log"),
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            statements_path: None,
            static_dir: PathBuf::from("."),
            drain_timeout: Duration::from_secs(5),
            mode: ExecutionMode::default(),
            state_dir,
        }
    }
}

/// Daemon state during operation.
///
/// The TCP listener is returned separately from startup to be served by axum.
pub struct DaemonState {
    /// Configuration
    pub config: Config,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    #[allow(dead_code)]
    lock_file: File,
    /// Lifecycle engine (shared with the HTTP handlers)
    pub engine: Arc<DaemonEngine>,
    /// When daemon started
    pub start_time: Instant,
}

impl DaemonState {
    /// Handler context for [`crate::listener::router`].
    pub fn listen_ctx(&self) -> Arc<ListenCtx<SystemClock>> {
        Arc::new(ListenCtx {
            engine: Arc::clone(&self.engine),
            static_dir: self.config.static_dir.clone(),
        })
    }

    /// Shutdown the daemon gracefully.
    ///
    /// Call once the HTTP server has stopped accepting requests. Queued stats
    /// recomputations get up to `drain_timeout` to finish; anything still
    /// queued after that is dropped and recomputed on the job's next stop.
    pub async fn shutdown(self) -> Result<(), LifecycleError> {
        info!("Shutting down daemon...");

        // 1. Drain the stats queue
        let drain = self.config.drain_timeout;
        if tokio::time::timeout(drain, self.engine.stats_queue().flush()).await.is_err() {
            warn!(timeout_ms = drain.as_millis() as u64, "stats drain timed out");
        }

        // 2. Remove PID file
        if self.config.lock_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.config.lock_path) {
                warn!("Failed to remove PID file: {}", e);
            }
        }

        // 3. Lock file is released automatically when self.lock_file is dropped

        info!(uptime_s = self.start_time.elapsed().as_secs(), "Daemon shutdown complete");
        Ok(())
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Could not determine state directory")]
    NoStateDir,

    #[error("Invalid bind address: {0}")]
    InvalidBind(String),

    #[error("Failed to acquire lock: daemon already running?")]
    LockFailed(#[source] std::io::Error),

    #[error("Failed to bind {0}: {1}")]
    BindFailed(SocketAddr, std::io::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Logging setup failed: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod test_helpers;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
