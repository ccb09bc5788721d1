// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::engine::ExecutionMode;
use crate::lifecycle::LifecycleError;

/// Default HTTP bind address.
pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// Resolve state directory: JT_STATE_DIR > XDG_STATE_HOME/jt > ~/.local/state/jt
pub fn state_dir() -> Result<PathBuf, LifecycleError> {
    if let Some(dir) = non_empty("JT_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Some(xdg) = non_empty("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("jt"));
    }
    let home = dirs::home_dir().ok_or(LifecycleError::NoStateDir)?;
    Ok(home.join(".local/state/jt"))
}

/// HTTP bind address (`JT_BIND`, default [`DEFAULT_BIND`]).
pub fn bind_addr() -> Result<SocketAddr, LifecycleError> {
    let raw = non_empty("JT_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
    raw.parse().map_err(|_| LifecycleError::InvalidBind(raw))
}

/// Optional statement catalog override file.
pub fn statements_path() -> Option<PathBuf> {
    non_empty("JT_STATEMENTS").map(PathBuf::from)
}

/// Root of the static file trees (default: current directory).
pub fn static_dir() -> PathBuf {
    non_empty("JT_STATIC_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."))
}

/// Shutdown drain timeout (default 5s, configurable via `JT_DRAIN_TIMEOUT_MS`).
pub fn drain_timeout() -> Duration {
    std::env::var("JT_DRAIN_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(5))
}

/// Execution mode: a first argument of `dev` wins, then `JT_MODE`.
pub fn execution_mode(first_arg: Option<&str>) -> ExecutionMode {
    if first_arg == Some("dev") {
        return ExecutionMode::Development;
    }
    non_empty("JT_MODE").and_then(|s| ExecutionMode::parse(&s)).unwrap_or_default()
}

fn non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
