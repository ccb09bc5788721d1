// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for lifecycle tests.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

pub(super) use tempfile::tempdir;

pub(super) use super::{startup, Config, LifecycleError, StartupResult};

/// Config rooted in `dir`, bound to an ephemeral loopback port.
pub(super) fn test_config(dir: &Path) -> Config {
    let mut config = Config::in_state_dir(dir.join("state"));
    config.bind = SocketAddr::from(([127, 0, 0, 1], 0));
    config.static_dir = dir.join("static");
    config.drain_timeout = Duration::from_secs(2);
    config
}

/// Send a raw HTTP/1.1 GET to `addr` and return the full response text.
pub(super) async fn http_get(addr: SocketAddr, path: &str) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}
