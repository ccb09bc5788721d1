// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for listener tests.

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use jt_storage::StatementCatalog;
use tower::ServiceExt;

use super::{router, ListenCtx};
use crate::engine::test_helpers::{setup_with_catalog, TestContext};

pub(super) struct TestApp {
    pub app: Router,
    pub ctx: TestContext,
}

pub(super) fn test_app(static_dir: &Path) -> TestApp {
    test_app_with_catalog(static_dir, StatementCatalog::builtin())
}

pub(super) fn test_app_with_catalog(static_dir: &Path, catalog: StatementCatalog) -> TestApp {
    let ctx = setup_with_catalog(catalog);
    let listen = ListenCtx { engine: Arc::clone(&ctx.engine), static_dir: static_dir.to_path_buf() };
    TestApp { app: router(Arc::new(listen)), ctx }
}

impl TestApp {
    /// Issue a `GET` and return the status and body text.
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::get(uri).body(Body::empty()).unwrap();
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    pub async fn get_json(&self, uri: &str) -> serde_json::Value {
        let (status, body) = self.get(uri).await;
        assert_eq!(status, StatusCode::OK, "GET {uri} failed: {body}");
        serde_json::from_str(&body).unwrap()
    }
}
