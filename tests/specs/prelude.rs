//! Shared harness for specs.

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use jt_core::FakeClock;
use jt_daemon::engine::StatsWorker;
use jt_daemon::{router, Engine, ExecutionMode, FaultPolicy, ListenCtx};
use jt_storage::{StatementCatalog, Store};
use tempfile::TempDir;
use tower::ServiceExt;

pub use serde_json::{json, Value};

/// A daemon router over a store file in a temp directory, with a fake clock.
pub struct Timer {
    pub app: Router,
    pub clock: FakeClock,
    pub engine: Arc<Engine<FakeClock>>,
    dir: TempDir,
}

impl Timer {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let (app, clock, engine) = serve(dir.path());
        Self { app, clock, engine, dir }
    }

    /// A fresh router and engine over the same store file, as after a
    /// daemon restart. The running cache starts empty.
    pub fn restart(self) -> Self {
        let Timer { dir, .. } = self;
        let (app, clock, engine) = serve(dir.path());
        Self { app, clock, engine, dir }
    }

    /// Move the fake clock to `ns`.
    pub fn at(&self, ns: i64) -> &Self {
        self.clock.set_epoch_ns(ns);
        self
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::get(uri).body(Body::empty()).unwrap();
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    pub async fn get_ok(&self, uri: &str) {
        let (status, body) = self.get(uri).await;
        assert_eq!(status, StatusCode::OK, "GET {uri}: {body}");
    }

    pub async fn json(&self, uri: &str) -> Value {
        let (status, body) = self.get(uri).await;
        assert_eq!(status, StatusCode::OK, "GET {uri}: {body}");
        serde_json::from_str(&body).unwrap()
    }

    /// Wait until every queued stats recomputation has run.
    pub async fn settle(&self) {
        self.engine.stats_queue().flush().await;
    }
}

fn serve(dir: &Path) -> (Router, FakeClock, Arc<Engine<FakeClock>>) {
    let store = Store::open(&dir.join("jobs.db"), StatementCatalog::builtin()).unwrap();
    store.migrate().unwrap();
    let store = Arc::new(store);

    let faults = FaultPolicy::new(ExecutionMode::Production);
    let (queue, _worker) = StatsWorker::spawn(Arc::clone(&store), faults);
    let clock = FakeClock::at(0);
    let engine = Arc::new(Engine::new(store, queue, faults, clock.clone()));
    let ctx = ListenCtx { engine: Arc::clone(&engine), static_dir: dir.join("static") };
    (router(Arc::new(ctx)), clock, engine)
}
