// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for the engine.

use std::sync::Arc;

use jt_core::FakeClock;
use jt_storage::{StatementCatalog, Store};

use super::{Engine, ExecutionMode, FaultPolicy, StatsWorker};

pub(crate) type TestEngine = Engine<FakeClock>;

/// Engine over a migrated in-memory store.
pub(crate) struct TestContext {
    pub engine: Arc<TestEngine>,
    pub clock: FakeClock,
}

impl TestContext {
    pub fn store(&self) -> &Arc<Store> {
        self.engine.store()
    }
}

pub(crate) fn setup() -> TestContext {
    setup_with_catalog(StatementCatalog::builtin())
}

/// Engine whose store uses `catalog`; broken statements simulate store faults.
pub(crate) fn setup_with_catalog(catalog: StatementCatalog) -> TestContext {
    let store = Store::open_in_memory(catalog).unwrap();
    store.migrate().unwrap();
    setup_with_store(Arc::new(store))
}

pub(crate) fn setup_with_store(store: Arc<Store>) -> TestContext {
    let faults = FaultPolicy::new(ExecutionMode::Production);
    let (queue, _worker) = StatsWorker::spawn(Arc::clone(&store), faults);
    let clock = FakeClock::at(100);
    let engine = Arc::new(Engine::new(store, queue, faults, clock.clone()));
    TestContext { engine, clock }
}
