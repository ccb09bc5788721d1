// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Job timer daemon library
//!
//! The `jtd` binary wires these together; the modules are public so
//! workspace-level tests can drive the router in-process.

pub mod engine;
pub mod env;
pub mod lifecycle;
pub mod listener;
pub mod logging;

pub use engine::{Conflict, Engine, EngineError, ExecutionMode, FaultPolicy};
pub use lifecycle::{Config, LifecycleError};
pub use listener::{router, ApiError, ListenCtx};
