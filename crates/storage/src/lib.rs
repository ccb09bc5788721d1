// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Storage layer for the job timer: SQLite run records and job statistics.

mod catalog;
mod error;
mod functions;
mod store;

pub use catalog::{Op, StatementCatalog};
pub use error::{CatalogError, StoreError};
pub use store::{RunEvent, Store};
