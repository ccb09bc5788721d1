// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Store and statement catalog errors.

use std::path::PathBuf;

use jt_core::JobName;
use thiserror::Error;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite: {0}")]
    Sql(#[from] rusqlite::Error),

    /// A stop found no open run record to close.
    #[error("no open run for job {0}")]
    NoOpenRun(JobName),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from loading a statement catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read statement catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse statement catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown statement `{0}`")]
    UnknownStatement(String),
}
