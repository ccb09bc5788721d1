// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed store of run records, parameter rows, and job statistics.

use std::path::Path;
use std::time::Duration;

use jt_core::{JobName, JobStats, Params, RunRecord, RunningJob, Transition, OPEN_STOP};
use parking_lot::Mutex;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use crate::catalog::{Op, StatementCatalog};
use crate::error::StoreError;
use crate::functions;

/// A validated start or stop, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunEvent {
    pub job: JobName,
    pub transition: Transition,
    /// Event time in epoch nanoseconds.
    pub at: i64,
    pub params: Params,
}

/// Persistent store.
///
/// Owns a single connection; callers share the store behind an `Arc` and
/// run its blocking methods off the async executor.
pub struct Store {
    conn: Mutex<Connection>,
    catalog: StatementCatalog,
}

impl Store {
    /// Open (or create) the database file at `path`.
    pub fn open(path: &Path, catalog: StatementCatalog) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Self::with_connection(conn, catalog)
    }

    pub fn open_in_memory(catalog: StatementCatalog) -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?, catalog)
    }

    fn with_connection(conn: Connection, catalog: StatementCatalog) -> Result<Self, StoreError> {
        functions::register(&conn)?;
        Ok(Self { conn: Mutex::new(conn), catalog })
    }

    pub fn catalog(&self) -> &StatementCatalog {
        &self.catalog
    }

    /// Create the tables and indexes if they do not exist yet.
    pub fn migrate(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        for op in Op::SCHEMA {
            debug!(statement = %op, "applying schema statement");
            conn.execute_batch(self.catalog.get(op))?;
        }
        Ok(())
    }

    /// The open run of `job`, if any.
    pub fn open_run(&self, job: &JobName) -> Result<Option<RunRecord>, StoreError> {
        let conn = self.conn.lock();
        let record = conn
            .query_row(self.catalog.get(Op::OpenRun), params![job.as_str()], read_record)
            .optional()?;
        Ok(record)
    }

    /// Write a start or stop and its parameter rows in one transaction.
    ///
    /// A start inserts a new open run. A stop closes the open run and appends
    /// the stop-time parameters to the ones captured at start. Either every
    /// row commits or none do.
    pub fn record(&self, event: &RunEvent) -> Result<(), StoreError> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let params_json = event.params.to_json();

        match event.transition {
            Transition::Start => {
                tx.execute(
                    self.catalog.get(Op::Start),
                    params![event.job.as_str(), event.at, OPEN_STOP, params_json],
                )?;
            }
            Transition::Stop => {
                let closed = tx.execute(
                    self.catalog.get(Op::Stop),
                    params![event.at, params_json, event.job.as_str()],
                )?;
                if closed == 0 {
                    // Dropping the transaction rolls it back.
                    return Err(StoreError::NoOpenRun(event.job.clone()));
                }
            }
        }

        if !event.params.is_empty() {
            let mut insert = tx.prepare(self.catalog.get(Op::InsertParam))?;
            for (key, value) in event.params.pairs() {
                insert.execute(params![event.job.as_str(), event.at, key, value])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    /// Recompute and upsert the stats row of `job` from its completed runs.
    ///
    /// Returns the stored stats, or `None` when the job has no completed runs
    /// (no row is written in that case).
    pub fn recompute_stats(&self, job: &JobName) -> Result<Option<JobStats>, StoreError> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        tx.execute(self.catalog.get(Op::RecomputeStats), params![job.as_str()])?;
        let stats = tx
            .query_row(self.catalog.get(Op::GetStats), params![job.as_str()], read_stats)
            .optional()?;
        tx.commit()?;
        Ok(stats)
    }

    /// The stats row of exactly `job`.
    pub fn stats(&self, job: &JobName) -> Result<Option<JobStats>, StoreError> {
        let conn = self.conn.lock();
        let stats = conn
            .query_row(self.catalog.get(Op::GetStats), params![job.as_str()], read_stats)
            .optional()?;
        Ok(stats)
    }

    /// Every open run joined with its job's average, oldest first.
    pub fn status(&self) -> Result<Vec<RunningJob>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(self.catalog.get(Op::Status))?;
        let rows = stmt.query_map([], |row| {
            let params: Option<String> = row.get(3)?;
            Ok(RunningJob::new(
                read_job(row, 0)?,
                row.get(1)?,
                row.get(2)?,
                params.unwrap_or_default(),
            ))
        })?;
        let running = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(running)
    }

    /// Every run whose job name starts with `prefix`, oldest first.
    pub fn history(&self, prefix: &str) -> Result<Vec<RunRecord>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(self.catalog.get(Op::History))?;
        let rows = stmt.query_map(params![prefix], read_record)?;
        let records = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }
}

fn read_job(row: &Row<'_>, idx: usize) -> rusqlite::Result<JobName> {
    let raw: String = row.get(idx)?;
    JobName::parse(raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn read_record(row: &Row<'_>) -> rusqlite::Result<RunRecord> {
    let params: Option<String> = row.get(3)?;
    Ok(RunRecord {
        job: read_job(row, 0)?,
        start: row.get(1)?,
        stop: row.get(2)?,
        params: params.unwrap_or_default(),
    })
}

fn read_stats(row: &Row<'_>) -> rusqlite::Result<JobStats> {
    Ok(JobStats {
        job: read_job(row, 0)?,
        average: row.get(1)?,
        stddev: row.get(2)?,
        median: row.get(3)?,
    })
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
