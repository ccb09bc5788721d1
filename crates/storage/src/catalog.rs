// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Statement catalog: logical store operations mapped to SQL text.
//!
//! Every operation has a built-in statement. Operators may override any of
//! them with a TOML file of the form:
//!
//! ```toml
//! [statements]
//! history = "SELECT job, start, stop, params FROM records WHERE job = ?1"
//! ```
//!
//! Parameter positions are part of each operation's contract and are listed
//! on the [`Op`] variants.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::CatalogError;

/// Logical operations the store performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Op {
    /// Schema: run records table.
    CreateRecords,
    /// Schema: index used by the open-run lookup.
    CreateRecordsIndex,
    /// Schema: per-job statistics table.
    CreateStats,
    /// Schema: per-event parameter rows.
    CreateParams,
    /// `?1` job. Returns `job, start, stop, params` of the open run.
    OpenRun,
    /// `?1` job, `?2` start, `?3` stop sentinel, `?4` params JSON.
    Start,
    /// `?1` stop time, `?2` params JSON to append, `?3` job.
    Stop,
    /// `?1` job, `?2` event time, `?3` key, `?4` value.
    InsertParam,
    /// `?1` job. Upserts the job's stats row from its completed runs.
    RecomputeStats,
    /// `?1` job. Returns `job, average, stddev, median`.
    GetStats,
    /// No parameters. Returns `job, start, average, params` of open runs.
    Status,
    /// `?1` job name prefix. Returns `job, start, stop, params`.
    History,
}

jt_core::simple_display! {
    Op {
        CreateRecords => "create_records",
        CreateRecordsIndex => "create_records_index",
        CreateStats => "create_stats",
        CreateParams => "create_params",
        OpenRun => "open_run",
        Start => "start",
        Stop => "stop",
        InsertParam => "insert_param",
        RecomputeStats => "recompute_stats",
        GetStats => "get_stats",
        Status => "status",
        History => "history",
    }
}

impl Op {
    pub const ALL: [Op; 12] = [
        Op::CreateRecords,
        Op::CreateRecordsIndex,
        Op::CreateStats,
        Op::CreateParams,
        Op::OpenRun,
        Op::Start,
        Op::Stop,
        Op::InsertParam,
        Op::RecomputeStats,
        Op::GetStats,
        Op::Status,
        Op::History,
    ];

    /// Schema statements, in the order they are applied at startup.
    pub const SCHEMA: [Op; 4] =
        [Op::CreateRecords, Op::CreateRecordsIndex, Op::CreateStats, Op::CreateParams];

    pub fn from_key(key: &str) -> Option<Op> {
        Op::ALL.into_iter().find(|op| op.to_string() == key)
    }

    fn builtin_sql(self) -> &'static str {
        match self {
            Op::CreateRecords => {
                "CREATE TABLE IF NOT EXISTS records (\
                 job TEXT NOT NULL, start INTEGER NOT NULL, stop INTEGER NOT NULL, params TEXT)"
            }
            Op::CreateRecordsIndex => {
                "CREATE INDEX IF NOT EXISTS records_job_stop ON records(job, stop)"
            }
            Op::CreateStats => {
                "CREATE TABLE IF NOT EXISTS jobs (\
                 job TEXT NOT NULL PRIMARY KEY, average REAL, stddev REAL, median REAL)"
            }
            Op::CreateParams => {
                "CREATE TABLE IF NOT EXISTS record_params (\
                 job TEXT NOT NULL, time INTEGER NOT NULL, key TEXT NOT NULL, value TEXT NOT NULL)"
            }
            Op::OpenRun => {
                "SELECT job, start, stop, params FROM records WHERE job = ?1 AND stop = -1 LIMIT 1"
            }
            Op::Start => "INSERT INTO records (job, start, stop, params) VALUES (?1, ?2, ?3, ?4)",
            Op::Stop => {
                "UPDATE records SET stop = ?1, params = COALESCE(params, '') || '|' || ?2 \
                 WHERE job = ?3 AND stop = -1"
            }
            Op::InsertParam => {
                "INSERT INTO record_params (job, time, key, value) VALUES (?1, ?2, ?3, ?4)"
            }
            Op::RecomputeStats => {
                "REPLACE INTO jobs (job, average, stddev, median) \
                 SELECT job, avg(stop - start), stdev(stop - start), median(stop - start) \
                 FROM records WHERE stop != -1 AND job = ?1 GROUP BY job"
            }
            Op::GetStats => "SELECT job, average, stddev, median FROM jobs WHERE job = ?1",
            Op::Status => {
                "SELECT records.job, records.start, jobs.average, records.params FROM records \
                 LEFT JOIN jobs ON records.job = jobs.job \
                 WHERE records.stop = -1 ORDER BY records.start, records.job"
            }
            Op::History => {
                "SELECT job, start, stop, params FROM records \
                 WHERE substr(job, 1, length(?1)) = ?1 ORDER BY start, job"
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    statements: BTreeMap<String, String>,
}

/// Mapping from [`Op`] to the SQL text the store executes for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementCatalog {
    statements: BTreeMap<Op, String>,
}

impl StatementCatalog {
    /// Catalog holding the built-in statement for every operation.
    pub fn builtin() -> Self {
        let statements =
            Op::ALL.into_iter().map(|op| (op, op.builtin_sql().to_string())).collect();
        Self { statements }
    }

    /// Built-in catalog with the statements of a TOML document applied on top.
    pub fn from_toml_str(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(text)?;
        let mut catalog = Self::builtin();
        for (key, sql) in file.statements {
            let op = Op::from_key(&key).ok_or(CatalogError::UnknownStatement(key))?;
            catalog.statements.insert(op, sql);
        }
        Ok(catalog)
    }

    /// Load overrides from a TOML file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| CatalogError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&text)
    }

    /// Replace the statement for one operation.
    pub fn with(mut self, op: Op, sql: impl Into<String>) -> Self {
        self.statements.insert(op, sql.into());
        self
    }

    pub fn get(&self, op: Op) -> &str {
        self.statements.get(&op).map(String::as_str).unwrap_or_else(|| op.builtin_sql())
    }
}

impl Default for StatementCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
