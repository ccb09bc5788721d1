// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `stdev` and `median` SQL aggregate functions.
//!
//! SQLite ships `avg` but neither of these; they are registered on every
//! connection the store opens. NULL inputs are skipped, and an aggregate over
//! zero non-NULL values yields NULL.

use jt_core::{MedianAccumulator, Welford};
use rusqlite::functions::{Aggregate, Context, FunctionFlags};
use rusqlite::Connection;

struct Stdev;

impl Aggregate<Welford, Option<f64>> for Stdev {
    fn init(&self, _ctx: &mut Context<'_>) -> rusqlite::Result<Welford> {
        Ok(Welford::default())
    }

    fn step(&self, ctx: &mut Context<'_>, acc: &mut Welford) -> rusqlite::Result<()> {
        if let Some(value) = ctx.get::<Option<f64>>(0)? {
            acc.push(value);
        }
        Ok(())
    }

    fn finalize(
        &self,
        _ctx: &mut Context<'_>,
        acc: Option<Welford>,
    ) -> rusqlite::Result<Option<f64>> {
        Ok(acc.filter(|acc| acc.count() > 0).map(|acc| acc.sample_stddev()))
    }
}

struct Median;

impl Aggregate<MedianAccumulator, Option<f64>> for Median {
    fn init(&self, _ctx: &mut Context<'_>) -> rusqlite::Result<MedianAccumulator> {
        Ok(MedianAccumulator::default())
    }

    fn step(&self, ctx: &mut Context<'_>, acc: &mut MedianAccumulator) -> rusqlite::Result<()> {
        if let Some(value) = ctx.get::<Option<f64>>(0)? {
            acc.push(value);
        }
        Ok(())
    }

    fn finalize(
        &self,
        _ctx: &mut Context<'_>,
        acc: Option<MedianAccumulator>,
    ) -> rusqlite::Result<Option<f64>> {
        Ok(acc.and_then(MedianAccumulator::median))
    }
}

pub(crate) fn register(conn: &Connection) -> rusqlite::Result<()> {
    let flags = FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC;
    conn.create_aggregate_function("stdev", 1, flags, Stdev)?;
    conn.create_aggregate_function("median", 1, flags, Median)?;
    Ok(())
}

#[cfg(test)]
#[path = "functions_tests.rs"]
mod tests;
