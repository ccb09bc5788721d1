// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Aggregate duration statistics per job.
//!
//! The accumulators here back the `stdev` and `median` SQL aggregate
//! functions registered on the store's connection, so statistics computed in
//! SQL and statistics computed in memory agree exactly.

use serde::{Deserialize, Serialize};

use crate::job::JobName;

/// Aggregates over the durations of a job's completed runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobStats {
    pub job: JobName,
    pub average: f64,
    pub stddev: f64,
    pub median: f64,
}

impl JobStats {
    /// Compute stats for `job` from completed-run durations in nanoseconds.
    ///
    /// Returns `None` when there are no durations: a job without completed
    /// runs has no stats row.
    pub fn from_durations(job: JobName, durations: &[i64]) -> Option<Self> {
        let mut variance = Welford::default();
        let mut median = MedianAccumulator::default();
        for &d in durations {
            variance.push(d as f64);
            median.push(d as f64);
        }
        Some(Self {
            job,
            average: variance.mean()?,
            stddev: variance.sample_stddev(),
            median: median.median()?,
        })
    }
}

/// Running mean and variance (Welford's algorithm).
#[derive(Debug, Clone, Copy, Default)]
pub struct Welford {
    count: u64,
    mean: f64,
    m2: f64,
}

impl Welford {
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Sample standard deviation (divisor n-1); 0.0 for fewer than two values.
    pub fn sample_stddev(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        (self.m2 / (self.count - 1) as f64).sqrt()
    }
}

/// Collects values and reports their median.
#[derive(Debug, Clone, Default)]
pub struct MedianAccumulator {
    values: Vec<f64>,
}

impl MedianAccumulator {
    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    /// Middle value; the mean of the two middle values for an even count.
    pub fn median(mut self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        self.values.sort_by(f64::total_cmp);
        let mid = self.values.len() / 2;
        if self.values.len() % 2 == 1 {
            Some(self.values[mid])
        } else {
            Some((self.values[mid - 1] + self.values[mid]) / 2.0)
        }
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
