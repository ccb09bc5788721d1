// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job names, lifecycle transitions, and run records.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use thiserror::Error;

/// `stop` value of a run record that has not been stopped yet.
pub const OPEN_STOP: i64 = -1;

/// Errors from parsing a job name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobNameError {
    #[error("job name must not be empty")]
    Empty,
}

/// Name of a timed job.
///
/// Names are free-form (they may contain `/`) but never empty. Many runs
/// share one name; the name is what statistics are grouped by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JobName(SmolStr);

impl JobName {
    pub fn parse(name: impl AsRef<str>) -> Result<Self, JobNameError> {
        let name = name.as_ref();
        if name.is_empty() {
            return Err(JobNameError::Empty);
        }
        Ok(Self(SmolStr::new(name)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for JobName {
    type Error = JobNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for JobName {
    type Error = JobNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<JobName> for String {
    fn from(name: JobName) -> Self {
        name.0.to_string()
    }
}

impl AsRef<str> for JobName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for JobName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for JobName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for JobName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A requested lifecycle transition for a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    Start,
    Stop,
}

impl Transition {
    pub fn is_start(self) -> bool {
        matches!(self, Transition::Start)
    }

    /// Running state of the job once this transition has been applied.
    pub fn running_after(self) -> bool {
        self.is_start()
    }

    /// Whether this transition is legal for a job whose current running
    /// state is `running`. Starting a running job and stopping an idle one
    /// are the two illegal combinations.
    pub fn is_legal(self, running: bool) -> bool {
        running != self.is_start()
    }
}

crate::simple_display! {
    Transition {
        Start => "start",
        Stop => "stop",
    }
}

/// One start-to-stop interval of a job. `stop` is [`OPEN_STOP`] while the
/// run is still in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RunRecord {
    pub job: JobName,
    pub start: i64,
    pub stop: i64,
    pub params: String,
}

impl RunRecord {
    pub fn is_open(&self) -> bool {
        self.stop == OPEN_STOP
    }

    /// Duration of a completed run, `None` while the run is open.
    pub fn duration_ns(&self) -> Option<i64> {
        if self.is_open() {
            None
        } else {
            Some(self.stop - self.start)
        }
    }
}

/// Test builder for [`RunRecord`]; defaults to an open run of `job` at 100.
#[cfg(any(test, feature = "test-support"))]
pub struct RunRecordBuilder(RunRecord);

#[cfg(any(test, feature = "test-support"))]
impl RunRecordBuilder {
    pub fn job(mut self, job: JobName) -> Self {
        self.0.job = job;
        self
    }

    pub fn start(mut self, start: i64) -> Self {
        self.0.start = start;
        self
    }

    pub fn stop(mut self, stop: i64) -> Self {
        self.0.stop = stop;
        self
    }

    pub fn params(mut self, params: impl Into<String>) -> Self {
        self.0.params = params.into();
        self
    }

    pub fn build(self) -> RunRecord {
        self.0
    }
}

#[cfg(any(test, feature = "test-support"))]
impl RunRecord {
    pub fn builder() -> RunRecordBuilder {
        RunRecordBuilder(RunRecord {
            job: JobName(SmolStr::new_static("job")),
            start: 100,
            stop: OPEN_STOP,
            params: "{}".to_string(),
        })
    }
}

/// A job with an open run, as reported by the status query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RunningJob {
    pub job: JobName,
    pub start: i64,
    /// Historical average duration; `None` until the job has completed a run.
    pub average: Option<f64>,
    /// `start + average`, when an average exists.
    pub expected_stop: Option<i64>,
    pub params: String,
}

impl RunningJob {
    pub fn new(job: JobName, start: i64, average: Option<f64>, params: String) -> Self {
        let expected_stop = average.map(|avg| start.saturating_add(avg.round() as i64));
        Self { job, start, average, expected_stop, params }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
