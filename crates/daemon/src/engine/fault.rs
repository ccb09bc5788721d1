// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Internal fault handling.
//!
//! Every internal fault (store failures, failed stats recomputation, startup
//! schema or catalog problems) is reported through [`FaultPolicy::report`].
//! In production the fault is logged and the daemon keeps serving; in
//! development the daemon exits immediately so faults cannot go unnoticed.

use tracing::error;

/// How the daemon reacts to internal faults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Log and continue.
    #[default]
    Production,
    /// Log and exit the process.
    Development,
}

jt_core::simple_display! {
    ExecutionMode {
        Production => "production",
        Development => "development",
    }
}

impl ExecutionMode {
    /// Parse a mode name. Accepts `dev`/`development` and `prod`/`production`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Some(ExecutionMode::Development),
            "prod" | "production" => Some(ExecutionMode::Production),
            _ => None,
        }
    }
}

/// Single entry point for internal faults.
#[derive(Debug, Clone, Copy, Default)]
pub struct FaultPolicy {
    mode: ExecutionMode,
}

impl FaultPolicy {
    pub fn new(mode: ExecutionMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Report a fault that happened while doing `context`.
    pub fn report(&self, context: &str, err: &dyn std::error::Error) {
        error!(error = %err, "{context}");
        if self.mode == ExecutionMode::Development {
            // The log writer is non-blocking and may not flush before exit.
            eprintln!("jtd: fatal fault in development mode: {context}: {err}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
#[path = "fault_tests.rs"]
mod tests;
