// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mapping of request failures to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use jt_core::JobName;
use thiserror::Error;

use crate::engine::{Conflict, EngineError};

/// A failed request. Every variant renders as a plain-text body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Illegal start or stop.
    #[error(transparent)]
    Conflict(#[from] Conflict),

    #[error("Error: {0}.")]
    BadRequest(String),

    #[error("Error: no stats for {0}.")]
    NoStats(JobName),

    #[error("Not found")]
    NotFound,

    /// An internal fault. Already reported; the detail stays in the log.
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Conflict(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NoStats(_) | ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Conflict(conflict) => ApiError::Conflict(conflict),
            EngineError::Store(_) | EngineError::Join(_) => ApiError::Internal,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
