// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use timeoff_domain::{DomainError, LeaveStatus};

use crate::authorization::Operation;

/// The stable, distinguishable failure classes surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// End date before start date.
    InvalidDateRange,
    /// Duration above the policy cap.
    DurationExceeded,
    /// The actor may not perform the operation.
    Unauthorized,
    /// The operation is not valid for the request's current status.
    InvalidState,
    /// The target does not exist.
    NotFound,
    /// Malformed or empty input.
    InvalidInput,
    /// A concurrent modification won the race.
    Conflict,
}

impl ErrorKind {
    /// Returns the stable string form of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidDateRange => "invalid_date_range",
            Self::DurationExceeded => "duration_exceeded",
            Self::Unauthorized => "unauthorized",
            Self::InvalidState => "invalid_state",
            Self::NotFound => "not_found",
            Self::InvalidInput => "invalid_input",
            Self::Conflict => "conflict",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classifies a domain error into the caller-facing taxonomy.
#[must_use]
pub const fn domain_error_kind(err: &DomainError) -> ErrorKind {
    match err {
        DomainError::InvalidDateRange { .. } => ErrorKind::InvalidDateRange,
        DomainError::DurationExceeded { .. } => ErrorKind::DurationExceeded,
        DomainError::InvalidInput { .. }
        | DomainError::InvalidLeaveType(_)
        | DomainError::InvalidStatus(_)
        | DomainError::InvalidRole(_)
        | DomainError::DateParseError { .. } => ErrorKind::InvalidInput,
    }
}

/// Errors that can occur during lifecycle transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The actor is not permitted to perform the operation.
    Unauthorized {
        /// The attempted operation.
        operation: Operation,
        /// The actor's id.
        actor_id: String,
    },
    /// The operation is not valid for the request's current status.
    InvalidState {
        /// The attempted operation.
        operation: Operation,
        /// The request's status at the time.
        status: LeaveStatus,
    },
    /// The target leave request does not exist.
    NotFound {
        /// The requested id.
        request_id: String,
    },
}

impl CoreError {
    /// Returns the caller-facing classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DomainViolation(err) => domain_error_kind(err),
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::InvalidState { .. } => ErrorKind::InvalidState,
            Self::NotFound { .. } => ErrorKind::NotFound,
        }
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::Unauthorized {
                operation,
                actor_id,
            } => {
                write!(f, "User '{actor_id}' is not permitted to {operation}")
            }
            Self::InvalidState { operation, status } => {
                write!(f, "Cannot {operation} a leave request that is {status}")
            }
            Self::NotFound { request_id } => {
                write!(f, "Leave request '{request_id}' not found")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
