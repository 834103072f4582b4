// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use thiserror::Error;
use timeoff::{CoreError, ErrorKind, domain_error_kind};
use timeoff_domain::DomainError;
use timeoff_persistence::PersistenceError;
use tracing::error;

/// Authentication and coarse role failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The caller could not be identified.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// Why identification failed.
        reason: String,
    },
    /// The caller's role does not permit the action.
    #[error("Unauthorized: '{action}' requires {required_role} role")]
    Unauthorized {
        /// The attempted action.
        action: String,
        /// The role the action needs.
        required_role: String,
    },
    /// The user directory could not be consulted.
    #[error("User directory unavailable: {0}")]
    DirectoryUnavailable(String),
}

/// API-level errors.
///
/// These are distinct from core and storage errors and represent the API
/// contract. [`ApiError::kind`] exposes the stable failure class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The caller could not be identified.
    AuthenticationFailed {
        /// Why identification failed.
        reason: String,
    },
    /// The caller may not perform the action.
    Unauthorized {
        /// The attempted action.
        action: String,
        /// A human-readable explanation.
        message: String,
    },
    /// A leave policy rule was violated.
    DomainRuleViolation {
        /// Which rule.
        rule: ErrorKind,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The operation is not valid for the request's current status.
    InvalidState {
        /// A human-readable description.
        message: String,
    },
    /// Another writer changed the record first, or the key is taken.
    Conflict {
        /// A human-readable description.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// The failure class, or `None` for authentication and internal errors.
    #[must_use]
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Unauthorized { .. } => Some(ErrorKind::Unauthorized),
            Self::DomainRuleViolation { rule, .. } => Some(*rule),
            Self::InvalidInput { .. } => Some(ErrorKind::InvalidInput),
            Self::ResourceNotFound { .. } => Some(ErrorKind::NotFound),
            Self::InvalidState { .. } => Some(ErrorKind::InvalidState),
            Self::Conflict { .. } => Some(ErrorKind::Conflict),
            Self::AuthenticationFailed { .. } | Self::Internal { .. } => None,
        }
    }

    pub(crate) fn leave_request_not_found(request_id: &str) -> Self {
        Self::ResourceNotFound {
            resource_type: String::from("Leave request"),
            message: format!("Leave request {request_id} does not exist"),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized { message, .. } => write!(f, "Unauthorized: {message}"),
            Self::DomainRuleViolation { message, .. }
            | Self::InvalidState { message }
            | Self::Conflict { message } => write!(f, "{message}"),
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                message: format!("'{action}' requires {required_role} role"),
                action,
            },
            AuthError::DirectoryUnavailable(message) => Self::Internal { message },
        }
    }
}

/// Translates a domain error into an API error.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let kind: ErrorKind = domain_error_kind(&err);
    match err {
        DomainError::InvalidDateRange { .. } | DomainError::DurationExceeded { .. } => {
            ApiError::DomainRuleViolation {
                rule: kind,
                message: err.to_string(),
            }
        }
        DomainError::InvalidInput { field, message } => ApiError::InvalidInput { field, message },
        DomainError::InvalidLeaveType(value) => ApiError::InvalidInput {
            field: String::from("leave_type"),
            message: format!("Unknown leave type '{value}'"),
        },
        DomainError::InvalidStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown leave status '{value}'"),
        },
        DomainError::InvalidRole(value) => ApiError::InvalidInput {
            field: String::from("role"),
            message: format!("Unknown role '{value}'"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Unauthorized {
            operation,
            actor_id,
        } => ApiError::Unauthorized {
            action: operation.as_str().to_string(),
            message: format!("User '{actor_id}' may not {operation} this leave request"),
        },
        CoreError::InvalidState { operation, status } => ApiError::InvalidState {
            message: format!("Cannot {operation} a leave request that is already {status}"),
        },
        CoreError::NotFound { request_id } => ApiError::leave_request_not_found(&request_id),
    }
}

/// Translates a storage error into an API error.
///
/// Conflicts and missing records keep their meaning; everything else is an
/// internal failure and is logged here.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::Conflict { .. } => ApiError::Conflict {
            message: err.to_string(),
        },
        PersistenceError::DuplicateKey(message) => ApiError::Conflict {
            message: format!("Already exists: {message}"),
        },
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        other => {
            error!(error = %other, "Storage operation failed");
            ApiError::Internal {
                message: other.to_string(),
            }
        }
    }
}
