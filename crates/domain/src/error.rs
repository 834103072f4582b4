// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

use crate::types::LeaveType;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The end date precedes the start date.
    InvalidDateRange {
        /// The proposed first day.
        start: Date,
        /// The proposed last day.
        end: Date,
    },
    /// The inclusive duration is longer than the policy allows.
    DurationExceeded {
        /// The capped leave type.
        leave_type: LeaveType,
        /// The cap in days.
        limit: u32,
        /// The requested duration in days.
        actual: i64,
    },
    /// A field failed validation.
    InvalidInput {
        /// The offending field.
        field: String,
        /// What was wrong with it.
        message: String,
    },
    /// Unknown leave type string.
    InvalidLeaveType(String),
    /// Unknown status string.
    InvalidStatus(String),
    /// Unknown role string.
    InvalidRole(String),
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDateRange { start, end } => {
                write!(f, "End date {end} is before start date {start}")
            }
            Self::DurationExceeded {
                leave_type,
                limit,
                actual,
            } => {
                write!(
                    f,
                    "{leave_type} leave is limited to {limit} days, requested {actual}"
                )
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid {field}: {message}")
            }
            Self::InvalidLeaveType(value) => write!(f, "Invalid leave type: {value}"),
            Self::InvalidStatus(value) => write!(f, "Invalid leave status: {value}"),
            Self::InvalidRole(value) => write!(f, "Invalid role: {value}"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
