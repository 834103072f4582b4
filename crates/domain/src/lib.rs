// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod duration;
mod error;
mod policy;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use duration::{CalendarDay, calculate_duration};
pub use error::DomainError;
pub use policy::{DEFAULT_PERSONAL_CAP_DAYS, DEFAULT_SICK_CAP_DAYS, LeavePolicy};
pub use types::{
    Comment, LeaveDraft, LeaveRequest, LeaveStatus, LeaveType, Notification, Role, User,
};
pub use validation::{
    normalize_comment_text, normalize_optional_text, parse_calendar_date, validate_user_fields,
};
