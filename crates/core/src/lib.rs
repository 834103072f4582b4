// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leave request lifecycle engine.
//!
//! Commands are applied against the current state of a request by
//! [`apply`], which consults the authorization rules and the leave policy
//! and returns a [`TransitionResult`] describing the request change, the
//! audit entry and any notification. Nothing here touches storage.

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

mod actor;
mod apply;
mod authorization;
mod command;
mod error;
mod report;
mod state;

#[cfg(test)]
mod tests;

pub use actor::CurrentActor;
pub use apply::apply;
pub use authorization::{
    Operation, authorize, authorize_global, authorize_notification, can_perform,
};
pub use command::Command;
pub use error::{CoreError, ErrorKind, domain_error_kind};
pub use report::{
    LeaveReport, MonthKey, StatusCounts, employee_leave_history, generate_report,
};
pub use state::{RequestChange, TransitionContext, TransitionResult};
pub use timeoff_audit::{AuditFilter, filter_audit_logs};
