// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transport-agnostic API boundary for the time-off service.
//!
//! Callers resolve the actor with [`authenticate`], then invoke one of the
//! handlers with a store implementing [`LeaveStore`]. Handlers return DTOs
//! from [`request_response`] or an [`ApiError`] whose
//! [`kind`](ApiError::kind) tells the transport how to report it.
//!
//! [`LeaveStore`]: timeoff_persistence::LeaveStore

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
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod capabilities;
mod error;
mod handlers;
pub mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthorizationService, authenticate};
pub use capabilities::compute_request_capabilities;
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    add_comment, approve_leave_request, create_leave_request, delete_leave_request,
    get_employee_leave_history, get_leave_report, get_leave_request, list_all_requests,
    list_audit_logs, list_my_requests, list_notifications, list_users, mark_notification_read,
    parse_audit_filter, register_user, reject_leave_request, update_leave_request,
};
pub use request_response::{
    AddCommentRequest, AuditLogEntryInfo, AuditLogQuery, AuditLogResponse, Capability,
    CommentInfo, CreateLeaveRequestRequest, DecisionRequest, DeleteLeaveRequestResponse,
    LeaveRequestInfo, LeaveRequestMutationResponse, ListLeaveRequestsResponse,
    ListUsersResponse, NotificationInfo, NotificationsResponse, RegisterUserRequest,
    RequestCapabilities, UpdateLeaveRequestRequest, UserInfo,
};
