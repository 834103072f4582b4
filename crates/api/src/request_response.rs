// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates travel as `YYYY-MM-DD`, timestamps as RFC 3339, and enums in their
//! lowercase storage form.

use serde::{Deserialize, Serialize};
use timeoff_audit::{AuditAction, TargetType};
use timeoff_domain::{LeaveStatus, LeaveType, Role};

// ========================================================================
// Leave requests
// ========================================================================

/// Body for filing a new leave request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateLeaveRequestRequest {
    /// One of `vacation`, `sick`, `personal`, `bereavement`, `study`, `other`.
    pub leave_type: String,
    /// First day, `YYYY-MM-DD`.
    pub start_date: String,
    /// Last day inclusive, `YYYY-MM-DD`.
    pub end_date: String,
    /// Optional justification.
    #[serde(default)]
    pub reason: Option<String>,
    /// Ask for the per-type caps to be skipped. Admin only.
    #[serde(default)]
    pub override_caps: bool,
}

/// Body for editing a pending leave request. Same shape as creation.
pub type UpdateLeaveRequestRequest = CreateLeaveRequestRequest;

/// Body for approving or rejecting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DecisionRequest {
    /// Optional comment attached to the decision.
    #[serde(default)]
    pub comment: Option<String>,
}

/// Body for adding a comment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddCommentRequest {
    /// The comment text; must not be blank.
    pub text: String,
}

/// Represents whether a specific action is permitted.
///
/// Serializes to JSON as `true`/`false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Returns true if the capability is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Creates a capability from a boolean value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(self.is_allowed())
    }
}

/// What the current actor may do with one request right now.
///
/// Advisory only; every operation is re-checked when invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RequestCapabilities {
    /// Edit dates, type or reason.
    pub can_update: Capability,
    /// Remove the request.
    pub can_delete: Capability,
    /// Approve it.
    pub can_approve: Capability,
    /// Reject it.
    pub can_reject: Capability,
    /// Add a comment.
    pub can_comment: Capability,
}

/// A comment as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentInfo {
    /// Comment id.
    pub comment_id: String,
    /// Author's user id.
    pub author_id: String,
    /// Author's name when the comment was written.
    pub author_name: String,
    /// The text.
    pub text: String,
    /// RFC 3339.
    pub created_at: String,
}

/// A leave request as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaveRequestInfo {
    /// Request id.
    pub request_id: String,
    /// Owner's user id.
    pub requester_id: String,
    /// Owner's name when the request was filed.
    pub requester_name: String,
    /// Kind of leave.
    pub leave_type: LeaveType,
    /// First day, `YYYY-MM-DD`.
    pub start_date: String,
    /// Last day inclusive, `YYYY-MM-DD`.
    pub end_date: String,
    /// Inclusive calendar-day count.
    pub duration_days: i64,
    /// Optional justification.
    pub reason: Option<String>,
    /// Lifecycle status.
    pub status: LeaveStatus,
    /// Comments, oldest first.
    pub comments: Vec<CommentInfo>,
    /// Optimistic concurrency version.
    pub version: i64,
    /// RFC 3339.
    pub created_at: String,
    /// RFC 3339.
    pub updated_at: String,
    /// The caller's current permissions on this request.
    pub capabilities: RequestCapabilities,
}

/// Response for create, update, approve, reject and comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaveRequestMutationResponse {
    /// The request after the change.
    pub request: LeaveRequestInfo,
    /// Id of the audit entry recording the change.
    pub audit_entry_id: i64,
    /// A success message.
    pub message: String,
}

/// Response for a deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteLeaveRequestResponse {
    /// The removed request's id.
    pub request_id: String,
    /// Id of the audit entry recording the removal.
    pub audit_entry_id: i64,
    /// A success message.
    pub message: String,
}

/// Response for request listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListLeaveRequestsResponse {
    /// The requests.
    pub requests: Vec<LeaveRequestInfo>,
}

// ========================================================================
// Audit log
// ========================================================================

/// Query parameters for the audit trail. All optional, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuditLogQuery {
    /// Audit action, e.g. `approve`.
    pub action: Option<String>,
    /// Acting user's id.
    pub user_id: Option<String>,
    /// `leave_request` or `user`.
    pub target_type: Option<String>,
    /// Affected record's id.
    pub target_id: Option<String>,
    /// Inclusive lower bound: RFC 3339, or a date meaning its first instant.
    pub start_date: Option<String>,
    /// Inclusive upper bound: RFC 3339, or a date meaning its last instant.
    pub end_date: Option<String>,
}

/// An audit entry as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditLogEntryInfo {
    /// Store-assigned id, ascending in application order.
    pub entry_id: i64,
    /// What happened.
    pub action: AuditAction,
    /// Affected record's id.
    pub target_id: String,
    /// Affected record's kind.
    pub target_type: TargetType,
    /// Acting user's id.
    pub actor_id: String,
    /// Acting user's name at the time.
    pub actor_name: String,
    /// Human-readable description.
    pub details: String,
    /// RFC 3339.
    pub timestamp: String,
}

/// Response for the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditLogResponse {
    /// Matching entries in application order.
    pub entries: Vec<AuditLogEntryInfo>,
}

// ========================================================================
// Notifications
// ========================================================================

/// A notification as returned to its recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationInfo {
    /// Notification id.
    pub notification_id: String,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Whether the recipient has seen it.
    pub is_read: bool,
    /// RFC 3339.
    pub created_at: String,
}

/// Response for a recipient's notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationsResponse {
    /// Newest first.
    pub notifications: Vec<NotificationInfo>,
    /// How many are unread.
    pub unread_count: usize,
}

// ========================================================================
// Users
// ========================================================================

/// Body for adding a user to the directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterUserRequest {
    /// Stable identifier the caller authenticates as.
    pub user_id: String,
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
    /// `user` or `admin`.
    pub role: String,
}

/// A directory entry as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    /// Identifier.
    pub user_id: String,
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
    /// Role.
    pub role: Role,
}

/// Response for the directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListUsersResponse {
    /// Users ordered by id.
    pub users: Vec<UserInfo>,
}
