// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and the conversions between rows and domain values.
//!
//! Dates are stored as `YYYY-MM-DD`. Timestamps are stored in UTC with a
//! fixed width so that text ordering matches time ordering.

use diesel::prelude::*;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};
use timeoff_audit::{Actor, AuditAction, AuditLogEntry, TargetType};
use timeoff_domain::{Comment, LeaveRequest, LeaveStatus, LeaveType, Notification, Role, User};

use crate::diesel_schema::{audit_log, leave_comments, leave_requests, notifications, users};
use crate::error::PersistenceError;

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'_>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:9]Z"
);

/// Encodes a timestamp in the stored UTC form.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub fn format_timestamp(timestamp: OffsetDateTime) -> Result<String, PersistenceError> {
    timestamp
        .to_offset(UtcOffset::UTC)
        .format(TIMESTAMP_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

fn parse_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    PrimitiveDateTime::parse(value, TIMESTAMP_FORMAT)
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|e| PersistenceError::ReconstructionError(format!("timestamp '{value}': {e}")))
}

fn format_date(date: Date) -> Result<String, PersistenceError> {
    date.format(DATE_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

fn parse_date(value: &str) -> Result<Date, PersistenceError> {
    Date::parse(value, DATE_FORMAT)
        .map_err(|e| PersistenceError::ReconstructionError(format!("date '{value}': {e}")))
}

fn reconstruction<E: std::fmt::Display>(err: E) -> PersistenceError {
    PersistenceError::ReconstructionError(err.to_string())
}

// ============================================================================
// Leave requests
// ============================================================================

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = leave_requests)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LeaveRequestRow {
    pub request_id: String,
    pub requester_id: String,
    pub requester_name: String,
    pub leave_type: String,
    pub start_date: String,
    pub end_date: String,
    pub reason: Option<String>,
    pub status: String,
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl LeaveRequestRow {
    /// Rebuilds the domain request, attaching its already loaded comments.
    ///
    /// # Errors
    ///
    /// Returns an error if any stored column does not decode.
    pub fn into_domain(self, comments: Vec<Comment>) -> Result<LeaveRequest, PersistenceError> {
        Ok(LeaveRequest {
            leave_type: self.leave_type.parse::<LeaveType>().map_err(reconstruction)?,
            start_date: parse_date(&self.start_date)?,
            end_date: parse_date(&self.end_date)?,
            status: self.status.parse::<LeaveStatus>().map_err(reconstruction)?,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
            request_id: self.request_id,
            requester_id: self.requester_id,
            requester_name: self.requester_name,
            reason: self.reason,
            comments,
            version: self.version,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = leave_requests)]
pub struct NewLeaveRequestRow {
    pub request_id: String,
    pub requester_id: String,
    pub requester_name: String,
    pub leave_type: String,
    pub start_date: String,
    pub end_date: String,
    pub reason: Option<String>,
    pub status: String,
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<&LeaveRequest> for NewLeaveRequestRow {
    type Error = PersistenceError;

    fn try_from(request: &LeaveRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            request_id: request.request_id.clone(),
            requester_id: request.requester_id.clone(),
            requester_name: request.requester_name.clone(),
            leave_type: request.leave_type.as_str().to_string(),
            start_date: format_date(request.start_date)?,
            end_date: format_date(request.end_date)?,
            reason: request.reason.clone(),
            status: request.status.as_str().to_string(),
            version: request.version,
            created_at: format_timestamp(request.created_at)?,
            updated_at: format_timestamp(request.updated_at)?,
        })
    }
}

/// The mutable columns of a stored request.
///
/// `reason` is written even when `None` so that clearing it sticks.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = leave_requests)]
#[diesel(treat_none_as_null = true)]
pub struct LeaveRequestChanges {
    pub leave_type: String,
    pub start_date: String,
    pub end_date: String,
    pub reason: Option<String>,
    pub status: String,
    pub version: i64,
    pub updated_at: String,
}

impl TryFrom<&LeaveRequest> for LeaveRequestChanges {
    type Error = PersistenceError;

    fn try_from(request: &LeaveRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            leave_type: request.leave_type.as_str().to_string(),
            start_date: format_date(request.start_date)?,
            end_date: format_date(request.end_date)?,
            reason: request.reason.clone(),
            status: request.status.as_str().to_string(),
            version: request.version,
            updated_at: format_timestamp(request.updated_at)?,
        })
    }
}

// ============================================================================
// Comments
// ============================================================================

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = leave_comments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CommentRow {
    pub comment_id: String,
    pub request_id: String,
    pub author_id: String,
    pub author_name: String,
    pub body: String,
    pub created_at: String,
}

impl CommentRow {
    /// # Errors
    ///
    /// Returns an error if the stored timestamp does not decode.
    pub fn into_domain(self) -> Result<Comment, PersistenceError> {
        Ok(Comment {
            created_at: parse_timestamp(&self.created_at)?,
            comment_id: self.comment_id,
            author_id: self.author_id,
            author_name: self.author_name,
            text: self.body,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = leave_comments)]
pub struct NewCommentRow {
    pub comment_id: String,
    pub request_id: String,
    pub author_id: String,
    pub author_name: String,
    pub body: String,
    pub created_at: String,
}

impl NewCommentRow {
    /// # Errors
    ///
    /// Returns an error if the timestamp cannot be encoded.
    pub fn new(request_id: &str, comment: &Comment) -> Result<Self, PersistenceError> {
        Ok(Self {
            comment_id: comment.comment_id.clone(),
            request_id: request_id.to_string(),
            author_id: comment.author_id.clone(),
            author_name: comment.author_name.clone(),
            body: comment.text.clone(),
            created_at: format_timestamp(comment.created_at)?,
        })
    }
}

// ============================================================================
// Audit log
// ============================================================================

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = audit_log)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AuditLogRow {
    pub entry_id: i64,
    pub action: String,
    pub target_id: String,
    pub target_type: String,
    pub actor_id: String,
    pub actor_name: String,
    pub details: String,
    pub created_at: String,
}

impl AuditLogRow {
    /// # Errors
    ///
    /// Returns an error if the action, target type or timestamp does not decode.
    pub fn into_domain(self) -> Result<AuditLogEntry, PersistenceError> {
        let entry: AuditLogEntry = AuditLogEntry::new(
            self.action
                .parse::<AuditAction>()
                .map_err(PersistenceError::ReconstructionError)?,
            self.target_id,
            self.target_type
                .parse::<TargetType>()
                .map_err(PersistenceError::ReconstructionError)?,
            Actor::new(self.actor_id, self.actor_name),
            self.details,
            parse_timestamp(&self.created_at)?,
        );
        Ok(entry.with_id(self.entry_id))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = audit_log)]
pub struct NewAuditLogRow {
    pub action: String,
    pub target_id: String,
    pub target_type: String,
    pub actor_id: String,
    pub actor_name: String,
    pub details: String,
    pub created_at: String,
}

impl TryFrom<&AuditLogEntry> for NewAuditLogRow {
    type Error = PersistenceError;

    fn try_from(entry: &AuditLogEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            action: entry.action.as_str().to_string(),
            target_id: entry.target_id.clone(),
            target_type: entry.target_type.as_str().to_string(),
            actor_id: entry.actor.id.clone(),
            actor_name: entry.actor.name.clone(),
            details: entry.details.clone(),
            created_at: format_timestamp(entry.timestamp)?,
        })
    }
}

// ============================================================================
// Notifications
// ============================================================================

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NotificationRow {
    pub notification_id: String,
    pub recipient_id: String,
    pub title: String,
    pub message: String,
    pub is_read: i32,
    pub created_at: String,
}

impl NotificationRow {
    /// # Errors
    ///
    /// Returns an error if the stored timestamp does not decode.
    pub fn into_domain(self) -> Result<Notification, PersistenceError> {
        Ok(Notification {
            created_at: parse_timestamp(&self.created_at)?,
            notification_id: self.notification_id,
            recipient_id: self.recipient_id,
            title: self.title,
            message: self.message,
            is_read: self.is_read != 0,
        })
    }
}

impl TryFrom<&Notification> for NotificationRow {
    type Error = PersistenceError;

    fn try_from(notification: &Notification) -> Result<Self, Self::Error> {
        Ok(Self {
            notification_id: notification.notification_id.clone(),
            recipient_id: notification.recipient_id.clone(),
            title: notification.title.clone(),
            message: notification.message.clone(),
            is_read: i32::from(notification.is_read),
            created_at: format_timestamp(notification.created_at)?,
        })
    }
}

// ============================================================================
// Users
// ============================================================================

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserRow {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl UserRow {
    /// # Errors
    ///
    /// Returns an error if the stored role is unknown.
    pub fn into_domain(self) -> Result<User, PersistenceError> {
        let role: Role = self.role.parse::<Role>().map_err(reconstruction)?;
        Ok(User::new(self.user_id, self.name, self.email, role))
    }
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
        }
    }
}
