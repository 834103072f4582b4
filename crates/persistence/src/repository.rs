// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage ports.
//!
//! Reads are split by record kind. Every write that belongs to a lifecycle
//! transition goes through [`LeaveStore::commit_transition`] so that a
//! request change is never visible without its audit entry.

use timeoff::TransitionResult;
use timeoff_audit::{AuditFilter, AuditLogEntry};
use timeoff_domain::{LeaveRequest, Notification, User};

use crate::error::PersistenceError;

/// Read access to stored leave requests.
pub trait LeaveRequestRepository {
    /// Loads a request with its comments.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_leave_request(
        &mut self,
        request_id: &str,
    ) -> Result<Option<LeaveRequest>, PersistenceError>;

    /// Lists every request, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_leave_requests(&mut self) -> Result<Vec<LeaveRequest>, PersistenceError>;

    /// Lists the requests filed by `user_id`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_leave_requests_for_user(
        &mut self,
        user_id: &str,
    ) -> Result<Vec<LeaveRequest>, PersistenceError>;
}

/// Read access to the append-only audit trail.
pub trait AuditLogRepository {
    /// Lists entries matching `filter` in the order they were committed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_audit_entries(
        &mut self,
        filter: &AuditFilter,
    ) -> Result<Vec<AuditLogEntry>, PersistenceError>;
}

/// Access to per-user notifications.
pub trait NotificationRepository {
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_notification(
        &mut self,
        notification_id: &str,
    ) -> Result<Option<Notification>, PersistenceError>;

    /// Lists `user_id`'s notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_notifications_for_user(
        &mut self,
        user_id: &str,
    ) -> Result<Vec<Notification>, PersistenceError>;

    /// Marks a notification read. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the notification does not exist.
    fn mark_notification_read(&mut self, notification_id: &str) -> Result<(), PersistenceError>;
}

/// The user directory that actor identifiers resolve against.
pub trait UserRepository {
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_user(&mut self, user_id: &str) -> Result<Option<User>, PersistenceError>;

    /// Lists users ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_users(&mut self) -> Result<Vec<User>, PersistenceError>;

    /// # Errors
    ///
    /// Returns `DuplicateKey` if the id is already registered.
    fn create_user(&mut self, user: &User) -> Result<(), PersistenceError>;
}

/// A complete store: every read port plus the atomic transition commit.
pub trait LeaveStore:
    LeaveRequestRepository + AuditLogRepository + NotificationRepository + UserRepository
{
    /// Writes the request change, audit entry and notification of `result`
    /// as one unit and returns the id assigned to the audit entry.
    ///
    /// Updates and removals only apply if the stored request still carries
    /// the version the transition was computed from.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` on a version mismatch or missing request, and
    /// `DuplicateKey` if an inserted request id exists. On any error no
    /// part of the transition is visible.
    fn commit_transition(&mut self, result: &TransitionResult) -> Result<i64, PersistenceError>;
}
