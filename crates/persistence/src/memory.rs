// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! A process-local store backed by plain collections.
//!
//! Commits check every precondition before touching any collection, so a
//! failed commit leaves the store exactly as it was.

use timeoff::{RequestChange, TransitionResult};
use timeoff_audit::{AuditFilter, AuditLogEntry, filter_audit_logs};
use timeoff_domain::{LeaveRequest, Notification, User};
use tracing::debug;

use crate::error::PersistenceError;
use crate::repository::{
    AuditLogRepository, LeaveRequestRepository, LeaveStore, NotificationRepository,
    UserRepository,
};

/// In-memory implementation of every storage port.
#[derive(Debug)]
pub struct InMemoryPersistence {
    users: Vec<User>,
    requests: Vec<LeaveRequest>,
    audit_log: Vec<AuditLogEntry>,
    notifications: Vec<Notification>,
    next_entry_id: i64,
}

impl InMemoryPersistence {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            users: Vec::new(),
            requests: Vec::new(),
            audit_log: Vec::new(),
            notifications: Vec::new(),
            next_entry_id: 1,
        }
    }

    fn request_index(&self, request_id: &str) -> Option<usize> {
        self.requests
            .iter()
            .position(|request| request.request_id == request_id)
    }

    fn versioned_index(
        &self,
        request_id: &str,
        expected_version: i64,
    ) -> Result<usize, PersistenceError> {
        self.request_index(request_id)
            .filter(|index| self.requests[*index].version == expected_version)
            .ok_or_else(|| PersistenceError::Conflict {
                request_id: request_id.to_string(),
            })
    }

    fn sorted_requests<'a, I>(requests: I) -> Vec<LeaveRequest>
    where
        I: Iterator<Item = &'a LeaveRequest>,
    {
        let mut list: Vec<LeaveRequest> = requests.cloned().collect();
        list.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.request_id.cmp(&b.request_id))
        });
        list
    }
}

impl Default for InMemoryPersistence {
    fn default() -> Self {
        Self::new()
    }
}

impl LeaveRequestRepository for InMemoryPersistence {
    fn get_leave_request(
        &mut self,
        request_id: &str,
    ) -> Result<Option<LeaveRequest>, PersistenceError> {
        Ok(self
            .request_index(request_id)
            .map(|index| self.requests[index].clone()))
    }

    fn list_leave_requests(&mut self) -> Result<Vec<LeaveRequest>, PersistenceError> {
        Ok(Self::sorted_requests(self.requests.iter()))
    }

    fn list_leave_requests_for_user(
        &mut self,
        user_id: &str,
    ) -> Result<Vec<LeaveRequest>, PersistenceError> {
        Ok(Self::sorted_requests(
            self.requests
                .iter()
                .filter(|request| request.is_owned_by(user_id)),
        ))
    }
}

impl AuditLogRepository for InMemoryPersistence {
    fn list_audit_entries(
        &mut self,
        filter: &AuditFilter,
    ) -> Result<Vec<AuditLogEntry>, PersistenceError> {
        Ok(filter_audit_logs(&self.audit_log, filter))
    }
}

impl NotificationRepository for InMemoryPersistence {
    fn get_notification(
        &mut self,
        notification_id: &str,
    ) -> Result<Option<Notification>, PersistenceError> {
        Ok(self
            .notifications
            .iter()
            .find(|n| n.notification_id == notification_id)
            .cloned())
    }

    fn list_notifications_for_user(
        &mut self,
        user_id: &str,
    ) -> Result<Vec<Notification>, PersistenceError> {
        let mut list: Vec<Notification> = self
            .notifications
            .iter()
            .filter(|n| n.is_addressed_to(user_id))
            .cloned()
            .collect();
        list.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.notification_id.cmp(&b.notification_id))
        });
        Ok(list)
    }

    fn mark_notification_read(&mut self, notification_id: &str) -> Result<(), PersistenceError> {
        let notification: &mut Notification = self
            .notifications
            .iter_mut()
            .find(|n| n.notification_id == notification_id)
            .ok_or_else(|| PersistenceError::NotFound(format!("notification {notification_id}")))?;
        notification.is_read = true;
        Ok(())
    }
}

impl UserRepository for InMemoryPersistence {
    fn get_user(&mut self, user_id: &str) -> Result<Option<User>, PersistenceError> {
        Ok(self.users.iter().find(|u| u.user_id == user_id).cloned())
    }

    fn list_users(&mut self) -> Result<Vec<User>, PersistenceError> {
        let mut list: Vec<User> = self.users.clone();
        list.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        Ok(list)
    }

    fn create_user(&mut self, user: &User) -> Result<(), PersistenceError> {
        if self.users.iter().any(|u| u.user_id == user.user_id) {
            return Err(PersistenceError::DuplicateKey(format!(
                "user {}",
                user.user_id
            )));
        }
        self.users.push(user.clone());
        Ok(())
    }
}

impl LeaveStore for InMemoryPersistence {
    fn commit_transition(&mut self, result: &TransitionResult) -> Result<i64, PersistenceError> {
        let notification_taken: bool = result.notification.as_ref().is_some_and(|incoming| {
            self.notifications
                .iter()
                .any(|n| n.notification_id == incoming.notification_id)
        });
        if notification_taken {
            return Err(PersistenceError::DuplicateKey(String::from("notification")));
        }

        match &result.change {
            RequestChange::Insert(request) => {
                if self.request_index(&request.request_id).is_some() {
                    return Err(PersistenceError::DuplicateKey(format!(
                        "leave request {}",
                        request.request_id
                    )));
                }
                self.requests.push(request.clone());
            }
            RequestChange::Update {
                request,
                expected_version,
                ..
            } => {
                let index: usize = self.versioned_index(&request.request_id, *expected_version)?;
                self.requests[index] = request.clone();
            }
            RequestChange::Remove {
                request_id,
                expected_version,
            } => {
                let index: usize = self.versioned_index(request_id, *expected_version)?;
                self.requests.remove(index);
            }
        }

        let entry_id: i64 = self.next_entry_id;
        self.next_entry_id += 1;
        self.audit_log
            .push(result.audit_entry.clone().with_id(entry_id));

        if let Some(notification) = &result.notification {
            self.notifications.push(notification.clone());
        }

        debug!(
            entry_id,
            action = %result.audit_entry.action,
            request_id = %result.request_id(),
            "Committed leave request transition"
        );
        Ok(entry_id)
    }
}
