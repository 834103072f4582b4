// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;
use timeoff_audit::AuditLogEntry;
use timeoff_domain::{Comment, LeavePolicy, LeaveRequest, Notification};

/// Inputs to a transition that come from configuration and the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionContext {
    /// Duration caps in force.
    pub policy: LeavePolicy,
    /// The instant the transition happens.
    pub now: OffsetDateTime,
}

impl TransitionContext {
    /// Creates a new transition context.
    #[must_use]
    pub const fn new(policy: LeavePolicy, now: OffsetDateTime) -> Self {
        Self { policy, now }
    }
}

/// The effect a transition has on the stored request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestChange {
    /// A new request to store.
    Insert(LeaveRequest),
    /// A replacement for an existing request.
    ///
    /// Must only be written if the stored version still equals
    /// `expected_version`.
    Update {
        /// The request after the transition, with its version incremented.
        request: LeaveRequest,
        /// The version the transition was computed from.
        expected_version: i64,
        /// A comment appended by this transition, also present in
        /// `request.comments`.
        new_comment: Option<Comment>,
    },
    /// Removal of a request and its comments.
    Remove {
        /// The request being removed.
        request_id: String,
        /// The version the transition was computed from.
        expected_version: i64,
    },
}

/// The result of a successful lifecycle transition.
///
/// Every part must be committed together or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// What happens to the request.
    pub change: RequestChange,
    /// The audit entry recording this transition.
    pub audit_entry: AuditLogEntry,
    /// A message for the request owner, if the transition produces one.
    pub notification: Option<Notification>,
}

impl TransitionResult {
    /// The request as it stands after the transition, or `None` on removal.
    #[must_use]
    pub const fn request(&self) -> Option<&LeaveRequest> {
        match &self.change {
            RequestChange::Insert(request) | RequestChange::Update { request, .. } => {
                Some(request)
            }
            RequestChange::Remove { .. } => None,
        }
    }

    /// The comment appended by this transition, if any.
    #[must_use]
    pub const fn new_comment(&self) -> Option<&Comment> {
        match &self.change {
            RequestChange::Update {
                new_comment: Some(comment),
                ..
            } => Some(comment),
            _ => None,
        }
    }

    /// The id of the affected request.
    #[must_use]
    pub fn request_id(&self) -> &str {
        match &self.change {
            RequestChange::Insert(request) | RequestChange::Update { request, .. } => {
                &request.request_id
            }
            RequestChange::Remove { request_id, .. } => request_id,
        }
    }
}
