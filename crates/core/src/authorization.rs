// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability rules for leave requests and notifications.
//!
//! Rules key off the actor's role and the request's `requester_id`, never
//! off display names. Status-dependent refusals are reported as
//! `InvalidState` only once the actor is otherwise entitled to the
//! operation, so a stranger always sees `Unauthorized`.

use timeoff_domain::{LeaveRequest, Notification};

use crate::actor::CurrentActor;
use crate::error::CoreError;

/// An operation subject to authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// File a new request.
    Create,
    /// Read a single request.
    Read,
    /// Read every user's requests, reports and the audit trail.
    ReadAll,
    /// Edit a request's dates, type or reason.
    Update,
    /// Remove a request.
    Delete,
    /// Approve a pending request.
    Approve,
    /// Reject a pending request.
    Reject,
    /// Attach a comment to a request.
    AddComment,
    /// Mark a notification as read.
    MarkNotificationRead,
}

impl Operation {
    /// Returns the stable string form of this operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::ReadAll => "read_all",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::AddComment => "add_comment",
            Self::MarkNotificationRead => "mark_notification_read",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn unauthorized(actor: &CurrentActor, operation: Operation) -> CoreError {
    CoreError::Unauthorized {
        operation,
        actor_id: actor.id.clone(),
    }
}

fn require_pending(request: &LeaveRequest, operation: Operation) -> Result<(), CoreError> {
    if request.is_pending() {
        Ok(())
    } else {
        Err(CoreError::InvalidState {
            operation,
            status: request.status,
        })
    }
}

/// Checks an operation that does not target a specific request.
///
/// # Errors
///
/// Returns `Unauthorized` if:
/// - `ReadAll` is attempted by a non-admin
/// - A request-scoped operation is attempted without a request
pub fn authorize_global(actor: &CurrentActor, operation: Operation) -> Result<(), CoreError> {
    match operation {
        Operation::Create => Ok(()),
        Operation::ReadAll if actor.is_admin() => Ok(()),
        _ => Err(unauthorized(actor, operation)),
    }
}

/// Checks an operation against a specific leave request.
///
/// # Arguments
///
/// * `actor` - The acting user
/// * `operation` - The attempted operation
/// * `request` - The target request in its current state
///
/// # Errors
///
/// Returns `Unauthorized` if the actor's role or ownership does not permit
/// the operation, or `InvalidState` if it would be permitted but the
/// request is no longer pending.
pub fn authorize(
    actor: &CurrentActor,
    operation: Operation,
    request: &LeaveRequest,
) -> Result<(), CoreError> {
    let is_owner: bool = request.is_owned_by(&actor.id);

    match operation {
        Operation::Create => Ok(()),
        Operation::Read | Operation::AddComment => {
            if is_owner || actor.is_admin() {
                Ok(())
            } else {
                Err(unauthorized(actor, operation))
            }
        }
        Operation::ReadAll => authorize_global(actor, operation),
        // Admins act on other people's requests through approve/reject only.
        Operation::Update => {
            if !is_owner {
                return Err(unauthorized(actor, operation));
            }
            require_pending(request, operation)
        }
        Operation::Delete => {
            if actor.is_admin() {
                return Ok(());
            }
            if !is_owner {
                return Err(unauthorized(actor, operation));
            }
            require_pending(request, operation)
        }
        Operation::Approve | Operation::Reject => {
            if !actor.is_admin() {
                return Err(unauthorized(actor, operation));
            }
            require_pending(request, operation)
        }
        Operation::MarkNotificationRead => Err(unauthorized(actor, operation)),
    }
}

/// Checks that the actor may mark `notification` as read.
///
/// # Errors
///
/// Returns `Unauthorized` unless the actor is the recipient.
pub fn authorize_notification(
    actor: &CurrentActor,
    notification: &Notification,
) -> Result<(), CoreError> {
    if notification.is_addressed_to(&actor.id) {
        Ok(())
    } else {
        Err(unauthorized(actor, Operation::MarkNotificationRead))
    }
}

/// Boolean form of the capability table.
///
/// `request` is `None` for operations that do not target a request.
#[must_use]
pub fn can_perform(
    actor: &CurrentActor,
    operation: Operation,
    request: Option<&LeaveRequest>,
) -> bool {
    match request {
        Some(request) => authorize(actor, operation, request).is_ok(),
        None => authorize_global(actor, operation).is_ok(),
    }
}
