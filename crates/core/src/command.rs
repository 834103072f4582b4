// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use timeoff_domain::LeaveDraft;

use crate::authorization::Operation;

/// A mutating lifecycle operation.
///
/// Commands describe intent only. They are applied with [`crate::apply`]
/// against the current state of the target request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// File a new request owned by the actor.
    CreateLeaveRequest {
        /// Proposed content.
        draft: LeaveDraft,
        /// Skip duration caps. Admin actors skip them regardless.
        override_caps: bool,
    },
    /// Edit a pending request's content.
    UpdateLeaveRequest {
        /// Target request.
        request_id: String,
        /// Replacement content.
        draft: LeaveDraft,
        /// Skip duration caps. Admin actors skip them regardless.
        override_caps: bool,
    },
    /// Approve a pending request.
    ApproveLeaveRequest {
        /// Target request.
        request_id: String,
        /// Optional note recorded as a comment.
        comment: Option<String>,
    },
    /// Reject a pending request.
    RejectLeaveRequest {
        /// Target request.
        request_id: String,
        /// Optional note recorded as a comment.
        comment: Option<String>,
    },
    /// Remove a request together with its comments.
    DeleteLeaveRequest {
        /// Target request.
        request_id: String,
    },
    /// Attach a comment to a request.
    AddComment {
        /// Target request.
        request_id: String,
        /// Comment body.
        text: String,
    },
}

impl Command {
    /// The authorization operation this command requires.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        match self {
            Self::CreateLeaveRequest { .. } => Operation::Create,
            Self::UpdateLeaveRequest { .. } => Operation::Update,
            Self::ApproveLeaveRequest { .. } => Operation::Approve,
            Self::RejectLeaveRequest { .. } => Operation::Reject,
            Self::DeleteLeaveRequest { .. } => Operation::Delete,
            Self::AddComment { .. } => Operation::AddComment,
        }
    }

    /// The id of the request this command targets, if any.
    #[must_use]
    pub fn target_request_id(&self) -> Option<&str> {
        match self {
            Self::CreateLeaveRequest { .. } => None,
            Self::UpdateLeaveRequest { request_id, .. }
            | Self::ApproveLeaveRequest { request_id, .. }
            | Self::RejectLeaveRequest { request_id, .. }
            | Self::DeleteLeaveRequest { request_id }
            | Self::AddComment { request_id, .. } => Some(request_id),
        }
    }
}
