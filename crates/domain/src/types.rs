// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

use crate::duration::calculate_duration;
use crate::error::DomainError;

/// The kind of absence being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveType {
    /// Planned holiday.
    Vacation,
    /// Illness.
    Sick,
    /// Personal matters.
    Personal,
    /// Bereavement leave.
    Bereavement,
    /// Training or study leave.
    Study,
    /// Anything not covered above.
    Other,
}

impl LeaveType {
    /// Every leave type, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Vacation,
        Self::Sick,
        Self::Personal,
        Self::Bereavement,
        Self::Study,
        Self::Other,
    ];

    /// Returns the stable string form used for storage and transport.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vacation => "vacation",
            Self::Sick => "sick",
            Self::Personal => "personal",
            Self::Bereavement => "bereavement",
            Self::Study => "study",
            Self::Other => "other",
        }
    }
}

impl FromStr for LeaveType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vacation" => Ok(Self::Vacation),
            "sick" => Ok(Self::Sick),
            "personal" => Ok(Self::Personal),
            "bereavement" => Ok(Self::Bereavement),
            "study" => Ok(Self::Study),
            "other" => Ok(Self::Other),
            _ => Err(DomainError::InvalidLeaveType(s.to_string())),
        }
    }
}

impl std::fmt::Display for LeaveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of a leave request.
///
/// `Pending` is the only initial state. `Approved` and `Rejected` are
/// terminal: no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    /// Awaiting an administrator's decision.
    Pending,
    /// Approved by an administrator.
    Approved,
    /// Rejected by an administrator.
    Rejected,
}

impl LeaveStatus {
    /// Returns the stable string form used for storage and transport.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Returns true if no further status transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Returns true if moving from `self` to `next` is a legal transition.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved | Self::Rejected)
        )
    }
}

impl FromStr for LeaveStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Role of a user within the system.
///
/// Role drives every authorization decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// An employee who files and manages their own requests.
    User,
    /// An administrator who reviews everyone's requests.
    Admin,
}

impl Role {
    /// Returns the stable string form used for storage and transport.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A person known to the user directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Stable identifier.
    pub user_id: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Authorization role.
    pub role: Role,
}

impl User {
    /// Creates a new `User`.
    ///
    /// # Arguments
    ///
    /// * `user_id` - Stable identifier
    /// * `name` - Display name
    /// * `email` - Contact email
    /// * `role` - Authorization role
    #[must_use]
    pub const fn new(user_id: String, name: String, email: String, role: Role) -> Self {
        Self {
            user_id,
            name,
            email,
            role,
        }
    }

    /// Returns true if the user holds the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

/// A note attached to a leave request.
///
/// Comments are immutable once created and live exactly as long as
/// their parent request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Unique identifier.
    pub comment_id: String,
    /// The author's user id.
    pub author_id: String,
    /// Snapshot of the author's display name.
    pub author_name: String,
    /// Non-empty body text.
    pub text: String,
    /// When the comment was written.
    pub created_at: OffsetDateTime,
}

/// The proposed content of a leave request, as supplied on create or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveDraft {
    /// Kind of leave.
    pub leave_type: LeaveType,
    /// First day of absence.
    pub start_date: Date,
    /// Last day of absence, inclusive.
    pub end_date: Date,
    /// Optional free-text justification.
    pub reason: Option<String>,
}

impl LeaveDraft {
    /// Creates a new draft.
    #[must_use]
    pub const fn new(
        leave_type: LeaveType,
        start_date: Date,
        end_date: Date,
        reason: Option<String>,
    ) -> Self {
        Self {
            leave_type,
            start_date,
            end_date,
            reason,
        }
    }
}

/// An employee's request for absence over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveRequest {
    /// Unique identifier, assigned at creation and never reassigned.
    pub request_id: String,
    /// The owning user's id. Authorization keys off this field.
    pub requester_id: String,
    /// Cached display name of the owner at creation time.
    pub requester_name: String,
    /// Kind of leave.
    pub leave_type: LeaveType,
    /// First day of absence.
    pub start_date: Date,
    /// Last day of absence, inclusive.
    pub end_date: Date,
    /// Optional free-text justification.
    pub reason: Option<String>,
    /// Current lifecycle status.
    pub status: LeaveStatus,
    /// Comments in insertion order.
    pub comments: Vec<Comment>,
    /// Optimistic concurrency version, incremented on every mutation.
    pub version: i64,
    /// Creation timestamp.
    pub created_at: OffsetDateTime,
    /// Last mutation timestamp.
    pub updated_at: OffsetDateTime,
}

impl LeaveRequest {
    /// Inclusive duration of the request in calendar days.
    #[must_use]
    pub fn duration_days(&self) -> i64 {
        calculate_duration(self.start_date, self.end_date)
    }

    /// Returns true if `user_id` owns this request.
    #[must_use]
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.requester_id == user_id
    }

    /// Returns true while the request awaits a decision.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == LeaveStatus::Pending
    }
}

/// A user-facing message produced by a lifecycle decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Unique identifier.
    pub notification_id: String,
    /// The user who receives the notification.
    pub recipient_id: String,
    /// Short title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Whether the recipient has read it.
    pub is_read: bool,
    /// When it was produced.
    pub created_at: OffsetDateTime,
}

impl Notification {
    /// Creates a new unread notification.
    ///
    /// # Arguments
    ///
    /// * `notification_id` - Unique identifier
    /// * `recipient_id` - The receiving user's id
    /// * `title` - Short title
    /// * `message` - Body text
    /// * `created_at` - Creation timestamp
    #[must_use]
    pub const fn new(
        notification_id: String,
        recipient_id: String,
        title: String,
        message: String,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            notification_id,
            recipient_id,
            title,
            message,
            is_read: false,
            created_at,
        }
    }

    /// Returns true if `user_id` is the recipient.
    #[must_use]
    pub fn is_addressed_to(&self, user_id: &str) -> bool {
        self.recipient_id == user_id
    }
}
