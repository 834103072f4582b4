// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// The kind of mutation an audit entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    /// A leave request was created.
    Create,
    /// A leave request's fields were edited.
    Modify,
    /// A leave request was removed.
    Delete,
    /// A leave request was approved.
    Approve,
    /// A leave request was rejected.
    Reject,
    /// A comment was added to a leave request.
    Comment,
}

impl AuditAction {
    /// Returns the stable string form used for storage and transport.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Modify => "modify",
            Self::Delete => "delete",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Comment => "comment",
        }
    }
}

impl FromStr for AuditAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Self::Create),
            "modify" => Ok(Self::Modify),
            "delete" => Ok(Self::Delete),
            "approve" => Ok(Self::Approve),
            "reject" => Ok(Self::Reject),
            "comment" => Ok(Self::Comment),
            _ => Err(format!("Unknown audit action: {s}")),
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kind of record an audit entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    /// A leave request.
    LeaveRequest,
    /// A user directory entry.
    User,
}

impl TargetType {
    /// Returns the stable string form used for storage and transport.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LeaveRequest => "leave_request",
            Self::User => "user",
        }
    }
}

impl FromStr for TargetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "leave_request" => Ok(Self::LeaveRequest),
            "user" => Ok(Self::User),
            _ => Err(format!("Unknown audit target type: {s}")),
        }
    }
}

impl std::fmt::Display for TargetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The user who performed an audited action.
///
/// The name is a snapshot taken when the entry was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The acting user's id.
    pub id: String,
    /// The acting user's display name at the time.
    pub name: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The acting user's id
    /// * `name` - The acting user's display name
    #[must_use]
    pub const fn new(id: String, name: String) -> Self {
        Self { id, name }
    }
}

/// One immutable record of who did what to which record.
///
/// Entries are written in the same atomic unit as the mutation they
/// describe and are never changed or deleted afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogEntry {
    /// Store-assigned id, increasing in application order.
    ///
    /// `None` until the entry has been persisted.
    pub entry_id: Option<i64>,
    /// What happened.
    pub action: AuditAction,
    /// The id of the affected record.
    pub target_id: String,
    /// The kind of the affected record.
    pub target_type: TargetType,
    /// Who did it.
    pub actor: Actor,
    /// Human-readable description.
    pub details: String,
    /// When it happened.
    pub timestamp: OffsetDateTime,
}

impl AuditLogEntry {
    /// Creates a new, not yet persisted, audit entry.
    ///
    /// # Arguments
    ///
    /// * `action` - What happened
    /// * `target_id` - The affected record's id
    /// * `target_type` - The affected record's kind
    /// * `actor` - Who did it
    /// * `details` - Human-readable description
    /// * `timestamp` - When it happened
    #[must_use]
    pub const fn new(
        action: AuditAction,
        target_id: String,
        target_type: TargetType,
        actor: Actor,
        details: String,
        timestamp: OffsetDateTime,
    ) -> Self {
        Self {
            entry_id: None,
            action,
            target_id,
            target_type,
            actor,
            details,
            timestamp,
        }
    }

    /// Returns a copy of this entry carrying the store-assigned id.
    #[must_use]
    pub fn with_id(mut self, entry_id: i64) -> Self {
        self.entry_id = Some(entry_id);
        self
    }
}

/// Predicates for narrowing the audit trail.
///
/// Every populated field must match (AND semantics); `None` fields pass
/// everything through. Time bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditFilter {
    /// Only entries with this action.
    pub action: Option<AuditAction>,
    /// Only entries performed by this user.
    pub user_id: Option<String>,
    /// Only entries about this kind of record.
    pub target_type: Option<TargetType>,
    /// Only entries about this record.
    pub target_id: Option<String>,
    /// Only entries at or after this instant.
    pub start: Option<OffsetDateTime>,
    /// Only entries at or before this instant.
    pub end: Option<OffsetDateTime>,
}

impl AuditFilter {
    /// Returns true if `entry` satisfies every populated predicate.
    #[must_use]
    pub fn matches(&self, entry: &AuditLogEntry) -> bool {
        self.action.is_none_or(|action| entry.action == action)
            && self
                .user_id
                .as_deref()
                .is_none_or(|user_id| entry.actor.id == user_id)
            && self
                .target_type
                .is_none_or(|target_type| entry.target_type == target_type)
            && self
                .target_id
                .as_deref()
                .is_none_or(|target_id| entry.target_id == target_id)
            && self.start.is_none_or(|start| entry.timestamp >= start)
            && self.end.is_none_or(|end| entry.timestamp <= end)
    }
}

/// Returns the entries matching `filter`, preserving input order.
#[must_use]
pub fn filter_audit_logs(entries: &[AuditLogEntry], filter: &AuditFilter) -> Vec<AuditLogEntry> {
    entries
        .iter()
        .filter(|entry| filter.matches(entry))
        .cloned()
        .collect()
}
