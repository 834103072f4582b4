// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Committing a lifecycle transition.
//!
//! The request change, its audit entry and any notification are written in
//! one transaction. Updates and removals are guarded by the version the
//! transition was computed from; a mismatch aborts the whole transaction
//! with `Conflict`.

use diesel::prelude::*;
use diesel::SqliteConnection;
use timeoff::{RequestChange, TransitionResult};
use timeoff_audit::AuditLogEntry;
use timeoff_domain::{Comment, LeaveRequest, Notification};
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{
    LeaveRequestChanges, NewAuditLogRow, NewCommentRow, NewLeaveRequestRow, NotificationRow,
};
use crate::diesel_schema::{audit_log, leave_comments, leave_requests, notifications};
use crate::error::PersistenceError;

/// Commits `result` atomically and returns the new audit entry id.
///
/// # Errors
///
/// Returns `Conflict` if the stored version moved on, `DuplicateKey` if an
/// inserted id already exists, or a database error. Nothing is written in
/// any of these cases.
pub fn commit_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<i64, PersistenceError> {
    conn.transaction::<i64, PersistenceError, _>(|conn| {
        let entry_id: i64 = match &result.change {
            RequestChange::Insert(request) => {
                insert_request(conn, request)?;
                insert_audit_entry(conn, &result.audit_entry)?
            }
            RequestChange::Update {
                request,
                expected_version,
                new_comment,
            } => {
                update_request(conn, request, *expected_version, new_comment.as_ref())?;
                insert_audit_entry(conn, &result.audit_entry)?
            }
            RequestChange::Remove {
                request_id,
                expected_version,
            } => {
                // Entry first so the trail never lacks a removed request.
                let entry_id: i64 = insert_audit_entry(conn, &result.audit_entry)?;
                remove_request(conn, request_id, *expected_version)?;
                entry_id
            }
        };

        if let Some(notification) = &result.notification {
            insert_notification(conn, notification)?;
        }

        debug!(
            entry_id,
            action = %result.audit_entry.action,
            request_id = %result.request_id(),
            "Committed leave request transition"
        );
        Ok(entry_id)
    })
}

fn insert_request(
    conn: &mut SqliteConnection,
    request: &LeaveRequest,
) -> Result<(), PersistenceError> {
    let row: NewLeaveRequestRow = NewLeaveRequestRow::try_from(request)?;
    diesel::insert_into(leave_requests::table)
        .values(&row)
        .execute(conn)?;

    for comment in &request.comments {
        insert_comment(conn, &request.request_id, comment)?;
    }
    Ok(())
}

fn update_request(
    conn: &mut SqliteConnection,
    request: &LeaveRequest,
    expected_version: i64,
    new_comment: Option<&Comment>,
) -> Result<(), PersistenceError> {
    let changes: LeaveRequestChanges = LeaveRequestChanges::try_from(request)?;
    let updated: usize = diesel::update(
        leave_requests::table
            .filter(leave_requests::request_id.eq(&request.request_id))
            .filter(leave_requests::version.eq(expected_version)),
    )
    .set(&changes)
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::Conflict {
            request_id: request.request_id.clone(),
        });
    }

    if let Some(comment) = new_comment {
        insert_comment(conn, &request.request_id, comment)?;
    }
    Ok(())
}

fn remove_request(
    conn: &mut SqliteConnection,
    request_id: &str,
    expected_version: i64,
) -> Result<(), PersistenceError> {
    let removed: usize = diesel::delete(
        leave_requests::table
            .filter(leave_requests::request_id.eq(request_id))
            .filter(leave_requests::version.eq(expected_version)),
    )
    .execute(conn)?;

    if removed == 0 {
        return Err(PersistenceError::Conflict {
            request_id: request_id.to_string(),
        });
    }
    Ok(())
}

fn insert_comment(
    conn: &mut SqliteConnection,
    request_id: &str,
    comment: &Comment,
) -> Result<(), PersistenceError> {
    let row: NewCommentRow = NewCommentRow::new(request_id, comment)?;
    diesel::insert_into(leave_comments::table)
        .values(&row)
        .execute(conn)?;
    Ok(())
}

fn insert_audit_entry(
    conn: &mut SqliteConnection,
    entry: &AuditLogEntry,
) -> Result<i64, PersistenceError> {
    let row: NewAuditLogRow = NewAuditLogRow::try_from(entry)?;
    diesel::insert_into(audit_log::table)
        .values(&row)
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

fn insert_notification(
    conn: &mut SqliteConnection,
    notification: &Notification,
) -> Result<(), PersistenceError> {
    let row: NotificationRow = NotificationRow::try_from(notification)?;
    diesel::insert_into(notifications::table)
        .values(&row)
        .execute(conn)?;
    Ok(())
}
