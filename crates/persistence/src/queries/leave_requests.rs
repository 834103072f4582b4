// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use std::collections::HashMap;
use timeoff_domain::{Comment, LeaveRequest};

use crate::data_models::{CommentRow, LeaveRequestRow};
use crate::diesel_schema::{leave_comments, leave_requests};
use crate::error::PersistenceError;

/// Loads one request with its comments in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails or a row does not decode.
pub fn find_leave_request(
    conn: &mut SqliteConnection,
    request_id: &str,
) -> Result<Option<LeaveRequest>, PersistenceError> {
    let row: Option<LeaveRequestRow> = leave_requests::table
        .filter(leave_requests::request_id.eq(request_id))
        .select(LeaveRequestRow::as_select())
        .first(conn)
        .optional()?;

    let Some(row) = row else {
        return Ok(None);
    };

    let comments: Vec<Comment> = leave_comments::table
        .filter(leave_comments::request_id.eq(request_id))
        .order(leave_comments::comment_seq.asc())
        .select(CommentRow::as_select())
        .load(conn)?
        .into_iter()
        .map(CommentRow::into_domain)
        .collect::<Result<_, _>>()?;

    row.into_domain(comments).map(Some)
}

/// Lists requests ordered by creation time, optionally only those filed by
/// `requester_id`.
///
/// # Errors
///
/// Returns an error if the query fails or a row does not decode.
pub fn list_leave_requests(
    conn: &mut SqliteConnection,
    requester_id: Option<&str>,
) -> Result<Vec<LeaveRequest>, PersistenceError> {
    let mut query = leave_requests::table
        .select(LeaveRequestRow::as_select())
        .order((
            leave_requests::created_at.asc(),
            leave_requests::request_id.asc(),
        ))
        .into_boxed();
    if let Some(requester_id) = requester_id {
        query = query.filter(leave_requests::requester_id.eq(requester_id.to_string()));
    }
    let rows: Vec<LeaveRequestRow> = query.load(conn)?;

    let request_ids: Vec<&str> = rows.iter().map(|row| row.request_id.as_str()).collect();
    let comment_rows: Vec<CommentRow> = leave_comments::table
        .filter(leave_comments::request_id.eq_any(request_ids))
        .order(leave_comments::comment_seq.asc())
        .select(CommentRow::as_select())
        .load(conn)?;

    let mut comments_by_request: HashMap<String, Vec<Comment>> = HashMap::new();
    for comment_row in comment_rows {
        comments_by_request
            .entry(comment_row.request_id.clone())
            .or_default()
            .push(comment_row.into_domain()?);
    }

    rows.into_iter()
        .map(|row| {
            let comments: Vec<Comment> = comments_by_request
                .remove(&row.request_id)
                .unwrap_or_default();
            row.into_domain(comments)
        })
        .collect()
}
