// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use timeoff_audit::{AuditFilter, AuditLogEntry};

use crate::data_models::{AuditLogRow, format_timestamp};
use crate::diesel_schema::audit_log;
use crate::error::PersistenceError;

/// Lists audit entries matching `filter`, oldest first.
///
/// Every populated filter field narrows the result. Time bounds compare the
/// stored fixed-width UTC text, which orders the same way as the instants.
///
/// # Errors
///
/// Returns an error if the query fails or a row does not decode.
pub fn list_audit_entries(
    conn: &mut SqliteConnection,
    filter: &AuditFilter,
) -> Result<Vec<AuditLogEntry>, PersistenceError> {
    let mut query = audit_log::table
        .select(AuditLogRow::as_select())
        .order(audit_log::entry_id.asc())
        .into_boxed();

    if let Some(action) = filter.action {
        query = query.filter(audit_log::action.eq(action.as_str()));
    }
    if let Some(user_id) = &filter.user_id {
        query = query.filter(audit_log::actor_id.eq(user_id.clone()));
    }
    if let Some(target_type) = filter.target_type {
        query = query.filter(audit_log::target_type.eq(target_type.as_str()));
    }
    if let Some(target_id) = &filter.target_id {
        query = query.filter(audit_log::target_id.eq(target_id.clone()));
    }
    if let Some(start) = filter.start {
        query = query.filter(audit_log::created_at.ge(format_timestamp(start)?));
    }
    if let Some(end) = filter.end {
        query = query.filter(audit_log::created_at.le(format_timestamp(end)?));
    }

    query
        .load::<AuditLogRow>(conn)?
        .into_iter()
        .map(AuditLogRow::into_domain)
        .collect()
}
