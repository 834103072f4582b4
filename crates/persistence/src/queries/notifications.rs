// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use timeoff_domain::Notification;

use crate::data_models::NotificationRow;
use crate::diesel_schema::notifications;
use crate::error::PersistenceError;

/// # Errors
///
/// Returns an error if the query fails or the row does not decode.
pub fn find_notification(
    conn: &mut SqliteConnection,
    notification_id: &str,
) -> Result<Option<Notification>, PersistenceError> {
    notifications::table
        .filter(notifications::notification_id.eq(notification_id))
        .select(NotificationRow::as_select())
        .first(conn)
        .optional()?
        .map(NotificationRow::into_domain)
        .transpose()
}

/// Lists a recipient's notifications, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row does not decode.
pub fn list_notifications_for(
    conn: &mut SqliteConnection,
    recipient_id: &str,
) -> Result<Vec<Notification>, PersistenceError> {
    notifications::table
        .filter(notifications::recipient_id.eq(recipient_id))
        .order((
            notifications::created_at.desc(),
            notifications::notification_id.asc(),
        ))
        .select(NotificationRow::as_select())
        .load(conn)?
        .into_iter()
        .map(NotificationRow::into_domain)
        .collect()
}
