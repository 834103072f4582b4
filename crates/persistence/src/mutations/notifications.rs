// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::diesel_schema::notifications;
use crate::error::PersistenceError;

/// Sets `is_read` on a notification. Marking twice is harmless.
///
/// # Errors
///
/// Returns `NotFound` if no such notification exists.
pub fn mark_notification_read(
    conn: &mut SqliteConnection,
    notification_id: &str,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        notifications::table.filter(notifications::notification_id.eq(notification_id)),
    )
    .set(notifications::is_read.eq(1))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "notification {notification_id}"
        )));
    }
    Ok(())
}
