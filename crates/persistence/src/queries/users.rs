// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use timeoff_domain::User;

use crate::data_models::UserRow;
use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// # Errors
///
/// Returns an error if the query fails or the row does not decode.
pub fn find_user(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Option<User>, PersistenceError> {
    users::table
        .filter(users::user_id.eq(user_id))
        .select(UserRow::as_select())
        .first(conn)
        .optional()?
        .map(UserRow::into_domain)
        .transpose()
}

/// Lists the directory ordered by user id.
///
/// # Errors
///
/// Returns an error if the query fails or a row does not decode.
pub fn list_users(conn: &mut SqliteConnection) -> Result<Vec<User>, PersistenceError> {
    users::table
        .order(users::user_id.asc())
        .select(UserRow::as_select())
        .load(conn)?
        .into_iter()
        .map(UserRow::into_domain)
        .collect()
}
