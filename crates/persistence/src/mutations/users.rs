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

/// Adds a user to the directory.
///
/// # Errors
///
/// Returns `DuplicateKey` if the user id is taken.
pub fn insert_user(conn: &mut SqliteConnection, user: &User) -> Result<(), PersistenceError> {
    diesel::insert_into(users::table)
        .values(&UserRow::from(user))
        .execute(conn)?;
    Ok(())
}
