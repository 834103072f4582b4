// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the time-off service.
//!
//! The crate defines the storage ports the service depends on
//! ([`LeaveRequestRepository`], [`AuditLogRepository`],
//! [`NotificationRepository`], [`UserRepository`] and the combined
//! [`LeaveStore`]) and two implementations of them:
//!
//! - [`InMemoryPersistence`] keeps everything in process memory. It is used
//!   by tests and by the server's `--store memory` mode.
//! - [`SqlitePersistence`] stores everything in `SQLite` through Diesel, with
//!   the schema managed by embedded migrations.
//!
//! ## Atomicity
//!
//! A lifecycle transition is committed as one unit: the request change, its
//! audit entry and any notification either all become visible or none do.
//! Updates and removals carry the version they were computed from, and a
//! store that has since moved on rejects the commit with
//! [`PersistenceError::Conflict`].
//!
//! ## Audit trail
//!
//! Audit entries are append-only. Ids are assigned by the store in commit
//! order, and listings return entries in that order.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use timeoff::TransitionResult;
use timeoff_audit::{AuditFilter, AuditLogEntry};
use timeoff_domain::{LeaveRequest, Notification, User};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod memory;
mod mutations;
mod queries;
mod repository;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use memory::InMemoryPersistence;
pub use repository::{
    AuditLogRepository, LeaveRequestRepository, LeaveStore, NotificationRepository,
    UserRepository,
};

/// Counter for unique shared in-memory database names.
///
/// Each call to `new_in_memory()` gets its own database, so tests stay
/// isolated without relying on timestamps.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// `SQLite`-backed implementation of every storage port.
pub struct SqlitePersistence {
    conn: SqliteConnection,
}

impl SqlitePersistence {
    /// Creates a store over a fresh in-memory `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String =
            format!("file:memdb_timeoff_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Opens (or creates) a file-backed `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::configure_file_database(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Re-checks that foreign key enforcement is active on the connection.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    #[cfg(test)]
    pub(crate) const fn connection(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }
}

impl LeaveRequestRepository for SqlitePersistence {
    fn get_leave_request(
        &mut self,
        request_id: &str,
    ) -> Result<Option<LeaveRequest>, PersistenceError> {
        queries::leave_requests::find_leave_request(&mut self.conn, request_id)
    }

    fn list_leave_requests(&mut self) -> Result<Vec<LeaveRequest>, PersistenceError> {
        queries::leave_requests::list_leave_requests(&mut self.conn, None)
    }

    fn list_leave_requests_for_user(
        &mut self,
        user_id: &str,
    ) -> Result<Vec<LeaveRequest>, PersistenceError> {
        queries::leave_requests::list_leave_requests(&mut self.conn, Some(user_id))
    }
}

impl AuditLogRepository for SqlitePersistence {
    fn list_audit_entries(
        &mut self,
        filter: &AuditFilter,
    ) -> Result<Vec<AuditLogEntry>, PersistenceError> {
        queries::audit::list_audit_entries(&mut self.conn, filter)
    }
}

impl NotificationRepository for SqlitePersistence {
    fn get_notification(
        &mut self,
        notification_id: &str,
    ) -> Result<Option<Notification>, PersistenceError> {
        queries::notifications::find_notification(&mut self.conn, notification_id)
    }

    fn list_notifications_for_user(
        &mut self,
        user_id: &str,
    ) -> Result<Vec<Notification>, PersistenceError> {
        queries::notifications::list_notifications_for(&mut self.conn, user_id)
    }

    fn mark_notification_read(&mut self, notification_id: &str) -> Result<(), PersistenceError> {
        mutations::notifications::mark_notification_read(&mut self.conn, notification_id)
    }
}

impl UserRepository for SqlitePersistence {
    fn get_user(&mut self, user_id: &str) -> Result<Option<User>, PersistenceError> {
        queries::users::find_user(&mut self.conn, user_id)
    }

    fn list_users(&mut self) -> Result<Vec<User>, PersistenceError> {
        queries::users::list_users(&mut self.conn)
    }

    fn create_user(&mut self, user: &User) -> Result<(), PersistenceError> {
        mutations::users::insert_user(&mut self.conn, user)
    }
}

impl LeaveStore for SqlitePersistence {
    fn commit_transition(&mut self, result: &TransitionResult) -> Result<i64, PersistenceError> {
        mutations::transition::commit_transition(&mut self.conn, result)
    }
}
