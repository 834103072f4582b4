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
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod http;

#[cfg(test)]
mod tests;

use axum::Router;
use clap::{Parser, ValueEnum};
use timeoff_domain::{
    DEFAULT_PERSONAL_CAP_DAYS, DEFAULT_SICK_CAP_DAYS, LeavePolicy, Role, User,
    validate_user_fields,
};
use timeoff_persistence::{InMemoryPersistence, LeaveStore, PersistenceError, SqlitePersistence};
use tracing::info;

use crate::http::{AppState, build_router};

/// Which repository implementation backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StoreKind {
    /// Plain in-process collections; nothing survives a restart.
    Memory,
    /// Diesel over `SQLite`.
    Sqlite,
}

/// Time-off server - leave request tracking over HTTP
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Repository implementation to use
    #[arg(long, value_enum, default_value_t = StoreKind::Sqlite)]
    store: StoreKind,

    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Maximum days for a personal leave request
    #[arg(long, default_value_t = DEFAULT_PERSONAL_CAP_DAYS)]
    personal_cap_days: u32,

    /// Maximum days for a sick leave request
    #[arg(long, default_value_t = DEFAULT_SICK_CAP_DAYS)]
    sick_cap_days: u32,

    /// Id of the administrator created when the user directory is empty
    #[arg(long, default_value = "admin")]
    admin_id: String,

    /// Name of the bootstrap administrator
    #[arg(long, default_value = "Administrator")]
    admin_name: String,

    /// Email of the bootstrap administrator
    #[arg(long, default_value = "admin@example.com")]
    admin_email: String,
}

impl Args {
    const fn policy(&self) -> LeavePolicy {
        LeavePolicy::new(self.personal_cap_days, self.sick_cap_days)
    }

    fn bootstrap_admin(&self) -> User {
        User::new(
            self.admin_id.trim().to_string(),
            self.admin_name.trim().to_string(),
            self.admin_email.trim().to_string(),
            Role::Admin,
        )
    }
}

fn open_store(args: &Args) -> Result<Box<dyn LeaveStore + Send>, PersistenceError> {
    match (args.store, &args.database) {
        (StoreKind::Memory, database) => {
            if database.is_some() {
                info!("Ignoring --database for the in-memory store");
            }
            info!("Using in-memory store");
            Ok(Box::new(InMemoryPersistence::new()))
        }
        (StoreKind::Sqlite, Some(db_path)) => {
            info!("Using file-based database at: {}", db_path);
            Ok(Box::new(SqlitePersistence::new_with_file(db_path)?))
        }
        (StoreKind::Sqlite, None) => {
            info!("Using in-memory database");
            Ok(Box::new(SqlitePersistence::new_in_memory()?))
        }
    }
}

/// Inserts `admin` when the directory has no users yet, returning whether
/// it did.
///
/// # Errors
///
/// Returns an error if the directory cannot be read or written.
fn ensure_admin<S: LeaveStore + ?Sized>(
    store: &mut S,
    admin: &User,
) -> Result<bool, PersistenceError> {
    if !store.list_users()?.is_empty() {
        return Ok(false);
    }
    store.create_user(admin)?;
    info!(user_id = %admin.user_id, "Created bootstrap administrator");
    Ok(true)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing time-off server");

    let admin: User = args.bootstrap_admin();
    validate_user_fields(&admin.user_id, &admin.name, &admin.email)?;

    let mut store: Box<dyn LeaveStore + Send> = open_store(&args)?;
    ensure_admin(&mut *store, &admin)?;

    let policy: LeavePolicy = args.policy();
    info!(
        personal_cap_days = policy.personal_cap_days,
        sick_cap_days = policy.sick_cap_days,
        "Leave policy loaded"
    );

    let app: Router = build_router(AppState::new(store, policy));

    let addr: std::net::SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
