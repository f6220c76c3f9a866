// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Opening and preparing `SQLite` connections.
//!
//! Every connection the store hands out has foreign keys enforced and the
//! embedded schema applied. File databases additionally run in WAL mode
//! with a busy timeout so the session sweeper and request handlers can
//! share one file.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const MEMORY_PRAGMAS: &[&str] = &["PRAGMA foreign_keys = ON"];

const FILE_PRAGMAS: &[&str] = &[
    "PRAGMA foreign_keys = ON",
    "PRAGMA journal_mode = WAL",
    "PRAGMA busy_timeout = 5000",
];

/// Where a database lives.
#[derive(Debug, Clone, Copy)]
pub enum Location<'a> {
    /// A private shared-cache in-memory database, named by a counter.
    Memory(u64),
    /// A database file on disk.
    File(&'a str),
}

impl Location<'_> {
    fn url(self) -> String {
        match self {
            Self::Memory(id) => format!("file:bookstore_mem_{id}?mode=memory&cache=shared"),
            Self::File(path) => path.to_string(),
        }
    }

    const fn pragmas(self) -> &'static [&'static str] {
        match self {
            Self::Memory(_) => MEMORY_PRAGMAS,
            Self::File(_) => FILE_PRAGMAS,
        }
    }
}

#[derive(QueryableByName)]
struct ForeignKeysPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Opens a connection, applies its pragmas and brings the schema up to date.
///
/// # Errors
///
/// Returns an error if the database cannot be opened, a pragma or
/// migration fails, or foreign keys end up unenforced.
pub fn open(location: Location<'_>) -> Result<SqliteConnection, PersistenceError> {
    let url: String = location.url();
    info!(%url, "Opening bookstore database");

    let mut conn: SqliteConnection = SqliteConnection::establish(&url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    // Diesel has no PRAGMA DSL.
    for pragma in location.pragmas() {
        diesel::sql_query(*pragma)
            .execute(&mut conn)
            .map_err(|e| PersistenceError::QueryFailed(format!("{pragma}: {e}")))?;
    }

    let applied: usize = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?
        .len();
    if applied > 0 {
        info!(applied, "Applied schema migrations");
    }

    ensure_foreign_keys(&mut conn)?;
    Ok(conn)
}

/// Fails unless `PRAGMA foreign_keys` reports enforcement on this
/// connection. Delete protection for books, users and orders depends on it.
///
/// # Errors
///
/// Returns `PersistenceError::ForeignKeyEnforcementNotEnabled` when it is
/// off, or a query error.
pub fn ensure_foreign_keys(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let row: ForeignKeysPragma = diesel::sql_query("PRAGMA foreign_keys").get_result(conn)?;
    if row.foreign_keys == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }
    debug!("Foreign key enforcement confirmed");
    Ok(())
}

/// Id of the row most recently inserted on this connection.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn last_insert_id(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}
