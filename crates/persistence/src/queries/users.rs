// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User and session queries.

use bookstore_domain::{Gender, Role};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use super::{decode_enum, like_pattern};
use crate::data_models::{SessionData, UserData, UserFilter};
use crate::diesel_schema::{sessions, users};
use crate::error::PersistenceError;

/// Diesel Queryable struct for user rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
struct UserRow {
    user_id: i64,
    username: String,
    email: Option<String>,
    first_name: String,
    last_name: String,
    role: String,
    gender: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    department: Option<String>,
    position: Option<String>,
    is_active: bool,
    is_superuser: bool,
    password_hash: String,
    created_at: String,
    updated_at: String,
    last_login_at: Option<String>,
}

impl TryFrom<UserRow> for UserData {
    type Error = PersistenceError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let gender: Option<Gender> = row
            .gender
            .as_deref()
            .map(|raw| decode_enum("users.gender", raw))
            .transpose()?;

        Ok(Self {
            user_id: row.user_id,
            username: row.username,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            role: decode_enum::<Role>("users.role", &row.role)?,
            gender,
            phone: row.phone,
            address: row.address,
            department: row.department,
            position: row.position,
            is_active: row.is_active,
            is_superuser: row.is_superuser,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
            last_login_at: row.last_login_at,
        })
    }
}

/// Diesel Queryable struct for session rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = sessions)]
struct SessionRow {
    session_id: i64,
    session_token: String,
    user_id: i64,
    created_at: String,
    last_activity_at: String,
    expires_at: String,
}

/// Retrieves a user by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or the row cannot be decoded.
/// Returns `Ok(None)` if the user is not found.
pub fn get_user_by_id(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<UserData>, PersistenceError> {
    debug!("Looking up user by ID: {}", user_id);

    let result: Result<UserRow, diesel::result::Error> = users::table
        .filter(users::user_id.eq(user_id))
        .select(UserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(UserData::try_from(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a user by username.
///
/// The username column is declared `COLLATE NOCASE`, so the lookup is
/// case-insensitive while the stored spelling is preserved.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `username` - The username to search for
///
/// # Errors
///
/// Returns an error if the database query fails or the row cannot be decoded.
/// Returns `Ok(None)` if the user is not found.
pub fn get_user_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<Option<UserData>, PersistenceError> {
    let username: &str = username.trim();
    debug!("Looking up user by username: {}", username);

    let result: Result<UserRow, diesel::result::Error> = users::table
        .filter(users::username.eq(username))
        .select(UserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(UserData::try_from(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists users matching a filter, ordered by username.
///
/// # Errors
///
/// Returns an error if the database query fails or a row cannot be decoded.
pub fn list_users(
    conn: &mut SqliteConnection,
    filter: &UserFilter,
) -> Result<Vec<UserData>, PersistenceError> {
    debug!(?filter, "Listing users");

    let mut query = users::table.select(UserRow::as_select()).into_boxed();

    if let Some(role) = filter.role {
        query = query.filter(users::role.eq(role.as_str()));
    }
    if let Some(is_active) = filter.is_active {
        query = query.filter(users::is_active.eq(is_active));
    }
    if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
        let pattern: String = like_pattern(search);
        query = query.filter(
            users::username
                .like(pattern.clone())
                .or(users::first_name.like(pattern.clone()))
                .or(users::last_name.like(pattern.clone()))
                .or(users::email
                    .is_not_null()
                    .and(users::email.assume_not_null().like(pattern))),
        );
    }

    let rows: Vec<UserRow> = query.order(users::username.asc()).load(conn)?;

    rows.into_iter().map(UserData::try_from).collect()
}

/// Counts all users.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_users(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    use diesel::dsl::count;

    let count: i64 = users::table
        .select(count(users::user_id))
        .first(conn)?;

    debug!("User count: {}", count);
    Ok(count)
}

/// Counts active users holding the admin role.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_active_admins(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    use diesel::dsl::count;

    debug!("Counting active admins");

    let count: i64 = users::table
        .filter(users::role.eq(Role::Admin.as_str()))
        .filter(users::is_active.eq(true))
        .select(count(users::user_id))
        .first(conn)?;

    debug!("Active admins: {}", count);
    Ok(count)
}

/// Retrieves a session by token.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the session is not found.
pub fn get_session_by_token(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<Option<SessionData>, PersistenceError> {
    debug!("Looking up session by token");

    let result: Result<SessionRow, diesel::result::Error> = sessions::table
        .filter(sessions::session_token.eq(session_token))
        .select(SessionRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(SessionData {
            session_id: row.session_id,
            session_token: row.session_token,
            user_id: row.user_id,
            created_at: row.created_at,
            last_activity_at: row.last_activity_at,
            expires_at: row.expires_at,
        })),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Verifies a password against a stored bcrypt hash.
///
/// # Errors
///
/// Returns an error if the stored hash is malformed.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
    bcrypt::verify(password, password_hash).map_err(PersistenceError::from)
}
