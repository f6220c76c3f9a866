// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User and session mutations.

use bookstore_domain::{Gender, Role};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{debug, info};

use super::now;
use crate::connection::last_insert_id;
use crate::data_models::{NewUser, UserData, UserUpdate};
use crate::diesel_schema::{sessions, users};
use crate::error::PersistenceError;
use crate::queries::users::get_user_by_id;

/// Role stored for a user; superusers are always admins.
const fn effective_role(role: Role, is_superuser: bool) -> Role {
    if is_superuser { Role::Admin } else { role }
}

/// Creates a new user.
///
/// The password is hashed with bcrypt before it is stored. A superuser is
/// stored with the admin role regardless of `user.role`.
///
/// # Errors
///
/// Returns an error if the password cannot be hashed or the username is
/// already taken.
pub fn create_user(conn: &mut SqliteConnection, user: &NewUser) -> Result<i64, PersistenceError> {
    let role: Role = effective_role(user.role, user.is_superuser);

    info!(
        "Creating user with username: {}, role: {}, superuser: {}",
        user.username, role, user.is_superuser
    );

    let password_hash: String = bcrypt::hash(&user.password, bcrypt::DEFAULT_COST)?;

    diesel::insert_into(users::table)
        .values((
            users::username.eq(&user.username),
            users::email.eq(user.email.as_deref()),
            users::first_name.eq(&user.first_name),
            users::last_name.eq(&user.last_name),
            users::role.eq(role.as_str()),
            users::gender.eq(user.gender.map(|g| g.as_str())),
            users::phone.eq(user.phone.as_deref()),
            users::address.eq(user.address.as_deref()),
            users::department.eq(user.department.as_deref()),
            users::position.eq(user.position.as_deref()),
            users::is_active.eq(user.is_active),
            users::is_superuser.eq(user.is_superuser),
            users::password_hash.eq(&password_hash),
        ))
        .execute(conn)?;

    let user_id: i64 = last_insert_id(conn)?;

    info!(user_id, "User created");
    Ok(user_id)
}

/// Applies a partial update to a user and returns the stored result.
///
/// The update is merged over the current row, then written in full, so the
/// superuser/admin pairing holds whichever of the two fields changed.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the user does not exist, or an
/// error if the write fails.
pub fn update_user(
    conn: &mut SqliteConnection,
    user_id: i64,
    update: &UserUpdate,
) -> Result<UserData, PersistenceError> {
    let current: UserData = get_user_by_id(conn, user_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("User with ID {user_id} not found")))?;

    let is_superuser: bool = update.is_superuser.unwrap_or(current.is_superuser);
    let role: Role = effective_role(update.role.unwrap_or(current.role), is_superuser);
    let gender: Option<Gender> = update.gender.unwrap_or(current.gender);

    info!(user_id, %role, is_superuser, "Updating user");

    diesel::update(users::table)
        .filter(users::user_id.eq(user_id))
        .set((
            users::email.eq(update.email.clone().unwrap_or(current.email)),
            users::first_name.eq(update.first_name.clone().unwrap_or(current.first_name)),
            users::last_name.eq(update.last_name.clone().unwrap_or(current.last_name)),
            users::role.eq(role.as_str()),
            users::gender.eq(gender.map(|g| g.as_str())),
            users::phone.eq(update.phone.clone().unwrap_or(current.phone)),
            users::address.eq(update.address.clone().unwrap_or(current.address)),
            users::department.eq(update.department.clone().unwrap_or(current.department)),
            users::position.eq(update.position.clone().unwrap_or(current.position)),
            users::is_active.eq(update.is_active.unwrap_or(current.is_active)),
            users::is_superuser.eq(is_superuser),
            users::updated_at.eq(now()),
        ))
        .execute(conn)?;

    get_user_by_id(conn, user_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("User with ID {user_id} not found")))
}

/// Sets the active flag on a user.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the user does not exist.
pub fn set_user_active(
    conn: &mut SqliteConnection,
    user_id: i64,
    is_active: bool,
) -> Result<(), PersistenceError> {
    info!(user_id, is_active, "Setting user active flag");

    let rows_affected: usize = diesel::update(users::table)
        .filter(users::user_id.eq(user_id))
        .set((users::is_active.eq(is_active), users::updated_at.eq(now())))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "User with ID {user_id} not found"
        )));
    }
    Ok(())
}

/// Updates a user's password.
///
/// # Errors
///
/// Returns an error if the password cannot be hashed or the user does not
/// exist.
pub fn update_password(
    conn: &mut SqliteConnection,
    user_id: i64,
    new_password: &str,
) -> Result<(), PersistenceError> {
    info!("Updating password for user ID: {}", user_id);

    let password_hash: String = bcrypt::hash(new_password, bcrypt::DEFAULT_COST)?;

    let rows_affected: usize = diesel::update(users::table)
        .filter(users::user_id.eq(user_id))
        .set((
            users::password_hash.eq(&password_hash),
            users::updated_at.eq(now()),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "User with ID {user_id} not found"
        )));
    }
    Ok(())
}

/// Records a successful login.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_last_login(conn: &mut SqliteConnection, user_id: i64) -> Result<(), PersistenceError> {
    debug!("Updating last_login_at for user ID: {}", user_id);

    diesel::update(users::table)
        .filter(users::user_id.eq(user_id))
        .set(users::last_login_at.eq(diesel::dsl::sql::<
            diesel::sql_types::Nullable<diesel::sql_types::Text>,
        >("CURRENT_TIMESTAMP")))
        .execute(conn)?;

    Ok(())
}

/// Deletes a user.
///
/// Sessions are removed by cascade. A user who created orders, sales or
/// ledger entries cannot be deleted.
///
/// # Errors
///
/// Returns `PersistenceError::ForeignKeyViolation` if the user is still
/// referenced, or `PersistenceError::NotFound` if the user does not exist.
pub fn delete_user(conn: &mut SqliteConnection, user_id: i64) -> Result<(), PersistenceError> {
    info!("Attempting to delete user ID: {}", user_id);

    let rows_affected: usize = diesel::delete(users::table)
        .filter(users::user_id.eq(user_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "User with ID {user_id} not found"
        )));
    }

    info!("Deleted user ID: {}", user_id);
    Ok(())
}

/// Creates a new session for a user.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The unique session token
/// * `user_id` - The user the session belongs to
/// * `expires_at` - The expiration timestamp, `YYYY-MM-DD HH:MM:SS` UTC
///
/// # Errors
///
/// Returns an error if the session cannot be created.
pub fn create_session(
    conn: &mut SqliteConnection,
    session_token: &str,
    user_id: i64,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    debug!(
        "Creating session for user ID: {} with expiration: {}",
        user_id, expires_at
    );

    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::user_id.eq(user_id),
            sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;

    let session_id: i64 = last_insert_id(conn)?;

    debug!(session_id, user_id, "Session created");
    Ok(session_id)
}

/// Updates the last activity timestamp for a session.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_session_activity(
    conn: &mut SqliteConnection,
    session_id: i64,
) -> Result<(), PersistenceError> {
    debug!("Updating last_activity_at for session ID: {}", session_id);

    diesel::update(sessions::table)
        .filter(sessions::session_id.eq(session_id))
        .set(sessions::last_activity_at.eq(now()))
        .execute(conn)?;

    Ok(())
}

/// Deletes a session by token.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_session(conn: &mut SqliteConnection, session_token: &str) -> Result<(), PersistenceError> {
    debug!("Deleting session by token");

    diesel::delete(sessions::table)
        .filter(sessions::session_token.eq(session_token))
        .execute(conn)?;

    Ok(())
}

/// Deletes every session belonging to a user.
///
/// Used when a password changes so that existing logins stop working.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_sessions_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<usize, PersistenceError> {
    info!("Deleting all sessions for user ID: {}", user_id);

    let rows_affected: usize = diesel::delete(sessions::table)
        .filter(sessions::user_id.eq(user_id))
        .execute(conn)?;

    info!(
        "Deleted {} sessions for user ID: {}",
        rows_affected, user_id
    );
    Ok(rows_affected)
}

/// Deletes all expired sessions.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_expired_sessions(conn: &mut SqliteConnection) -> Result<usize, PersistenceError> {
    debug!("Deleting expired sessions");

    let rows_affected: usize = diesel::delete(sessions::table)
        .filter(sessions::expires_at.lt(now()))
        .execute(conn)?;

    info!("Deleted {} expired sessions", rows_affected);
    Ok(rows_affected)
}
