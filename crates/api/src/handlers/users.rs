// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication, account and user-management handlers.

use bookstore_domain::{Gender, Role, validate_email, validate_username};
use bookstore_persistence::{NewUser, Persistence, UserData, UserFilter, UserUpdate};
use time::Duration;
use tracing::{info, warn};

use super::{
    NAME_MAX_LEN, SHORT_TEXT_MAX_LEN, authorize, bounded_text, optional_text,
    optional_text_update, parse_field, parse_filter,
};
use crate::auth::{Action, AuthenticatedActor, AuthenticationService};
use crate::capabilities::{
    compute_global_capabilities, compute_permissions, compute_user_capabilities,
    is_last_active_admin,
};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    BootstrapRequest, BootstrapStatusResponse, ChangePasswordRequest, CreateUserRequest,
    ListUsersQuery, LoginRequest, LoginResponse, MessageResponse, PermissionsResponse,
    RegisterRequest, ResetPasswordRequest, RoleInfo, RolesResponse, UpdateProfileRequest,
    UpdateUserRequest, UserDetailResponse, UserResponse, WhoAmIResponse,
};

const PHONE_MAX_LEN: usize = 20;
const ADDRESS_MAX_LEN: usize = 255;

fn persistence_error(err: bookstore_persistence::PersistenceError) -> ApiError {
    translate_persistence_error("User", err)
}

fn load_user(persistence: &mut Persistence, user_id: i64) -> Result<UserData, ApiError> {
    persistence
        .get_user_by_id(user_id)
        .map_err(persistence_error)?
        .ok_or_else(|| ApiError::not_found("User", user_id))
}

fn validated_email(email: Option<&str>) -> Result<Option<String>, ApiError> {
    match email.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => validate_email(raw)
            .map(Some)
            .map_err(translate_domain_error),
    }
}

fn validated_gender(gender: Option<&str>) -> Result<Option<Gender>, ApiError> {
    parse_filter(gender)
}

fn last_admin_violation(username: &str) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: String::from("last_active_admin"),
        message: format!("'{username}' is the last active administrator"),
    }
}

/// Validates a new account's fields and password, then stores it.
fn create_account(
    persistence: &mut Persistence,
    request: CreateUserRequest,
) -> Result<UserData, ApiError> {
    let username: String = validate_username(&request.username).map_err(translate_domain_error)?;

    PasswordPolicy::default().validate(
        &request.password,
        &request.password_confirmation,
        &username,
    )?;

    let role: Role = match request.role.as_deref() {
        Some(raw) => parse_field(raw)?,
        None => Role::default(),
    };

    let new_user: NewUser = NewUser {
        email: validated_email(request.email.as_deref())?,
        first_name: bounded_text("first_name", &request.first_name, NAME_MAX_LEN)?,
        last_name: bounded_text("last_name", &request.last_name, NAME_MAX_LEN)?,
        role,
        gender: validated_gender(request.gender.as_deref())?,
        phone: optional_text("phone", request.phone.as_deref(), PHONE_MAX_LEN)?,
        address: optional_text("address", request.address.as_deref(), ADDRESS_MAX_LEN)?,
        department: optional_text("department", request.department.as_deref(), SHORT_TEXT_MAX_LEN)?,
        position: optional_text("position", request.position.as_deref(), SHORT_TEXT_MAX_LEN)?,
        is_active: request.is_active.unwrap_or(true),
        is_superuser: request.is_superuser.unwrap_or(false),
        username,
        password: request.password,
    };

    let user_id: i64 = persistence.create_user(&new_user).map_err(persistence_error)?;
    load_user(persistence, user_id)
}

/// Validates a partial update into the persistence form.
fn validated_update(request: &UpdateUserRequest) -> Result<UserUpdate, ApiError> {
    Ok(UserUpdate {
        email: request
            .email
            .as_ref()
            .map(|email| validated_email(email.as_deref()))
            .transpose()?,
        first_name: request
            .first_name
            .as_deref()
            .map(|name| bounded_text("first_name", name, NAME_MAX_LEN))
            .transpose()?,
        last_name: request
            .last_name
            .as_deref()
            .map(|name| bounded_text("last_name", name, NAME_MAX_LEN))
            .transpose()?,
        role: request.role.as_deref().map(parse_field).transpose()?,
        gender: request
            .gender
            .as_ref()
            .map(|gender| validated_gender(gender.as_deref()))
            .transpose()?,
        phone: optional_text_update(
            "phone",
            request.phone.as_ref().map(Option::as_deref),
            PHONE_MAX_LEN,
        )?,
        address: optional_text_update(
            "address",
            request.address.as_ref().map(Option::as_deref),
            ADDRESS_MAX_LEN,
        )?,
        department: optional_text_update(
            "department",
            request.department.as_ref().map(Option::as_deref),
            SHORT_TEXT_MAX_LEN,
        )?,
        position: optional_text_update(
            "position",
            request.position.as_ref().map(Option::as_deref),
            SHORT_TEXT_MAX_LEN,
        )?,
        is_active: request.is_active,
        is_superuser: request.is_superuser,
    })
}

// ========================================================================
// Authentication
// ========================================================================

/// Authenticates a user and starts a session.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The login request
/// * `session_ttl` - How long the session stays valid
///
/// # Errors
///
/// Returns `ApiError::AuthenticationFailed` if the credentials are wrong
/// or the account is inactive.
pub fn login(
    persistence: &mut Persistence,
    request: &LoginRequest,
    session_ttl: Duration,
) -> Result<LoginResponse, ApiError> {
    let (token, actor, user, expires_at): (String, AuthenticatedActor, UserData, String) =
        AuthenticationService::login(persistence, &request.username, &request.password, session_ttl)?;

    Ok(LoginResponse {
        token,
        expires_at,
        user: UserResponse::from(user),
        capabilities: compute_global_capabilities(&actor),
    })
}

/// Ends a session.
///
/// # Errors
///
/// Returns an error if the session cannot be deleted.
pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<MessageResponse, ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(MessageResponse::new("Logged out"))
}

/// Returns the current user with global capabilities.
#[must_use]
pub fn whoami(actor: &AuthenticatedActor, user: UserData) -> WhoAmIResponse {
    WhoAmIResponse {
        user: UserResponse::from(user),
        capabilities: compute_global_capabilities(actor),
    }
}

/// Self-registration. The account is always an active `staff` user.
///
/// # Errors
///
/// Returns an error if a field or the password is invalid, or the
/// username is taken.
pub fn register(
    persistence: &mut Persistence,
    request: RegisterRequest,
) -> Result<UserResponse, ApiError> {
    let user: UserData = create_account(
        persistence,
        CreateUserRequest {
            username: request.username,
            password: request.password,
            password_confirmation: request.password_confirmation,
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            role: Some(Role::Staff.as_str().to_string()),
            gender: None,
            phone: None,
            address: None,
            department: None,
            position: None,
            is_active: Some(true),
            is_superuser: Some(false),
        },
    )?;

    info!(username = %user.username, "Registered staff user");
    Ok(UserResponse::from(user))
}

/// Reports whether the first administrator still has to be created.
///
/// # Errors
///
/// Returns an error if the user count cannot be read.
pub fn get_bootstrap_status(
    persistence: &mut Persistence,
) -> Result<BootstrapStatusResponse, ApiError> {
    let user_count: i64 = persistence.count_users().map_err(persistence_error)?;
    Ok(BootstrapStatusResponse {
        bootstrap_required: user_count == 0,
        user_count,
    })
}

/// Creates the first user as an active superuser administrator.
///
/// # Errors
///
/// Returns `ApiError::Conflict` if any user already exists.
pub fn bootstrap(
    persistence: &mut Persistence,
    request: BootstrapRequest,
) -> Result<UserResponse, ApiError> {
    if persistence.count_users().map_err(persistence_error)? > 0 {
        warn!("Bootstrap attempted after users exist");
        return Err(ApiError::Conflict {
            message: String::from("The system already has users"),
        });
    }

    let user: UserData = create_account(
        persistence,
        CreateUserRequest {
            username: request.username,
            password: request.password,
            password_confirmation: request.password_confirmation,
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            role: Some(Role::Admin.as_str().to_string()),
            gender: None,
            phone: None,
            address: None,
            department: None,
            position: None,
            is_active: Some(true),
            is_superuser: Some(true),
        },
    )?;

    info!(username = %user.username, "Bootstrapped first administrator");
    Ok(UserResponse::from(user))
}

// ========================================================================
// User management
// ========================================================================

/// Lists users matching a filter. Admin only.
///
/// # Errors
///
/// Returns an error if unauthorized, a filter is invalid, or the query fails.
pub fn list_users(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    query: &ListUsersQuery,
) -> Result<Vec<UserResponse>, ApiError> {
    authorize(actor, Action::ManageUsers)?;

    let filter: UserFilter = UserFilter {
        role: parse_filter(query.role.as_deref())?,
        is_active: query.is_active,
        search: query.search.clone().filter(|s| !s.trim().is_empty()),
    };

    Ok(persistence
        .list_users(&filter)
        .map_err(persistence_error)?
        .into_iter()
        .map(UserResponse::from)
        .collect())
}

/// Creates a user account. Admin only.
///
/// # Errors
///
/// Returns an error if unauthorized, a field or the password is invalid,
/// or the username is taken.
pub fn create_user(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: CreateUserRequest,
) -> Result<UserResponse, ApiError> {
    authorize(actor, Action::ManageUsers)?;

    let user: UserData = create_account(persistence, request)?;
    info!(
        actor = %actor.username,
        username = %user.username,
        role = %user.role,
        "Created user"
    );
    Ok(UserResponse::from(user))
}

/// Returns one user with the caller's capabilities over it.
///
/// Admins may read anyone; other users only themselves.
///
/// # Errors
///
/// Returns an error if unauthorized or the user does not exist.
pub fn get_user(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    user_id: i64,
) -> Result<UserDetailResponse, ApiError> {
    if !actor.is_user(user_id) {
        authorize(actor, Action::ManageUsers)?;
    }

    let user: UserData = load_user(persistence, user_id)?;
    let capabilities = compute_user_capabilities(actor, &user, persistence)?;

    Ok(UserDetailResponse {
        user: UserResponse::from(user),
        capabilities,
    })
}

/// Applies a partial update to a user. Admin only.
///
/// The last active administrator cannot be demoted or deactivated, and
/// nobody can deactivate themselves. Deactivation ends the user's sessions.
///
/// # Errors
///
/// Returns an error if unauthorized, a field is invalid, a guard above
/// fails, or the user does not exist.
pub fn update_user(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    user_id: i64,
    request: &UpdateUserRequest,
) -> Result<UserResponse, ApiError> {
    authorize(actor, Action::ManageUsers)?;

    let update: UserUpdate = validated_update(request)?;
    let current: UserData = load_user(persistence, user_id)?;

    let deactivating: bool = current.is_active && update.is_active == Some(false);
    let demoting: bool = update.role.is_some_and(|role| role != Role::Admin);

    if deactivating && actor.is_user(user_id) {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("no_self_deactivation"),
            message: String::from("You cannot deactivate your own account"),
        });
    }
    if (deactivating || demoting) && is_last_active_admin(persistence, &current)? {
        return Err(last_admin_violation(&current.username));
    }

    let updated: UserData = persistence
        .update_user(user_id, &update)
        .map_err(persistence_error)?;

    if deactivating {
        persistence
            .delete_sessions_for_user(user_id)
            .map_err(persistence_error)?;
    }

    info!(actor = %actor.username, username = %updated.username, "Updated user");
    Ok(UserResponse::from(updated))
}

/// Deletes a user. Admin only.
///
/// Users who created orders, sales or ledger entries cannot be deleted;
/// deactivate them instead.
///
/// # Errors
///
/// Returns `ApiError::DomainRuleViolation` when deleting oneself or the
/// last active admin, and `ApiError::Conflict` when the user is referenced.
pub fn delete_user(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    user_id: i64,
) -> Result<MessageResponse, ApiError> {
    authorize(actor, Action::ManageUsers)?;

    if actor.is_user(user_id) {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("no_self_deletion"),
            message: String::from("You cannot delete your own account"),
        });
    }

    let user: UserData = load_user(persistence, user_id)?;
    if is_last_active_admin(persistence, &user)? {
        return Err(last_admin_violation(&user.username));
    }

    persistence.delete_user(user_id).map_err(|e| match e {
        bookstore_persistence::PersistenceError::ForeignKeyViolation(_) => ApiError::Conflict {
            message: format!(
                "User '{}' has recorded orders, sales or ledger entries; deactivate instead",
                user.username
            ),
        },
        other => persistence_error(other),
    })?;

    info!(actor = %actor.username, username = %user.username, "Deleted user");
    Ok(MessageResponse::new(format!("User '{}' deleted", user.username)))
}

/// Sets a user's active flag. Admin only.
///
/// # Errors
///
/// Returns an error if unauthorized, the guards of `update_user` fail, or
/// the user does not exist.
pub fn set_user_active(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    user_id: i64,
    is_active: bool,
) -> Result<UserResponse, ApiError> {
    update_user(
        persistence,
        actor,
        user_id,
        &UpdateUserRequest {
            is_active: Some(is_active),
            ..UpdateUserRequest::default()
        },
    )
}

/// Sets a new password for another user and ends their sessions. Admin only.
///
/// # Errors
///
/// Returns an error if unauthorized, the password breaks the policy, or
/// the user does not exist.
pub fn reset_password(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    user_id: i64,
    request: &ResetPasswordRequest,
) -> Result<MessageResponse, ApiError> {
    authorize(actor, Action::ManageUsers)?;

    let user: UserData = load_user(persistence, user_id)?;
    PasswordPolicy::default().validate(
        &request.new_password,
        &request.new_password_confirmation,
        &user.username,
    )?;

    persistence
        .update_password(user_id, &request.new_password)
        .map_err(persistence_error)?;
    persistence
        .delete_sessions_for_user(user_id)
        .map_err(persistence_error)?;

    info!(actor = %actor.username, username = %user.username, "Reset user password");
    Ok(MessageResponse::new("Password reset"))
}

// ========================================================================
// Self service
// ========================================================================

/// Updates the caller's own profile. Role and flags are not editable here.
///
/// # Errors
///
/// Returns an error if a field is invalid.
pub fn update_me(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: UpdateProfileRequest,
) -> Result<UserResponse, ApiError> {
    let update: UserUpdate = validated_update(&UpdateUserRequest::from(request))?;
    let updated: UserData = persistence
        .update_user(actor.user_id, &update)
        .map_err(persistence_error)?;

    info!(username = %updated.username, "Updated own profile");
    Ok(UserResponse::from(updated))
}

/// Changes the caller's password after checking the current one.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` on `current_password` if it is wrong,
/// or if the new password breaks the policy.
pub fn change_password(
    persistence: &mut Persistence,
    user: &UserData,
    request: &ChangePasswordRequest,
) -> Result<MessageResponse, ApiError> {
    let current_ok: bool = persistence
        .verify_password(&request.current_password, &user.password_hash)
        .map_err(persistence_error)?;
    if !current_ok {
        warn!(username = %user.username, "Password change with wrong current password");
        return Err(ApiError::InvalidInput {
            field: String::from("current_password"),
            message: String::from("Current password is incorrect"),
        });
    }

    PasswordPolicy::default().validate(
        &request.new_password,
        &request.new_password_confirmation,
        &user.username,
    )?;

    persistence
        .update_password(user.user_id, &request.new_password)
        .map_err(persistence_error)?;

    info!(username = %user.username, "Changed own password");
    Ok(MessageResponse::new("Password changed"))
}

/// Lists the assignable roles.
#[must_use]
pub fn list_roles() -> RolesResponse {
    RolesResponse {
        roles: Role::ALL
            .iter()
            .map(|role| RoleInfo {
                value: role.as_str().to_string(),
                label: role.label().to_string(),
            })
            .collect(),
    }
}

/// Lists every permission with whether the caller holds it.
#[must_use]
pub fn list_permissions(actor: &AuthenticatedActor) -> PermissionsResponse {
    PermissionsResponse {
        role: actor.role.as_str().to_string(),
        permissions: compute_permissions(actor),
    }
}
