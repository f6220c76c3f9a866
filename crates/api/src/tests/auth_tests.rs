// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bookstore_domain::Role;
use bookstore_persistence::PersistenceError;
use time::Duration;

use super::{PASSWORD, add_actor, register_request, setup};
use crate::handlers::users;
use crate::{
    ApiError, AuthError, AuthenticatedActor, AuthenticationService, Capability, LoginRequest,
    LoginResponse,
};

fn login_request(username: &str, password: &str) -> LoginRequest {
    LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    }
}

#[test]
fn test_login_returns_token_and_capabilities() {
    let (mut persistence, _admin) = setup();

    let response: LoginResponse = users::login(
        &mut persistence,
        &login_request("admin", PASSWORD),
        AuthenticationService::DEFAULT_SESSION_TTL,
    )
    .unwrap();

    assert_eq!(response.token.len(), 64);
    assert!(
        response
            .token
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    );
    assert!(response.token.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(response.user.username, "admin");
    assert_eq!(response.capabilities.can_manage_users, Capability::Allowed);
    assert!(response.user.last_login_at.is_none());

    let user = persistence.get_user_by_username("admin").unwrap().unwrap();
    assert!(user.last_login_at.is_some());
}

#[test]
fn test_login_username_is_case_insensitive() {
    let (mut persistence, _admin) = setup();

    let result: Result<LoginResponse, ApiError> = users::login(
        &mut persistence,
        &login_request("ADMIN", PASSWORD),
        AuthenticationService::DEFAULT_SESSION_TTL,
    );
    assert!(result.is_ok());
}

#[test]
fn test_login_wrong_password_and_unknown_user_look_the_same() {
    let (mut persistence, _admin) = setup();

    let wrong_password: ApiError = users::login(
        &mut persistence,
        &login_request("admin", "wrong-password1"),
        AuthenticationService::DEFAULT_SESSION_TTL,
    )
    .unwrap_err();
    let unknown_user: ApiError = users::login(
        &mut persistence,
        &login_request("nobody", PASSWORD),
        AuthenticationService::DEFAULT_SESSION_TTL,
    )
    .unwrap_err();

    assert_eq!(wrong_password, unknown_user);
    assert!(matches!(wrong_password, ApiError::AuthenticationFailed { .. }));
}

#[test]
fn test_inactive_user_cannot_log_in() {
    let (mut persistence, admin) = setup();
    let staff: AuthenticatedActor = add_actor(&mut persistence, &admin, "clerk", "staff");
    users::set_user_active(&mut persistence, &admin, staff.user_id, false).unwrap();

    let result: Result<LoginResponse, ApiError> = users::login(
        &mut persistence,
        &login_request("clerk", PASSWORD),
        AuthenticationService::DEFAULT_SESSION_TTL,
    );
    assert!(matches!(
        result,
        Err(ApiError::AuthenticationFailed { reason }) if reason.contains("inactive")
    ));
}

#[test]
fn test_validate_session_returns_actor() {
    let (mut persistence, _admin) = setup();
    let response: LoginResponse = users::login(
        &mut persistence,
        &login_request("admin", PASSWORD),
        AuthenticationService::DEFAULT_SESSION_TTL,
    )
    .unwrap();

    let (actor, user) = AuthenticationService::validate_session(&mut persistence, &response.token)
        .unwrap();
    assert_eq!(actor.username, "admin");
    assert_eq!(actor.role, Role::Admin);
    assert!(actor.is_superuser);
    assert_eq!(user.user_id, actor.user_id);
}

#[test]
fn test_unknown_token_is_rejected() {
    let (mut persistence, _admin) = setup();

    let result = AuthenticationService::validate_session(&mut persistence, "not-a-token");
    assert!(matches!(result, Err(AuthError::AuthenticationFailed { .. })));
}

#[test]
fn test_expired_session_is_rejected_and_removed() {
    let (mut persistence, admin) = setup();
    persistence
        .create_session("stale-token", admin.user_id, "2000-01-01 00:00:00")
        .unwrap();

    let result = AuthenticationService::validate_session(&mut persistence, "stale-token");
    assert!(matches!(
        result,
        Err(AuthError::AuthenticationFailed { reason }) if reason == "Session expired"
    ));
    assert!(
        persistence
            .get_session_by_token("stale-token")
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_negative_ttl_produces_expired_session() {
    let (mut persistence, _admin) = setup();
    let response: LoginResponse = users::login(
        &mut persistence,
        &login_request("admin", PASSWORD),
        Duration::minutes(-5),
    )
    .unwrap();

    let result = AuthenticationService::validate_session(&mut persistence, &response.token);
    assert!(result.is_err());
}

#[test]
fn test_logout_invalidates_token() {
    let (mut persistence, _admin) = setup();
    let response: LoginResponse = users::login(
        &mut persistence,
        &login_request("admin", PASSWORD),
        AuthenticationService::DEFAULT_SESSION_TTL,
    )
    .unwrap();

    users::logout(&mut persistence, &response.token).unwrap();

    let result = AuthenticationService::validate_session(&mut persistence, &response.token);
    assert!(result.is_err());
}

#[test]
fn test_register_creates_active_staff() {
    let (mut persistence, _admin) = setup();

    let user = users::register(&mut persistence, register_request("newcomer")).unwrap();
    assert_eq!(user.role, "staff");
    assert!(user.is_active);
    assert!(!user.is_superuser);
}

#[test]
fn test_register_rejects_duplicate_username_ignoring_case() {
    let (mut persistence, _admin) = setup();
    users::register(&mut persistence, register_request("reader")).unwrap();

    let result = users::register(&mut persistence, register_request("READER"));
    assert!(matches!(result, Err(ApiError::Conflict { .. })));
}

#[test]
fn test_register_rejects_short_username() {
    let (mut persistence, _admin) = setup();

    let err: ApiError = users::register(&mut persistence, register_request("ab")).unwrap_err();
    assert_eq!(err.field(), Some("username"));
}

#[test]
fn test_bootstrap_status_reports_user_count() {
    let mut persistence = bookstore_persistence::Persistence::new_in_memory().unwrap();

    let before = users::get_bootstrap_status(&mut persistence).unwrap();
    assert!(before.bootstrap_required);
    assert_eq!(before.user_count, 0);

    let admin = users::bootstrap(&mut persistence, register_request("owner")).unwrap();
    assert_eq!(admin.role, "admin");
    assert!(admin.is_superuser);

    let after = users::get_bootstrap_status(&mut persistence).unwrap();
    assert!(!after.bootstrap_required);
    assert_eq!(after.user_count, 1);
}

#[test]
fn test_second_bootstrap_is_a_conflict() {
    let (mut persistence, _admin) = setup();

    let result = users::bootstrap(&mut persistence, register_request("intruder"));
    assert!(matches!(result, Err(ApiError::Conflict { .. })));
}

#[test]
fn test_corrupt_session_is_an_internal_error() {
    let (mut persistence, admin) = setup();
    persistence
        .create_session("garbled-token", admin.user_id, "next tuesday")
        .unwrap();

    let result = AuthenticationService::validate_session(&mut persistence, "garbled-token");
    let err: AuthError = result.unwrap_err();
    assert!(matches!(err, AuthError::Internal { .. }));
    assert!(matches!(ApiError::from(err), ApiError::Internal { .. }));
}

#[test]
fn test_storage_failures_are_internal_and_hide_details() {
    let err: AuthError = AuthenticationService::map_persistence_error(PersistenceError::QueryFailed(
        String::from("disk I/O error on sessions"),
    ));

    match ApiError::from(err) {
        ApiError::Internal { message } => assert!(!message.contains("disk I/O")),
        other => panic!("expected an internal error, got {other:?}"),
    }
}
