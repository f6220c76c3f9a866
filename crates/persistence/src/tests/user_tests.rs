// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User and session persistence tests.

use bookstore_domain::{Gender, Role};

use super::{new_user, setup};
use crate::{NewUser, Persistence, PersistenceError, SessionData, UserData, UserFilter, UserUpdate};

#[test]
fn test_create_user_hashes_password() {
    let (mut persistence, admin_id) = setup();

    let user: UserData = persistence.get_user_by_id(admin_id).unwrap().unwrap();

    assert_eq!(user.username, "admin");
    assert_ne!(user.password_hash, "password123");
    assert!(persistence.verify_password("password123", &user.password_hash).unwrap());
    assert!(!persistence.verify_password("wrong", &user.password_hash).unwrap());
}

#[test]
fn test_superuser_is_stored_as_admin() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let mut user: NewUser = new_user("root", Role::Staff);
    user.is_superuser = true;

    let user_id: i64 = persistence.create_user(&user).unwrap();
    let stored: UserData = persistence.get_user_by_id(user_id).unwrap().unwrap();

    assert!(stored.is_superuser);
    assert_eq!(stored.role, Role::Admin);
}

#[test]
fn test_update_cannot_demote_superuser() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let mut user: NewUser = new_user("root", Role::Admin);
    user.is_superuser = true;
    let user_id: i64 = persistence.create_user(&user).unwrap();

    let updated: UserData = persistence
        .update_user(
            user_id,
            &UserUpdate {
                role: Some(Role::Staff),
                ..UserUpdate::default()
            },
        )
        .unwrap();

    assert_eq!(updated.role, Role::Admin);
}

#[test]
fn test_promoting_to_superuser_sets_admin_role() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let user_id: i64 = persistence.create_user(&new_user("carol", Role::Staff)).unwrap();

    let updated: UserData = persistence
        .update_user(
            user_id,
            &UserUpdate {
                is_superuser: Some(true),
                ..UserUpdate::default()
            },
        )
        .unwrap();

    assert!(updated.is_superuser);
    assert_eq!(updated.role, Role::Admin);
}

#[test]
fn test_update_user_merges_fields() {
    let (mut persistence, admin_id) = setup();

    let updated: UserData = persistence
        .update_user(
            admin_id,
            &UserUpdate {
                first_name: Some(String::from("Ada")),
                gender: Some(Some(Gender::Female)),
                email: Some(None),
                ..UserUpdate::default()
            },
        )
        .unwrap();

    assert_eq!(updated.first_name, "Ada");
    assert_eq!(updated.last_name, "User");
    assert_eq!(updated.gender, Some(Gender::Female));
    assert_eq!(updated.email, None);
}

#[test]
fn test_update_missing_user_is_not_found() {
    let (mut persistence, _) = setup();

    let result: Result<UserData, PersistenceError> =
        persistence.update_user(999, &UserUpdate::default());

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_username_lookup_is_case_insensitive() {
    let (mut persistence, admin_id) = setup();

    let user: UserData = persistence.get_user_by_username("ADMIN").unwrap().unwrap();

    assert_eq!(user.user_id, admin_id);
    assert_eq!(user.username, "admin");
}

#[test]
fn test_duplicate_username_is_rejected() {
    let (mut persistence, _) = setup();

    let result: Result<i64, PersistenceError> =
        persistence.create_user(&new_user("Admin", Role::Staff));

    assert!(matches!(result, Err(PersistenceError::UniqueViolation(_))));
}

#[test]
fn test_list_users_filters() {
    let (mut persistence, _) = setup();
    persistence.create_user(&new_user("manny", Role::Manager)).unwrap();
    let staff_id: i64 = persistence.create_user(&new_user("stella", Role::Staff)).unwrap();
    persistence.set_user_active(staff_id, false).unwrap();

    let managers: Vec<UserData> = persistence
        .list_users(&UserFilter {
            role: Some(Role::Manager),
            ..UserFilter::default()
        })
        .unwrap();
    assert_eq!(managers.len(), 1);
    assert_eq!(managers[0].username, "manny");

    let inactive: Vec<UserData> = persistence
        .list_users(&UserFilter {
            is_active: Some(false),
            ..UserFilter::default()
        })
        .unwrap();
    assert_eq!(inactive.len(), 1);
    assert_eq!(inactive[0].username, "stella");

    let searched: Vec<UserData> = persistence
        .list_users(&UserFilter {
            search: Some(String::from("stel")),
            ..UserFilter::default()
        })
        .unwrap();
    assert_eq!(searched.len(), 1);
}

#[test]
fn test_count_active_admins_ignores_inactive() {
    let (mut persistence, _) = setup();
    let second: i64 = persistence.create_user(&new_user("admin2", Role::Admin)).unwrap();
    assert_eq!(persistence.count_active_admins().unwrap(), 2);

    persistence.set_user_active(second, false).unwrap();

    assert_eq!(persistence.count_active_admins().unwrap(), 1);
}

#[test]
fn test_update_password_replaces_hash() {
    let (mut persistence, admin_id) = setup();

    persistence.update_password(admin_id, "newpass456").unwrap();
    let user: UserData = persistence.get_user_by_id(admin_id).unwrap().unwrap();

    assert!(persistence.verify_password("newpass456", &user.password_hash).unwrap());
    assert!(!persistence.verify_password("password123", &user.password_hash).unwrap());
}

#[test]
fn test_update_last_login_sets_timestamp() {
    let (mut persistence, admin_id) = setup();
    assert!(persistence.get_user_by_id(admin_id).unwrap().unwrap().last_login_at.is_none());

    persistence.update_last_login(admin_id).unwrap();

    assert!(persistence.get_user_by_id(admin_id).unwrap().unwrap().last_login_at.is_some());
}

#[test]
fn test_delete_user_cascades_sessions() {
    let (mut persistence, _) = setup();
    let user_id: i64 = persistence.create_user(&new_user("temp", Role::Staff)).unwrap();
    persistence
        .create_session("token-temp", user_id, "2099-01-01 00:00:00")
        .unwrap();

    persistence.delete_user(user_id).unwrap();

    assert!(persistence.get_user_by_id(user_id).unwrap().is_none());
    assert!(persistence.get_session_by_token("token-temp").unwrap().is_none());
}

#[test]
fn test_delete_missing_user_is_not_found() {
    let (mut persistence, _) = setup();

    let result: Result<(), PersistenceError> = persistence.delete_user(999);

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_session_lifecycle() {
    let (mut persistence, admin_id) = setup();

    let session_id: i64 = persistence
        .create_session("token-1", admin_id, "2099-01-01 00:00:00")
        .unwrap();
    let session: SessionData = persistence.get_session_by_token("token-1").unwrap().unwrap();
    assert_eq!(session.session_id, session_id);
    assert_eq!(session.user_id, admin_id);

    persistence.update_session_activity(session_id).unwrap();
    persistence.delete_session("token-1").unwrap();

    assert!(persistence.get_session_by_token("token-1").unwrap().is_none());
}

#[test]
fn test_delete_expired_sessions_keeps_live_ones() {
    let (mut persistence, admin_id) = setup();
    persistence
        .create_session("expired", admin_id, "2000-01-01 00:00:00")
        .unwrap();
    persistence
        .create_session("live", admin_id, "2099-01-01 00:00:00")
        .unwrap();

    let deleted: usize = persistence.delete_expired_sessions().unwrap();

    assert_eq!(deleted, 1);
    assert!(persistence.get_session_by_token("expired").unwrap().is_none());
    assert!(persistence.get_session_by_token("live").unwrap().is_some());
}

#[test]
fn test_delete_sessions_for_user() {
    let (mut persistence, admin_id) = setup();
    persistence.create_session("a", admin_id, "2099-01-01 00:00:00").unwrap();
    persistence.create_session("b", admin_id, "2099-01-01 00:00:00").unwrap();

    assert_eq!(persistence.delete_sessions_for_user(admin_id).unwrap(), 2);
}
