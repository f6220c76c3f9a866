// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bookstore_domain::Role;

use crate::{
    Action, AuthError, AuthenticatedActor, AuthorizationService, Capability, GlobalCapabilities,
    PermissionInfo, compute_global_capabilities, compute_permissions,
};

fn actor(role: Role) -> AuthenticatedActor {
    AuthenticatedActor {
        user_id: 1,
        username: format!("{role}-user"),
        role,
        is_superuser: false,
    }
}

#[test]
fn test_admin_may_do_everything() {
    let admin: AuthenticatedActor = actor(Role::Admin);
    for action in Action::ALL {
        assert!(
            AuthorizationService::authorize(&admin, action).is_ok(),
            "admin denied {}",
            action.code()
        );
    }
}

#[test]
fn test_manager_manages_stock_but_not_users_or_deletes() {
    let manager: AuthenticatedActor = actor(Role::Manager);

    for allowed in [
        Action::EditCatalog,
        Action::ManagePurchases,
        Action::RecordSales,
        Action::ViewLedger,
    ] {
        assert!(AuthorizationService::authorize(&manager, allowed).is_ok());
    }
    for denied in [
        Action::ManageUsers,
        Action::ManageCategories,
        Action::DeleteBook,
        Action::DeletePurchase,
        Action::DeleteSale,
        Action::EditLedger,
    ] {
        assert!(AuthorizationService::authorize(&manager, denied).is_err());
    }
}

#[test]
fn test_staff_may_only_record_sales() {
    let staff: AuthenticatedActor = actor(Role::Staff);

    let allowed: Vec<Action> = Action::ALL
        .into_iter()
        .filter(|action| AuthorizationService::authorize(&staff, *action).is_ok())
        .collect();
    assert_eq!(allowed, vec![Action::RecordSales]);
}

#[test]
fn test_denial_names_the_permitted_roles() {
    let staff: AuthenticatedActor = actor(Role::Staff);

    let err: AuthError = AuthorizationService::authorize(&staff, Action::ViewLedger).unwrap_err();
    assert_eq!(
        err,
        AuthError::Unauthorized {
            action: String::from("view_ledger"),
            required_role: format!("{} or {}", Role::Admin.label(), Role::Manager.label()),
        }
    );
}

#[test]
fn test_global_capabilities_follow_role() {
    let capabilities: GlobalCapabilities = compute_global_capabilities(&actor(Role::Manager));

    assert_eq!(capabilities.can_edit_catalog, Capability::Allowed);
    assert_eq!(capabilities.can_view_ledger, Capability::Allowed);
    assert_eq!(capabilities.can_edit_ledger, Capability::Denied);
    assert_eq!(capabilities.can_manage_users, Capability::Denied);
}

#[test]
fn test_permissions_list_every_action() {
    let permissions: Vec<PermissionInfo> = compute_permissions(&actor(Role::Staff));

    assert_eq!(permissions.len(), Action::ALL.len());
    let granted: Vec<&str> = permissions
        .iter()
        .filter(|p| p.granted.is_allowed())
        .map(|p| p.value.as_str())
        .collect();
    assert_eq!(granted, vec!["record_sales"]);
}

#[test]
fn test_capability_serializes_as_bool() {
    let json: String = serde_json::to_string(&Capability::Allowed).unwrap();
    assert_eq!(json, "true");
    let parsed: Capability = serde_json::from_str("false").unwrap();
    assert_eq!(parsed, Capability::Denied);
}
