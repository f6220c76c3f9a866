// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities expose what actions a user is permitted to perform
//! without leaking domain internals. They are advisory only and do not
//! replace backend authorization checks.

use bookstore_domain::Role;
use bookstore_persistence::{Persistence, UserData};

use crate::auth::{Action, AuthenticatedActor};
use crate::error::{ApiError, translate_persistence_error};
use crate::request_response::{
    Capability, GlobalCapabilities, PermissionInfo, UserCapabilities,
};

/// Computes global capabilities for an authenticated user.
#[must_use]
pub fn compute_global_capabilities(actor: &AuthenticatedActor) -> GlobalCapabilities {
    let can = |action: Action| Capability::from_bool(action.permits(actor.role));

    GlobalCapabilities {
        can_manage_users: can(Action::ManageUsers),
        can_manage_categories: can(Action::ManageCategories),
        can_edit_catalog: can(Action::EditCatalog),
        can_delete_books: can(Action::DeleteBook),
        can_manage_purchases: can(Action::ManagePurchases),
        can_delete_purchases: can(Action::DeletePurchase),
        can_record_sales: can(Action::RecordSales),
        can_delete_sales: can(Action::DeleteSale),
        can_view_ledger: can(Action::ViewLedger),
        can_edit_ledger: can(Action::EditLedger),
    }
}

/// Lists every guarded action with whether the actor holds it.
#[must_use]
pub fn compute_permissions(actor: &AuthenticatedActor) -> Vec<PermissionInfo> {
    Action::ALL
        .iter()
        .map(|action| PermissionInfo {
            value: action.code().to_string(),
            label: action.label().to_string(),
            granted: Capability::from_bool(action.permits(actor.role)),
        })
        .collect()
}

/// Whether `target` is the only active administrator left.
///
/// # Errors
///
/// Returns an error if the admin count cannot be read.
pub fn is_last_active_admin(
    persistence: &mut Persistence,
    target: &UserData,
) -> Result<bool, ApiError> {
    if target.role != Role::Admin || !target.is_active {
        return Ok(false);
    }

    let active_admins: i64 = persistence
        .count_active_admins()
        .map_err(|e| translate_persistence_error("User", e))?;
    Ok(active_admins <= 1)
}

/// Computes what the actor may do to one user account.
///
/// Non-admins get no capabilities. Nobody may deactivate or delete
/// themselves or the last active admin.
///
/// # Errors
///
/// Returns an error if the admin count cannot be read.
pub fn compute_user_capabilities(
    actor: &AuthenticatedActor,
    target: &UserData,
    persistence: &mut Persistence,
) -> Result<UserCapabilities, ApiError> {
    if !Action::ManageUsers.permits(actor.role) {
        return Ok(UserCapabilities {
            can_edit: Capability::Denied,
            can_deactivate: Capability::Denied,
            can_delete: Capability::Denied,
            can_reset_password: Capability::Denied,
        });
    }

    let protected: bool =
        actor.is_user(target.user_id) || is_last_active_admin(persistence, target)?;

    Ok(UserCapabilities {
        can_edit: Capability::Allowed,
        can_deactivate: Capability::from_bool(!protected),
        can_delete: Capability::from_bool(!protected),
        can_reset_password: Capability::Allowed,
    })
}
