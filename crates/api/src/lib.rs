// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the bookstore backend.
//!
//! This crate authenticates sessions, authorizes actions by role,
//! validates requests and translates between transport DTOs and the
//! persistence layer. It knows nothing about HTTP; the server crate wraps
//! each handler in a route.
//!
//! ## Errors
//!
//! Domain, core and persistence errors are translated explicitly into
//! [`ApiError`], whose variants correspond one-to-one with HTTP status
//! classes.

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

mod auth;
mod capabilities;
mod error;
pub mod handlers;
mod password_policy;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{Action, AuthenticatedActor, AuthenticationService, AuthorizationService};
pub use capabilities::{
    compute_global_capabilities, compute_permissions, compute_user_capabilities,
    is_last_active_admin,
};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error, translate_inventory_error,
    translate_persistence_error,
};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    BookResponse, BootstrapRequest, BootstrapStatusResponse, Capability, CategoryRequest,
    CategoryResponse, ChangePasswordRequest, ChangeStatusRequest, CreateBookRequest,
    CreateLedgerEntryRequest, CreatePurchaseRequest, CreatePurchaseWithBookRequest,
    CreatePurchaseWithBookResponse, CreateSaleBatchRequest, CreateSaleRequest, CreateUserRequest,
    GlobalCapabilities, InventoryActionResponse, LedgerEntryResponse, ListBooksQuery,
    ListLedgerQuery, ListPurchasesQuery, ListSalesQuery, ListUsersQuery, LoginRequest,
    LoginResponse, MessageResponse, PermissionInfo, PermissionsResponse, PurchaseOrderResponse,
    RegisterRequest, ResetPasswordRequest, RoleInfo, RolesResponse, SaleBatchResponse,
    SaleItemRequest, SaleResponse, UpdateBookRequest, UpdateLedgerEntryRequest,
    UpdateProfileRequest, UpdatePurchaseRequest, UpdateSaleRequest, UpdateStockRequest,
    UpdateUserRequest, UserCapabilities, UserDetailResponse, UserResponse, WhoAmIResponse,
};
