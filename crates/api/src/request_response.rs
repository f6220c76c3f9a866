// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Enumerated fields arrive as strings and are parsed by the handlers, so
//! a bad value is reported as an input error naming the field.

use bookstore_domain::{BookStatus, PurchaseOrderStatus, SaleStatus, TransactionCategory, TransactionType};
use bookstore_persistence::{
    BookData, CategoryData, LedgerEntryData, PurchaseOrderData, SaleData, UserData,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Deserializes a field that distinguishes "absent" from "null".
///
/// Use with `#[serde(default, deserialize_with = "double_option")]`:
/// an absent field stays `None`, `null` becomes `Some(None)`.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ========================================================================
// Capabilities
// ========================================================================

/// Represents whether a specific action is permitted.
///
/// Serializes to JSON as true/false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Returns true if the capability is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Creates a capability from a boolean value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(self.is_allowed())
    }
}

impl<'de> Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        bool::deserialize(deserializer).map(Self::from_bool)
    }
}

/// What classes of action the current user may perform.
///
/// Advisory only; every handler re-checks authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalCapabilities {
    pub can_manage_users: Capability,
    pub can_manage_categories: Capability,
    pub can_edit_catalog: Capability,
    pub can_delete_books: Capability,
    pub can_manage_purchases: Capability,
    pub can_delete_purchases: Capability,
    pub can_record_sales: Capability,
    pub can_delete_sales: Capability,
    pub can_view_ledger: Capability,
    pub can_edit_ledger: Capability,
}

/// What the current user may do to one specific user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCapabilities {
    pub can_edit: Capability,
    /// False for oneself and for the last active admin.
    pub can_deactivate: Capability,
    /// False for oneself and for the last active admin.
    pub can_delete: Capability,
    pub can_reset_password: Capability,
}

/// One entry of the permission listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionInfo {
    pub value: String,
    pub label: String,
    /// Whether the current user holds this permission.
    pub granted: Capability,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionsResponse {
    /// The current user's role.
    pub role: String,
    pub permissions: Vec<PermissionInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleInfo {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolesResponse {
    pub roles: Vec<RoleInfo>,
}

// ========================================================================
// Authentication
// ========================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for the `Authorization` header.
    pub token: String,
    /// When the session expires (UTC, `YYYY-MM-DD HH:MM:SS`).
    pub expires_at: String,
    pub user: UserResponse,
    pub capabilities: GlobalCapabilities,
}

/// The current user and what they may do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    pub user: UserResponse,
    pub capabilities: GlobalCapabilities,
}

/// Self-registration of a staff account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub password_confirmation: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Whether the system still needs its first administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapStatusResponse {
    pub bootstrap_required: bool,
    pub user_count: i64,
}

/// Creation of the first superuser. Same fields as self-registration.
pub type BootstrapRequest = RegisterRequest;

/// A plain acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ========================================================================
// Users
// ========================================================================

/// A user account as exposed by the API. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
    pub created_at: String,
    pub updated_at: String,
    pub last_login_at: Option<String>,
}

impl From<UserData> for UserResponse {
    fn from(user: UserData) -> Self {
        Self {
            id: user.user_id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role.as_str().to_string(),
            gender: user.gender.map(|g| g.as_str().to_string()),
            phone: user.phone,
            address: user.address,
            department: user.department,
            position: user.position,
            is_active: user.is_active,
            is_superuser: user.is_superuser,
            created_at: user.created_at,
            updated_at: user.updated_at,
            last_login_at: user.last_login_at,
        }
    }
}

/// A user account together with what the caller may do to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetailResponse {
    pub user: UserResponse,
    pub capabilities: UserCapabilities,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUsersQuery {
    pub role: Option<String>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
}

/// API request to create a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub password_confirmation: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Defaults to `staff`.
    #[serde(default)]
    pub role: Option<String>,
    /// `M`, `F` or `O`.
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub is_superuser: Option<bool>,
}

/// Partial update of a user account by an administrator.
///
/// Absent fields are unchanged; `null` clears a nullable field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub gender: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub department: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub position: Option<Option<String>>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub is_superuser: Option<bool>,
}

/// Partial update of the caller's own profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub gender: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub department: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub position: Option<Option<String>>,
}

impl From<UpdateProfileRequest> for UpdateUserRequest {
    fn from(profile: UpdateProfileRequest) -> Self {
        Self {
            email: profile.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
            gender: profile.gender,
            phone: profile.phone,
            address: profile.address,
            department: profile.department,
            position: profile.position,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub new_password_confirmation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
    pub new_password_confirmation: String,
}

// ========================================================================
// Catalog
// ========================================================================

/// Create or replace a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Number of books filed under this category.
    pub book_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CategoryData> for CategoryResponse {
    fn from(category: CategoryData) -> Self {
        Self {
            id: category.category_id,
            name: category.name,
            description: category.description,
            book_count: category.book_count,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBooksQuery {
    /// Category ID.
    pub category: Option<i64>,
    pub status: Option<String>,
    /// Matches title, author, publisher or ISBN.
    pub search: Option<String>,
}

/// API request to add a book to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBookRequest {
    /// ISBN-10 or ISBN-13; hyphens and spaces are ignored.
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    #[serde(default)]
    pub category_id: Option<i64>,
    pub price: Decimal,
    /// Opening stock; defaults to zero.
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update of a book's catalog fields.
///
/// Stock and status are changed only through the stock and status actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBookRequest {
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub category_id: Option<Option<i64>>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
}

/// Manual stock correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStockRequest {
    /// Copies to add (positive) or remove (negative).
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeStatusRequest {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookResponse {
    pub id: i64,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub price: Decimal,
    pub stock: i64,
    pub status: BookStatus,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<BookData> for BookResponse {
    fn from(book: BookData) -> Self {
        Self {
            id: book.book_id,
            isbn: book.isbn,
            title: book.title,
            author: book.author,
            publisher: book.publisher,
            category_id: book.category_id,
            category_name: book.category_name,
            price: book.price,
            stock: book.stock,
            status: book.status,
            description: book.description,
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}

// ========================================================================
// Purchase orders
// ========================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPurchasesQuery {
    pub status: Option<String>,
    /// Book ID.
    pub book: Option<i64>,
    /// Matches supplier, book title or order number.
    pub search: Option<String>,
}

/// API request to order copies of an existing book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePurchaseRequest {
    pub book_id: i64,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub supplier: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// API request to order copies of a book that is not yet in the catalog.
///
/// The book is created with no stock and a retail price of the unit price
/// plus the standard markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePurchaseWithBookRequest {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub supplier: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePurchaseWithBookResponse {
    pub book: BookResponse,
    pub purchase_order: PurchaseOrderResponse,
}

/// Partial update of a pending purchase order. The total is recomputed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePurchaseRequest {
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub unit_price: Option<Decimal>,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrderResponse {
    pub id: i64,
    /// Display number, e.g. `PO-000042`.
    pub order_number: String,
    pub book_id: i64,
    pub book_title: String,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub total_amount: Decimal,
    pub supplier: String,
    pub notes: Option<String>,
    pub status: PurchaseOrderStatus,
    pub created_by: i64,
    pub created_by_username: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PurchaseOrderData> for PurchaseOrderResponse {
    fn from(order: PurchaseOrderData) -> Self {
        Self {
            id: order.purchase_order_id,
            order_number: order.order_number(),
            book_id: order.book_id,
            book_title: order.book_title,
            quantity: order.quantity,
            unit_price: order.unit_price,
            total_amount: order.total_amount,
            supplier: order.supplier,
            notes: order.notes,
            status: order.status,
            created_by: order.created_by,
            created_by_username: order.created_by_username,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

// ========================================================================
// Sales
// ========================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSalesQuery {
    pub status: Option<String>,
    /// Book ID.
    pub book: Option<i64>,
    /// Matches customer, book title or sale number.
    pub search: Option<String>,
}

/// API request to sell copies of one book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSaleRequest {
    pub book_id: i64,
    pub quantity: i64,
    /// Defaults to the book's list price.
    #[serde(default)]
    pub unit_price: Option<Decimal>,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleItemRequest {
    pub book_id: i64,
    pub quantity: i64,
    #[serde(default)]
    pub unit_price: Option<Decimal>,
}

/// API request to sell several books in one checkout. All lines are
/// recorded or none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSaleBatchRequest {
    pub items: Vec<SaleItemRequest>,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleBatchResponse {
    pub sales: Vec<SaleResponse>,
    /// Sum of the line totals.
    pub total_amount: Decimal,
}

/// Update of a sale's free-text fields. Quantity and price are fixed once
/// recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSaleRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub customer: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleResponse {
    pub id: i64,
    /// Display number, e.g. `SA-000042`.
    pub sale_number: String,
    pub book_id: i64,
    pub book_title: String,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub total_amount: Decimal,
    pub customer: Option<String>,
    pub notes: Option<String>,
    pub status: SaleStatus,
    pub created_by: i64,
    pub created_by_username: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<SaleData> for SaleResponse {
    fn from(sale: SaleData) -> Self {
        Self {
            id: sale.sale_id,
            sale_number: sale.sale_number(),
            book_id: sale.book_id,
            book_title: sale.book_title,
            quantity: sale.quantity,
            unit_price: sale.unit_price,
            total_amount: sale.total_amount,
            customer: sale.customer,
            notes: sale.notes,
            status: sale.status,
            created_by: sale.created_by,
            created_by_username: sale.created_by_username,
            created_at: sale.created_at,
            updated_at: sale.updated_at,
        }
    }
}

// ========================================================================
// Ledger
// ========================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListLedgerQuery {
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub category: Option<String>,
}

/// API request to record a manual ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLedgerEntryRequest {
    /// `income` or `expense`.
    pub transaction_type: String,
    pub category: String,
    pub amount: Decimal,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateLedgerEntryRequest {
    #[serde(default)]
    pub transaction_type: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntryResponse {
    pub id: i64,
    /// Display number, e.g. `FT-000042`.
    pub transaction_number: String,
    pub transaction_type: TransactionType,
    pub category: TransactionCategory,
    pub amount: Decimal,
    pub description: String,
    pub purchase_order_id: Option<i64>,
    pub sale_id: Option<i64>,
    /// Written by a purchase or sale; read-only.
    pub is_system: bool,
    pub created_by: i64,
    pub created_by_username: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<LedgerEntryData> for LedgerEntryResponse {
    fn from(entry: LedgerEntryData) -> Self {
        Self {
            id: entry.transaction_id,
            transaction_number: entry.transaction_number(),
            transaction_type: entry.transaction_type,
            category: entry.category,
            amount: entry.amount,
            description: entry.description,
            purchase_order_id: entry.purchase_order_id,
            sale_id: entry.sale_id,
            is_system: entry.is_system,
            created_by: entry.created_by,
            created_by_username: entry.created_by_username,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

// ========================================================================
// Inventory actions
// ========================================================================

/// Result of a stock-moving action: the book as it now stands and every
/// record the action touched or created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryActionResponse {
    pub message: String,
    pub book: BookResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_order: Option<PurchaseOrderResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale: Option<SaleResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_entry: Option<LedgerEntryResponse>,
}
