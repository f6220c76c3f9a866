// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Records returned by queries and inputs accepted by mutations.

use bookstore::{BookSnapshot, PurchaseOrderSnapshot, SaleSnapshot};
use bookstore_domain::{
    BookStatus, Gender, PurchaseOrderStatus, Role, SaleStatus, TransactionCategory,
    TransactionType,
};
use rust_decimal::Decimal;

/// A stored user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserData {
    pub user_id: i64,
    pub username: String,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
    pub password_hash: String,
    pub created_at: String,
    pub updated_at: String,
    pub last_login_at: Option<String>,
}

/// A stored login session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub user_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryData {
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub book_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// A catalog book, joined with its category name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookData {
    pub book_id: i64,
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

impl BookData {
    /// The inventory view of this book.
    #[must_use]
    pub const fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            book_id: self.book_id,
            stock: self.stock,
            status: self.status,
            price: self.price,
        }
    }
}

/// A purchase order, joined with its book title and creator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseOrderData {
    pub purchase_order_id: i64,
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

impl PurchaseOrderData {
    /// Display number, e.g. `PO-000042`.
    #[must_use]
    pub fn order_number(&self) -> String {
        format!("PO-{:06}", self.purchase_order_id)
    }

    #[must_use]
    pub const fn snapshot(&self) -> PurchaseOrderSnapshot {
        PurchaseOrderSnapshot {
            order_id: self.purchase_order_id,
            book_id: self.book_id,
            quantity: self.quantity,
            total_amount: self.total_amount,
            status: self.status,
        }
    }
}

/// A sale, joined with its book title and creator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleData {
    pub sale_id: i64,
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

impl SaleData {
    /// Display number, e.g. `SA-000042`.
    #[must_use]
    pub fn sale_number(&self) -> String {
        format!("SA-{:06}", self.sale_id)
    }

    #[must_use]
    pub const fn snapshot(&self) -> SaleSnapshot {
        SaleSnapshot {
            sale_id: self.sale_id,
            book_id: self.book_id,
            quantity: self.quantity,
            total_amount: self.total_amount,
            status: self.status,
        }
    }
}

/// A ledger entry, joined with its creator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntryData {
    pub transaction_id: i64,
    pub transaction_type: TransactionType,
    pub category: TransactionCategory,
    pub amount: Decimal,
    pub description: String,
    pub purchase_order_id: Option<i64>,
    pub sale_id: Option<i64>,
    /// Written by an inventory transition; never edited by hand.
    pub is_system: bool,
    pub created_by: i64,
    pub created_by_username: String,
    pub created_at: String,
    pub updated_at: String,
}

impl LedgerEntryData {
    /// Display number, e.g. `FT-000042`.
    #[must_use]
    pub fn transaction_number(&self) -> String {
        format!("FT-{:06}", self.transaction_id)
    }
}

// ============================================================================
// Mutation inputs
// ============================================================================

/// Fields for a new user account. The password is hashed on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
}

/// Partial update of a user. `None` leaves a field unchanged; for nullable
/// fields `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub email: Option<Option<String>>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<Role>,
    pub gender: Option<Option<Gender>>,
    pub phone: Option<Option<String>>,
    pub address: Option<Option<String>>,
    pub department: Option<Option<String>>,
    pub position: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub is_superuser: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub is_active: Option<bool>,
    /// Matches username, names or email.
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub category_id: Option<i64>,
    pub price: Decimal,
    pub stock: i64,
    pub description: Option<String>,
}

/// Partial update of a book's catalog fields. Stock and status change only
/// through inventory transitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookUpdate {
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub category_id: Option<Option<i64>>,
    pub price: Option<Decimal>,
    pub description: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub category_id: Option<i64>,
    pub status: Option<BookStatus>,
    /// Matches title, author, publisher or ISBN.
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPurchaseOrder {
    pub book_id: i64,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub total_amount: Decimal,
    pub supplier: String,
    pub notes: Option<String>,
}

/// Replacement values for a pending purchase order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseOrderUpdate {
    pub quantity: i64,
    pub unit_price: Decimal,
    pub total_amount: Decimal,
    pub supplier: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurchaseOrderFilter {
    pub status: Option<PurchaseOrderStatus>,
    pub book_id: Option<i64>,
    /// Matches supplier, book title or order number.
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaleFilter {
    pub status: Option<SaleStatus>,
    pub book_id: Option<i64>,
    /// Matches customer, book title or sale number.
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLedgerEntry {
    pub transaction_type: TransactionType,
    pub category: TransactionCategory,
    pub amount: Decimal,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerEntryUpdate {
    pub transaction_type: Option<TransactionType>,
    pub category: Option<TransactionCategory>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerFilter {
    pub transaction_type: Option<TransactionType>,
    pub category: Option<TransactionCategory>,
}

/// Rows created while persisting an inventory transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersistedTransition {
    pub sale_id: Option<i64>,
    pub ledger_entry_id: Option<i64>,
}

/// An inventory operation named by record IDs.
///
/// The adapter loads the referenced rows inside the write transaction and
/// turns the request into a core `Command`, so the transition is computed
/// from the state it is written over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryRequest {
    AdjustStock {
        book_id: i64,
        delta: i64,
    },
    ChangeStatus {
        book_id: i64,
        status: BookStatus,
    },
    PayPurchaseOrder {
        purchase_order_id: i64,
    },
    ShelvePurchaseOrder {
        purchase_order_id: i64,
    },
    ReturnPurchaseOrder {
        purchase_order_id: i64,
    },
    RecordSale {
        book_id: i64,
        quantity: i64,
        unit_price: Option<Decimal>,
        customer: Option<String>,
        notes: Option<String>,
    },
    ReturnSale {
        sale_id: i64,
    },
}
