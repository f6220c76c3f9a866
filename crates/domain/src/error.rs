// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A string did not name a known role.
    #[error("Invalid role: '{0}'. Must be one of admin, manager, staff")]
    InvalidRole(String),
    /// A string did not name a known gender code.
    #[error("Invalid gender: '{0}'. Must be one of M, F, O")]
    InvalidGender(String),
    /// A string did not name a known book status.
    #[error("Invalid book status: '{0}'")]
    InvalidBookStatus(String),
    /// A string did not name a known purchase order status.
    #[error("Invalid purchase order status: '{0}'")]
    InvalidPurchaseOrderStatus(String),
    /// A string did not name a known sale status.
    #[error("Invalid sale status: '{0}'")]
    InvalidSaleStatus(String),
    /// A string did not name a known ledger entry type.
    #[error("Invalid transaction type: '{0}'. Must be income or expense")]
    InvalidTransactionType(String),
    /// A string did not name a known ledger category.
    #[error("Invalid transaction category: '{0}'")]
    InvalidTransactionCategory(String),
    /// Username failed the format rules.
    #[error("Invalid username: {reason}")]
    InvalidUsername {
        /// Why the username was rejected.
        reason: String,
    },
    /// Email address failed the format rules.
    #[error("Invalid email address: '{0}'")]
    InvalidEmail(String),
    /// ISBN failed normalization or checksum validation.
    #[error("Invalid ISBN '{isbn}': {reason}")]
    InvalidIsbn {
        /// The ISBN as supplied.
        isbn: String,
        /// Why the ISBN was rejected.
        reason: String,
    },
    /// A required text field was empty.
    #[error("Field '{field}' must not be empty")]
    EmptyField {
        /// The field name.
        field: &'static str,
    },
    /// A text field exceeded its maximum length.
    #[error("Field '{field}' must be at most {max} characters")]
    FieldTooLong {
        /// The field name.
        field: &'static str,
        /// The maximum permitted length.
        max: usize,
    },
    /// A monetary amount was out of range or had too many decimal places.
    #[error("Invalid amount for '{field}': {reason}")]
    InvalidAmount {
        /// The field name.
        field: &'static str,
        /// Why the amount was rejected.
        reason: String,
    },
    /// A quantity was not strictly positive.
    #[error("Invalid quantity for '{field}': {value}. Must be greater than 0")]
    InvalidQuantity {
        /// The field name.
        field: &'static str,
        /// The rejected value.
        value: i64,
    },
    /// A stock adjustment was zero or would drive stock negative.
    #[error("Invalid stock adjustment: {reason}")]
    InvalidStockAdjustment {
        /// Why the adjustment was rejected.
        reason: String,
    },
    /// A status change is not permitted from the current status.
    #[error("Invalid {entity} status transition from '{from}' to '{to}'")]
    InvalidStatusTransition {
        /// The kind of record (`purchase order`, `sale`, `book`).
        entity: &'static str,
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },
    /// A sale asked for more copies than are on the shelf.
    #[error("Insufficient stock for book {book_id}: requested {requested}, available {available}")]
    InsufficientStock {
        /// The book being sold.
        book_id: i64,
        /// The quantity requested.
        requested: i64,
        /// The quantity on hand.
        available: i64,
    },
    /// The book cannot be sold in its current status.
    #[error("Book {book_id} is not available for sale (status: {status})")]
    BookNotAvailable {
        /// The book being sold.
        book_id: i64,
        /// The book's current status.
        status: String,
    },
    /// A requested book status disagrees with the book's stock.
    #[error("Book status '{status}' is inconsistent with stock {stock}")]
    StatusStockMismatch {
        /// The requested status.
        status: String,
        /// The current stock.
        stock: i64,
    },
    /// Line totals overflowed the supported decimal range.
    #[error("Amount overflow computing {quantity} x {unit_price}")]
    AmountOverflow {
        /// The quantity.
        quantity: i64,
        /// The unit price.
        unit_price: Decimal,
    },
}
