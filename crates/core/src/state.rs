// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bookstore_domain::{
    BookStatus, PurchaseOrderStatus, SaleStatus, TransactionCategory, TransactionType,
};
use rust_decimal::Decimal;

/// The inventory-relevant fields of a book at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSnapshot {
    pub book_id: i64,
    pub stock: i64,
    pub status: BookStatus,
    /// List price, used when a sale omits its unit price.
    pub price: Decimal,
}

/// The fields of a purchase order that its transitions depend on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseOrderSnapshot {
    pub order_id: i64,
    pub book_id: i64,
    pub quantity: i64,
    pub total_amount: Decimal,
    pub status: PurchaseOrderStatus,
}

/// The fields of a sale that its transitions depend on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleSnapshot {
    pub sale_id: i64,
    pub book_id: i64,
    pub quantity: i64,
    pub total_amount: Decimal,
    pub status: SaleStatus,
}

/// A status move on an existing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange<S> {
    /// The record being moved.
    pub id: i64,
    pub from: S,
    pub to: S,
}

/// A sale row to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleDraft {
    pub book_id: i64,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub total_amount: Decimal,
    pub customer: Option<String>,
    pub notes: Option<String>,
}

/// What a ledger draft should be linked to once written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerReference {
    /// An existing purchase order.
    PurchaseOrder(i64),
    /// An existing sale.
    Sale(i64),
    /// The sale inserted by the same transition.
    NewSale,
}

/// A ledger entry to be inserted alongside a stock change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerDraft {
    pub transaction_type: TransactionType,
    pub category: TransactionCategory,
    pub amount: Decimal,
    pub description: String,
    pub reference: LedgerReference,
}

/// The result of a successful inventory transition.
///
/// Transitions are atomic: the stock change, status moves, new sale and
/// ledger entry are all written together or not at all. `previous_stock`
/// and `previous_status` describe the book row the transition was computed
/// from, so the writer can detect a concurrent change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// Name of the command that produced this transition.
    pub action: &'static str,
    /// Human-readable summary for logs.
    pub details: String,
    pub book_id: i64,
    pub previous_stock: i64,
    pub new_stock: i64,
    pub previous_status: BookStatus,
    pub new_status: BookStatus,
    pub purchase_order: Option<StatusChange<PurchaseOrderStatus>>,
    pub sale: Option<StatusChange<SaleStatus>>,
    pub new_sale: Option<SaleDraft>,
    pub ledger: Option<LedgerDraft>,
}

impl TransitionResult {
    /// The book as it stands after this transition.
    #[must_use]
    pub fn book_after(&self, before: &BookSnapshot) -> BookSnapshot {
        BookSnapshot {
            book_id: self.book_id,
            stock: self.new_stock,
            status: self.new_status,
            price: before.price,
        }
    }

    /// Whether the transition changes the book row at all.
    #[must_use]
    pub fn touches_book(&self) -> bool {
        self.previous_stock != self.new_stock || self.previous_status != self.new_status
    }
}
