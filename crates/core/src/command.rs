// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bookstore_domain::BookStatus;
use rust_decimal::Decimal;

use crate::state::{PurchaseOrderSnapshot, SaleSnapshot};

/// A command represents intent to move stock or money, as data only.
///
/// Commands are the only way to change a book's stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Manual stock correction by a signed amount.
    AdjustStock {
        /// Copies to add (positive) or remove (negative). Never zero.
        delta: i64,
    },
    /// Explicitly set a book's availability status.
    ChangeStatus {
        /// The requested status.
        status: BookStatus,
    },
    /// Pay the supplier for a pending purchase order.
    PayPurchaseOrder {
        /// The order being paid.
        order: PurchaseOrderSnapshot,
    },
    /// Put the copies of a paid purchase order on the shelf.
    ShelvePurchaseOrder {
        /// The order being shelved.
        order: PurchaseOrderSnapshot,
    },
    /// Send a pending purchase order back to the supplier.
    ReturnPurchaseOrder {
        /// The order being returned.
        order: PurchaseOrderSnapshot,
    },
    /// Sell copies of a book.
    RecordSale {
        /// Copies sold.
        quantity: i64,
        /// Price per copy; the book's list price when `None`.
        unit_price: Option<Decimal>,
        /// Customer name, if recorded.
        customer: Option<String>,
        /// Free-form notes.
        notes: Option<String>,
    },
    /// Take back the copies of a completed sale and refund the customer.
    ReturnSale {
        /// The sale being returned.
        sale: SaleSnapshot,
    },
}

impl Command {
    /// Stable name of the command, used for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AdjustStock { .. } => "AdjustStock",
            Self::ChangeStatus { .. } => "ChangeStatus",
            Self::PayPurchaseOrder { .. } => "PayPurchaseOrder",
            Self::ShelvePurchaseOrder { .. } => "ShelvePurchaseOrder",
            Self::ReturnPurchaseOrder { .. } => "ReturnPurchaseOrder",
            Self::RecordSale { .. } => "RecordSale",
            Self::ReturnSale { .. } => "ReturnSale",
        }
    }
}

/// One line of a multi-book sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleLine {
    pub book_id: i64,
    pub quantity: i64,
    pub unit_price: Option<Decimal>,
}
