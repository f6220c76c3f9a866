// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{BookSnapshot, PurchaseOrderSnapshot, SaleSnapshot};
use bookstore_domain::{BookStatus, PurchaseOrderStatus, SaleStatus};
use rust_decimal::Decimal;
use std::str::FromStr;

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn create_test_book(book_id: i64, stock: i64) -> BookSnapshot {
    BookSnapshot {
        book_id,
        stock,
        status: BookStatus::derive(BookStatus::InStock, stock),
        price: dec("25.00"),
    }
}

pub fn create_test_order(book_id: i64, quantity: i64, status: PurchaseOrderStatus) -> PurchaseOrderSnapshot {
    PurchaseOrderSnapshot {
        order_id: 11,
        book_id,
        quantity,
        total_amount: dec("12.50") * Decimal::from(quantity),
        status,
    }
}

pub fn create_test_sale(book_id: i64, quantity: i64, status: SaleStatus) -> SaleSnapshot {
    SaleSnapshot {
        sale_id: 21,
        book_id,
        quantity,
        total_amount: dec("25.00") * Decimal::from(quantity),
        status,
    }
}
